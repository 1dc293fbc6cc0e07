use std::path::{Path, PathBuf};
use std::process;

use chordsheet::{
    interval, render_song, transpose, DirectoryRepository, FallbackRepository, MemoryRepository,
    Result, SearchIndex, SongError, SongRepository,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SongError::Logging(e.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List(args) => execute_list(&open_repository(cli.songs.as_deref()), args),
        Command::Show(args) => execute_show(&open_repository(cli.songs.as_deref()), args),
        Command::Transpose(args) => {
            println!("{}", transpose(&args.chords.join(" "), args.steps));
            Ok(())
        }
    }
}

/// The bundled library, behind the songs directory when one is given.
fn open_repository(songs: Option<&Path>) -> Box<dyn SongRepository> {
    match songs {
        Some(dir) => Box::new(FallbackRepository::new(
            DirectoryRepository::new(dir),
            MemoryRepository::bundled(),
        )),
        None => Box::new(MemoryRepository::bundled()),
    }
}

fn execute_list(repository: &dyn SongRepository, args: ListArgs) -> Result<()> {
    let index = SearchIndex::new(repository.list()?);
    let results = index.search(args.query.as_deref().unwrap_or_default());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for song in results {
        let mut entry = format!("{}\t{}", song.id, song.title);
        if let Some(artist) = &song.artist {
            entry.push_str(&format!(" - {}", artist));
        }
        if let Some(key) = &song.key {
            entry.push_str(&format!(" [{}]", key));
        }
        println!("{}", entry);
    }
    Ok(())
}

fn execute_show(repository: &dyn SongRepository, args: ShowArgs) -> Result<()> {
    let song = repository.load(&args.id)?;

    let steps = match &args.to_key {
        Some(target) => {
            let key = song.metadata.key.as_deref().ok_or_else(|| {
                SongError::MetadataError(format!(
                    "song '{}' has no key; use --transpose instead",
                    song.id
                ))
            })?;
            interval(key, target)
                .ok_or_else(|| SongError::MetadataError(format!("Unknown key: {}", target)))?
        }
        None => args.transpose,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&song.transposed(steps))?);
    } else {
        print!("{}", render_song(&song, steps));
    }
    Ok(())
}

#[derive(Parser)]
#[command(author, version, about = "Chord sheets with live transposition.")]
struct Cli {
    /// Directory of .song files, searched before the bundled library.
    #[arg(long, global = true, env = "CHORDSHEET_SONGS")]
    songs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List songs, optionally filtered by title or artist.
    List(ListArgs),
    /// Print a song with its chords transposed.
    Show(ShowArgs),
    /// Transpose chords given on the command line.
    Transpose(TransposeArgs),
}

#[derive(clap::Args)]
struct ListArgs {
    /// Words that must all appear in the title or artist.
    #[arg(long, short)]
    query: Option<String>,

    /// Print the listing as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct ShowArgs {
    /// Song id, e.g. "amazing-grace".
    id: String,

    /// Semitones to shift every chord by.
    #[arg(long, short, default_value_t = 0, allow_negative_numbers = true, conflicts_with = "to_key")]
    transpose: i32,

    /// Transpose from the song's key to this key.
    #[arg(long)]
    to_key: Option<String>,

    /// Print the transposed song as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct TransposeArgs {
    /// Semitones to shift by; may be negative.
    #[arg(allow_negative_numbers = true)]
    steps: i32,

    /// Chords to transpose, e.g. G D/F# Am7
    #[arg(required = true, num_args = 1..)]
    chords: Vec<String>,
}
