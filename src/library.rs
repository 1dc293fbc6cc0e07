//! # Song Library
//!
//! Sources of song documents.
//!
//! - [`DirectoryRepository`] - `*.song` files under a directory tree
//! - [`MemoryRepository`] - in-memory sources, including the songs bundled at build time
//! - [`FallbackRepository`] - asks a primary repository first and falls back to a second
//!
//! Song ids are paths relative to the repository root, `/`-separated, without the
//! `.song` extension (`hymns/amazing-grace`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::ast::{Song, SongSummary};
use crate::error::{Result, SongError};
use crate::parser::parse_song;

mod bundled {
    include!(concat!(env!("OUT_DIR"), "/bundled_songs.rs"));
}

/// File extension of song documents
pub const SONG_EXTENSION: &str = "song";

pub trait SongRepository {
    /// Summaries of every readable song, sorted by title.
    fn list(&self) -> Result<Vec<SongSummary>>;

    /// Load one song by id.
    fn load(&self, id: &str) -> Result<Song>;
}

impl<R: SongRepository + ?Sized> SongRepository for Box<R> {
    fn list(&self) -> Result<Vec<SongSummary>> {
        (**self).list()
    }

    fn load(&self, id: &str) -> Result<Song> {
        (**self).load(id)
    }
}

fn sort_summaries(summaries: &mut [SongSummary]) {
    summaries.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Songs stored as `*.song` files below a root directory
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    root: PathBuf,
}

impl DirectoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `id`, or `None` if the id could escape the root.
    fn song_path(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && id
                .split('/')
                .all(|part| !part.is_empty() && part != "." && part != "..");
        if !valid {
            return None;
        }
        Some(self.root.join(format!("{}.{}", id, SONG_EXTENSION)))
    }

    fn song_id(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn song_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| SongError::Io(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map_or(true, |ext| ext != SONG_EXTENSION)
            {
                continue;
            }
            if let Some(id) = self.song_id(path) {
                files.push((id, path.to_path_buf()));
            }
        }
        Ok(files)
    }
}

impl SongRepository for DirectoryRepository {
    #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> Result<Vec<SongSummary>> {
        let mut summaries = Vec::new();
        for (id, path) in self.song_files()? {
            let song = fs::read_to_string(&path)
                .map_err(SongError::from)
                .and_then(|source| parse_song(&id, &source));
            match song {
                Ok(song) => summaries.push(song.summary()),
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable song"),
            }
        }
        sort_summaries(&mut summaries);
        debug!(count = summaries.len(), "listed songs");
        Ok(summaries)
    }

    #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
    fn load(&self, id: &str) -> Result<Song> {
        let path = self
            .song_path(id)
            .filter(|path| path.is_file())
            .ok_or_else(|| SongError::NotFound(id.to_string()))?;
        let source = fs::read_to_string(&path)?;
        parse_song(id, &source)
    }
}

/// Songs held in memory as unparsed sources
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    sources: BTreeMap<String, String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// The songs embedded from `songs/` when the crate was built.
    pub fn bundled() -> Self {
        bundled::BUNDLED_SONGS
            .iter()
            .fold(Self::new(), |repo, (id, source)| repo.with_song(*id, *source))
    }

    pub fn with_song(mut self, id: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(id, source);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(id.into(), source.into());
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SongRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<SongSummary>> {
        let mut summaries = Vec::new();
        for (id, source) in &self.sources {
            match parse_song(id, source) {
                Ok(song) => summaries.push(song.summary()),
                Err(error) => warn!(%id, %error, "skipping unreadable song"),
            }
        }
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    fn load(&self, id: &str) -> Result<Song> {
        let source = self
            .sources
            .get(id)
            .ok_or_else(|| SongError::NotFound(id.to_string()))?;
        parse_song(id, source)
    }
}

/// Answers from `primary`, or from `fallback` whenever `primary` fails.
#[derive(Debug, Clone)]
pub struct FallbackRepository<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackRepository<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SongRepository, F: SongRepository> SongRepository for FallbackRepository<P, F> {
    fn list(&self) -> Result<Vec<SongSummary>> {
        match self.primary.list() {
            Ok(summaries) => Ok(summaries),
            Err(error) => {
                warn!(%error, "song list unavailable, using fallback");
                self.fallback.list()
            }
        }
    }

    fn load(&self, id: &str) -> Result<Song> {
        match self.primary.load(id) {
            Ok(song) => Ok(song),
            Err(error) => {
                warn!(%id, %error, "song unavailable, using fallback");
                self.fallback.load(id)
            }
        }
    }
}
