use std::env;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("bundled_songs.rs");

    let mut code = String::new();
    code.push_str("/// Song files embedded from the `songs/` directory\n");
    code.push_str("pub static BUNDLED_SONGS: &[(&str, &str)] = &[\n");

    let songs_dir = Path::new("songs");

    if songs_dir.exists() {
        let mut entries: Vec<_> = WalkDir::new(songs_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "song"))
            .collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        for entry in entries {
            let path = entry.path();
            let relative_path = path.strip_prefix(songs_dir).unwrap().with_extension("");
            let id = relative_path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");

            if let Ok(content) = fs::read_to_string(path) {
                // Debug formatting yields a valid Rust string literal
                code.push_str(&format!("    ({:?}, {:?}),\n", id, content));
            }
        }
    }

    code.push_str("];\n");

    fs::write(&dest_path, code).unwrap();

    println!("cargo:rerun-if-changed=songs");
}
