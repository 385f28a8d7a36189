// Embeds everything under `assets/` into the binary.
//
// Generates `$OUT_DIR/embedded_assets.rs` containing a sorted static table of
// `EmbeddedAsset { path, bytes }`, where `path` is relative to `assets/` and
// always uses `/` as separator.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const ASSETS_DIR: &str = "assets";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed={ASSETS_DIR}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?);
    let root = manifest_dir.join(ASSETS_DIR);

    let mut files = Vec::new();
    if root.is_dir() {
        collect_files(&root, &root, &mut files)?;
    }
    files.sort();

    let mut out = String::from("pub static EMBEDDED_ASSETS: &[EmbeddedAsset] = &[\n");
    for (relative, absolute) in &files {
        println!("cargo:rerun-if-changed={}", absolute.display());
        let _ = writeln!(
            out,
            "    EmbeddedAsset {{ path: {relative:?}, bytes: include_bytes!({:?}) }},",
            absolute.display().to_string()
        );
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(io::Error::other)?);
    fs::write(out_dir.join("embedded_assets.rs"), out)
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(String, PathBuf)>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push((relative, path));
    }
    Ok(())
}
