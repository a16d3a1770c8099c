//! Poem list generator
//!
//! Poems live as `YYYY-MM-DD...txt` files; the list is written as a JS
//! array the personal site loads.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Prefix for every entry in the generated list
const POEM_PREFIX: &str = "poems";

/// Date-prefixed `.txt` file names directly under `dir`, newest first
pub fn poem_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read {:?}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if is_poem_file(name) {
            names.push(name.to_string());
        }
    }

    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

/// A `.txt` file whose first ten characters hold exactly two dashes
fn is_poem_file(name: &str) -> bool {
    name.ends_with(".txt") && name.chars().take(10).filter(|&c| c == '-').count() == 2
}

/// The JS source declaring `poemFiles`
pub fn render_list(names: &[String]) -> String {
    let mut out = String::from("const poemFiles = [\n");
    for name in names {
        out.push_str(&format!("  \"{}/{}\",\n", POEM_PREFIX, name));
    }
    out.push_str("];\n");
    out
}

/// Scan `dir` and write the list to `output`
pub fn run(dir: &Path, output: &Path) -> Result<()> {
    let names = poem_files(dir)?;
    fs::write(output, render_list(&names))
        .with_context(|| format!("Failed to write {:?}", output))?;

    tracing::info!("Listed {} poems", names.len());
    println!("{} generated.", output.display());
    Ok(())
}
