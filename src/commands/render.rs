//! Render a markdown file (or stdin) to HTML

use anyhow::{Context, Result};
use std::io::Read;

use crate::content::render_markdown;

/// Render `input` (a path, or `-` for stdin) and print the HTML
pub fn run(input: &str) -> Result<()> {
    let markdown = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    println!("{}", render_markdown(&markdown));
    Ok(())
}
