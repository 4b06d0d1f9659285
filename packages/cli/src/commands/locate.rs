use super::{display_path, load_document};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use nodeflow_editor::Document;
use nodeflow_tree::{byte_offset_to_line_col, find_by_path};
use std::ops::Range;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// JSON file to search
    pub input: PathBuf,

    /// Member keys from the root down, e.g. `settings zoom` or `members [0]`
    pub path: Vec<String>,

    /// Search the text for key labels instead of using render spans
    #[arg(long)]
    pub heuristic: bool,
}

pub fn locate(args: LocateArgs, cwd: &str) -> Result<()> {
    let document = load_document(&args.input, cwd)?;
    let range = locate_in(&document, &args.path, args.heuristic)?;
    let source = document.source();

    // Positions are reported 1-indexed.
    let (start_line, start_col) = byte_offset_to_line_col(source, range.start);
    let (end_line, end_col) = byte_offset_to_line_col(source, range.end);

    println!(
        "{} {}:{}-{}:{}",
        display_path(&args.path).bold(),
        start_line + 1,
        start_col + 1,
        end_line + 1,
        end_col + 1
    );
    println!("{}", source[range].dimmed());

    Ok(())
}

/// Byte range of the node at `path` in the document's text
pub fn locate_in(document: &Document, path: &[String], heuristic: bool) -> Result<Range<usize>> {
    let node = find_by_path(document.tree(), path)
        .ok_or_else(|| anyhow!("No node at path '{}'", display_path(path)))?;

    let range = if heuristic {
        document.locate_node(&node.id)
    } else {
        document.selection_range(&node.id)
    };

    range.ok_or_else(|| anyhow!("Could not find the text of '{}'", display_path(path)))
}
