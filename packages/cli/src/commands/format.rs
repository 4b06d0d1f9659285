use super::load_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// JSON file to format
    pub input: PathBuf,

    /// Write the result back to the file instead of stdout
    #[arg(short, long)]
    pub write: bool,
}

pub fn format(args: FormatArgs, cwd: &str) -> Result<()> {
    let document = load_document(&args.input, cwd)?;

    if args.write {
        fs::write(&args.input, format!("{}\n", document.source()))?;
        println!("  {} {}", "✓".green(), args.input.display());
    } else {
        println!("{}", document.source());
    }

    Ok(())
}
