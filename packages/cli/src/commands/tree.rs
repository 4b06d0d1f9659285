use super::load_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nodeflow_tree::{count_nodes, Node, NodeBody};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// JSON file to inspect
    pub input: PathBuf,

    /// Show node ids
    #[arg(long)]
    pub ids: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let document = load_document(&args.input, cwd)?;
    let root = document.tree();

    for line in outline(root) {
        let indent = "  ".repeat(line.depth);
        let key = if line.is_container {
            line.key.bold()
        } else {
            line.key.cyan()
        };

        if args.ids {
            println!("{}{} {} {}", indent, key, line.detail, line.id.dimmed());
        } else {
            println!("{}{} {}", indent, key, line.detail);
        }
    }

    println!();
    println!("   {} {} nodes", "✓".green(), count_nodes(root));
    Ok(())
}

/// One row of the printed tree
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLine {
    pub depth: usize,
    pub key: String,
    pub detail: String,
    pub id: String,
    pub is_container: bool,
}

/// Pre-order rows for every node under `root`
pub fn outline(root: &Node) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    collect(root, &mut lines);
    lines
}

fn collect(node: &Node, lines: &mut Vec<OutlineLine>) {
    let detail = match &node.body {
        NodeBody::Object { children } => format!("{{{}}}", children.len()),
        NodeBody::Array { children } => format!("[{}]", children.len()),
        NodeBody::Primitive { value } => value.to_value().to_string(),
    };

    lines.push(OutlineLine {
        depth: node.depth,
        key: node.key.clone(),
        detail,
        id: node.id.to_string(),
        is_container: node.kind().is_container(),
    });

    for child in node.children() {
        collect(child, lines);
    }
}
