use super::{display_path, load_document};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use nodeflow_editor::{Document, Mutation, NodeId, Primitive};
use nodeflow_tree::find_by_path;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// JSON file to edit
    pub input: PathBuf,

    /// Edit script: a JSON array of steps
    #[arg(short, long)]
    pub script: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One scripted edit, addressed by key path from the root
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Replace a scalar value
    Set { path: Vec<String>, value: Value },

    Rename { path: Vec<String>, key: String },

    Delete { path: Vec<String> },

    /// Append a child to the container at `path`
    Add {
        path: Vec<String>,
        #[serde(default)]
        key: String,
        value: Value,
    },

    /// Reparent the node at `path` under the container at `to`
    Move { path: Vec<String>, to: Vec<String> },

    Undo,
    Redo,
}

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("No node at path '{0}'")]
    PathNotFound(String),

    #[error("'set' on '{0}' needs a string, number, boolean or null")]
    NotAScalar(String),
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let mut document = load_document(&args.input, cwd)?;

    let script = fs::read_to_string(&args.script)
        .map_err(|e| anyhow!("Cannot read {}: {}", args.script.display(), e))?;
    let steps: Vec<Step> =
        serde_json::from_str(&script).map_err(|e| anyhow!("Invalid script {}: {}", args.script.display(), e))?;

    run_script(&mut document, &steps)?;

    match args.output {
        Some(output) => {
            fs::write(&output, format!("{}\n", document.source()))?;
            println!(
                "  {} {} steps → {} (version {})",
                "✓".green(),
                steps.len(),
                output.display(),
                document.version
            );
        }
        None => println!("{}", document.source()),
    }

    Ok(())
}

/// Apply `steps` in order, stopping at the first failure
pub fn run_script(document: &mut Document, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        apply_step(document, step).map_err(|e| anyhow!("step {}: {}", index + 1, e))?;
    }
    Ok(())
}

fn apply_step(document: &mut Document, step: &Step) -> Result<()> {
    let mutation = match step {
        Step::Set { path, value } => Mutation::UpdateValue {
            node_id: resolve(document, path)?,
            value: Primitive::from_value(value).ok_or_else(|| ScriptError::NotAScalar(display_path(path)))?,
        },
        Step::Rename { path, key } => Mutation::UpdateKey {
            node_id: resolve(document, path)?,
            key: key.clone(),
        },
        Step::Delete { path } => Mutation::DeleteNode {
            node_id: resolve(document, path)?,
        },
        Step::Add { path, key, value } => Mutation::InsertChild {
            parent_id: resolve(document, path)?,
            key: key.clone(),
            value: value.clone(),
        },
        Step::Move { path, to } => Mutation::Reparent {
            node_id: resolve(document, path)?,
            new_parent_id: resolve(document, to)?,
        },
        Step::Undo => {
            if !document.undo() {
                tracing::info!("nothing to undo");
            }
            return Ok(());
        }
        Step::Redo => {
            if !document.redo() {
                tracing::info!("nothing to redo");
            }
            return Ok(());
        }
    };

    document.apply(mutation)?;
    Ok(())
}

fn resolve(document: &Document, path: &[String]) -> Result<NodeId, ScriptError> {
    find_by_path(document.tree(), path)
        .map(|node| node.id.clone())
        .ok_or_else(|| ScriptError::PathNotFound(display_path(path)))
}
