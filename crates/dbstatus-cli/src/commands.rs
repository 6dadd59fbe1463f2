//! Command implementations for the CLI.

use anyhow::{Context, Result};
use dbstatus::{FileStore, InstanceInfoStore, StatusResolver};

use crate::display::{render_human, render_json};

/// Resolves and prints the instance status.
///
/// Returns whether the instance is running.
pub fn status(store: FileStore, json: bool, show_password: bool) -> Result<bool> {
    let resolver = StatusResolver::for_file(store);
    let status = resolver
        .status()
        .context("Unable to determine instance status")?;

    if json {
        println!("{}", render_json(&status, show_password)?);
    } else {
        println!("{}", render_human(&status, show_password));
    }

    Ok(status.is_running())
}

/// Prints the path of the instance record.
pub fn path(store: &FileStore) {
    println!("{}", store.path().display());
}
