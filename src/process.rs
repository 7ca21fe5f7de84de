use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::config::Config;
use crate::error::Result;
use crate::paths;

/// Name of the external synchronization tool.
pub const SYNC_TOOL: &str = "rsync";

/// Assemble the rsync invocation for one source directory.
///
/// Exclusion entries come from an ordered set, so the same tree always
/// produces the same command line.
pub fn sync_command(
    source: &str,
    dest: &str,
    excludes: &BTreeSet<String>,
    config: &Config,
) -> Vec<String> {
    let mut cmd = vec![SYNC_TOOL.to_string()];

    if config.options.progress {
        cmd.push("-avh".to_string());
        cmd.push("--progress".to_string());
    } else {
        cmd.push("-av".to_string());
    }

    if config.options.delete {
        cmd.push("--delete".to_string());
    }

    for entry in excludes {
        cmd.push("--exclude".to_string());
        cmd.push(entry.clone());
    }

    cmd.push(paths::to_portable(source));
    cmd.push(paths::to_portable(dest));

    cmd
}

/// Look an executable up on PATH. Used as a precondition check so a missing
/// rsync is reported before any tree is walked.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Spawn the assembled command and block until it finishes. The exit status
/// is handed back but never interpreted here; a failed transfer is for the
/// operator to read off the tool's own output.
pub fn spawn(cmd: &[String]) -> Result<ExitStatus> {
    let (head, tail) = match cmd.split_first() {
        Some(parts) => parts,
        None => {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command").into());
        }
    };
    debug!("Spawning {:?}", cmd);

    let status = Command::new(head).args(tail).status()?;
    Ok(status)
}
