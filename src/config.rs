//! Run configuration, loaded once at startup and passed by reference to
//! whatever needs it.
//!
//! The struct layout mirrors the YAML file:
//!
//! ```yaml
//! paths:
//!   source_dirs:
//!     - C:\Users\me\projects
//!     - C:\Users\me\notes
//!   dest_dir: E:\backup
//! config:
//!   delete: false
//!   progress: true
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(rename = "config")]
    pub options: Options,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    /// Source directories, mirrored one at a time, in this order.
    pub source_dirs: Vec<String>,
    pub dest_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Options {
    /// Delete destination files that no longer exist in the source.
    /// Gated behind an interactive confirmation.
    #[serde(default)]
    pub delete: bool,
    /// Ask rsync for human-readable progress output.
    #[serde(default)]
    pub progress: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::Config(path.display().to_string(), err))?;

        serde_yaml::from_str(&contents)
            .map_err(|err| Error::Parse(path.display().to_string(), err))
    }
}
