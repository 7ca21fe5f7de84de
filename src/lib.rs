//! Mirror directories with rsync, excluding whatever `.gitignore` files
//! ignore.
//!
//! This crate exists to back the `backsync` binary; the library surface is
//! incidental and carries no semver guarantees.

#![deny(unsafe_code)]

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

pub mod cli;
pub mod config;
pub mod error;
mod gitignore;
mod paths;
mod process;
pub mod run;
mod runlog;

pub use crate::run::run;
