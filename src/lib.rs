//! JFrog CLI Installer Library
//!
//! Resolves the host platform to a published JFrog CLI artifact, downloads it
//! directly or through an HTTPS proxy, and writes it as an executable
//! into `bin/`.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

pub use error::{InstallerError, Result};
