//! Writing build output to disk.

pub mod writer;

use std::path::PathBuf;

/// A file produced by a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub size: usize,
}
