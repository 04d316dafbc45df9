//! Resource references used for cache invalidation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// A file or directory a descriptor was compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
	File(PathBuf),
	/// Covers every entry below the directory, recursively.
	Directory(PathBuf),
}

impl Resource {
	pub fn path(&self) -> &Path {
		match self {
			Self::File(path) | Self::Directory(path) => path,
		}
	}

	/// Returns true if nothing under this resource changed after `timestamp`.
	///
	/// Missing or unreadable paths are never fresh.
	pub fn is_fresh(&self, timestamp: SystemTime) -> bool {
		match self {
			Self::File(path) => modified_before(path, timestamp),
			Self::Directory(path) => directory_is_fresh(path, timestamp),
		}
	}
}

fn modified_before(path: &Path, timestamp: SystemTime) -> bool {
	fs::metadata(path).and_then(|meta| meta.modified()).is_ok_and(|modified| modified <= timestamp)
}

/// Walks the tree without following symlinks; a link counts by its own mtime.
fn directory_is_fresh(dir: &Path, timestamp: SystemTime) -> bool {
	for entry in WalkDir::new(dir) {
		let Ok(entry) = entry else {
			return false;
		};
		let fresh = entry
			.metadata()
			.ok()
			.and_then(|meta| meta.modified().ok())
			.is_some_and(|modified| modified <= timestamp);
		if !fresh {
			tracing::trace!(path = %entry.path().display(), "resource changed");
			return false;
		}
	}
	true
}
