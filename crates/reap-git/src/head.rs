//! Base branch resolution from the repository's HEAD file.
//!
//! HEAD is read directly from `.git/HEAD` rather than through git2 so
//! that a missing metadata directory is reported as such, without any
//! upward search for an enclosing repository.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Maximum number of bytes read from HEAD. A symbolic ref is one short line.
pub const HEAD_READ_LIMIT: u64 = 1024;

const SYMBOLIC_PREFIX: &str = "ref:";
const HEADS_PREFIX: &str = "refs/heads/";

/// Read `<root>/.git/HEAD` and return the branch it points at.
///
/// # Errors
/// - [`Error::NotARepository`] if HEAD does not exist under `root`.
/// - [`Error::UnreadableHead`] if HEAD exists but cannot be read.
/// - [`Error::UnparsableHead`] if HEAD is detached or malformed.
pub fn resolve_head(root: &Path) -> Result<String> {
    let path = root.join(".git").join("HEAD");

    let file = File::open(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => Error::NotARepository(root.to_path_buf()),
        _ => Error::UnreadableHead(e),
    })?;

    let mut buf = Vec::new();
    file.take(HEAD_READ_LIMIT)
        .read_to_end(&mut buf)
        .map_err(Error::UnreadableHead)?;

    parse_head_ref(&String::from_utf8_lossy(&buf))
}

/// Extract the branch name from HEAD content of the form
/// `ref: refs/heads/<name>`.
///
/// # Errors
/// Returns [`Error::UnparsableHead`] for detached HEADs (a bare commit id),
/// refs outside `refs/heads/`, or anything else that is not a symbolic ref.
pub fn parse_head_ref(content: &str) -> Result<String> {
    let unparsable = || Error::UnparsableHead(content.trim().chars().take(80).collect());

    let line = content.trim().lines().next().ok_or_else(unparsable)?;
    let target = line
        .strip_prefix(SYMBOLIC_PREFIX)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix(HEADS_PREFIX))
        .map(str::trim_end)
        .ok_or_else(unparsable)?;

    if target.is_empty() || target.contains(char::is_whitespace) {
        return Err(unparsable());
    }

    Ok(target.to_string())
}
