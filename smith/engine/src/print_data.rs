//! Discovery of slice images in the print data directory.
//!
//! Slices are named `slice_<n>.png` with `n` counting from 1. Only the file
//! names matter; image contents are never read here.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

const SLICE_PREFIX: &str = "slice_";
const SLICE_EXTENSION: &str = ".png";

/// File name of the 1-based slice `number`
pub fn slice_file_name(number: u32) -> String {
    format!("{}{}{}", SLICE_PREFIX, number, SLICE_EXTENSION)
}

pub fn slice_path(dir: impl AsRef<Path>, number: u32) -> PathBuf {
    dir.as_ref().join(slice_file_name(number))
}

/// Slice number encoded in `file_name`, if it names a slice image
fn parse_slice_number(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(SLICE_PREFIX)?
        .strip_suffix(SLICE_EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}

/// Length of the contiguous run `slice_1.png ..= slice_N.png` in `dir`
pub fn count_slices(dir: impl AsRef<Path>) -> io::Result<u32> {
    let dir = dir.as_ref();
    let mut numbers = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(n) = entry.file_name().to_str().and_then(parse_slice_number) {
            numbers.insert(n);
        }
    }

    let mut count = 0;
    while numbers.contains(&(count + 1)) {
        count += 1;
    }
    if count as usize != numbers.len() {
        debug!(
            "{}: ignoring {} slice(s) after gap at {}",
            dir.display(),
            numbers.len() - count as usize,
            count + 1
        );
    }
    Ok(count)
}
