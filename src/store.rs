// src/store.rs
//! Seen-links file: one normalized link per line, append-only.

use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::Result;
use crate::file::ensure_parent;
use crate::link::normalize;
use crate::pipeline::SeenLinks;

pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the seen set. A missing file is an empty set; an unreadable one
    /// is logged and also treated as empty.
    pub fn load(&self) -> SeenLinks {
        match self.try_load() {
            Ok(seen) => {
                logd!("Loaded {} seen links from {}", seen.len(), self.path.display());
                seen
            }
            Err(e) => {
                logw!("Could not read {}: {e}. Starting with no seen links.", self.path.display());
                SeenLinks::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<SeenLinks> {
        if !self.path.exists() {
            return Ok(SeenLinks::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(text.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
    }

    /// Append the normalized form of each link. Never truncates.
    pub fn append<'a, I>(&self, links: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ensure_parent(&self.path)?;
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        let mut n = 0;
        for link in links {
            let key = normalize(Some(link));
            if key.is_empty() { continue; }
            writeln!(out, "{key}")?;
            n += 1;
        }
        out.flush()?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("nope.txt"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_then_load_round_trips_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let store = SeenStore::new(dir.path().join("sub/seen.txt"));
        assert_eq!(store.append(["HTTP://X.com/A/", "  "]).unwrap(), 1);
        assert_eq!(store.append(["http://x.com/b"]).unwrap(), 1);

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "http://x.com/a\nhttp://x.com/b\n");

        let seen = store.load();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("http://x.com/a"));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.txt");
        fs::write(&path, "\nhttp://a\n   \nhttp://b  \n").unwrap();
        let seen = SeenStore::new(&path).load();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("http://b"));
    }
}
