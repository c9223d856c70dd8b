//! Persistent solution cache.
//!
//! One entry per line, `key=value`: the key is the flattened canonical
//! problem as space-separated integers, the value the solution as
//! space-separated operation names in unexpanded form. The file is strictly
//! append-only and trusted: a malformed line is a fatal error, not something
//! to repair.

use anyhow::{anyhow, Context, Result};
use stackforge_canon::CacheKey;
use stackforge_ops::Op;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default backing file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "stackforge_cache.txt";

/// In-memory map over an append-only backing file.
///
/// The cache exclusively owns both the map and the file. Lifecycle is
/// explicit: [`SolutionCache::open`] loads everything up front, [`put`]
/// appends one line per new entry. Callers only `put` a key after a
/// confirmed `get` miss; duplicate keys in a pre-existing file are tolerated
/// on load, with the last line winning.
///
/// [`put`]: SolutionCache::put
#[derive(Debug, Default)]
pub struct SolutionCache {
    entries: HashMap<CacheKey, Vec<Op>>,
    path: Option<PathBuf>,
}

impl SolutionCache {
    /// Open a cache backed by `path`, loading any existing entries.
    ///
    /// A missing file is not an error; the cache starts empty and the file
    /// is created on the first [`put`](SolutionCache::put).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut entries = HashMap::new();
        if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("failed to read cache file {}", path.display()))?;
            for (number, line) in data.lines().enumerate() {
                let (key, code) = parse_line(line)
                    .with_context(|| format!("{}:{}", path.display(), number + 1))?;
                entries.insert(key, code);
            }
        }
        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// A cache with no backing file; `put` only updates the map.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Pure lookup, no side effects.
    pub fn get(&self, key: &CacheKey) -> Option<&[Op]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Insert an entry and durably append it to the backing file.
    pub fn put(&mut self, key: CacheKey, code: Vec<Op>) -> Result<()> {
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .with_context(|| format!("failed to open cache file {}", path.display()))?;
            file.write_all(format_line(&key, &code).as_bytes())
                .with_context(|| format!("failed to append to cache file {}", path.display()))?;
        }
        self.entries.insert(key, code);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn format_line(key: &CacheKey, code: &[Op]) -> String {
    let names: Vec<&str> = code.iter().map(|op| op.name()).collect();
    format!("{}={}\n", key, names.join(" "))
}

fn parse_line(line: &str) -> Result<(CacheKey, Vec<Op>)> {
    let (key_text, value_text) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("cache entry has no '=' separator"))?;
    let key = CacheKey::parse(key_text).context("cache key is not a list of integers")?;
    let code = value_text
        .split_whitespace()
        .map(|name| {
            Op::from_name(name).ok_or_else(|| anyhow!("unknown operation name '{}'", name))
        })
        .collect::<Result<Vec<Op>>>()?;
    Ok((key, code))
}
