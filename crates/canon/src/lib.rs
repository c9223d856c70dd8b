//! Canonical stack-effect problem representation.
//!
//! A request arrives as two layouts of arbitrary symbols. Canonicalization
//! renames symbols to dense integers in first-appearance order and trims a
//! structurally redundant prefix, so that every request solving the same
//! problem shares one cache entry and one search, regardless of how its
//! symbols are spelled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A canonicalized problem: integer-renamed, prefix-trimmed input and output
/// layouts, bottom of stack first.
///
/// Output values are always non-negative. Input values can go negative when
/// the trim rebases an alias that sits above the trimmed prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalProblem {
    pub input: Vec<i32>,
    pub output: Vec<i32>,
}

impl CanonicalProblem {
    /// Flatten into the persistent cache key: input, sentinel, output.
    pub fn cache_key(&self) -> CacheKey {
        let mut flat = Vec::with_capacity(self.input.len() + self.output.len() + 1);
        flat.extend_from_slice(&self.input);
        flat.push(CacheKey::SENTINEL);
        flat.extend_from_slice(&self.output);
        CacheKey(flat)
    }
}

/// Flattened lookup key for the persistent result cache.
///
/// The sentinel never occurs in a canonical *output*, so the flattened form
/// identifies the (input, output) split unambiguously even though trimmed
/// inputs may themselves contain negative values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Vec<i32>);

impl CacheKey {
    /// Reserved separator between the input and output runs.
    pub const SENTINEL: i32 = -1;

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Parse the space-separated integer form used in the cache file.
    pub fn parse(text: &str) -> Result<CacheKey, std::num::ParseIntError> {
        let atoms = text
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(CacheKey(atoms))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, atom) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

/// Canonicalize a pair of symbol layouts.
///
/// Symbols are assigned integers in first-appearance order, scanning the
/// input layout first. The numbered output is then scanned from the bottom:
/// positions holding their own index are a candidate redundant prefix, and
/// the first such position whose value is aliased elsewhere in the output
/// ends the scan. Everything below it is dropped from both layouts and the
/// remaining values are rebased down by the dropped length. If the scan
/// instead hits a non-identity position, nothing is trimmed.
///
/// Total on all finite inputs; empty layouts canonicalize to empty layouts.
pub fn canonicalize<S: Eq + Hash>(input: &[S], output: &[S]) -> CanonicalProblem {
    let mut ids: HashMap<&S, i32> = HashMap::new();
    let mut next = 0i32;
    let raw_in: Vec<i32> = input
        .iter()
        .map(|sym| assign(&mut ids, &mut next, sym))
        .collect();
    let raw_out: Vec<i32> = output
        .iter()
        .map(|sym| assign(&mut ids, &mut next, sym))
        .collect();

    for (i, &value) in raw_out.iter().enumerate() {
        if value != i as i32 {
            break;
        }
        if raw_out.iter().filter(|&&v| v == value).count() != 1 {
            // `value == i` here: drop the prefix below the aliased position
            // and rebase what is left.
            let start_in = i.min(raw_in.len());
            return CanonicalProblem {
                input: raw_in[start_in..].iter().map(|v| v - value).collect(),
                output: raw_out[i..].iter().map(|v| v - value).collect(),
            };
        }
    }

    CanonicalProblem {
        input: raw_in,
        output: raw_out,
    }
}

fn assign<'a, S: Eq + Hash>(ids: &mut HashMap<&'a S, i32>, next: &mut i32, sym: &'a S) -> i32 {
    *ids.entry(sym).or_insert_with(|| {
        let id = *next;
        *next += 1;
        id
    })
}
