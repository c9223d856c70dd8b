//! Solve orchestration: canonicalize, consult the cache, then search.

use std::hash::Hash;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use stackforge_cache::SolutionCache;
use stackforge_canon::{canonicalize, CanonicalProblem};
use stackforge_engine::{EngineSession, SearchEngine};
use stackforge_ops::{expand_sequence, Op};

use crate::selector::{select, Selection};

/// Per-call knobs. Both default to on.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Consult the cache before searching and store fresh solutions in it.
    pub use_cache: bool,
    /// Let the pick family compete with the pick-free vocabulary.
    pub use_pick: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            use_pick: true,
        }
    }
}

/// A solved shuffle in both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Emit-ready words, pick operations expanded to two words each.
    pub words: Vec<String>,
    /// The operation sequence as the engine produced it, picks unexpanded.
    pub ops: Vec<Op>,
    /// Whether the result came from the cache instead of a search.
    pub from_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The search space was exhausted without reaching the output stack.
    NoSolution,
    /// The output needs a value the input does not hold.
    Unsolvable,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Ties a search engine to an optional persistent solution cache.
///
/// A session drives exactly one engine and must not be shared across
/// threads mid-solve; open one session per worker instead.
pub struct SolverSession<E> {
    engine: EngineSession<E>,
    cache: Option<SolutionCache>,
}

impl<E: SearchEngine> SolverSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: EngineSession::new(engine),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: SolutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&SolutionCache> {
        self.cache.as_ref()
    }

    /// Solve with defaults: cache on, picks allowed.
    pub fn solve<S: Eq + Hash>(&mut self, input: &[S], output: &[S]) -> Result<SolveOutcome> {
        self.solve_with(input, output, SolveOptions::default())
    }

    pub fn solve_with<S: Eq + Hash>(
        &mut self,
        input: &[S],
        output: &[S],
        options: SolveOptions,
    ) -> Result<SolveOutcome> {
        let problem = canonicalize(input, output);
        self.solve_canonical(&problem, options)
    }

    /// Solve a problem that is already in canonical form.
    ///
    /// Cache hits and fresh searches return the same shape: stored
    /// operations are re-expanded on every hit, so a hit is
    /// indistinguishable from a solve apart from [`Solution::from_cache`].
    pub fn solve_canonical(
        &mut self,
        problem: &CanonicalProblem,
        options: SolveOptions,
    ) -> Result<SolveOutcome> {
        let key = problem.cache_key();
        if options.use_cache {
            if let Some(cache) = &self.cache {
                if let Some(ops) = cache.get(&key) {
                    let ops = ops.to_vec();
                    debug!(key = %key, "solution cache hit");
                    return Ok(SolveOutcome::Solved(Solution {
                        words: expand_sequence(&ops),
                        ops,
                        from_cache: true,
                    }));
                }
            }
        }
        match select(&mut self.engine, problem, options.use_pick)? {
            Selection::Solved { words, ops } => {
                info!(key = %key, code = %words.join(" "), "solved");
                if options.use_cache {
                    if let Some(cache) = &mut self.cache {
                        cache.put(key, ops.clone())?;
                    }
                }
                Ok(SolveOutcome::Solved(Solution {
                    words,
                    ops,
                    from_cache: false,
                }))
            }
            Selection::NoSolution => {
                info!(key = %key, "no solution within limits");
                Ok(SolveOutcome::NoSolution)
            }
            Selection::Unsolvable => {
                info!(key = %key, "unsolvable");
                Ok(SolveOutcome::Unsolvable)
            }
        }
    }
}
