//! Engine trait and explicit session state machine.

use anyhow::{bail, Result};
use stackforge_canon::CanonicalProblem;
use stackforge_ops::Op;

/// Reply from one [`SearchEngine::solve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A solution, as vocabulary indices in execution order. May be empty
    /// when the input already matches the output.
    Found(Vec<usize>),
    /// No (further) solution found under the current registration. An
    /// absence, not an error.
    NoSolution,
    /// Provably no solution exists, regardless of further search.
    Unsolvable,
}

/// The narrow surface the solver drives a search engine through.
///
/// An engine is a single stateful session: one problem in flight at a time,
/// explicitly reset before reuse, never shared across concurrent solves.
/// `reset` clears registered operations and solver state; the problem
/// definition set through `set_input`/`set_output` survives it.
pub trait SearchEngine {
    fn reset(&mut self);
    fn set_input(&mut self, stack: &[i32]);
    fn set_output(&mut self, stack: &[i32]);
    /// Register one operation the engine may emit, by vocabulary index.
    fn register_operation(&mut self, index: usize) -> Result<()>;
    fn solve(&mut self) -> Result<SearchOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Configured,
    Solved,
}

/// Wraps an engine and enforces its lifecycle:
/// `Idle → Configured → Solved`, with [`reset`](EngineSession::reset) as the
/// only transition back to `Idle`.
#[derive(Debug)]
pub struct EngineSession<E> {
    engine: E,
    state: SessionState,
}

impl<E: SearchEngine> EngineSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: SessionState::Idle,
        }
    }

    /// Reset the engine and return to `Idle`.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.state = SessionState::Idle;
    }

    /// Define the problem and the operation set for the next solve.
    ///
    /// Only valid in `Idle`; a configured session must be reset before it
    /// can be configured again.
    pub fn configure<I>(&mut self, problem: &CanonicalProblem, ops: I) -> Result<()>
    where
        I: IntoIterator<Item = Op>,
    {
        if self.state != SessionState::Idle {
            bail!("engine session already configured; reset it first");
        }
        self.engine.set_input(&problem.input);
        self.engine.set_output(&problem.output);
        for op in ops {
            self.engine.register_operation(op.index())?;
        }
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Ask the engine for the next solution under the current configuration.
    pub fn solve(&mut self) -> Result<SearchOutcome> {
        if self.state == SessionState::Idle {
            bail!("engine session not configured");
        }
        let outcome = self.engine.solve()?;
        self.state = SessionState::Solved;
        Ok(outcome)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
