//! Scripted engine double that records calls and replays canned outcomes.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use crate::session::{SearchEngine, SearchOutcome};

/// One recorded call against a [`ScriptedEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Reset,
    SetInput(Vec<i32>),
    SetOutput(Vec<i32>),
    Register(usize),
    Solve,
}

/// Test engine that answers `solve` from a fixed script.
///
/// Every call is recorded so tests can assert the exact driving protocol.
/// Running out of scripted replies is an error, which makes an unexpected
/// extra `solve` fail loudly instead of returning something plausible.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    replies: VecDeque<SearchOutcome>,
    calls: Vec<EngineCall>,
}

impl ScriptedEngine {
    pub fn new(replies: impl IntoIterator<Item = SearchOutcome>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// Everything the caller has asked of this engine, in order.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn solve_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == EngineCall::Solve)
            .count()
    }
}

impl SearchEngine for ScriptedEngine {
    fn reset(&mut self) {
        self.calls.push(EngineCall::Reset);
    }

    fn set_input(&mut self, stack: &[i32]) {
        self.calls.push(EngineCall::SetInput(stack.to_vec()));
    }

    fn set_output(&mut self, stack: &[i32]) {
        self.calls.push(EngineCall::SetOutput(stack.to_vec()));
    }

    fn register_operation(&mut self, index: usize) -> Result<()> {
        self.calls.push(EngineCall::Register(index));
        Ok(())
    }

    fn solve(&mut self) -> Result<SearchOutcome> {
        self.calls.push(EngineCall::Solve);
        self.replies
            .pop_front()
            .ok_or_else(|| anyhow!("scripted engine ran out of replies"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_replies_in_order() {
        let mut engine = ScriptedEngine::new([
            SearchOutcome::Found(vec![2]),
            SearchOutcome::NoSolution,
        ]);
        engine.set_input(&[0, 1]);
        assert_eq!(engine.solve().unwrap(), SearchOutcome::Found(vec![2]));
        assert_eq!(engine.solve().unwrap(), SearchOutcome::NoSolution);
        assert!(engine.solve().is_err());
        assert_eq!(engine.solve_count(), 3);
        assert_eq!(engine.calls()[0], EngineCall::SetInput(vec![0, 1]));
    }
}
