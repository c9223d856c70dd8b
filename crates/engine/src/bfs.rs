//! Bundled breadth-first search engine over Forth machine states.

use std::collections::{HashSet, VecDeque};

use anyhow::{anyhow, Result};
use stackforge_ops::Op;

use crate::session::{SearchEngine, SearchOutcome};

/// Bounds that keep the search finite.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Longest unexpanded operation sequence the engine will emit.
    pub max_code_len: usize,
    /// Extra data-stack cells allowed beyond the wider of input and output.
    pub stack_headroom: usize,
    /// Deepest return stack explored.
    pub max_return_depth: usize,
    /// Give up after this many distinct machine states.
    pub max_states: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_code_len: 8,
            stack_headroom: 3,
            max_return_depth: 4,
            max_states: 1 << 20,
        }
    }
}

/// A Forth machine snapshot: data stack plus return stack, tops at the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MachineState {
    data: Vec<i32>,
    ret: Vec<i32>,
}

/// Breadth-first search for the shortest operation sequence turning the
/// input stack into the output stack with an empty return stack.
///
/// The frontier survives across [`solve`](SearchEngine::solve) calls, so a
/// second call resumes where the first stopped instead of starting over.
/// Breadth-first order makes the first solution a shortest one, and ties
/// resolve by registration order, so results are deterministic.
#[derive(Debug, Default)]
pub struct BfsEngine {
    input: Vec<i32>,
    output: Vec<i32>,
    registered: Vec<Op>,
    limits: SearchLimits,
    queue: VecDeque<(MachineState, Vec<Op>)>,
    visited: HashSet<MachineState>,
    started: bool,
}

impl BfsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    fn clear_search(&mut self) {
        self.queue.clear();
        self.visited.clear();
        self.started = false;
    }

    /// Operations shuffle, copy, and drop cells; they never invent values.
    /// An output value missing from the input can therefore never appear.
    fn provably_unsolvable(&self) -> bool {
        self.output.iter().any(|v| !self.input.contains(v))
    }

    fn within_bounds(&self, state: &MachineState) -> bool {
        let widest = self.input.len().max(self.output.len()) + self.limits.stack_headroom;
        state.data.len() <= widest && state.ret.len() <= self.limits.max_return_depth
    }
}

impl SearchEngine for BfsEngine {
    fn reset(&mut self) {
        self.registered.clear();
        self.clear_search();
    }

    fn set_input(&mut self, stack: &[i32]) {
        self.input = stack.to_vec();
        self.clear_search();
    }

    fn set_output(&mut self, stack: &[i32]) {
        self.output = stack.to_vec();
        self.clear_search();
    }

    fn register_operation(&mut self, index: usize) -> Result<()> {
        let op =
            Op::from_index(index).ok_or_else(|| anyhow!("unknown operation index {}", index))?;
        self.registered.push(op);
        Ok(())
    }

    fn solve(&mut self) -> Result<SearchOutcome> {
        if self.provably_unsolvable() {
            return Ok(SearchOutcome::Unsolvable);
        }
        if !self.started {
            self.started = true;
            let start = MachineState {
                data: self.input.clone(),
                ret: Vec::new(),
            };
            self.visited.insert(start.clone());
            self.queue.push_back((start, Vec::new()));
        }
        while let Some((state, code)) = self.queue.pop_front() {
            if state.ret.is_empty() && state.data == self.output {
                return Ok(SearchOutcome::Found(
                    code.iter().map(|op| op.index()).collect(),
                ));
            }
            if code.len() == self.limits.max_code_len {
                continue;
            }
            for &op in &self.registered {
                let Some(next) = apply(op, &state) else {
                    continue;
                };
                if !self.within_bounds(&next) || self.visited.contains(&next) {
                    continue;
                }
                if self.visited.len() >= self.limits.max_states {
                    return Ok(SearchOutcome::NoSolution);
                }
                self.visited.insert(next.clone());
                let mut next_code = code.clone();
                next_code.push(op);
                self.queue.push_back((next, next_code));
            }
        }
        Ok(SearchOutcome::NoSolution)
    }
}

/// Apply one operation to a machine state, or `None` on stack underflow.
fn apply(op: Op, state: &MachineState) -> Option<MachineState> {
    let mut data = state.data.clone();
    let mut ret = state.ret.clone();
    let n = data.len();
    match op {
        Op::Dup => {
            let top = *data.last()?;
            data.push(top);
        }
        Op::Drop => {
            data.pop()?;
        }
        Op::Swap => {
            if n < 2 {
                return None;
            }
            data.swap(n - 2, n - 1);
        }
        Op::Over => {
            if n < 2 {
                return None;
            }
            data.push(data[n - 2]);
        }
        Op::Rot => {
            if n < 3 {
                return None;
            }
            let third = data.remove(n - 3);
            data.push(third);
        }
        Op::ToR => {
            ret.push(data.pop()?);
        }
        Op::RFrom => {
            data.push(ret.pop()?);
        }
        Op::TwoDup => {
            if n < 2 {
                return None;
            }
            let (a, b) = (data[n - 2], data[n - 1]);
            data.push(a);
            data.push(b);
        }
        Op::TwoDrop => {
            if n < 2 {
                return None;
            }
            data.truncate(n - 2);
        }
        Op::TwoSwap => {
            if n < 4 {
                return None;
            }
            data.swap(n - 4, n - 2);
            data.swap(n - 3, n - 1);
        }
        Op::TwoOver => {
            if n < 4 {
                return None;
            }
            let (a, b) = (data[n - 4], data[n - 3]);
            data.push(a);
            data.push(b);
        }
        Op::TwoRot => {
            if n < 6 {
                return None;
            }
            let a = data.remove(n - 6);
            let b = data.remove(n - 6);
            data.push(a);
            data.push(b);
        }
        Op::Nip => {
            if n < 2 {
                return None;
            }
            data.remove(n - 2);
        }
        Op::Tuck => {
            if n < 2 {
                return None;
            }
            data.insert(n - 2, data[n - 1]);
        }
        Op::MinusRot => {
            if n < 3 {
                return None;
            }
            let top = data.pop()?;
            data.insert(n - 3, top);
        }
        Op::RFetch => {
            data.push(*ret.last()?);
        }
        Op::TwoToR => {
            if n < 2 {
                return None;
            }
            let b = data.pop()?;
            let a = data.pop()?;
            ret.push(a);
            ret.push(b);
        }
        Op::TwoRFrom => {
            if ret.len() < 2 {
                return None;
            }
            let b = ret.pop()?;
            let a = ret.pop()?;
            data.push(a);
            data.push(b);
        }
        Op::TwoRFetch => {
            let m = ret.len();
            if m < 2 {
                return None;
            }
            data.push(ret[m - 2]);
            data.push(ret[m - 1]);
        }
        Op::Pick3 | Op::Pick4 | Op::Pick5 | Op::Pick6 => {
            let depth = op.pick_depth()?;
            if n < depth + 1 {
                return None;
            }
            data.push(data[n - 1 - depth]);
        }
    }
    Some(MachineState { data, ret })
}
