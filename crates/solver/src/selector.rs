//! Chooses between pick-free and pick-only engine solutions.

use anyhow::{anyhow, Result};
use stackforge_canon::CanonicalProblem;
use stackforge_engine::{EngineSession, SearchEngine, SearchOutcome};
use stackforge_ops::{expand_sequence, Op};

/// Result of driving the engine over one canonical problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A solution in both forms: emit-ready words and unexpanded operations.
    Solved { words: Vec<String>, ops: Vec<Op> },
    NoSolution,
    Unsolvable,
}

/// Run the two-session protocol and keep the better solution.
///
/// The pick-free vocabulary runs first; `Unsolvable` from that session is
/// authoritative and ends the protocol. When picks are allowed, a second
/// session restricted to the pick family runs and the shorter expanded code
/// wins. On equal expanded length the pick solution wins exactly when the
/// pick-free code spends at least as many drops and nips as the pick code
/// spends picks.
pub fn select<E: SearchEngine>(
    session: &mut EngineSession<E>,
    problem: &CanonicalProblem,
    allow_pick: bool,
) -> Result<Selection> {
    session.reset();
    session.configure(problem, Op::non_pick())?;
    let without_pick = match session.solve()? {
        SearchOutcome::Unsolvable => return Ok(Selection::Unsolvable),
        SearchOutcome::NoSolution => None,
        SearchOutcome::Found(indices) => Some(ops_from_indices(&indices)?),
    };
    if !allow_pick {
        return Ok(finish(without_pick));
    }

    session.reset();
    session.configure(problem, Op::PICK_FAMILY)?;
    // a session restricted to picks cannot prove the problem unsolvable
    let with_pick = match session.solve()? {
        SearchOutcome::Unsolvable | SearchOutcome::NoSolution => None,
        SearchOutcome::Found(indices) => Some(ops_from_indices(&indices)?),
    };

    let chosen = match (without_pick, with_pick) {
        (None, None) => None,
        (Some(without), None) => Some(without),
        (None, Some(with)) => Some(with),
        (Some(without), Some(with)) => Some(choose(without, with)),
    };
    Ok(finish(chosen))
}

fn choose(without: Vec<Op>, with: Vec<Op>) -> Vec<Op> {
    let len_without = expand_sequence(&without).len();
    let len_with = expand_sequence(&with).len();
    if len_with < len_without {
        return with;
    }
    if len_with == len_without {
        let shed = without
            .iter()
            .filter(|op| matches!(op, Op::Drop | Op::Nip))
            .count();
        let picks = with.iter().filter(|op| op.is_pick()).count();
        if shed >= picks {
            return with;
        }
    }
    without
}

fn finish(ops: Option<Vec<Op>>) -> Selection {
    match ops {
        Some(ops) => Selection::Solved {
            words: expand_sequence(&ops),
            ops,
        },
        None => Selection::NoSolution,
    }
}

fn ops_from_indices(indices: &[usize]) -> Result<Vec<Op>> {
    indices
        .iter()
        .map(|&index| {
            Op::from_index(index)
                .ok_or_else(|| anyhow!("engine returned unknown operation index {}", index))
        })
        .collect()
}
