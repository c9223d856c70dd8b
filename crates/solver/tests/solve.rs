//! End-to-end solves against the bundled engine and a real cache file.

use anyhow::Result;
use stackforge_cache::SolutionCache;
use stackforge_engine::{BfsEngine, SearchLimits};
use stackforge_ops::Op;
use stackforge_solver::{SolveOptions, SolveOutcome, SolverSession};

fn session_with_cache(path: &std::path::Path) -> Result<SolverSession<BfsEngine>> {
    Ok(SolverSession::new(BfsEngine::new()).with_cache(SolutionCache::open(path)?))
}

#[test]
fn test_swap_end_to_end_with_cache_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("solutions.txt");

    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["a", "b"], &["b", "a"])?;
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.words, ["swap"]);
    assert!(!solution.from_cache);

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(written, "0 1 -1 1 0=swap\n");

    // a renamed but structurally identical shuffle reloads the same entry
    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["x", "y"], &["y", "x"])?;
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.words, ["swap"]);
    assert!(solution.from_cache);
    Ok(())
}

#[test]
fn test_deep_copy_prefers_pick_on_tie() -> Result<()> {
    let mut session = SolverSession::new(BfsEngine::new());
    let outcome = session.solve(&["a", "b", "c", "d"], &["a", "b", "c", "d", "a"])?;
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.words, ["3", "pick"]);
    assert_eq!(solution.ops, vec![Op::Pick3]);
    Ok(())
}

#[test]
fn test_no_pick_option_yields_pick_free_code() -> Result<()> {
    let mut session = SolverSession::new(BfsEngine::new());
    let options = SolveOptions {
        use_pick: false,
        ..SolveOptions::default()
    };
    let outcome =
        session.solve_with(&["a", "b", "c", "d"], &["a", "b", "c", "d", "a"], options)?;
    assert_eq!(outcome.solution().unwrap().words, ["2over", "drop"]);
    Ok(())
}

#[test]
fn test_pick_rescues_a_tight_code_budget() -> Result<()> {
    let limits = SearchLimits {
        max_code_len: 1,
        ..SearchLimits::default()
    };
    let mut session = SolverSession::new(BfsEngine::new().with_limits(limits));
    let outcome = session.solve(&["a", "b", "c", "d"], &["a", "b", "c", "d", "a"])?;
    assert_eq!(outcome.solution().unwrap().words, ["3", "pick"]);
    Ok(())
}

#[test]
fn test_unsolvable_reports_and_caches_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("solutions.txt");
    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["a"], &["a", "b"])?;
    assert_eq!(outcome, SolveOutcome::Unsolvable);
    assert!(session.cache().unwrap().is_empty());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_reversal_uses_swap_rot() -> Result<()> {
    let mut session = SolverSession::new(BfsEngine::new());
    let outcome = session.solve(&["a", "b", "c"], &["c", "b", "a"])?;
    assert_eq!(outcome.solution().unwrap().words, ["swap", "rot"]);
    Ok(())
}

#[test]
fn test_doubling_the_top_is_dup() -> Result<()> {
    let mut session = SolverSession::new(BfsEngine::new());
    let outcome = session.solve(&["a"], &["a", "a"])?;
    assert_eq!(outcome.solution().unwrap().words, ["dup"]);
    Ok(())
}

#[test]
fn test_identity_is_an_empty_program() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("solutions.txt");
    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["p", "q"], &["p", "q"])?;
    let solution = outcome.solution().unwrap();
    assert!(solution.words.is_empty());
    assert!(!solution.from_cache);

    // the empty program earns a cache line like any other solution
    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["p", "q"], &["p", "q"])?;
    assert!(outcome.solution().unwrap().from_cache);
    Ok(())
}

#[test]
fn test_prefix_trim_shares_cache_entries() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("solutions.txt");

    // dropping b and doubling the top both reduce to ([0,1], [0,0])
    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["a", "b", "c"], &["a", "b", "b"])?;
    assert_eq!(outcome.solution().unwrap().words, ["drop", "dup"]);

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(written, "0 1 -1 0 0=drop dup\n");

    let mut session = session_with_cache(&path)?;
    let outcome = session.solve(&["x", "y"], &["x", "x"])?;
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.words, ["drop", "dup"]);
    assert!(solution.from_cache);
    Ok(())
}

#[test]
fn test_identical_sessions_agree() -> Result<()> {
    let mut first = SolverSession::new(BfsEngine::new());
    let mut second = SolverSession::new(BfsEngine::new());
    let input = ["w", "x", "y", "z"];
    let output = ["y", "z", "w", "x"];
    let one = first.solve(&input, &output)?;
    let two = second.solve(&input, &output)?;
    assert_eq!(one, two);
    assert_eq!(one.solution().unwrap().words, ["2swap"]);
    Ok(())
}
