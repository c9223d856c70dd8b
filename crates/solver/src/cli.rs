//! CLI wiring for the stackforge solver.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use stackforge_cache::{SolutionCache, DEFAULT_CACHE_FILE};
use stackforge_canon::canonicalize;
use stackforge_engine::{BfsEngine, SearchLimits};
use stackforge_ops::Op;

use crate::session::{Solution, SolveOptions, SolveOutcome, SolverSession};

#[derive(Parser, Debug)]
#[command(name = "stackforge", about = "Shortest Forth stack shuffles, solved and cached")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the shortest word sequence turning one stack into another.
    Solve {
        /// Input stack as comma separated symbols, bottom first.
        #[arg(long)]
        input: String,
        /// Wanted output stack as comma separated symbols, bottom first.
        #[arg(long)]
        output: String,
        /// Cache file consulted before searching and extended after.
        #[arg(long, default_value = DEFAULT_CACHE_FILE)]
        cache: PathBuf,
        /// Solve without reading or writing the cache.
        #[arg(long, default_value_t = false)]
        no_cache: bool,
        /// Leave the pick family out of the vocabulary.
        #[arg(long, default_value_t = false)]
        no_pick: bool,
        /// Longest operation sequence worth searching for.
        #[arg(long, default_value_t = 8)]
        max_code_len: usize,
        /// Emit the full result as JSON instead of plain words.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the operation vocabulary in engine order.
    Vocab {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report where the cache lives and how many solutions it holds.
    CacheInfo {
        #[arg(long, default_value = DEFAULT_CACHE_FILE)]
        cache: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct SolveReport<'a> {
    input: &'a [String],
    output: &'a [String],
    canonical_input: &'a [i32],
    canonical_output: &'a [i32],
    status: &'static str,
    solution: Option<&'a Solution>,
}

#[derive(Debug, Serialize)]
struct VocabEntry {
    index: usize,
    name: &'static str,
    words: Vec<String>,
    pick: bool,
}

pub fn run_cli(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    match cli.command {
        Command::Solve {
            input,
            output,
            cache,
            no_cache,
            no_pick,
            max_code_len,
            json,
        } => {
            let input = parse_stack(&input)?;
            let output = parse_stack(&output)?;
            let limits = SearchLimits {
                max_code_len,
                ..SearchLimits::default()
            };
            let mut session = SolverSession::new(BfsEngine::new().with_limits(limits));
            if !no_cache {
                session = session.with_cache(SolutionCache::open(&cache)?);
            }
            let options = SolveOptions {
                use_cache: !no_cache,
                use_pick: !no_pick,
            };
            let problem = canonicalize(&input, &output);
            let outcome = session.solve_canonical(&problem, options)?;

            if json {
                let (status, solution) = match &outcome {
                    SolveOutcome::Solved(solution) => ("solved", Some(solution)),
                    SolveOutcome::NoSolution => ("no-solution", None),
                    SolveOutcome::Unsolvable => ("unsolvable", None),
                };
                let report = SolveReport {
                    input: &input,
                    output: &output,
                    canonical_input: &problem.input,
                    canonical_output: &problem.output,
                    status,
                    solution,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            match outcome {
                SolveOutcome::Solved(solution) if solution.words.is_empty() => {
                    println!("( already in order )");
                }
                SolveOutcome::Solved(solution) => {
                    println!("{}", solution.words.join(" "));
                }
                SolveOutcome::NoSolution => {
                    bail!("no solution within {} operations", max_code_len);
                }
                SolveOutcome::Unsolvable => {
                    bail!("unsolvable: the output needs values the input does not hold");
                }
            }
        }
        Command::Vocab { json } => {
            let entries: Vec<VocabEntry> = Op::ALL
                .iter()
                .map(|op| VocabEntry {
                    index: op.index(),
                    name: op.name(),
                    words: op.expand(),
                    pick: op.is_pick(),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{:>2}  {:<5}  {}", entry.index, entry.name, entry.words.join(" "));
                }
            }
        }
        Command::CacheInfo { cache } => {
            let store = SolutionCache::open(&cache)?;
            println!("{}: {} cached solutions", cache.display(), store.len());
        }
    }
    Ok(())
}

/// Parse a comma separated stack layout; an empty string is an empty stack.
fn parse_stack(text: &str) -> Result<Vec<String>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|symbol| {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                bail!("empty symbol in stack layout '{}'", text);
            }
            Ok(symbol.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stack() {
        assert_eq!(parse_stack("a,b,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(parse_stack(" x , y ").unwrap(), vec!["x", "y"]);
        assert_eq!(parse_stack("").unwrap(), Vec::<String>::new());
        assert!(parse_stack("a,,b").is_err());
    }

    #[test]
    fn test_cli_parses_solve_flags() {
        let cli = Cli::try_parse_from([
            "stackforge",
            "solve",
            "--input",
            "a,b",
            "--output",
            "b,a",
            "--no-pick",
            "--max-code-len",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Solve {
                input,
                output,
                no_pick,
                max_code_len,
                ..
            } => {
                assert_eq!(input, "a,b");
                assert_eq!(output, "b,a");
                assert!(no_pick);
                assert_eq!(max_code_len, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
