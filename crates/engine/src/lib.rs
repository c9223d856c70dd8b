//! Search engine interface for StackForge.
//!
//! The solver treats the engine as an opaque stateful collaborator behind
//! [`SearchEngine`]; [`EngineSession`] wraps one and enforces the
//! reset/configure/solve lifecycle. [`bfs::BfsEngine`] is the in-tree
//! reference implementation, [`scripted::ScriptedEngine`] a deterministic
//! double for tests.

pub mod bfs;
pub mod scripted;
pub mod session;

pub use bfs::*;
pub use scripted::*;
pub use session::*;
