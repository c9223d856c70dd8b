//! StackForge solver facade.

#[cfg(feature = "cli")]
pub mod cli;
pub mod selector;
pub mod session;

#[cfg(feature = "cli")]
pub use cli::*;
pub use selector::*;
pub use session::*;
