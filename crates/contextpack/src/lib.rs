//! Filesystem ingestion and prompt assembly.
//!
//! The pipeline is [`walker::TreeWalker`] (filtered traversal, using
//! [`filter::FilterPolicy`] and [`loader`]) followed by
//! [`builder::ContextAssembler`], which applies a per-mode
//! [`budget::ContextBudget`] and produces the final prompt string.

pub mod budget;
pub mod builder;
pub mod filter;
pub mod injection;
pub mod loader;
pub mod report;
pub mod truncation;
pub mod walker;

pub use budget::{AssemblyMode, ContextBudget, ContextBudgets};
pub use builder::{AssembledContext, AssemblyRequest, ContextAssembler};
pub use filter::FilterPolicy;
pub use report::{ContextReport, FileOutcome, FileReport};
pub use walker::{
    TraversalError, TraversalErrorKind, TraversalReport, TraversalSummary, TreeWalker,
};
