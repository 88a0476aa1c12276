//! Two-phase startup.
//!
//! Phase 1: construct components and register clients, transformers and
//! customizers on [`Startup`]. Phase 2: [`Startup::finish`] evaluates the
//! retry condition once, builds the selected interceptor, and runs the client
//! initializer exactly once. No implicit container callback is involved.

pub mod startup;

pub use startup::{Runtime, RetrySupport, Startup};
