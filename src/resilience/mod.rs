//! Retry policies and backoff.
//!
//! # Responsibilities
//! - Decide whether a failed attempt may be retried
//! - Compute jittered exponential backoff delays
//! - Supply per-service policies through `RetryPolicyFactory`
//!
//! # Design Decisions
//! - The interceptor drives the attempt loop; the policy only answers
//!   "retry this?" and "wait how long?" so policy internals stay swappable
//! - `NoRetryPolicy` satisfies the minimum retry contract (no retries) and is
//!   synthesized when retry is active but no factory was supplied

pub mod backoff;
pub mod policy;

pub use backoff::calculate_backoff;
pub use policy::{
    BackoffRetryPolicy, DefaultRetryPolicyFactory, NoRetryPolicy, NoRetryPolicyFactory,
    RetryPolicy, RetryPolicyFactory,
};
