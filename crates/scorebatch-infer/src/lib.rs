//! Batch inference over a validated feature subset.
//!
//! The engine always invokes label prediction and conditionally invokes
//! probability estimation when the model exposes that capability, keeping
//! only the positive-class column of the probability matrix. The trained
//! model is loaded once per process and shared read-only.

mod cache;
mod engine;
mod error;

pub use cache::load_cached;
pub use engine::predict;
pub use error::{InferError, Result};
