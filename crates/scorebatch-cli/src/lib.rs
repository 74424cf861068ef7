//! Shared infrastructure for the scorebatch binary.

pub mod logging;
