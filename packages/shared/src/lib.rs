//! Shared utilities for the Sigroom signaling relay.

pub mod logger;
pub mod random;
