//! Utility functions

pub mod hash;

pub use hash::{fnv1a_64, fnv1a_64_str};
