//! Helpers for normal distribution and search space handling
mod misc;

pub use misc::*;
