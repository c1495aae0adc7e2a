//! Core runtime types shared by the loading screen crates.
//!
//! This crate provides the foundational pieces every other crate leans on:
//! - Frame time management
//! - A recurring/one-shot task scheduler driven by elapsed time
//! - An injectable random source with a strong-first selection policy

pub mod random;
pub mod schedule;
pub mod time;

pub use random::*;
pub use schedule::*;
pub use time::*;
