//! Password evaluation sections
//!
//! Each section analyzes a specific aspect of password strength and reports
//! what it found together with its contribution to the score.

mod breach;
mod length;
mod variety;

pub use breach::breach_section;
pub use length::length_section;
pub use variety::{character_variety_section, classify};

/// Result of a section: what it found plus the points it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<T> {
    pub value: T,
    pub points: u32,
}
