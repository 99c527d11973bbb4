//! Embedded prompt templates
//!
//! Compiled into the binary from .pmt files at build time.

/// Task payload template
pub const TASK: &str = include_str!("../../prompts/task.pmt");
