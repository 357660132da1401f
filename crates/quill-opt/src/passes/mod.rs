//! Built-in optimization passes.

mod optimization;

pub use optimization::{BasicOptimization, PhaseBlockOptimization};
