//! Death and critical-state classification

pub mod classifier;

pub use classifier::{classify, classify_with, BodyState};
