// src/bsp/config.rs

use crate::bsp::{BSP_DEPTH_LIMIT, SAMPLE_TARGET, SAMPLE_THRESHOLD, SPLIT_PENALTY};
use crate::error::MazeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning knobs for grading and tree construction.
///
/// Missing keys in a JSON config fall back to the defaults, which match the
/// classic maze builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    /// Populations at least this large are graded on a sample.
    pub sample_threshold: usize,
    /// A sampled population is walked with stride `len / sample_target`.
    pub sample_target: usize,
    /// Grade cost of one split.
    pub split_penalty: i32,
    pub depth_limit: usize,
    /// Grade candidates with rayon.
    pub parallel_grading: bool,
}

impl Default for BspConfig {
    fn default() -> Self {
        BspConfig {
            sample_threshold: SAMPLE_THRESHOLD,
            sample_target: SAMPLE_TARGET,
            split_penalty: SPLIT_PENALTY,
            depth_limit: BSP_DEPTH_LIMIT,
            parallel_grading: false,
        }
    }
}

impl BspConfig {
    pub fn from_json_str(text: &str) -> Result<Self, MazeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
