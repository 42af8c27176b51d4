// src/bsp/grade.rs

use crate::bsp::bsp_util::classify_wall;
use crate::bsp::{BspConfig, WallId, WallPosition};
use crate::map::WallSegment;
use log::warn;
use rayon::prelude::*;

/// Side counts of a population relative to one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionTally {
    pub left: usize,
    pub right: usize,
    pub splits: usize,
}

impl PartitionTally {
    /// Imbalance plus `split_penalty` per split. Lower is better.
    pub fn grade(&self, split_penalty: i32) -> i32 {
        let imbalance = (self.left as i64 - self.right as i64).abs();
        (imbalance + split_penalty as i64 * self.splits as i64) as i32
    }
}

/// Scores walls as BSP splitting planes.
#[derive(Debug, Clone, Default)]
pub struct PartitionGrader {
    config: BspConfig,
}

impl PartitionGrader {
    pub fn new(config: BspConfig) -> Self {
        PartitionGrader { config }
    }

    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Step between examined walls for a population of `len`.
    pub fn stride(&self, len: usize) -> usize {
        if len >= self.config.sample_threshold {
            (len / self.config.sample_target.max(1)).max(1)
        } else {
            1
        }
    }

    /// Counts how the (possibly sampled) population falls around `candidate`.
    pub fn tally<'a, I>(&self, candidate: &WallSegment, population: I) -> PartitionTally
    where
        I: IntoIterator<Item = &'a WallSegment>,
        I::IntoIter: ExactSizeIterator,
    {
        let walls = population.into_iter();
        let stride = self.stride(walls.len());
        let mut tally = PartitionTally::default();

        for wall in walls.step_by(stride) {
            match classify_wall(candidate, wall) {
                WallPosition::Right => tally.right += 1,
                WallPosition::Left => tally.left += 1,
                WallPosition::Spanning => tally.splits += 1,
                WallPosition::Ambiguous { dot_start, dot_end } => {
                    warn!(
                        "grade_partition problem: dot1 = {}, dot2 = {}",
                        dot_start, dot_end
                    );
                }
            }
        }
        tally
    }

    pub fn compute_grade<'a, I>(&self, candidate: &WallSegment, population: I) -> i32
    where
        I: IntoIterator<Item = &'a WallSegment>,
        I::IntoIter: ExactSizeIterator,
    {
        self.tally(candidate, population)
            .grade(self.config.split_penalty)
    }

    /// Picks the candidate with the lowest grade against `population`.
    /// Ties go to the earliest candidate. Returns `None` without candidates.
    pub fn select_partition(
        &self,
        walls: &[WallSegment],
        candidates: &[WallId],
        population: &[WallId],
    ) -> Option<(WallId, i32)> {
        let grade_of = |id: WallId| {
            self.compute_grade(&walls[id.0], population.iter().map(|p| &walls[p.0]))
        };

        let best = if self.config.parallel_grading {
            candidates
                .par_iter()
                .enumerate()
                .map(|(pos, &id)| (grade_of(id), pos, id))
                .min_by_key(|&(grade, pos, _)| (grade, pos))
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|(pos, &id)| (grade_of(id), pos, id))
                .min_by_key(|&(grade, pos, _)| (grade, pos))
        };
        best.map(|(grade, _, id)| (id, grade))
    }
}

/// Grades `candidate` with the default sampling and split penalty.
pub fn compute_grade(candidate: &WallSegment, population: &[WallSegment]) -> i32 {
    PartitionGrader::default().compute_grade(candidate, population)
}
