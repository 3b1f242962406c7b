//! Food placement on the grid
//!
//! Placement samples random cells a bounded number of times, then falls back
//! to a row-major scan so a free cell is always found if one exists. A full
//! board yields the last sampled cell instead of looping forever.

use log::{debug, warn};
use rand::Rng;
use std::collections::HashSet;

use super::config::MAX_GRID_SIZE;
use super::state::Position;

/// Picks free cells for food using an injectable random source
pub struct FoodPlacer<R: Rng> {
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R, max_attempts: usize) -> Self {
        Self {
            rng,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Choose a cell not in `occupied`
    ///
    /// `grid_size` is clamped to `1..=MAX_GRID_SIZE`.
    pub fn place(&mut self, occupied: &HashSet<Position>, grid_size: usize) -> Position {
        let size = grid_size.clamp(1, MAX_GRID_SIZE);
        let mut last = Position::new(0, 0);

        for attempt in 1..=self.max_attempts {
            last = Position::new(
                self.rng.gen_range(0..size) as i32,
                self.rng.gen_range(0..size) as i32,
            );
            if !occupied.contains(&last) {
                debug!("Placed food at ({}, {}) after {} attempt(s)", last.x, last.y, attempt);
                return last;
            }
        }

        if let Some(free) = first_free_cell(occupied, size) {
            debug!(
                "Random placement exhausted {} attempts, scanned to ({}, {})",
                self.max_attempts, free.x, free.y
            );
            return free;
        }

        warn!(
            "Board is full, food placed on occupied cell ({}, {})",
            last.x, last.y
        );
        last
    }
}

fn first_free_cell(occupied: &HashSet<Position>, size: usize) -> Option<Position> {
    (0..size as i32)
        .flat_map(|y| (0..size as i32).map(move |x| Position::new(x, y)))
        .find(|pos| !occupied.contains(pos))
}
