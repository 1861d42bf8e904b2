//! Scattering of markers (pickups, waypoints) over the open cells of a maze.
//!
//! Markers are drawn one at a time from a window that grows with a progress counter, so early
//! markers stay close to the origin and later ones spread out over the whole maze.
use crate::error::{MazeError, Result};
use crate::maze::Maze;
use grid_util::point::Point;
use log::debug;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerConfig {
    /// Smallest Euclidean distance allowed between two markers.
    pub min_distance: f64,
    /// Samples drawn per placement before giving up.
    pub max_attempts: usize,
    /// Upper bound on the number of markers as a fraction of all cells.
    pub max_fraction: f64,
}

impl Default for MarkerConfig {
    fn default() -> MarkerConfig {
        MarkerConfig {
            min_distance: 5.0,
            max_attempts: 100,
            max_fraction: 0.05,
        }
    }
}

/// Keeps track of the markers placed on one maze.
#[derive(Clone, Debug)]
pub struct MarkerPlacer {
    config: MarkerConfig,
    markers: Vec<Point>,
}

impl MarkerPlacer {
    pub fn new(config: MarkerConfig) -> Result<MarkerPlacer> {
        if !(0.0..=1.0).contains(&config.max_fraction) {
            return Err(MazeError::InvalidConfig(format!(
                "marker fraction {} is not within [0, 1]",
                config.max_fraction
            )));
        }
        if config.min_distance.is_nan() || config.min_distance < 0.0 {
            return Err(MazeError::InvalidConfig(format!(
                "minimum marker distance {} is negative",
                config.min_distance
            )));
        }
        Ok(MarkerPlacer {
            config,
            markers: Vec::new(),
        })
    }

    pub fn markers(&self) -> &[Point] {
        &self.markers
    }

    /// Maximum number of markers `maze` can hold at once.
    pub fn capacity(&self, maze: &Maze) -> usize {
        ((maze.width() * maze.height()) as f64 * self.config.max_fraction) as usize
    }

    /// Tries to place one more marker on an open, unused cell within the window spanning from
    /// the top-left corner to `origin` shifted by `progress` in both directions. Returns [None]
    /// if the maze is at capacity or no suitable cell was sampled within the attempt budget.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        origin: Point,
        progress: usize,
        rng: &mut R,
    ) -> Option<Point> {
        if self.markers.len() >= self.capacity(maze) {
            return None;
        }
        let reach = progress.min(i32::MAX as usize) as i32;
        let x_end = origin.x.saturating_add(reach).clamp(0, maze.width() as i32 - 1);
        let y_end = origin.y.saturating_add(reach).clamp(0, maze.height() as i32 - 1);
        for _ in 0..self.config.max_attempts {
            let candidate = Point::new(rng.gen_range(0..=x_end), rng.gen_range(0..=y_end));
            if maze.is_open(candidate)
                && !self.markers.contains(&candidate)
                && !self.too_close(&candidate)
            {
                self.markers.push(candidate);
                return Some(candidate);
            }
        }
        debug!(
            "No marker placed within {} attempts",
            self.config.max_attempts
        );
        None
    }

    /// Removes the marker at `point`, returning whether there was one.
    pub fn remove(&mut self, point: Point) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| *m != point);
        self.markers.len() != before
    }

    fn too_close(&self, candidate: &Point) -> bool {
        self.markers.iter().any(|m| {
            let dx = f64::from(m.x - candidate.x);
            let dy = f64::from(m.y - candidate.y);
            dx.hypot(dy) < self.config.min_distance
        })
    }
}
