use grid_util::point::Point;
use smallvec::SmallVec;

use crate::maze::Maze;
use crate::solver::{unit_neighbourhood, GridSolver, N_SMALLVEC_SIZE};
use crate::manhattan_distance;

/// A* over the 4-neighbourhood guided by the Manhattan distance, which never overestimates on a
/// unit-cost grid so the returned paths are shortest paths. Ties between equally promising cells
/// are broken deterministically, so repeated searches on the same maze return the same path.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, maze: &Maze, node: &Point) -> Self::Successors {
        unit_neighbourhood(maze, node)
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan_distance(p1, p2)
    }
}
