use grid_util::point::Point;
use smallvec::SmallVec;

use crate::maze::Maze;
use crate::solver::{unit_neighbourhood, GridSolver, N_SMALLVEC_SIZE};

/// Uninformed uniform-cost search. Explores more cells than [AstarSolver](super::astar::AstarSolver)
/// but serves as an independent reference for path lengths.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, maze: &Maze, node: &Point) -> Self::Successors {
        unit_neighbourhood(maze, node)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
