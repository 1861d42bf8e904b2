use crate::error::Result;
use crate::maze::Maze;
use crate::search::astar;
use crate::{manhattan_distance, Path};
use grid_util::point::Point;
use log::debug;
use smallvec::SmallVec;

pub mod astar;
pub mod dijkstra;

/// Size of the inline buffer for successors; a 4-neighbourhood never spills.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Open 4-connected neighbours of `node`, each reachable at unit cost.
pub fn unit_neighbourhood(maze: &Maze, node: &Point) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
    maze.neighbours(*node).into_iter().map(|p| (p, 1)).collect()
}

/// A best-first search over the open cells of a [Maze]. Implementors choose the heuristic and
/// the successor generation; the search itself, bounds checking and path reconstruction are
/// shared.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn successors(&self, maze: &Maze, node: &Point) -> Self::Successors;

    /// Total cost of following `path`, which for unit moves is its number of steps.
    fn path_cost(&self, path: &[Point]) -> i32 {
        path.windows(2)
            .map(|w| manhattan_distance(&w[0], &w[1]))
            .sum()
    }

    /// Computes a minimum-cost path from `start` to `goal`, both included. Returns `Ok(None)` if
    /// the goal cannot be reached and [MazeError::OutOfBounds](crate::MazeError::OutOfBounds)
    /// if either endpoint lies outside the maze.
    ///
    /// Only open cells are entered. The start itself is expanded regardless of its state, while a
    /// walled goal is never reached unless it is the start, which yields `[start]`.
    fn find_path(&self, maze: &Maze, start: Point, goal: Point) -> Result<Option<Path>> {
        maze.check_bounds(start)?;
        maze.check_bounds(goal)?;
        let result = astar(
            &start,
            |node| self.successors(maze, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        );
        match &result {
            Some((path, cost)) => debug!(
                "Found path from {start} to {goal} with cost {cost} over {} cells",
                path.len()
            ),
            None => debug!("{goal} is not reachable from {start}"),
        }
        Ok(result.map(|(path, _)| path))
    }

    /// Computes a path from the start to the closest of `goals` and returns the selected goal in
    /// addition to the found path. The heuristic is the smallest estimate over all goals.
    /// Otherwise behaves like [find_path](Self::find_path).
    fn find_path_multiple_goals(
        &self,
        maze: &Maze,
        start: Point,
        goals: &[Point],
    ) -> Result<Option<(Point, Path)>> {
        maze.check_bounds(start)?;
        for goal in goals {
            maze.check_bounds(*goal)?;
        }
        if goals.is_empty() {
            return Ok(None);
        }
        let result = astar(
            &start,
            |node| self.successors(maze, node),
            |point| {
                goals
                    .iter()
                    .map(|goal| self.heuristic(point, goal))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
        );
        Ok(result.and_then(|(path, _)| path.last().copied().map(|goal| (goal, path))))
    }
}
