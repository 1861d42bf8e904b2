//! # grid_maze
//!
//! Generates perfect mazes with a randomized
//! [depth-first backtracker](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search)
//! and finds shortest 4-connected paths through them with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//!
//! Coordinates are [Point]s where `x` is the column and `y` the row, with `(0, 0)` in the
//! top-left corner. Generation produces a [Maze] value which the solvers only ever read, so
//! several searches can share one maze.
//!
//! ```
//! use grid_maze::{AstarSolver, GeneratorConfig, GridSolver, MazeGenerator, Point};
//!
//! let config = GeneratorConfig {
//!     width: 21,
//!     height: 21,
//!     ..GeneratorConfig::default()
//! };
//! let maze = MazeGenerator::new(config).unwrap().generate_seeded(7).unwrap();
//! let path = AstarSolver::new()
//!     .find_path(&maze, Point::new(0, 0), Point::new(20, 20))
//!     .unwrap()
//!     .expect("default exit is reachable");
//! assert_eq!(path.first(), Some(&Point::new(0, 0)));
//! ```
pub mod error;
pub mod generator;
pub mod markers;
pub mod maze;
pub mod search;
pub mod solver;

pub use error::{MazeError, Result};
pub use generator::{GeneratorConfig, MazeGenerator};
pub use grid_util::point::Point;
pub use markers::{MarkerConfig, MarkerPlacer};
pub use maze::{Cell, Components, Maze};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// An ordered sequence of cells from start to goal, both inclusive.
pub type Path = Vec<Point>;

/// Axis-aligned unit offsets in the order up, down, left, right.
pub(crate) const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Taxicab distance `|x1 - x2| + |y1 - y2|`. Admissible and consistent on a uniform-cost
/// 4-connected grid since every step changes exactly one coordinate by one.
pub fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Number of moves along `path`, which is one less than the number of cells.
pub fn path_steps(path: &[Point]) -> usize {
    path.len().saturating_sub(1)
}

/// Checks that `path` is non-empty, only visits open cells and only takes 4-connected unit steps.
pub fn is_valid_path(maze: &Maze, path: &[Point]) -> bool {
    !path.is_empty()
        && path.iter().all(|p| maze.is_open(*p))
        && path
            .windows(2)
            .all(|w| manhattan_distance(&w[0], &w[1]) == 1)
}
