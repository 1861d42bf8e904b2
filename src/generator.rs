//! Randomized depth-first maze carving.
//!
//! Carving starts at the entry and only ever jumps two cells at a time, so the cells sharing the
//! entry's parity form a lattice of rooms and the cells in between become the passages. The
//! backtracker keeps its frames on an explicit stack, which keeps memory bounded and avoids
//! overflowing the call stack on large grids.
use crate::error::{MazeError, Result};
use crate::maze::{Cell, Maze};
use crate::CARDINALS;
use grid_util::point::Point;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Settings for [MazeGenerator]. The defaults match a 50x50 playfield with the entry in the
/// top-left and the exit in the bottom-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    pub entry: Point,
    /// Defaults to the bottom-right corner when [None].
    pub exit: Option<Point>,
    /// Probability in `[0, 1]` of knocking out each wall left between two rooms after carving.
    /// Anything above zero introduces loops, so the maze is no longer perfect.
    pub loop_density: f64,
    /// Regenerate until the exit is reachable from the entry instead of only forcing it open.
    pub ensure_solvable: bool,
    /// Number of generations tried when `ensure_solvable` is set.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        GeneratorConfig {
            width: 50,
            height: 50,
            entry: Point::new(0, 0),
            exit: None,
            loop_density: 0.0,
            ensure_solvable: false,
            max_attempts: 16,
        }
    }
}

impl GeneratorConfig {
    /// The configured exit, or the bottom-right corner.
    pub fn exit_point(&self) -> Point {
        self.exit.unwrap_or_else(|| {
            Point::new(
                self.width.saturating_sub(1) as i32,
                self.height.saturating_sub(1) as i32,
            )
        })
    }

    fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        for point in [self.entry, self.exit_point()] {
            let inside = point.x >= 0
                && point.y >= 0
                && (point.x as usize) < self.width
                && (point.y as usize) < self.height;
            if !inside {
                return Err(MazeError::OutOfBounds {
                    point,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.loop_density) {
            return Err(MazeError::InvalidConfig(format!(
                "loop density {} is not within [0, 1]",
                self.loop_density
            )));
        }
        if self.ensure_solvable && self.max_attempts == 0 {
            return Err(MazeError::InvalidConfig(
                "max_attempts must be positive when ensure_solvable is set".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Builds mazes from a validated [GeneratorConfig].
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    pub fn new(config: GeneratorConfig) -> Result<MazeGenerator> {
        config.validate()?;
        Ok(MazeGenerator { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a maze drawing all randomness from `rng`; the same generator state always
    /// yields the same maze.
    ///
    /// The exit and the cell above it (or to its left on the top row) are forced open after
    /// carving. This always opens the exit but does not by itself prove that it is connected to
    /// the carved region. The forced cells are guaranteed to touch a room when the entry is
    /// `(0, 0)`, whatever the exit, or when the exit is the default bottom-right corner, whatever
    /// corner the entry is in. Other placements can leave the exit isolated: on a 2x2 grid with
    /// the entry at `(1, 1)` the exit `(0, 0)` has nothing above or to its left to force open.
    /// An isolated exit shows up as a search that finds no path. Set
    /// [GeneratorConfig::ensure_solvable] to verify reachability and retry.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze> {
        let config = &self.config;
        let exit = config.exit_point();
        info!(
            "Generating {}x{} maze from {} to {}",
            config.width, config.height, config.entry, exit
        );
        for attempt in 1..=config.max_attempts.max(1) {
            let maze = self.build(rng)?;
            if !config.ensure_solvable || maze.components().reachable(config.entry, exit) {
                info!("Maze ready with {} open cells", maze.count_open());
                return Ok(maze);
            }
            warn!("Attempt {attempt}: exit {exit} is not reachable from {}", config.entry);
        }
        Err(MazeError::Unsolvable {
            attempts: config.max_attempts,
        })
    }

    /// Convenience wrapper around [generate](Self::generate) seeding a [StdRng].
    pub fn generate_seeded(&self, seed: u64) -> Result<Maze> {
        self.generate(&mut StdRng::seed_from_u64(seed))
    }

    fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Maze> {
        let config = &self.config;
        let mut maze = Maze::new(config.width, config.height, Cell::Wall)?;
        carve(&mut maze, config.entry, rng);
        if config.loop_density > 0.0 {
            let opened = add_loops(&mut maze, config.entry, config.loop_density, rng);
            debug!("Opened {opened} extra walls");
        }
        open_exit(&mut maze, config.exit_point());
        Ok(maze)
    }
}

/// A visited room with its own shuffled order of directions still to try.
struct Frame {
    cell: Point,
    directions: [(i32, i32); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(maze: &mut Maze, cell: Point, rng: &mut R) -> Frame {
        maze.set(cell, Cell::Open);
        let mut directions = CARDINALS;
        directions.shuffle(rng);
        Frame {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Carves passages from `entry`, visiting the unvisited room two cells away in each direction
/// and opening the cell in between before continuing from there.
fn carve<R: Rng + ?Sized>(maze: &mut Maze, entry: Point, rng: &mut R) {
    let mut stack = vec![Frame::enter(maze, entry, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&(dx, dy)) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;
        let room = Point::new(cell.x + 2 * dx, cell.y + 2 * dy);
        if maze.cell(room) == Some(Cell::Wall) {
            maze.set(Point::new(cell.x + dx, cell.y + dy), Cell::Open);
            stack.push(Frame::enter(maze, room, rng));
        }
    }
}

fn is_room(point: Point, entry: Point) -> bool {
    (point.x - entry.x).rem_euclid(2) == 0 && (point.y - entry.y).rem_euclid(2) == 0
}

/// Opens walls that separate two open rooms with probability `density` and returns how many were
/// opened.
fn add_loops<R: Rng + ?Sized>(maze: &mut Maze, entry: Point, density: f64, rng: &mut R) -> usize {
    let separates_rooms = |maze: &Maze, a: Point, b: Point| {
        is_room(a, entry) && is_room(b, entry) && maze.is_open(a) && maze.is_open(b)
    };
    let mut opened = 0;
    for y in 0..maze.height() as i32 {
        for x in 0..maze.width() as i32 {
            let p = Point::new(x, y);
            if maze.is_open(p) {
                continue;
            }
            let horizontal = separates_rooms(maze, Point::new(x - 1, y), Point::new(x + 1, y));
            let vertical = separates_rooms(maze, Point::new(x, y - 1), Point::new(x, y + 1));
            if (horizontal || vertical) && rng.gen_bool(density) {
                maze.set(p, Cell::Open);
                opened += 1;
            }
        }
    }
    opened
}

/// Forces `exit` and the cell above it open, falling back to the cell on its left when the exit
/// is on the top row.
fn open_exit(maze: &mut Maze, exit: Point) {
    let predecessor = if exit.y > 0 {
        Some(Point::new(exit.x, exit.y - 1))
    } else if exit.x > 0 {
        Some(Point::new(exit.x - 1, exit.y))
    } else {
        None
    };
    for p in std::iter::once(exit).chain(predecessor) {
        if !maze.is_open(p) {
            debug!("Forcing {p} open next to the exit");
            maze.set(p, Cell::Open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(width: usize, height: usize) -> MazeGenerator {
        MazeGenerator::new(GeneratorConfig {
            width,
            height,
            ..GeneratorConfig::default()
        })
        .unwrap()
    }

    /// Number of 4-adjacent open pairs.
    fn open_edges(maze: &Maze) -> usize {
        maze.open_cells()
            .map(|p| {
                [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)]
                    .into_iter()
                    .filter(|n| maze.is_open(*n))
                    .count()
            })
            .sum()
    }

    #[test]
    fn rejects_invalid_dimensions() {
        for (width, height) in [(1, 5), (5, 1), (0, 0)] {
            let config = GeneratorConfig {
                width,
                height,
                ..GeneratorConfig::default()
            };
            assert!(matches!(
                MazeGenerator::new(config),
                Err(MazeError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let config = GeneratorConfig {
            width: 5,
            height: 5,
            exit: Some(Point::new(5, 4)),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            MazeGenerator::new(config),
            Err(MazeError::OutOfBounds { .. })
        ));
        let config = GeneratorConfig {
            width: 5,
            height: 5,
            entry: Point::new(-1, 0),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            MazeGenerator::new(config),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_bad_density() {
        for loop_density in [-0.1, 1.5, f64::NAN] {
            let config = GeneratorConfig {
                loop_density,
                ..GeneratorConfig::default()
            };
            assert!(matches!(
                MazeGenerator::new(config),
                Err(MazeError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn entry_and_exit_are_open() {
        for width in 2..10 {
            for height in 2..10 {
                let generator = generator(width, height);
                let maze = generator.generate_seeded(width as u64 * 31 + height as u64).unwrap();
                assert_eq!(maze.width(), width);
                assert_eq!(maze.height(), height);
                assert!(maze.is_open(Point::new(0, 0)));
                assert!(maze.is_open(generator.config().exit_point()));
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let generator = generator(21, 15);
        assert_eq!(
            generator.generate_seeded(3).unwrap(),
            generator.generate_seeded(3).unwrap()
        );
        assert_ne!(
            generator.generate_seeded(3).unwrap(),
            generator.generate_seeded(4).unwrap()
        );
    }

    /// Without the exit patch the carved cells form a spanning tree over the rooms.
    #[test]
    fn carving_forms_a_tree() {
        let mut rng = StdRng::seed_from_u64(0);
        for (width, height) in [(2, 2), (7, 7), (10, 13), (31, 20)] {
            let mut maze = Maze::new(width, height, Cell::Wall).unwrap();
            carve(&mut maze, Point::new(0, 0), &mut rng);
            let rooms = ((width + 1) / 2) * ((height + 1) / 2);
            assert_eq!(maze.count_open(), 2 * rooms - 1);
            assert_eq!(open_edges(&maze), maze.count_open() - 1);
            assert!(maze.is_fully_connected(Point::new(0, 0)));
        }
    }

    #[test]
    fn carving_follows_entry_parity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut maze = Maze::new(6, 6, Cell::Wall).unwrap();
        carve(&mut maze, Point::new(1, 1), &mut rng);
        // Rooms are the odd cells; the even border cells are never reached.
        assert!(!maze.is_open(Point::new(0, 0)));
        assert!(maze.is_open(Point::new(5, 5)));
        assert_eq!(maze.count_open(), 2 * 9 - 1);
    }

    #[test]
    fn deep_maze_does_not_overflow() {
        let maze = generator(401, 401).generate_seeded(0).unwrap();
        assert_eq!(maze.count_open(), 2 * 201 * 201 - 1);
    }

    #[test]
    fn loop_density_opens_walls() {
        let perfect = generator(21, 21).generate_seeded(9).unwrap();
        let braided = MazeGenerator::new(GeneratorConfig {
            width: 21,
            height: 21,
            loop_density: 1.0,
            ..GeneratorConfig::default()
        })
        .unwrap()
        .generate_seeded(9)
        .unwrap();
        // With density 1 every wall between two rooms is removed.
        assert_eq!(braided.count_open(), 11 * 11 + 2 * 11 * 10);
        assert!(braided.count_open() > perfect.count_open());
    }

    #[test]
    fn exit_on_top_row_opens_left_cell() {
        let mut maze = Maze::new(4, 4, Cell::Wall).unwrap();
        open_exit(&mut maze, Point::new(3, 0));
        assert!(maze.is_open(Point::new(3, 0)));
        assert!(maze.is_open(Point::new(2, 0)));
        assert_eq!(maze.count_open(), 2);
    }

    /// With the entry on odd cells the top-left corner is never carved and has no cell above or
    /// to its left to attach to.
    #[test]
    fn isolated_exit_is_detected() {
        let config = GeneratorConfig {
            width: 8,
            height: 8,
            entry: Point::new(1, 1),
            exit: Some(Point::new(0, 0)),
            ..GeneratorConfig::default()
        };
        let maze = MazeGenerator::new(config.clone())
            .unwrap()
            .generate_seeded(0)
            .unwrap();
        assert!(maze.is_open(Point::new(0, 0)));
        assert!(!maze.components().reachable(Point::new(1, 1), Point::new(0, 0)));

        let strict = MazeGenerator::new(GeneratorConfig {
            ensure_solvable: true,
            max_attempts: 3,
            ..config
        })
        .unwrap();
        assert_eq!(
            strict.generate_seeded(0),
            Err(MazeError::Unsolvable { attempts: 3 })
        );
    }

    /// A corner exit with no cell above or to its left stays cut off from odd-parity rooms.
    #[test]
    fn corner_exit_isolated_from_odd_entry() {
        for (width, height, entry) in [(2, 2, Point::new(1, 1)), (2, 4, Point::new(1, 3))] {
            let maze = MazeGenerator::new(GeneratorConfig {
                width,
                height,
                entry,
                exit: Some(Point::new(0, 0)),
                ..GeneratorConfig::default()
            })
            .unwrap()
            .generate_seeded(0)
            .unwrap();
            assert!(maze.is_open(Point::new(0, 0)));
            assert!(!maze.components().reachable(entry, Point::new(0, 0)));
        }
    }

    /// Exits are always connected when the entry is the top-left corner, and the default exit is
    /// connected from every corner entry.
    #[test]
    fn forced_exit_connects_from_corner_entries() {
        for width in 2..10 {
            for height in 2..10 {
                let (w, h) = (width as i32, height as i32);
                let corners = [
                    Point::new(0, 0),
                    Point::new(w - 1, 0),
                    Point::new(0, h - 1),
                    Point::new(w - 1, h - 1),
                ];
                for seed in 0..4 {
                    for entry in corners {
                        let maze = MazeGenerator::new(GeneratorConfig {
                            width,
                            height,
                            entry,
                            ..GeneratorConfig::default()
                        })
                        .unwrap()
                        .generate_seeded(seed)
                        .unwrap();
                        assert!(maze.is_fully_connected(entry), "{width}x{height} from {entry}");
                    }
                    for y in 0..h {
                        for x in 0..w {
                            let exit = Point::new(x, y);
                            let maze = MazeGenerator::new(GeneratorConfig {
                                width,
                                height,
                                exit: Some(exit),
                                ..GeneratorConfig::default()
                            })
                            .unwrap()
                            .generate_seeded(seed)
                            .unwrap();
                            assert!(
                                maze.components().reachable(Point::new(0, 0), exit),
                                "{width}x{height} to {exit}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn ensure_solvable_accepts_default_exit() {
        let maze = MazeGenerator::new(GeneratorConfig {
            width: 12,
            height: 9,
            ensure_solvable: true,
            ..GeneratorConfig::default()
        })
        .unwrap()
        .generate_seeded(5)
        .unwrap();
        assert!(maze
            .components()
            .reachable(Point::new(0, 0), Point::new(11, 8)));
    }
}
