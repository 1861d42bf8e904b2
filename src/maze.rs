use crate::error::{MazeError, Result};
use crate::CARDINALS;
use core::fmt;
use core::str::FromStr;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// State of a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    fn blocked(self) -> bool {
        self == Cell::Wall
    }
}

/// A rectangular grid of [Cell]s backed by a [BoolGrid] in which `true` marks a wall.
///
/// Points use `x` for the column and `y` for the row, with `(0, 0)` in the top-left corner. The
/// dimensions never change after construction; only cell states can be updated, which the
/// generator does while carving and test fixtures do while building scenarios.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: BoolGrid,
    width: usize,
    height: usize,
}

impl Maze {
    /// Creates a maze with every cell set to `fill`. Both sides must be at least 2.
    pub fn new(width: usize, height: usize, fill: Cell) -> Result<Maze> {
        if width < 2 || height < 2 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Maze::filled(width, height, fill))
    }

    /// Unchecked variant of [new](Self::new) which accepts any non-zero size, used for small
    /// fixtures such as single rows.
    pub fn filled(width: usize, height: usize, fill: Cell) -> Maze {
        Maze {
            grid: BoolGrid::new(width, height, fill.blocked()),
            width,
            height,
        }
    }

    /// Builds a maze from rows in which `1` marks an open cell and any other value a wall.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Maze> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::Parse("maze has no cells".to_owned()));
        }
        let mut maze = Maze::filled(width, rows.len(), Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::Parse(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (x, &value) in row.iter().enumerate() {
                if value == 1 {
                    maze.set(Point::new(x as i32, y as i32), Cell::Open);
                }
            }
        }
        Ok(maze)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// Fails with [MazeError::OutOfBounds] if `point` is not on the grid.
    pub fn check_bounds(&self, point: Point) -> Result<()> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The state of the cell at `point`, or [None] if it lies outside the grid.
    pub fn cell(&self, point: Point) -> Option<Cell> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(if self.grid.get(point.x, point.y) {
            Cell::Wall
        } else {
            Cell::Open
        })
    }

    pub fn is_open(&self, point: Point) -> bool {
        self.cell(point) == Some(Cell::Open)
    }

    /// Sets the cell at `point`. Points outside the grid are ignored.
    pub fn set(&mut self, point: Point, cell: Cell) {
        if self.in_bounds(point) {
            self.grid.set(point.x, point.y, cell.blocked());
        }
    }

    /// Open 4-connected neighbours of `point` in the order up, down, left, right.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        CARDINALS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|&p| self.is_open(p))
            .collect()
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Point::new(x, y)))
            .filter(move |&p| self.is_open(p))
    }

    pub fn count_open(&self) -> usize {
        self.open_cells().count()
    }

    fn ix(&self, point: Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Links up open 4-connected neighbours into components using a [UnionFind] structure.
    pub fn components(&self) -> Components<'_> {
        let mut sets = UnionFind::new(self.width * self.height);
        let mut count = 0;
        for p in self.open_cells() {
            count += 1;
            let parent_ix = self.ix(p);
            // Looking right and down is enough to visit every edge once.
            for n in [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)] {
                if self.is_open(n) && sets.union(parent_ix, self.ix(n)) {
                    count -= 1;
                }
            }
        }
        Components {
            sets,
            count,
            maze: self,
        }
    }

    /// Checks whether every open cell can be reached from `from` through open cells only.
    pub fn is_fully_connected(&self, from: Point) -> bool {
        self.is_open(from) && self.components().count() == 1
    }
}

/// Snapshot of the connected open regions of a [Maze].
pub struct Components<'a> {
    sets: UnionFind<usize>,
    count: usize,
    maze: &'a Maze,
}

impl Components<'_> {
    /// Number of distinct open regions.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Checks if `start` and `goal` are open and lie on the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        self.maze.is_open(start)
            && self.maze.is_open(goal)
            && self.sets.equiv(self.maze.ix(start), self.maze.ix(goal))
    }
}

impl PartialEq for Maze {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (0..self.height as i32).all(|y| {
                (0..self.width as i32).all(|x| self.grid.get(x, y) == other.grid.get(x, y))
            })
    }
}

impl Eq for Maze {}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Parses the format produced by [Display](fmt::Display): `#` for walls, `.` for open cells.
/// Blank lines and trailing whitespace are ignored.
impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Maze> {
        let rows = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '.' => Ok(1),
                        '#' => Ok(0),
                        other => Err(MazeError::Parse(format!("unexpected character {other:?}"))),
                    })
                    .collect::<Result<Vec<u8>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Maze::from_rows(&rows)
    }
}
