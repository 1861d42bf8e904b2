use grid_maze::{AstarSolver, Cell, GridSolver, Maze, Point};

// In this example a path is found to one of two goals on a 3x3 grid with shape
//  ___
// |S G|
// | # |
// |  G|
//  ___
// where
// - \# marks an obstacle
// - S marks the start
// - G marks a goal
// The found path moves to the closest goal, which is the top one.

fn main() {
    let mut maze = Maze::new(3, 3, Cell::Open).unwrap();
    maze.set(Point::new(1, 1), Cell::Wall);
    println!("{}", maze);
    let start = Point::new(0, 0);
    let goals = [Point::new(2, 0), Point::new(2, 2)];
    let (selected_goal, path) = AstarSolver::new()
        .find_path_multiple_goals(&maze, start, &goals)
        .unwrap()
        .unwrap();
    println!("Selected goal: {:?}\n", selected_goal);
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
