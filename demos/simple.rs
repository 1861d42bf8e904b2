use grid_maze::{AstarSolver, GridSolver, Maze, Point};

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() {
    let maze: Maze = "#####\n#...#\n#.#.#\n#...#\n#####".parse().unwrap();
    println!("{}", maze);
    let start = Point::new(1, 1);
    let end = Point::new(3, 3);
    if let Some(path) = AstarSolver::new().find_path(&maze, start, end).unwrap() {
        println!("A path has been found:");
        for p in path {
            println!("{:?}", p);
        }
    }
}
