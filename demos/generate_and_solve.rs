use grid_maze::{AstarSolver, GeneratorConfig, GridSolver, MazeGenerator};
use std::env;

// Generates a maze from the seed given as first argument (0 by default), then prints it with the
// shortest path from the entry to the exit marked as 'o'.
fn main() {
    let seed = env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let generator = MazeGenerator::new(GeneratorConfig {
        width: 31,
        height: 21,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let maze = generator.generate_seeded(seed).unwrap();
    let start = generator.config().entry;
    let end = generator.config().exit_point();
    let path = AstarSolver::new().find_path(&maze, start, end).unwrap();

    let mut rows = maze
        .to_string()
        .lines()
        .map(|line| line.chars().collect::<Vec<char>>())
        .collect::<Vec<_>>();
    match &path {
        Some(path) => {
            for p in path {
                rows[p.y as usize][p.x as usize] = 'o';
            }
        }
        None => println!("No path found from {start} to {end}"),
    }
    for row in rows {
        println!("{}", row.into_iter().collect::<String>());
    }
    if let Some(path) = path {
        println!("Path length: {} steps", path.len() - 1);
    }
}
