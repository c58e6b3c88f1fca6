use std::env;

use mazegrid::{Dims, MazeGrid};
use rand::{thread_rng, Rng as _};

fn main() {
    let args = env::args()
        .skip(1)
        .take(3)
        .map(|s| s.parse())
        .collect::<Result<Vec<i64>, _>>()
        .expect("Expected integers: <width> <height> [seed]");

    assert!(
        args.len() == 2 || args.len() == 3,
        "Expected <width> <height> [seed]"
    );

    let input_seed = args.get(2).copied().map(|seed| seed as u64);
    let seed = input_seed.unwrap_or_else(|| thread_rng().gen());

    if input_seed.is_none() {
        println!("Seed: {}", seed);
    }

    let mut grid = MazeGrid::new(Dims(args[0] as i32, args[1] as i32));
    grid.generate_seeded(seed);

    print!("{}", grid);
}
