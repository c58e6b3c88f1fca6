use rand::{rngs::StdRng, seq::SliceRandom as _, thread_rng, Rng as _, SeedableRng as _};

use crate::{cell::Cell, dims::Dims, grid::MazeGrid};

const CARVE_ORIGIN: Dims = Dims(1, 1);
const NEIGHBOR_OFFSETS: [Dims; 4] = [Dims(0, -2), Dims(0, 2), Dims(-2, 0), Dims(2, 0)];

impl MazeGrid {
    /// Carves a maze with a seed drawn from system entropy.
    pub fn generate(&mut self) {
        self.generate_seeded(thread_rng().gen());
    }

    /// Carves a maze reproducibly from `seed`.
    ///
    /// Runs an iterative depth-first carve over the lattice of cells with
    /// both coordinates odd, then tags `(width - 2, height - 2)` as the exit.
    pub fn generate_seeded(&mut self, seed: u64) {
        log::debug!(
            "generating {}x{} maze with seed {}",
            self.width,
            self.height,
            seed
        );

        let mut rng = StdRng::seed_from_u64(seed);

        self.carve(&mut rng);
        self.place_exit(&mut rng);
        self.set_cell(CARVE_ORIGIN, Cell::Path);
    }

    fn carve(&mut self, rng: &mut StdRng) {
        self.set_cell(CARVE_ORIGIN, Cell::Path);

        let mut stack = vec![CARVE_ORIGIN];
        while let Some(&current) = stack.last() {
            let unvisited_neighbors = NEIGHBOR_OFFSETS
                .iter()
                .map(|&off| current + off)
                .filter(|&pos| self.is_unvisited(pos))
                .collect::<Vec<_>>();

            match unvisited_neighbors.choose(rng) {
                Some(&chosen) => {
                    // knock out the wall between the two lattice cells
                    self.set_cell(current + (chosen - current) / 2, Cell::Path);
                    self.set_cell(chosen, Cell::Path);
                    stack.push(chosen);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    // A cell can be carved into while it keeps one cell of border margin and
    // the carve has not reached it yet.
    fn is_unvisited(&self, pos: Dims) -> bool {
        pos.0 > 0
            && pos.0 < self.width - 1
            && pos.1 > 0
            && pos.1 < self.height - 1
            && self.cell(pos) == Some(Cell::Wall)
    }

    fn place_exit(&mut self, rng: &mut StdRng) {
        let exit = Dims(self.width - 2, self.height - 2);
        self.set_cell(exit, Cell::Exit);
        self.exit = Some(exit);

        // The carve may have left the exit corner sealed off; open one of the
        // two cells next to it rather than re-checking reachability.
        let above = exit - Dims(0, 1);
        let left = exit - Dims(1, 0);
        if self.cell(above) == Some(Cell::Wall) && self.cell(left) == Some(Cell::Wall) {
            let opened = if rng.gen() { above } else { left };
            self.set_cell(opened, Cell::Path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    fn generated(size: Dims, seed: u64) -> MazeGrid {
        let mut grid = MazeGrid::new(size);
        grid.generate_seeded(seed);
        grid
    }

    fn lattice_cells(grid: &MazeGrid) -> Vec<Dims> {
        let Dims(w, h) = grid.size();
        (1..h)
            .step_by(2)
            .flat_map(|y| (1..w).step_by(2).map(move |x| Dims(x, y)))
            .collect()
    }

    fn reachable(grid: &MazeGrid) -> HashSet<Dims> {
        let mut seen = HashSet::new();
        let mut queue = vec![grid.start_position()];
        while let Some(pos) = queue.pop() {
            if !seen.insert(pos) {
                continue;
            }
            for off in [Dims(0, -1), Dims(0, 1), Dims(-1, 0), Dims(1, 0)] {
                let next = pos + off;
                if grid.is_valid_move(next) && !seen.contains(&next) {
                    queue.push(next);
                }
            }
        }
        seen
    }

    #[test]
    fn fifteen_by_fifteen_contract() {
        let grid = generated(Dims(15, 15), 42);
        assert!(grid.is_valid_move(Dims(1, 1)));
        assert!(!grid.is_valid_move(Dims(0, 0)));
        assert!(grid.is_exit(Dims(13, 13)));
        assert_eq!(grid.exit_position(), Some(Dims(13, 13)));
        assert_eq!(grid.cell(Dims(13, 13)), Some(Cell::Exit));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generated(Dims(15, 15), 7), generated(Dims(15, 15), 7));
        assert_ne!(
            generated(Dims(15, 15), 7),
            generated(Dims(15, 15), 0xdead_beef)
        );
    }

    #[test]
    fn every_lattice_cell_is_reachable() {
        for size in [Dims(5, 5), Dims(9, 9), Dims(15, 15), Dims(21, 11)] {
            for seed in 0..8 {
                let grid = generated(size, seed);
                let seen = reachable(&grid);
                for cell in lattice_cells(&grid) {
                    assert!(
                        seen.contains(&cell),
                        "{:?} unreachable in {:?} (seed {})",
                        cell,
                        size,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn carve_is_a_spanning_tree() {
        // A tree over n lattice cells has exactly n - 1 opened connectors.
        for size in [Dims(5, 5), Dims(9, 9), Dims(15, 15), Dims(21, 11)] {
            for seed in 0..8 {
                let grid = generated(size, seed);
                let lattice = lattice_cells(&grid);

                let mut connectors = 0;
                for (y, row) in grid.rows().enumerate() {
                    for (x, cell) in row.iter().enumerate() {
                        let odd = (x % 2 == 1, y % 2 == 1);
                        match odd {
                            (true, true) => assert!(!cell.is_wall()),
                            (true, false) | (false, true) => {
                                if !cell.is_wall() {
                                    connectors += 1;
                                }
                            }
                            // pillar positions are never carved
                            (false, false) => assert!(cell.is_wall()),
                        }
                    }
                }

                assert_eq!(connectors, lattice.len() - 1, "seed {}", seed);
            }
        }
    }

    #[test]
    fn border_stays_walled() {
        let grid = generated(Dims(9, 9), 3);
        let Dims(w, h) = grid.size();
        for x in 0..w {
            assert_eq!(grid.cell(Dims(x, 0)), Some(Cell::Wall));
            assert_eq!(grid.cell(Dims(x, h - 1)), Some(Cell::Wall));
        }
        for y in 0..h {
            assert_eq!(grid.cell(Dims(0, y)), Some(Cell::Wall));
            assert_eq!(grid.cell(Dims(w - 1, y)), Some(Cell::Wall));
        }
    }

    #[test]
    fn tiny_grid_exit_overlaps_start() {
        // On a 3x3 grid the single lattice cell is both start and exit, and
        // the exit patch opens exactly one of the two cells beside it.
        for seed in 0..16 {
            let grid = generated(Dims(3, 3), seed);
            assert_eq!(grid.exit_position(), Some(Dims(1, 1)));
            assert!(grid.is_exit(Dims(1, 1)));
            assert_eq!(grid.cell(Dims(1, 1)), Some(Cell::Path));

            let above = grid.cell(Dims(1, 0)) == Some(Cell::Path);
            let left = grid.cell(Dims(0, 1)) == Some(Cell::Path);
            assert!(above != left, "seed {}: above={} left={}", seed, above, left);
        }
    }

    #[test]
    fn entropy_seeding_still_spans() {
        let mut grid = MazeGrid::new(Dims(9, 9));
        grid.generate();
        let seen = reachable(&grid);
        for cell in lattice_cells(&grid) {
            assert!(seen.contains(&cell));
        }
    }
}
