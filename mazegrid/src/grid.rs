use std::fmt;

use crate::{cell::Cell, dims::Dims};

/// A rectangular maze of [`Cell`]s, indexed `[y][x]` from the top-left corner.
///
/// The grid starts out filled with walls and is carved exactly once, either by
/// [`generate`](Self::generate) or by [`from_layout`](Self::from_layout).
/// After that it is only ever read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    pub(crate) cells: Vec<Vec<Cell>>,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) start: Option<Dims>,
    pub(crate) exit: Option<Dims>,
}

impl MazeGrid {
    /// Creates a wall-filled grid. Even dimensions are bumped up by one so
    /// corridors and walls alternate, and anything smaller is clamped to 3.
    pub fn new(size: Dims) -> Self {
        let width = Self::normalize_dim(size.0);
        let height = Self::normalize_dim(size.1);

        MazeGrid {
            cells: vec![vec![Cell::Wall; width as usize]; height as usize],
            width,
            height,
            start: None,
            exit: None,
        }
    }

    fn normalize_dim(dim: i32) -> i32 {
        let dim = if dim % 2 == 0 { dim + 1 } else { dim };
        dim.max(3)
    }

    pub fn size(&self) -> Dims {
        Dims(self.width, self.height)
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.width && 0 <= pos.1 && pos.1 < self.height
    }

    pub fn cell(&self, pos: Dims) -> Option<Cell> {
        if self.is_in_bounds(pos) {
            Some(self.cells[pos.1 as usize][pos.0 as usize])
        } else {
            None
        }
    }

    pub(crate) fn set_cell(&mut self, pos: Dims, cell: Cell) {
        self.cells[pos.1 as usize][pos.0 as usize] = cell;
    }

    /// Whether a player may stand on `pos`. Out-of-bounds coordinates are a
    /// normal `false`, never an error.
    pub fn is_valid_move(&self, pos: Dims) -> bool {
        match self.cell(pos) {
            Some(cell) => !cell.is_wall(),
            None => false,
        }
    }

    /// Whether `pos` is the recorded exit coordinate.
    pub fn is_exit(&self, pos: Dims) -> bool {
        self.exit == Some(pos)
    }

    pub fn exit_position(&self) -> Option<Dims> {
        self.exit
    }

    /// Where the player enters the maze: the `P` coordinate of a loaded
    /// layout, or the carve origin `(1, 1)`.
    pub fn start_position(&self) -> Dims {
        self.start.unwrap_or(Dims(1, 1))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
