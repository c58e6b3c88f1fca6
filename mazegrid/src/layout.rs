use thiserror::Error;

use crate::{cell::Cell, dims::Dims, grid::MazeGrid};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("missing header line")]
    MissingHeader,
    #[error("header must be \"<width> <height>\", got {0:?}")]
    InvalidHeader(String),
    #[error("dimensions must be positive, got {0}x{1}")]
    InvalidDimensions(i32, i32),
    #[error("missing row {0}, expected {1}")]
    MissingRow(usize, usize),
    #[error("row {0} holds {1} cells, expected at least {2}")]
    ShortRow(usize, usize, usize),
    #[error("no exit cell (`E`) in layout")]
    MissingExit,
}

impl MazeGrid {
    /// Builds a grid from its textual layout: a `"<width> <height>"` header
    /// line followed by `height` rows of at least `width` characters.
    ///
    /// `#` is a wall, `E` the exit, `P` the player start, anything else an
    /// open path. Loaded dimensions are trusted as-is, without the odd-size
    /// normalization of [`new`](Self::new).
    pub fn from_layout(text: &str) -> Result<MazeGrid, LayoutError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(LayoutError::MissingHeader)?;

        let mut tokens = header.split_whitespace();
        let (width, height) = match (tokens.next(), tokens.next()) {
            (Some(w), Some(h)) => match (w.parse::<i32>(), h.parse::<i32>()) {
                (Ok(w), Ok(h)) => (w, h),
                _ => return Err(LayoutError::InvalidHeader(header.to_string())),
            },
            _ => return Err(LayoutError::InvalidHeader(header.to_string())),
        };
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidDimensions(width, height));
        }

        let mut cells = Vec::with_capacity(height as usize);
        let mut start = None;
        let mut exit = None;

        for y in 0..height {
            let line = lines
                .next()
                .ok_or(LayoutError::MissingRow(y as usize, height as usize))?;
            let mut row = Vec::with_capacity(width as usize);

            for (x, c) in line.chars().take(width as usize).enumerate() {
                row.push(match c {
                    '#' => Cell::Wall,
                    'E' => {
                        exit = Some(Dims(x as i32, y));
                        Cell::Exit
                    }
                    'P' => {
                        // the start marker is stored as an open path
                        if start.is_none() {
                            start = Some(Dims(x as i32, y));
                        }
                        Cell::Path
                    }
                    _ => Cell::Path,
                });
            }

            if row.len() < width as usize {
                return Err(LayoutError::ShortRow(y as usize, row.len(), width as usize));
            }

            cells.push(row);
        }

        let exit = exit.ok_or(LayoutError::MissingExit)?;

        Ok(MazeGrid {
            cells,
            width,
            height,
            start,
            exit: Some(exit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_BY_FIVE: &str = "\
5 5
#####
#P# #
# # #
#  E#
#####";

    #[test]
    fn round_trips_a_hand_authored_maze() {
        let grid = MazeGrid::from_layout(FIVE_BY_FIVE).unwrap();
        assert_eq!(grid.size(), Dims(5, 5));
        assert_eq!(grid.start_position(), Dims(1, 1));
        assert!(grid.is_exit(Dims(3, 3)));
        assert_eq!(grid.exit_position(), Some(Dims(3, 3)));

        // the start marker is an open path cell, not a tag of its own
        assert_eq!(grid.cell(Dims(1, 1)), Some(Cell::Path));
        assert_eq!(grid.cell(Dims(2, 1)), Some(Cell::Wall));
        assert_eq!(grid.cell(Dims(3, 1)), Some(Cell::Path));
        assert_eq!(grid.cell(Dims(3, 3)), Some(Cell::Exit));
        assert!(grid.is_valid_move(Dims(3, 3)));
        assert!(!grid.is_valid_move(Dims(0, 0)));
    }

    #[test]
    fn display_prints_the_layout_rows() {
        let grid = MazeGrid::from_layout(FIVE_BY_FIVE).unwrap();
        assert_eq!(grid.to_string(), "#####\n# # #\n# # #\n#  E#\n#####\n");
    }

    #[test]
    fn loaded_dimensions_are_not_normalized() {
        let grid = MazeGrid::from_layout("4 3\n####\n#PE#\n####").unwrap();
        assert_eq!(grid.size(), Dims(4, 3));
        assert_eq!(grid.start_position(), Dims(1, 1));
        assert!(grid.is_exit(Dims(2, 1)));
    }

    #[test]
    fn first_start_and_last_exit_win() {
        let grid = MazeGrid::from_layout("3 2\nPPE\nE  ").unwrap();
        assert_eq!(grid.start_position(), Dims(0, 0));
        assert_eq!(grid.cell(Dims(1, 0)), Some(Cell::Path));
        assert_eq!(grid.exit_position(), Some(Dims(0, 1)));
    }

    #[test]
    fn junk_beyond_width_and_extra_header_tokens_are_ignored() {
        let grid = MazeGrid::from_layout("3 2 junk\n##E##\n###??").unwrap();
        assert_eq!(grid.size(), Dims(3, 2));
        assert!(grid.is_exit(Dims(2, 0)));
    }

    #[test]
    fn unknown_characters_are_open_paths() {
        let grid = MazeGrid::from_layout("3 1\n.xE").unwrap();
        assert_eq!(grid.cell(Dims(0, 0)), Some(Cell::Path));
        assert_eq!(grid.cell(Dims(1, 0)), Some(Cell::Path));
        assert_eq!(grid.cell(Dims(2, 0)), Some(Cell::Exit));
    }

    #[test]
    fn empty_input_is_a_missing_header() {
        assert_eq!(MazeGrid::from_layout(""), Err(LayoutError::MissingHeader));
    }

    #[test]
    fn non_numeric_header_fails() {
        assert_eq!(
            MazeGrid::from_layout("abc def\n###"),
            Err(LayoutError::InvalidHeader("abc def".to_string()))
        );
    }

    #[test]
    fn one_token_header_fails() {
        assert_eq!(
            MazeGrid::from_layout("5\n#####"),
            Err(LayoutError::InvalidHeader("5".to_string()))
        );
    }

    #[test]
    fn non_positive_dimensions_fail() {
        assert_eq!(
            MazeGrid::from_layout("0 5\n"),
            Err(LayoutError::InvalidDimensions(0, 5))
        );
        assert_eq!(
            MazeGrid::from_layout("-3 5\n"),
            Err(LayoutError::InvalidDimensions(-3, 5))
        );
    }

    #[test]
    fn too_few_rows_fail() {
        assert_eq!(
            MazeGrid::from_layout("5 5\n#####\n#P E#\n#####"),
            Err(LayoutError::MissingRow(3, 5))
        );
    }

    #[test]
    fn short_row_fails() {
        assert_eq!(
            MazeGrid::from_layout("5 2\n#####\n###"),
            Err(LayoutError::ShortRow(1, 3, 5))
        );
    }

    #[test]
    fn layout_without_exit_fails() {
        assert_eq!(
            MazeGrid::from_layout("3 3\n###\n#P#\n###"),
            Err(LayoutError::MissingExit)
        );
    }
}
