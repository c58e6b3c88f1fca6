//! Maze core of the mazewalk game: the grid model, the randomized
//! depth-first-search carve, and the textual layout loader.

pub mod cell;
pub mod dims;
mod generate;
pub mod grid;
pub mod layout;

pub use cell::Cell;
pub use dims::Dims;
pub use grid::MazeGrid;
pub use layout::LayoutError;
