use crossterm::event::KeyEventKind;
use mazegrid::{Dims, MazeGrid};

pub fn line_center(container_start: i32, container_end: i32, item_width: i32) -> i32 {
    (container_end - container_start - item_width) / 2 + container_start
}

pub fn box_center(container_start: Dims, container_end: Dims, box_dims: Dims) -> Dims {
    Dims(
        line_center(container_start.0, container_end.0, box_dims.0),
        line_center(container_start.1, container_end.1, box_dims.1),
    )
}

/// On-screen footprint of a maze drawn two columns per cell.
pub fn maze_render_size(maze: &MazeGrid) -> Dims {
    let size = maze.size();
    Dims(size.0 * 2 - 1, size.1)
}

pub fn maze2screen(pos: Dims) -> Dims {
    Dims(pos.0 * 2, pos.1)
}

pub fn is_release(kind: KeyEventKind) -> bool {
    matches!(kind, KeyEventKind::Release)
}
