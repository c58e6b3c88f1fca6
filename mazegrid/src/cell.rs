#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
    Exit,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Character this cell renders as, matching the layout file convention.
    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Path => ' ',
            Cell::Exit => 'E',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Wall
    }
}
