use std::time::{Duration, Instant};

use mazegrid::{Dims, MazeGrid};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunningGameState {
    NotStarted,
    Running,
    Finished,
    Quitted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_coord(self) -> Dims {
        match self {
            Direction::Up => Dims(0, -1),
            Direction::Down => Dims(0, 1),
            Direction::Left => Dims(-1, 0),
            Direction::Right => Dims(1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved(Dims),
    Blocked,
    Won,
}

/// One play-through of a maze: the player position, the move trail and the
/// clock, which starts ticking on the first successful step.
pub struct RunningGame {
    maze: MazeGrid,
    state: RunningGameState,
    start: Option<Instant>,
    finished_in: Option<Duration>,
    player_pos: Dims,
    moves: Vec<(Dims, Direction)>,
}

impl RunningGame {
    pub fn new(maze: MazeGrid) -> Self {
        RunningGame {
            player_pos: maze.start_position(),
            maze,
            state: RunningGameState::NotStarted,
            start: None,
            finished_in: None,
            moves: vec![],
        }
    }

    pub fn get_state(&self) -> RunningGameState {
        self.state
    }

    pub fn get_maze(&self) -> &MazeGrid {
        &self.maze
    }

    pub fn get_player_pos(&self) -> Dims {
        self.player_pos
    }

    pub fn get_moves(&self) -> &[(Dims, Direction)] {
        &self.moves
    }

    pub fn get_move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn move_player(&mut self, dir: Direction) -> MoveResult {
        if matches!(
            self.state,
            RunningGameState::Finished | RunningGameState::Quitted
        ) {
            return MoveResult::Blocked;
        }

        let target = self.player_pos + dir.to_coord();
        if !self.maze.is_valid_move(target) {
            log::info!("Invalid move, you can't go through walls");
            return MoveResult::Blocked;
        }

        if self.state == RunningGameState::NotStarted {
            self.state = RunningGameState::Running;
            self.start = Some(Instant::now());
        }

        let from = self.player_pos;
        self.moves.push((from, dir));
        self.player_pos = target;
        log::debug!("moved from {:?} to {:?}", from, target);

        if self.maze.is_exit(self.player_pos) {
            self.state = RunningGameState::Finished;
            self.finished_in = self.start.map(|start| start.elapsed());
            return MoveResult::Won;
        }

        MoveResult::Moved(target)
    }

    pub fn quit(&mut self) {
        self.state = RunningGameState::Quitted;
    }

    /// Time since the first step, frozen once the game is finished.
    pub fn get_elapsed(&self) -> Option<Duration> {
        self.finished_in
            .or_else(|| self.start.map(|start| start.elapsed()))
    }
}
