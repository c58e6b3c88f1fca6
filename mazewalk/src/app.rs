use std::{
    fs,
    io::{self, stdout, Stdout, Write},
    panic,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use crossterm::{
    cursor,
    event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    terminal::{self, Clear, ClearType},
};
use thiserror::Error;

use mazegrid::{Cell, Dims, LayoutError, MazeGrid};

use crate::{
    game::{Direction, RunningGame, RunningGameState},
    helpers::{self, is_release},
    settings::Settings,
    ui,
};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error; {0}")]
    Io(#[from] io::Error),
    #[error("invalid maze file; {0}")]
    Layout(#[from] LayoutError),
    #[error("Quit")]
    Quit,
    #[error("FullQuit")]
    FullQuit,
    #[error("NewGame")]
    NewGame,
}

/// Per-run options collected from the command line.
#[derive(Debug, Default, Clone)]
pub struct GameProps {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<u64>,
    pub file: Option<PathBuf>,
}

pub struct App {
    stdout: Stdout,
    settings: Settings,
    props: GameProps,
}

impl App {
    pub fn new(props: GameProps) -> Self {
        App {
            stdout: stdout(),
            settings: Settings::load(Settings::default_path()),
            props,
        }
    }

    pub fn run(&mut self) -> Result<(), GameError> {
        self.term_on()?;
        let result = self.run_loop();
        self.term_off()?;

        match result {
            Err(GameError::Quit | GameError::FullQuit) => Ok(()),
            other => other,
        }
    }

    fn run_loop(&mut self) -> Result<(), GameError> {
        self.show_welcome()?;

        loop {
            match self.run_game() {
                Ok(()) | Err(GameError::Quit) => break Ok(()),
                Err(GameError::NewGame) => continue,
                Err(err) => break Err(err),
            }
        }
    }

    fn show_welcome(&mut self) -> Result<(), GameError> {
        let code = ui::run_popup(
            &mut self.stdout,
            self.settings.get_color_scheme().normals(),
            "Mazewalk",
            &[
                "Welcome to the Maze Game!",
                "",
                "Move with WASD or the arrow keys",
                "R starts a new maze, Q or Esc quits",
                "",
                "Reach the exit marked E to win",
            ],
        )?;

        match code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Err(GameError::Quit),
            _ => Ok(()),
        }
    }

    fn run_game(&mut self) -> Result<(), GameError> {
        let mut game = RunningGame::new(self.acquire_maze());

        loop {
            self.render_game(&game)?;

            if poll(Duration::from_millis(90))? {
                match read()? {
                    Event::Key(KeyEvent {
                        code,
                        modifiers,
                        kind,
                        ..
                    }) if !is_release(kind) => match code {
                        KeyCode::Up | KeyCode::Char('w' | 'W') => {
                            game.move_player(Direction::Up);
                        }
                        KeyCode::Down | KeyCode::Char('s' | 'S') => {
                            game.move_player(Direction::Down);
                        }
                        KeyCode::Left | KeyCode::Char('a' | 'A') => {
                            game.move_player(Direction::Left);
                        }
                        KeyCode::Right | KeyCode::Char('d' | 'D') => {
                            game.move_player(Direction::Right);
                        }
                        KeyCode::Char('c' | 'C') if modifiers.contains(KeyModifiers::CONTROL) => {
                            break Err(GameError::FullQuit);
                        }
                        KeyCode::Char('r' | 'R') => break Err(GameError::NewGame),
                        KeyCode::Esc | KeyCode::Char('q' | 'Q') => {
                            game.quit();
                            break Err(GameError::Quit);
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }

            // check if player won
            if game.get_state() == RunningGameState::Finished {
                let play_time = game.get_elapsed().unwrap_or_default();
                let msize = game.get_maze().size();

                if let KeyCode::Char('r' | 'R') = ui::run_popup(
                    &mut self.stdout,
                    self.settings.get_color_scheme().normals(),
                    "You won",
                    &[
                        "Congratulations! You've reached the exit!",
                        "",
                        &format!("Time: {}", ui::format_duration(play_time)),
                        &format!("Moves: {}", game.get_move_count()),
                        &format!("Size: {}x{}", msize.0, msize.1),
                        "",
                        "R for new game",
                    ],
                )? {
                    break Err(GameError::NewGame);
                }
                break Ok(());
            }
        }
    }

    /// Loads the maze from the layout file when one was given, otherwise
    /// generates one. A file that cannot be read or parsed is reported in
    /// the message feed and play falls back to a generated maze.
    fn acquire_maze(&self) -> MazeGrid {
        if let Some(path) = &self.props.file {
            match Self::load_maze(path) {
                Ok(maze) => {
                    log::info!("loaded maze from {}", path.display());
                    return maze;
                }
                Err(err) => {
                    log::warn!("can't load maze from {}; {}", path.display(), err);
                }
            }
        }

        let defaults = self.settings.get_default_maze_size();
        let size = Dims(
            self.props.width.unwrap_or(defaults.width),
            self.props.height.unwrap_or(defaults.height),
        );

        let mut maze = MazeGrid::new(size);
        match self.props.seed {
            Some(seed) => maze.generate_seeded(seed),
            None => maze.generate(),
        }

        maze
    }

    fn load_maze(path: &Path) -> Result<MazeGrid, GameError> {
        let text = fs::read_to_string(path)?;
        Ok(MazeGrid::from_layout(&text)?)
    }

    fn render_game(&mut self, game: &RunningGame) -> Result<(), GameError> {
        let maze = game.get_maze();
        let scheme = self.settings.get_color_scheme();
        let size: Dims = terminal::size()?.into();
        let maze_render_size = helpers::maze_render_size(maze);

        let is_around_player = maze_render_size.0 > size.0 || maze_render_size.1 + 2 > size.1;

        let pos = if is_around_player {
            let player_screen = helpers::maze2screen(game.get_player_pos());
            Dims(size.0 / 2 - player_screen.0, size.1 / 2 - player_screen.1)
        } else {
            ui::box_center_screen(maze_render_size)?
        };

        // upper row carries the title, the two lowest the counters
        let visible = |p: Dims| p.0 >= 0 && p.0 < size.0 && p.1 >= 1 && p.1 < size.1 - 2;

        queue!(self.stdout, Clear(ClearType::All))?;

        for (y, row) in maze.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let p = pos + Dims(x as i32 * 2, y as i32);
                if !visible(p) {
                    continue;
                }

                let style = match cell {
                    Cell::Exit => scheme.goals(),
                    _ => scheme.normals(),
                };
                ui::draw_char(&mut self.stdout, p.0, p.1, cell.to_char(), style)?;
            }
        }

        for (move_pos, _) in game.get_moves() {
            let p = pos + helpers::maze2screen(*move_pos);
            if visible(p) {
                ui::draw_char(&mut self.stdout, p.0, p.1, '.', scheme.normals())?;
            }
        }

        let player = pos + helpers::maze2screen(game.get_player_pos());
        if visible(player) {
            ui::draw_char(
                &mut self.stdout,
                player.0,
                player.1,
                self.settings.get_player_char(),
                scheme.players(),
            )?;
        }

        let texts = (
            "Mazewalk",
            format!("{}x{}", maze.size().0, maze.size().1),
            format!("{} moves", game.get_move_count()),
            game.get_elapsed().map(ui::format_duration).unwrap_or_default(),
        );

        let margin = 1;
        ui::draw_str(&mut self.stdout, margin, 0, texts.0, scheme.texts())?;
        ui::draw_str(
            &mut self.stdout,
            size.0 - margin - texts.1.len() as i32,
            0,
            &texts.1,
            scheme.texts(),
        )?;
        ui::draw_str(
            &mut self.stdout,
            margin,
            size.1 - 2,
            &texts.2,
            scheme.texts(),
        )?;
        ui::draw_str(
            &mut self.stdout,
            size.0 - margin - texts.3.len() as i32,
            size.1 - 2,
            &texts.3,
            scheme.texts(),
        )?;

        ui::draw_messages(&mut self.stdout, size, 1, scheme.texts())?;

        self.stdout.flush()?;

        Ok(())
    }

    fn term_on(&mut self) -> io::Result<()> {
        self.register_panic_hook();

        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, terminal::EnterAlternateScreen)?;

        Ok(())
    }

    fn term_off(&mut self) -> io::Result<()> {
        self.unregister_panic_hook();

        execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;

        Ok(())
    }

    fn register_panic_hook(&self) {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let mut stdout = stdout();

            execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show).unwrap();
            terminal::disable_raw_mode().unwrap();

            prev(info)
        }));
    }

    fn unregister_panic_hook(&self) {
        if !thread::panicking() {
            let _ = panic::take_hook();
        }
    }
}
