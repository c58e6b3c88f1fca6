use std::{fs, path::PathBuf};

use crossterm::style::{Color, ContentStyle};
use dirs::preference_dir;
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
}

impl NamedColor {
    pub fn to_crossterm(self) -> Color {
        use NamedColor::*;
        match self {
            Black => Color::Black,
            DarkGrey => Color::DarkGrey,
            Red => Color::Red,
            DarkRed => Color::DarkRed,
            Green => Color::Green,
            DarkGreen => Color::DarkGreen,
            Yellow => Color::Yellow,
            DarkYellow => Color::DarkYellow,
            Blue => Color::Blue,
            DarkBlue => Color::DarkBlue,
            Magenta => Color::Magenta,
            DarkMagenta => Color::DarkMagenta,
            Cyan => Color::Cyan,
            DarkCyan => Color::DarkCyan,
            White => Color::White,
            Grey => Color::Grey,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorScheme {
    pub normal: NamedColor,
    pub player: NamedColor,
    pub goal: NamedColor,
    pub text: NamedColor,
}

impl ColorScheme {
    pub fn normals(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(self.normal.to_crossterm()),
            background_color: None,
            ..Default::default()
        }
    }

    pub fn players(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(self.player.to_crossterm()),
            background_color: None,
            ..Default::default()
        }
    }

    pub fn goals(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(self.goal.to_crossterm()),
            background_color: None,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(self.text.to_crossterm()),
            background_color: None,
            ..Default::default()
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            normal: NamedColor::White,
            player: NamedColor::Cyan,
            goal: NamedColor::Green,
            text: NamedColor::White,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MazeSize {
    pub width: i32,
    pub height: i32,
}

impl Default for MazeSize {
    fn default() -> Self {
        MazeSize {
            width: 15,
            height: 15,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub color_scheme: Option<ColorScheme>,
    #[serde(default)]
    pub default_maze_size: Option<MazeSize>,
    #[serde(default)]
    pub player_char: Option<char>,
}

impl Settings {
    pub fn get_color_scheme(&self) -> ColorScheme {
        self.color_scheme.unwrap_or_default()
    }

    pub fn get_default_maze_size(&self) -> MazeSize {
        self.default_maze_size.unwrap_or_default()
    }

    pub fn get_player_char(&self) -> char {
        self.player_char.unwrap_or('P')
    }

    pub fn default_path() -> PathBuf {
        preference_dir()
            .unwrap()
            .join("mazewalk")
            .join("settings.ron")
    }

    /// Reads the settings file, writing the bundled defaults first if there
    /// is none yet. A file that exists but does not parse is a hard error.
    pub fn load(path: PathBuf) -> Self {
        let default_settings_string = include_str!("./default_settings.ron");

        let settings_string = fs::read_to_string(&path);
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        if let Ok(settings_string) = settings_string {
            match options.from_str(&settings_string) {
                Ok(settings) => settings,
                Err(err) => {
                    panic!("Error reading settings file ({:?}), {}", path, err);
                }
            }
        } else {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, default_settings_string).unwrap();
            options.from_str(default_settings_string).unwrap()
        }
    }

    pub fn reset_config(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, include_str!("./default_settings.ron")).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Settings {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
            .unwrap()
    }

    #[test]
    fn bundled_defaults_parse() {
        let settings = parse(include_str!("./default_settings.ron"));
        let size = settings.get_default_maze_size();
        assert_eq!((size.width, size.height), (15, 15));
        assert_eq!(settings.get_player_char(), 'P');
        assert_eq!(settings.get_color_scheme().player, NamedColor::Cyan);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = parse("()");
        assert_eq!(settings.get_player_char(), 'P');
        assert_eq!(settings.get_default_maze_size().width, 15);
        assert_eq!(settings.get_color_scheme().normal, NamedColor::White);
    }

    #[test]
    fn partial_settings_override_only_their_field() {
        let settings = parse("(player_char: '@')");
        assert_eq!(settings.get_player_char(), '@');
        assert_eq!(settings.get_default_maze_size().width, 15);
    }

    #[test]
    fn styles_carry_the_configured_foreground() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.goals().foreground_color, Some(Color::Green));
        assert_eq!(scheme.players().foreground_color, Some(Color::Cyan));
        assert_eq!(scheme.normals().background_color, None);
    }
}
