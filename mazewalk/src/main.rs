use std::path::PathBuf;

use mazewalk::{
    app::{App, GameError, GameProps},
    logging,
    settings::Settings,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazewalk")]
struct Args {
    #[clap(long, help = "Maze width in cells, even values are bumped up to odd")]
    width: Option<i32>,
    #[clap(long, help = "Maze height in cells, even values are bumped up to odd")]
    height: Option<i32>,
    #[clap(long, help = "Generate the maze from a fixed seed")]
    seed: Option<u64>,
    #[clap(short, long, help = "Load the maze from a layout file")]
    file: Option<PathBuf>,
    #[clap(long, action, help = "Show debug messages in the game")]
    debug: bool,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), GameError> {
    let _args = Args::parse();

    if _args.reset_config {
        Settings::reset_config(Settings::default_path());
        return Ok(());
    }

    if _args.show_config_path {
        let settings_path = Settings::default_path();
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if _args.debug_config {
        println!("{:#?}", Settings::load(Settings::default_path()));
        return Ok(());
    }

    logging::init();
    if _args.debug {
        logging::get_logger().set_min_level(log::Level::Debug);
    }

    let mut app = App::new(GameProps {
        width: _args.width,
        height: _args.height,
        seed: _args.seed,
        file: _args.file,
    });

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }
}
