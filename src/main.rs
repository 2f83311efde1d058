//! Terminal tile world viewer (default binary).
//!
//! Loads a scene (or the built-in demo), builds a [`World`] on a
//! [`TerminalPlatform`] and runs the frame loop until `q`, `Esc` or `Ctrl+C`.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use log::info;

use tile_world::config::{EnvOverrides, SceneConfig};
use tile_world::core::World;
use tile_world::term::TerminalPlatform;

#[derive(Debug, Parser)]
#[command(name = "tile-world", version, about = "Scrollable 2D tile world in the terminal")]
struct Args {
    /// Scene file (TOML). Without one, the built-in demo scene is shown.
    scene: Option<PathBuf>,

    /// Frame-rate cap (overrides the scene and TILE_WORLD_FPS).
    #[arg(long)]
    fps: Option<u32>,

    /// Pixels scrolled per frame while an arrow key is held.
    #[arg(long)]
    scroll_speed: Option<u32>,

    /// Hide the bottom status line.
    #[arg(long)]
    no_status: bool,

    /// Print the resolved scene as TOML and exit.
    #[arg(long)]
    print_scene: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvOverrides::from_env();
    init_logging(env.log_path.as_deref())?;

    let scene = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::demo(),
    };
    let scene = scene.with_overrides(&env);

    if args.print_scene {
        print!("{}", scene.to_toml_string()?);
        return Ok(());
    }

    install_panic_hook();

    let mut platform = TerminalPlatform::new();
    if args.no_status {
        platform = platform.without_status_line();
    }

    let mut world = World::new(scene.world_config(), platform)?;
    if let Some(fps) = args.fps {
        world.set_fps(fps)?;
    }
    if let Some(speed) = args.scroll_speed {
        world.set_scroll_speed(speed);
    }
    let fallbacks = scene.apply(&mut world);
    if fallbacks > 0 {
        info!("{fallbacks} block(s) use the fallback tile");
    }

    info!(
        "running at {} fps, scrolling {}px per frame",
        world.fps(),
        world.scroll_speed()
    );
    let summary = world.run()?;
    info!("viewer closed after {} frames", summary.frames);
    Ok(())
}

/// Logs go to `TILE_WORLD_LOG_PATH` when set. Otherwise logging is only
/// enabled by an explicit `RUST_LOG`, since stderr shares the terminal.
fn init_logging(log_path: Option<&str>) -> Result<()> {
    match log_path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create log file '{path}'"))?;
            env_logger::Builder::from_default_env()
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_default_env().init();
        }
        None => {}
    }
    Ok(())
}

/// Leave raw mode and the alternate screen before the default hook prints.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        log::error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}
