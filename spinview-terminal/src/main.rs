/// Spinview terminal frontend
///
/// A small portfolio site for the terminal: Home, Portfolio, an interactive
/// 3D shape viewer and a snake game.
/// Viewer controls:
///   - Arrow Keys: rotate manually (r resets back to auto-rotation)
///   - W: wireframe, +/-: speed, S: shape, C: color, H: help
///   - Tab: switch page, T: theme, Q/ESC: quit

use clap::Parser;
use log::info;
use std::io;

use spinview_core::{clamp_speed, Rgb, ShapeKind, ViewerConfig};
use spinview_terminal::{App, Page};

#[derive(Parser, Debug)]
#[command(name = "spinview-terminal", version, about = "Interactive 3D shape viewer and demo pages for the terminal")]
struct Args {
    /// Initial shape (cube, pyramid, sphere, cylinder, cone, torus, dodecahedron)
    #[arg(long, default_value = "cube")]
    shape: ShapeKind,

    /// Initial mesh color as #rrggbb
    #[arg(long, default_value = "#00ff00")]
    color: Rgb,

    /// Initial auto-rotation speed in radians per frame, clamped to [0, 0.1]
    #[arg(long, default_value_t = 0.01)]
    speed: f32,

    /// Start with the wireframe material
    #[arg(long)]
    wireframe: bool,

    /// Start in light mode
    #[arg(long)]
    light: bool,

    /// Starting page (home, portfolio, viewer, snake)
    #[arg(long, default_value = "home")]
    page: Page,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ViewerConfig {
        color: args.color,
        rotation_speed: clamp_speed(args.speed),
        wireframe: args.wireframe,
        shape: args.shape,
    };
    info!("starting on page {} with {:?}", args.page.title(), config);

    let mut app = App::new(config, args.page, args.light)?;
    app.run()
}
