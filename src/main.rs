use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::thread;

use clap::Parser;
use tracing::{error, info, warn};

use speedview::raster::SYSTEM_FONT_CANDIDATES;
use speedview::{
    Color, FontMetrics, Padding, SpeedCommand, SpeedViewConfig, SpeedometerApp, WindowConfig,
};

#[derive(Parser)]
#[command(name = "speedview")]
#[command(about = "Analog speedometer driven by a 0-100 slider")]
#[command(version)]
struct Cli {
    /// TrueType/OpenType font for the dial labels (default: first system font found)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Stroke width used to inset and size the dial
    #[arg(long, default_value_t = 8.0)]
    stroke_width: f32,

    /// Label color as #rrggbb or #aarrggbb
    #[arg(long, default_value = "#000000", value_parser = parse_color)]
    text_color: Color,

    /// Label font size in pixels
    #[arg(long, default_value_t = 40.0)]
    text_size: f32,

    /// Starting needle position
    #[arg(long, default_value_t = 0)]
    progress: i32,

    /// Padding on every side of the widget
    #[arg(long, default_value_t = 0.0)]
    padding: f32,

    /// Window title
    #[arg(long, default_value = "Speedometer")]
    title: String,

    /// Largest window side offered to the widget when measuring
    #[arg(long, default_value_t = 800)]
    max_size: i32,

    /// Read one progress value per line from stdin
    #[arg(long)]
    stdin: bool,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::parse_hex(value).ok_or_else(|| format!("invalid color '{value}', expected #rrggbb"))
}

fn spawn_stdin_reader(sender: Sender<SpeedCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "stopped reading stdin");
                    break;
                }
            };
            match line.trim().parse::<i32>() {
                Ok(value) => {
                    if sender.send(SpeedCommand::SetProgress(value)).is_err() {
                        break;
                    }
                }
                Err(_) if line.trim().is_empty() => {}
                Err(err) => warn!(input = %line.trim(), %err, "ignoring non-integer progress"),
            }
        }
    });
}

fn run(cli: Cli) -> speedview::Result<()> {
    let candidates: Vec<PathBuf> = SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect();
    let font = FontMetrics::locate(cli.font.as_deref(), &candidates)?;

    let config = SpeedViewConfig::builder()
        .stroke_width(cli.stroke_width)
        .text_color(cli.text_color)
        .text_size(cli.text_size)
        .initial_progress(cli.progress)
        .padding(Padding::uniform(cli.padding))
        .build();
    let window_config = WindowConfig::builder()
        .title(cli.title)
        .max_width(cli.max_size)
        .max_height(cli.max_size)
        .build();

    let app = SpeedometerApp::new(config, window_config, font);
    if cli.stdin {
        let (sender, receiver) = mpsc::channel();
        spawn_stdin_reader(sender);
        info!("reading progress values from stdin");
        app.show_with_commands(receiver)
    } else {
        app.show()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = speedview::init_tracing() {
        eprintln!("{err}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "speedview failed");
            ExitCode::FAILURE
        }
    }
}
