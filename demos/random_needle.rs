use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use speedview::raster::SYSTEM_FONT_CANDIDATES;
use speedview::{Color, FontMetrics, SpeedCommand, SpeedViewConfig, SpeedometerApp, WindowConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    speedview::init_tracing()?;

    let candidates: Vec<PathBuf> = SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect();
    let font_arg = std::env::args_os().nth(1).map(PathBuf::from);
    let font = FontMetrics::locate(font_arg.as_deref(), &candidates)?;

    let config = SpeedViewConfig::builder()
        .stroke_width(8.0)
        .text_color(Color::BLACK)
        .text_size(36.0)
        .build();
    let window_config = WindowConfig::builder()
        .title("Random needle".to_string())
        .build();
    let app = SpeedometerApp::new(config, window_config, font);

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let progress = rng.random_range(0..=100);
            if sender.send(SpeedCommand::SetProgress(progress)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(250));
        }
    });

    println!("Needle jumps to a random progress value four times a second.");
    println!("Close the window to exit.");

    app.show_with_commands(receiver)?;
    Ok(())
}
