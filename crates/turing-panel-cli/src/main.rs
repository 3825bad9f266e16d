//! Turing Panel Control Tool
//!
//! CLI for driving a USB LCD panel directly over its serial port.

mod config;
mod pattern;
mod ports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use turing_panel_hw::{Orientation, Panel, Revision};

use config::Config;

#[derive(Parser)]
#[command(name = "turingctl")]
#[command(about = "Control tool for Turing-style USB LCD panels")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port path, or "auto" to find the panel by USB serial number
    #[arg(short, long)]
    device: Option<String>,

    /// Panel hardware revision (A-D)
    #[arg(short, long)]
    revision: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show panel model and geometry
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the display
    Clear,
    /// Fill the display with black
    Black,
    /// Turn the screen on
    On,
    /// Turn the screen off
    Off,
    /// Reset the panel (it disconnects afterwards)
    Reset,
    /// Set brightness
    Brightness {
        /// Level (0-100)
        #[arg(allow_hyphen_values = true)]
        level: i32,
    },
    /// Set display orientation
    Orientation {
        /// Orientation: portrait, landscape, reverse-portrait, reverse-landscape
        orientation: String,
    },
    /// Draw an image file
    Show {
        /// Image path (PNG, JPEG, ...)
        path: PathBuf,

        /// Destination X
        #[arg(long, default_value = "0")]
        x: u32,

        /// Destination Y
        #[arg(long, default_value = "0")]
        y: u32,

        /// Width to draw (0: image width)
        #[arg(long, default_value = "0")]
        width: u32,

        /// Height to draw (0: image height)
        #[arg(long, default_value = "0")]
        height: u32,
    },
    /// Animate a procedural test pattern
    Pattern {
        /// Number of frames to push
        #[arg(long, default_value = "60")]
        frames: u32,
    },
    /// List serial ports
    Ports,
    /// Print the effective configuration, or write it to a file
    Config {
        /// Write the configuration to this TOML file instead of printing it
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Ports = cli.command {
        return handle_ports();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(device) = cli.device {
        config.device = device;
    }
    if let Some(revision) = cli.revision {
        config.revision = revision;
    }

    if let Commands::Config { write } = &cli.command {
        return handle_config(&config, write.as_deref());
    }

    let panel = open_panel(&config)?;
    let result = run(cli.command, &panel, &config);

    if !matches!(result, Ok(Session::Reset)) {
        panel.close().context("Failed to close panel")?;
    }
    result.map(|_| ())
}

/// Transport state after a command.
enum Session {
    Open,
    Reset,
}

fn open_panel(config: &Config) -> Result<Panel> {
    let revision: Revision = config.revision.parse()?;
    let device = resolve_device(config)?;
    info!("Opening {} (revision {})", device, revision);

    let panel = Panel::open(&device, revision)
        .with_context(|| format!("Failed to open panel on {}", device))?;

    if let Some(level) = config.brightness {
        panel
            .set_brightness(level)
            .context("Failed to apply configured brightness")?;
    }
    if let Some(orientation) = &config.orientation {
        let orientation: Orientation = orientation.parse()?;
        panel
            .set_orientation(orientation)
            .context("Failed to apply configured orientation")?;
    }

    Ok(panel)
}

fn resolve_device(config: &Config) -> Result<String> {
    if !config.device.eq_ignore_ascii_case("auto") {
        return Ok(config.device.clone());
    }
    let ports = ports::list_ports()?;
    let port = ports::find_by_serial(&ports, &config.serial_number).with_context(|| {
        format!(
            "No panel found with serial number {}. Use --device to pick a port",
            config.serial_number
        )
    })?;
    debug!("Auto-detected panel on {}", port.path);
    Ok(port.path.clone())
}

fn run(command: Commands, panel: &Panel, config: &Config) -> Result<Session> {
    match command {
        Commands::Info { json } => {
            if json {
                let info = serde_json::json!({
                    "model": panel.model_name(),
                    "revision": panel.revision().to_string(),
                    "width": panel.width(),
                    "height": panel.height(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Panel:");
                println!("  Model: {}", panel.model_name());
                println!("  Revision: {}", panel.revision());
                println!("  Size: {}x{}", panel.width(), panel.height());
            }
        }
        Commands::Clear => {
            panel.clear()?;
            println!("Display cleared");
        }
        Commands::Black => {
            panel.to_black()?;
            println!("Display filled with black");
        }
        Commands::On => {
            panel.screen_on()?;
            println!("Screen on");
        }
        Commands::Off => {
            panel.screen_off()?;
            println!("Screen off");
        }
        Commands::Reset => {
            panel.reset()?;
            println!("Panel reset");
            return Ok(Session::Reset);
        }
        Commands::Brightness { level } => {
            panel.set_brightness(level)?;
            println!("Brightness set to: {}", level);
        }
        Commands::Orientation { orientation } => {
            let orientation: Orientation = orientation.parse()?;
            panel.set_orientation(orientation)?;
            println!("Orientation set to: {}", orientation);
        }
        Commands::Show {
            path,
            x,
            y,
            width,
            height,
        } => {
            let image = image::open(&path)
                .with_context(|| format!("Failed to decode {}", path.display()))?;
            panel.display_image(&image, x, y, width, height)?;
            println!("Drew {} at ({}, {})", path.display(), x, y);
        }
        Commands::Pattern { frames } => {
            let (width, height) = (panel.width() as u32, panel.height() as u32);
            panel.clear()?;
            for frame in 0..frames {
                let image = pattern::render(width, height, frame)?;
                panel.display_image(&image, 0, 0, width, height)?;
                debug!("Pattern frame {}/{}", frame + 1, frames);
            }
            println!("Pushed {} frames", frames);
        }
        Commands::Ports => handle_ports()?,
        Commands::Config { write } => handle_config(config, write.as_deref())?,
    }

    Ok(Session::Open)
}

fn handle_ports() -> Result<()> {
    let ports = ports::list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    println!("Available serial ports:");
    for port in ports {
        match (port.vid, port.pid) {
            (Some(vid), Some(pid)) => println!(
                "  {} (USB {:04x}:{:04x}, serial: {}, product: {})",
                port.path,
                vid,
                pid,
                port.serial_number.as_deref().unwrap_or("-"),
                port.product.as_deref().unwrap_or("-")
            ),
            _ => println!("  {}", port.path),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, write: Option<&Path>) -> Result<()> {
    match write {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("Failed to save configuration to {}", path.display()))?;
            println!("Configuration written to {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_written_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turing.toml");
        let cli = Cli::parse_from([
            "turingctl",
            "--device",
            "/dev/ttyACM1",
            "config",
            "--write",
            path.to_str().unwrap(),
        ]);
        let Commands::Config { write } = &cli.command else {
            panic!("expected the config command");
        };

        let config = Config {
            device: cli.device.clone().unwrap(),
            ..Config::default()
        };
        handle_config(&config, write.as_deref()).unwrap();

        let saved = Config::load(&path).unwrap();
        assert_eq!(saved.device, "/dev/ttyACM1");
        assert_eq!(saved.revision, "A");
    }
}
