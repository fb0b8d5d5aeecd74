//! Line-oriented driver for the fidget store.
//!
//! Reads one command per line from stdin:
//!   pop 3 | reset | light 2 | switch 1 | color 0 | slider 75 | sound | tick
//!   state   (print a JSON snapshot)
//!   quit
//!
//! Options:
//!   --config <path>   JSON config (missing fields use defaults)
//!   --seed <n>        color seed (overrides the config)
//!
//! Set `RUST_LOG=fidget=debug` to see every transition.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process;

use fidget::config::FidgetConfig;
use fidget::controller::Controller;
use fidget::effect::{AudioSink, Notifier};
use fidget::event::Event;
use fidget::session::Store;
use fidget::time::{Clock, SystemClock};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str, duration_ms: u32) {
        println!("» {message} ({duration_ms}ms)");
    }
}

/// There is no audio device here; playback requests are only logged.
struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&self, volume: f32) {
        info!(volume, "play sound");
    }
}

struct Args {
    config_path: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        seed: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => {
                args.config_path = Some(it.next().ok_or("--config needs a path")?);
            }
            "--seed" => {
                let raw = it.next().ok_or("--seed needs a number")?;
                args.seed = Some(raw.parse().map_err(|_| format!("bad seed: {raw}"))?);
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn print_usage() {
    eprintln!("usage: fidget-cli [--config <path>] [--seed <n>]");
    eprintln!("commands: pop N | reset | light N | switch N | color N | slider V | sound | tick | state | quit");
}

fn load_config(args: &Args, clock: &SystemClock) -> Result<FidgetConfig, Box<dyn Error>> {
    let mut cfg = match &args.config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            FidgetConfig::from_json_str(&raw)?
        }
        None => FidgetConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if cfg.seed.is_none() {
        // Any varying value works; colors only need to differ between runs.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        cfg.seed = Some(nanos ^ clock.now_ms());
    }
    Ok(cfg)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let clock = SystemClock::new();
    let cfg = load_config(&args, &clock)?;
    info!(seed = ?cfg.seed, bubbles = cfg.bubble_count, "starting session");

    let store = Store::new(cfg)?;
    let mut controller = Controller::new(store, LoggedAudio, StdoutNotifier, clock);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Timers don't run on their own here; catch up before every command.
        controller.dispatch(Event::Tick);

        match trimmed {
            "quit" | "exit" => break,
            "state" => {
                let snapshot = serde_json::to_string_pretty(controller.session())?;
                writeln!(stdout, "{snapshot}")?;
                continue;
            }
            _ => {}
        }

        match Event::parse(trimmed) {
            Ok(event) => {
                let outcome = controller.dispatch(event);
                if !outcome.applied {
                    warn!(command = trimmed, "ignored");
                }
                let s = controller.session();
                writeln!(
                    stdout,
                    "score={} bubbles={}/{} lights_on={} switches_on={} slider={} sound={}",
                    s.score(),
                    s.unpopped_count(),
                    s.bubbles().len(),
                    s.lights_on_count(),
                    s.switches_on_count(),
                    s.slider_value(),
                    if s.sound_enabled() { "on" } else { "off" },
                )?;
            }
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        print_usage();
        process::exit(1);
    }
}
