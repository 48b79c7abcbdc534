//! Terminal driver for the page controller.
//!
//! `replay` runs a script against the headless surface on virtual time;
//! `run` keeps a live session going on a real tokio interval and reads
//! commands from stdin.

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::time::{Instant, Interval, Sleep};
use tracing::{debug, info};

use crate::config::PageConfig;
use crate::effects::BUTTON_RELEASE_MS;
use crate::headless::HeadlessSurface;
use crate::input::{Action, InputEvent};
use crate::page::Page;
use crate::script::{self, Command, DEFAULT_WIDTH};
use crate::surface::{PageSurface, Ticker};

#[derive(Parser, Debug)]
#[command(name = "heartpage")]
#[command(about = "Drive the heartpage carousel and effects from a terminal")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a script of input events on virtual time
    Replay {
        /// Script file (one command per line)
        script: PathBuf,
        /// Config file (default: .heartpage/config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seed for background draws
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print only the final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session with a real autoplay timer
    Run {
        /// Initial viewport width in pixels
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seed for background draws (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List palette entries
    Palette {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parse arguments, install logging and run the selected command.
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    match cli.command {
        Commands::Replay {
            script,
            config,
            seed,
            json,
        } => replay(&script, config.as_deref(), seed, json),
        Commands::Run {
            width,
            config,
            seed,
        } => {
            let config = resolve_config(config.as_deref())?;
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")?;
            runtime.block_on(run_live(config, width, seed))
        }
        Commands::Palette { config } => {
            let config = resolve_config(config.as_deref())?;
            for (index, entry) in config.palette.iter().enumerate() {
                println!("{index:>2}  {entry}");
            }
            Ok(())
        }
    }
}

fn resolve_config(path: Option<&Path>) -> Result<PageConfig> {
    match path {
        Some(path) => PageConfig::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(PageConfig::load(Path::new("."))),
    }
}

fn replay(path: &Path, config: Option<&Path>, seed: u64, json: bool) -> Result<()> {
    let config = resolve_config(config)?;
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    info!(seed, "replaying {}", path.display());
    let (page, steps) = script::replay(&config, &source, seed)
        .with_context(|| format!("invalid script {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
    } else {
        for step in &steps {
            println!("{:<28} | {}", step.outcome, step.status);
        }
    }
    Ok(())
}

/// Ticker for the live session: forwards period changes to the event loop,
/// which owns the actual tokio interval.
struct ChannelTicker {
    tx: watch::Sender<Option<u32>>,
}

impl Ticker for ChannelTicker {
    fn start(&mut self, period_ms: u32) {
        self.tx.send_replace(Some(period_ms));
    }

    fn stop(&mut self) {
        self.tx.send_replace(None);
    }
}

fn interval_for(period_ms: Option<u32>) -> Option<Interval> {
    period_ms.map(|ms| {
        let period = Duration::from_millis(u64::from(ms));
        tokio::time::interval_at(Instant::now() + period, period)
    })
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn button_release(release: &mut Option<Pin<Box<Sleep>>>) {
    match release {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

/// Whether `event` changes the background, which presses the color button.
fn presses_color_button<S: PageSurface, T: Ticker>(page: &Page<S, T>, event: &InputEvent) -> bool {
    match event {
        InputEvent::ColorButton => true,
        InputEvent::Key(key) => page.keymap().action_for(key) == Some(Action::ChangeBackground),
        _ => false,
    }
}

async fn run_live(config: PageConfig, width: u32, seed: u64) -> Result<()> {
    let (tx, mut rx) = watch::channel(None);
    let mut page = Page::new(&config, HeadlessSurface::default(), ChannelTicker { tx }, seed);
    page.ready(width);
    println!("{}", script::status_line(&page));
    println!("commands: left, right, space, c, click <i>, color, resize <w>, scroll <y>, quit");

    let mut interval = interval_for(*rx.borrow_and_update());
    let mut release: Option<Pin<Box<Sleep>>> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;

    loop {
        tokio::select! {
            _ = next_tick(&mut interval) => {
                page.tick();
                println!("{:<28} | {}", "tick", script::status_line(&page));
            }
            changed = rx.changed() => {
                changed.context("ticker channel closed")?;
                interval = interval_for(*rx.borrow_and_update());
                debug!(period_ms = ?*rx.borrow(), "live timer reconfigured");
            }
            _ = button_release(&mut release) => {
                release = None;
                page.release_color_button();
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                line_no += 1;
                let command = match script::parse_line(&line, line_no) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("[heartpage][warn] {e}");
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Ready { .. } => println!("page is already running"),
                    Command::Wait { .. } => println!("`wait` only works in replay"),
                    Command::Input(event) => {
                        let label = script::describe(&event);
                        let presses_button = presses_color_button(&page, &event);
                        match page.dispatch(event) {
                            Ok(outcome) if outcome.handled => {}
                            Ok(_) => println!("{label}: no binding"),
                            Err(e) => println!("{label}: {e}"),
                        }
                        if presses_button {
                            release = Some(Box::pin(tokio::time::sleep(Duration::from_millis(
                                u64::from(BUTTON_RELEASE_MS),
                            ))));
                        }
                        println!("{label:<28} | {}", script::status_line(&page));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    page.teardown();
    println!("{}", script::status_line(&page));
    Ok(())
}
