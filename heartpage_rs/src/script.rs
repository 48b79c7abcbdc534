//! Replay scripts: a line-oriented input log for driving a page without a
//! browser.
//!
//! ```text
//! # comments and blank lines are ignored
//! ready 1280
//! key right
//! wait 5000
//! click 3
//! resize 600
//! key space
//! color
//! scroll 240
//! teardown
//! ```

use crate::autoplay::AutoplayState;
use crate::config::PageConfig;
use crate::error::{Result, ScriptError};
use crate::headless::{HeadlessPage, HeadlessSurface, VirtualTicker};
use crate::input::{InputEvent, normalize_key};
use crate::page::Page;
use crate::surface::{PageSurface, Ticker};

/// Width assumed by a bare `ready`.
pub const DEFAULT_WIDTH: u32 = 1280;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ready { width: u32 },
    /// Let virtual time pass (replay only).
    Wait { ms: u64 },
    Input(InputEvent),
    /// Leave an interactive session.
    Quit,
}

/// Parse a whole script. Fails on the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(command) = parse_line(raw, idx + 1)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Parse one line; `Ok(None)` for blanks and comments.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<Command>, ScriptError> {
    let text = raw.split('#').next().unwrap_or("").trim();
    if text.is_empty() {
        return Ok(None);
    }
    let mut parts = text.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();
    let arg = parts.next();

    let command = match head.as_str() {
        "ready" => Command::Ready {
            width: match arg {
                Some(value) => parse_number(value, line, "width")?,
                None => DEFAULT_WIDTH,
            },
        },
        "wait" => Command::Wait {
            ms: parse_number(require(arg, line, "wait", "a duration in ms")?, line, "duration")?,
        },
        "key" => {
            let name = require(arg, line, "key", "a key name")?;
            Command::Input(InputEvent::Key(normalize_key(name)))
        }
        "left" | "right" | "space" => Command::Input(InputEvent::Key(normalize_key(&head))),
        "click" => Command::Input(InputEvent::IndicatorClick(parse_number(
            require(arg, line, "click", "an indicator index")?,
            line,
            "indicator index",
        )?)),
        "color" => Command::Input(InputEvent::ColorButton),
        "tick" => Command::Input(InputEvent::Tick),
        "resize" => Command::Input(InputEvent::Resize {
            width: parse_number(require(arg, line, "resize", "a width")?, line, "width")?,
        }),
        "scroll" => Command::Input(InputEvent::Scroll {
            y: parse_number(require(arg, line, "scroll", "a scroll offset")?, line, "scroll offset")?,
        }),
        "teardown" => Command::Input(InputEvent::Teardown),
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };

    let takes_arg = matches!(
        head.as_str(),
        "ready" | "wait" | "key" | "click" | "resize" | "scroll"
    );
    let trailing = if takes_arg { parts.next() } else { arg };
    if let Some(extra) = trailing {
        return Err(ScriptError::InvalidArgument {
            line,
            value: extra.to_string(),
            expected: "end of line",
        });
    }
    Ok(Some(command))
}

fn require<'a>(
    arg: Option<&'a str>,
    line: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ScriptError> {
    arg.ok_or(ScriptError::MissingArgument {
        line,
        command,
        expected,
    })
}

fn parse_number<N: std::str::FromStr>(
    value: &str,
    line: usize,
    expected: &'static str,
) -> Result<N, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidArgument {
        line,
        value: value.to_string(),
        expected,
    })
}

/// One replayed command: what happened and the page status afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: String,
    pub status: String,
}

/// Validate `config`, parse `source` and run it on a fresh headless page
/// until the script ends or hits `quit`.
pub fn replay(config: &PageConfig, source: &str, seed: u64) -> Result<(HeadlessPage, Vec<Step>)> {
    config.validate()?;
    let commands = parse_script(source)?;

    let mut page = Page::new(
        config,
        HeadlessSurface::default(),
        VirtualTicker::default(),
        seed,
    );
    let mut steps = Vec::with_capacity(commands.len());
    for command in commands.iter().take_while(|c| **c != Command::Quit) {
        let outcome = apply(&mut page, command);
        steps.push(Step {
            outcome,
            status: status_line(&page),
        });
    }
    Ok((page, steps))
}

/// Apply one command to a headless page and describe what happened.
pub fn apply(page: &mut HeadlessPage, command: &Command) -> String {
    match command {
        Command::Ready { width } => {
            page.ready(*width);
            format!("ready width={width}")
        }
        Command::Wait { ms } => {
            let fires = page.elapse(*ms);
            format!("wait {ms}ms ticks={fires}")
        }
        Command::Input(event) => match page.dispatch(event.clone()) {
            Ok(outcome) if outcome.handled => describe(event),
            Ok(_) => format!("{} (ignored)", describe(event)),
            Err(e) => format!("{} (error: {e})", describe(event)),
        },
        Command::Quit => "quit".to_string(),
    }
}

pub fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::Key(key) if key == " " => "key space".to_string(),
        InputEvent::Key(key) => format!("key {key}"),
        InputEvent::IndicatorClick(index) => format!("click {index}"),
        InputEvent::ColorButton => "color".to_string(),
        InputEvent::Tick => "tick".to_string(),
        InputEvent::Resize { width } => format!("resize {width}"),
        InputEvent::Scroll { y } => format!("scroll {y}"),
        InputEvent::Teardown => "teardown".to_string(),
    }
}

/// One-line summary of the page, printed after each step.
pub fn status_line<S: PageSurface, T: Ticker>(page: &Page<S, T>) -> String {
    let snapshot = page.snapshot();
    let autoplay = match snapshot.autoplay {
        AutoplayState::Running => "running",
        AutoplayState::Paused => "paused",
        AutoplayState::Stopped => "stopped",
    };
    format!(
        "slide {}/{} autoplay={} period={}ms profile={}",
        snapshot.slide + 1,
        snapshot.total,
        autoplay,
        snapshot.period_ms,
        snapshot.profile.as_label(),
    )
}
