//! Replay scripts: a line-oriented stand-in for a live input host.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use blockyard_core::Color;
use blockyard_input::{InputEvent, KeyCode, MouseButton};
use blockyard_session::{Session, SessionNotice};
use tracing::{info, warn};

/// One script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Press(KeyCode),
    Release(KeyCode),
    Click(MouseButton),
    Look { dx: f32, dy: f32 },
    Lock,
    Unlock,
    /// Tap a tool key.
    Tool(KeyCode),
    Color(Color),
    Speed,
    Save(PathBuf),
    Load(PathBuf),
    Tick(u32),
    /// Block until an outstanding load has been read.
    Wait,
}

/// Parse a whole script. Blank lines and lines starting with `#` are skipped.
pub fn parse(text: &str) -> anyhow::Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((index + 1, line))
        })
        .map(|(number, line)| parse_line(line).with_context(|| format!("line {number}: {line}")))
        .collect()
}

fn parse_line(line: &str) -> anyhow::Result<Command> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "press" => Command::Press(key(rest)?),
        "release" => Command::Release(key(rest)?),
        "click" => Command::Click(match rest {
            "left" => MouseButton::Left,
            "right" => MouseButton::Right,
            other => bail!("unknown mouse button '{other}'"),
        }),
        "look" => {
            let mut parts = rest.split_whitespace();
            let (Some(dx), Some(dy), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("expected 'look <dx> <dy>'");
            };
            Command::Look {
                dx: dx.parse().context("dx")?,
                dy: dy.parse().context("dy")?,
            }
        }
        "lock" => Command::Lock,
        "unlock" => Command::Unlock,
        "tool" => Command::Tool(match rest {
            "1" => KeyCode::Digit1,
            "2" => KeyCode::Digit2,
            other => bail!("unknown tool '{other}'"),
        }),
        "color" => Command::Color(rest.parse()?),
        "speed" => Command::Speed,
        "save" => Command::Save(path(rest)?),
        "load" => Command::Load(path(rest)?),
        "tick" => Command::Tick(if rest.is_empty() {
            1
        } else {
            rest.parse().context("tick count")?
        }),
        "wait" => Command::Wait,
        other => bail!("unknown command '{other}'"),
    };
    Ok(command)
}

fn key(name: &str) -> anyhow::Result<KeyCode> {
    Ok(match name {
        "w" => KeyCode::KeyW,
        "a" => KeyCode::KeyA,
        "s" => KeyCode::KeyS,
        "d" => KeyCode::KeyD,
        "space" => KeyCode::Space,
        "shift" => KeyCode::ShiftLeft,
        "ctrl" => KeyCode::ControlLeft,
        "1" => KeyCode::Digit1,
        "2" => KeyCode::Digit2,
        "escape" => KeyCode::Escape,
        other => return Err(anyhow!("unknown key '{other}'")),
    })
}

fn path(rest: &str) -> anyhow::Result<PathBuf> {
    if rest.is_empty() {
        bail!("missing path");
    }
    Ok(PathBuf::from(rest))
}

/// Feed commands to a session, ticking where the script says so.
///
/// Events left in the queue at the end get one final tick, and an
/// outstanding load is waited for and applied. Returns every notice raised.
pub fn replay(session: &mut Session, commands: &[Command]) -> Vec<SessionNotice> {
    let mut notices = Vec::new();
    let mut pending = false;

    for command in commands {
        match command {
            Command::Tick(count) => {
                for _ in 0..*count {
                    notices.extend(tick(session));
                }
                pending = false;
                continue;
            }
            Command::Wait => {
                session.wait_for_load();
                continue;
            }
            _ => {}
        }

        for event in events(command) {
            session.push(event);
        }
        pending = true;
    }

    if pending {
        notices.extend(tick(session));
    }
    if session.wait_for_load() {
        notices.extend(tick(session));
    }
    notices
}

fn events(command: &Command) -> Vec<InputEvent> {
    match command {
        Command::Press(code) => vec![InputEvent::key(*code, true)],
        Command::Release(code) => vec![InputEvent::key(*code, false)],
        Command::Click(button) => vec![
            InputEvent::mouse(*button, true),
            InputEvent::mouse(*button, false),
        ],
        Command::Look { dx, dy } => vec![InputEvent::motion(*dx, *dy)],
        Command::Lock => vec![InputEvent::LockRequested],
        Command::Unlock => vec![InputEvent::LockReleased],
        Command::Tool(code) => vec![InputEvent::key(*code, true), InputEvent::key(*code, false)],
        Command::Color(color) => vec![InputEvent::PickColor(*color)],
        Command::Speed => vec![InputEvent::CycleSpeed],
        Command::Save(path) => vec![InputEvent::SaveWorld(path.clone())],
        Command::Load(path) => vec![InputEvent::LoadWorld(path.clone())],
        Command::Tick(_) | Command::Wait => Vec::new(),
    }
}

fn tick(session: &mut Session) -> Vec<SessionNotice> {
    let report = session.tick();
    for notice in &report.notices {
        match notice {
            SessionNotice::ImportFailed { path, message } => {
                warn!(tick = report.tick, path = %path.display(), "import failed: {message}");
            }
            SessionNotice::SaveFailed { path, message } => {
                warn!(tick = report.tick, path = %path.display(), "save failed: {message}");
            }
            other => info!(tick = report.tick, "{other:?}"),
        }
    }
    report.notices
}
