//! Live selectors: a raw-mode terminal menu and a non-interactive lister.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::menu::{render, MenuKey, MenuOutcome, MenuState};
use crate::ports::selector::Selector;

/// Arrow-key menu drawn below the prompt.
///
/// Up/Left and Down/Right move the highlight, Enter chooses, any other key
/// cancels. The menu erases itself before returning.
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&self, labels: &[String]) -> Option<usize> {
        match run_menu(labels) {
            Ok(choice) => choice,
            Err(e) => {
                let _ = terminal::disable_raw_mode();
                let _ = execute!(io::stdout(), Show);
                log::warn!("selection menu failed: {e}");
                None
            }
        }
    }
}

/// Selector for one-shot commands: lists the candidates on stderr and
/// chooses none.
///
/// Stdout stays reserved for the rendered artifact, so `--json` output is
/// never mixed with the listing.
pub struct ListingSelector;

impl Selector for ListingSelector {
    fn select(&self, labels: &[String]) -> Option<usize> {
        if let Err(e) = write_listing(&mut io::stderr().lock(), labels) {
            log::warn!("cannot list candidates: {e}");
        }
        None
    }
}

fn write_listing(out: &mut impl Write, labels: &[String]) -> io::Result<()> {
    writeln!(out, "Multiple files found, narrow the query:")?;
    for label in labels {
        writeln!(out, "  {label}")?;
    }
    Ok(())
}

/// Maps a terminal key to its menu meaning.
#[must_use]
pub fn map_key(code: KeyCode) -> MenuKey {
    match code {
        KeyCode::Down | KeyCode::Right => MenuKey::Next,
        KeyCode::Up | KeyCode::Left => MenuKey::Prev,
        KeyCode::Enter => MenuKey::Confirm,
        _ => MenuKey::Other,
    }
}

fn run_menu(labels: &[String]) -> io::Result<Option<usize>> {
    let mut stdout = io::stdout();
    let mut state = MenuState::open(labels.len());
    let Some(active) = state.active() else {
        return Ok(None);
    };

    terminal::enable_raw_mode()?;
    execute!(stdout, Hide)?;
    draw(&mut stdout, labels, active, false)?;

    let outcome = loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let (next, outcome) = state.step(map_key(key.code));
        state = next;
        if let Some(outcome) = outcome {
            break outcome;
        }
        if let Some(active) = state.active() {
            draw(&mut stdout, labels, active, true)?;
        }
    };

    erase(&mut stdout, labels.len())?;
    execute!(stdout, Show)?;
    terminal::disable_raw_mode()?;

    Ok(match outcome {
        MenuOutcome::Chosen(index) => Some(index),
        MenuOutcome::Cancelled => None,
    })
}

fn draw(out: &mut impl Write, labels: &[String], active: usize, redraw: bool) -> io::Result<()> {
    if redraw {
        erase(out, labels.len())?;
    }
    for line in render(labels, active) {
        // Raw mode: `\n` alone does not return the carriage.
        queue!(out, crossterm::style::Print(line), crossterm::style::Print("\r\n"))?;
    }
    out.flush()
}

fn erase(out: &mut impl Write, lines: usize) -> io::Result<()> {
    let lines = u16::try_from(lines).unwrap_or(u16::MAX);
    queue!(out, MoveUp(lines), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    out.flush()
}
