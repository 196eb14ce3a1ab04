//! Blocking terminal chart viewer.
//!
//! Figures are shown one at a time, full screen, in report order. Each one
//! stays up until a key is pressed: any key advances, `q`/`Esc` closes the
//! viewer early.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::info;

use crate::domain::ChartStyle;
use crate::error::AppError;
use crate::plot::{Figure, Theme};

mod plotters_chart;

use plotters_chart::FigureChart;

/// What the user asked for after looking at a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    Next,
    Quit,
}

/// Show `figures` in sequence, blocking until each one is dismissed.
pub fn show_figures(figures: &[Figure], style: ChartStyle) -> Result<(), AppError> {
    if figures.is_empty() {
        return Ok(());
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::render(format!("Failed to initialize terminal: {e}")))?;

    let theme = Theme::terminal(style);
    for (idx, figure) in figures.iter().enumerate() {
        info!(chart = figure.name, "showing chart");
        if show_one(&mut terminal, figure, theme, idx, figures.len())? == Advance::Quit {
            break;
        }
    }
    Ok(())
}

fn show_one<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    figure: &Figure,
    theme: Theme,
    idx: usize,
    total: usize,
) -> Result<Advance, AppError> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal
                .draw(|f| draw(f, figure, theme, idx, total))
                .map_err(|e| AppError::render(format!("Terminal draw error: {e}")))?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(100))
            .map_err(|e| AppError::render(format!("Event poll error: {e}")))?
        {
            continue;
        }

        match event::read().map_err(|e| AppError::render(format!("Event read error: {e}")))? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(advance_for(key.code));
            }
            Event::Resize(_, _) => needs_redraw = true,
            _ => {}
        }
    }
}

fn advance_for(code: KeyCode) -> Advance {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Advance::Quit,
        _ => Advance::Next,
    }
}

fn draw(frame: &mut ratatui::Frame<'_>, figure: &Figure, theme: Theme, idx: usize, total: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    let block = Block::default()
        .title(format!(" {} ", figure.title))
        .borders(Borders::ALL);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    frame.render_widget(Clear, inner);
    frame.render_widget(FigureChart { figure, theme }, inner);

    let help = if idx + 1 < total { "any key next  q quit" } else { "any key close" };
    let footer = Line::from(vec![
        Span::styled(format!("chart {}/{}", idx + 1, total), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(help, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(footer).block(Block::default().borders(Borders::ALL)), chunks[1]);
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::render(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::render(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
