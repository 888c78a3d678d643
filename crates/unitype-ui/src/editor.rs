use crate::common::render_popup;
use crate::session::EditorSession;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use unitype_core::{MemoryBuffer, Result, SymbolTable, TextBuffer};

const HELP: &str = "Type \\ and an abbreviation, e.g. \\alpha\n\n\
    Space or a closing bracket   convert\n\
    Ctrl+Space / Ctrl+K          convert now\n\
    Tab                          switch buffer\n\
    Ctrl+W                       hide/show second buffer\n\
    Ctrl+B                       toggle bracket auto-close\n\
    F1                           toggle this help\n\
    Esc / Ctrl+Q                 quit";

/// Open the scratch editor over `table` until the user quits.
pub fn run_editor(table: Arc<SymbolTable>) -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut session = EditorSession::new(table);

    let result = run_loop(&mut terminal, &mut session);

    // Clean up terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut EditorSession,
) -> Result<()> {
    while !session.is_exiting() {
        terminal.draw(|f| draw(f, session))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            session.handle_key(key)?;
            let applied = session.tick();
            if applied > 0 {
                log::debug!("applied {} replacement(s)", applied);
            }
        }
    }
    Ok(())
}

fn draw<B: Backend>(f: &mut Frame<B>, session: &EditorSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.size());

    let visible = session.visible();
    let percent = 100 / visible.len() as u16;
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            visible
                .iter()
                .map(|_| Constraint::Percentage(percent))
                .collect::<Vec<_>>(),
        )
        .split(chunks[0]);

    for (index, buffer) in visible.iter().enumerate() {
        let focused = index == session.focused_index();
        draw_buffer(f, buffer, panes[index], focused);
    }

    let auto_close = if session.auto_close() { "()" } else { "( " };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", auto_close),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::raw(" "),
        Span::styled(session.status(), Style::default().fg(Color::Cyan)),
    ]));
    f.render_widget(status, chunks[1]);

    if session.show_help() {
        render_popup(f, "unitype", HELP, Color::Yellow);
    }
}

fn draw_buffer<B: Backend>(f: &mut Frame<B>, buffer: &MemoryBuffer, area: Rect, focused: bool) {
    let decoration = buffer.decoration().filter(|r| r.is_single_line());
    let underline = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::UNDERLINED);

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .enumerate()
        .map(|(number, text)| match decoration {
            Some(range) if range.start.line == number => {
                let chars: Vec<char> = text.chars().collect();
                let start = range.start.column.min(chars.len());
                let end = range.end.column.min(chars.len());
                Line::from(vec![
                    Span::raw(chars[..start].iter().collect::<String>()),
                    Span::styled(chars[start..end].iter().collect::<String>(), underline),
                    Span::raw(chars[end..].iter().collect::<String>()),
                ])
            }
            _ => Line::from(text.clone()),
        })
        .collect();

    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", buffer.name()));
    f.render_widget(Paragraph::new(lines).block(block), area);

    if focused {
        if let Some((x, y)) = cursor_cell(area, buffer.caret().line, buffer.caret().column) {
            f.set_cursor(x, y);
        }
    }
}

/// Screen cell of a caret inside a bordered pane, or `None` when it falls
/// outside the pane's interior.
fn cursor_cell(area: Rect, line: usize, column: usize) -> Option<(u16, u16)> {
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(column).ok()?);
    let y = area
        .y
        .saturating_add(1)
        .saturating_add(u16::try_from(line).ok()?);
    (x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1)).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_inside_the_pane() {
        let area = Rect::new(10, 2, 20, 5);
        assert_eq!(cursor_cell(area, 0, 0), Some((11, 3)));
        assert_eq!(cursor_cell(area, 2, 17), Some((28, 5)));
    }

    #[test]
    fn cursor_past_the_pane_is_hidden() {
        let area = Rect::new(10, 2, 20, 5);
        assert_eq!(cursor_cell(area, 0, 18), None);
        assert_eq!(cursor_cell(area, 3, 0), None);
        assert_eq!(cursor_cell(area, 0, 70_000), None);
        assert_eq!(cursor_cell(Rect::new(u16::MAX - 3, 0, 3, 3), 0, 5), None);
    }
}
