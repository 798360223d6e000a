use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::ChatApp;
use super::message::Speaker;

/// Padding inside content area (1 cell on each side)
const CONTENT_PADDING: u16 = 1;

/// Draw the UI. `status` is shown under the title.
pub(super) fn draw_ui(f: &mut Frame, app: &ChatApp, status: &str) {
    let size = f.area();

    f.render_widget(Clear, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Input
        ])
        .split(size);

    draw_header(f, chunks[0], status);
    draw_transcript(f, chunks[1], app);
    draw_input(f, chunks[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, status: &str) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "taskmate",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

/// Style for one transcript line.
pub(super) fn line_style(speaker: Speaker, line: &str) -> Style {
    match speaker {
        Speaker::User => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Speaker::Taskmate if line.starts_with("Error:") => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Speaker::Taskmate if line.starts_with("Warning:") => Style::default().fg(Color::Yellow),
        Speaker::Taskmate if line.starts_with("Task successfully") => {
            Style::default().fg(Color::Green)
        }
        Speaker::Taskmate if line.starts_with("Displaying") => Style::default().fg(Color::Cyan),
        Speaker::Taskmate if line.contains("][X] ") => Style::default().fg(Color::DarkGray),
        Speaker::Taskmate => Style::default(),
    }
}

fn draw_transcript(f: &mut Frame, area: Rect, app: &ChatApp) {
    let border_size: u16 = 2;
    let inner_height = area
        .height
        .saturating_sub(border_size + CONTENT_PADDING * 2) as usize;

    let lines = app.lines();
    let total_lines = lines.len();
    let start_idx = if total_lines <= inner_height {
        0
    } else {
        total_lines
            .saturating_sub(inner_height)
            .saturating_sub(app.scroll_offset)
    };
    let end_idx = (start_idx + inner_height).min(total_lines);

    let visible: Vec<Line> = lines[start_idx..end_idx]
        .iter()
        .map(|(speaker, text)| Line::from(Span::styled(text.clone(), line_style(*speaker, text))))
        .collect();

    let title = if app.finished {
        " Chat [session over, press any key to close] ".to_string()
    } else {
        format!(
            " Chat ({}/{}) [\u{2191}\u{2193} scroll, Enter send, Esc quit] ",
            total_lines.saturating_sub(app.scroll_offset),
            total_lines
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::White));

    f.render_widget(block, area);

    if inner_height == 0 {
        return;
    }

    let inner_area = area.inner(Margin {
        horizontal: CONTENT_PADDING + 1,
        vertical: CONTENT_PADDING + 1,
    });
    f.render_widget(Paragraph::new(visible), inner_area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &ChatApp) {
    let border_color = if app.finished {
        Color::DarkGray
    } else {
        Color::Yellow
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Command ")
            .title_style(Style::default().fg(border_color)),
    );

    f.render_widget(input, area);

    if !app.finished {
        let x = area.x + 3 + app.input.chars().count() as u16;
        let y = area.y + 1;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_by_content() {
        assert_eq!(line_style(Speaker::Taskmate, "Error: nope").fg, Some(Color::Red));
        assert_eq!(line_style(Speaker::Taskmate, "Warning: disk").fg, Some(Color::Yellow));
        assert_eq!(
            line_style(Speaker::Taskmate, "Task successfully added:").fg,
            Some(Color::Green)
        );
        assert_eq!(
            line_style(Speaker::Taskmate, "1. [T][X] done").fg,
            Some(Color::DarkGray)
        );
        assert_eq!(line_style(Speaker::Taskmate, "1. [T][ ] open"), Style::default());
        assert_eq!(line_style(Speaker::User, "> Error: typed").fg, Some(Color::Cyan));
    }
}
