//! TUI Rendering
//!
//! Translates `App` into Ratatui widgets: an input pane (preview, path
//! picker, analyze button) and an output pane showing exactly one of the
//! four analysis states.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use textlens_core::{ImageSelection, Thumbnail, UiState};

use crate::app::{App, Notice};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main draw function.
pub fn draw_ui(f: &mut Frame, app: &App) {
    let messages = app.controller.messages();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Panes
            Constraint::Length(1), // Key hints
        ])
        .split(f.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            messages.app_title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(messages.app_subtitle, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_input_pane(f, app, panes[0]);
    draw_output_pane(f, app, panes[1]);

    let hints = Paragraph::new(messages.key_hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, chunks[2]);
}

fn draw_input_pane(f: &mut Frame, app: &App, area: Rect) {
    let messages = app.controller.messages();
    let block = Block::default()
        .title(messages.input_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Preview
            Constraint::Length(3), // Path input
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Analyze button
        ])
        .split(inner);

    match app.controller.selection() {
        Some(selection) => draw_preview(f, selection, rows[0]),
        None => {
            let dropzone = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(messages.dropzone, Style::default().fg(Color::Cyan))),
                Line::from(Span::styled(
                    messages.accepted_types,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(dropzone, rows[0]);
        }
    }

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(messages.picker_title).borders(Borders::ALL));
    f.render_widget(input, rows[1]);
    f.set_cursor(cursor_column(rows[1], &app.input), rows[1].y + 1);

    if let Some(notice) = &app.notice {
        let (text, color) = match notice {
            Notice::Warning(text) => (text.as_str(), Color::Yellow),
            Notice::Error(text) => (text.as_str(), Color::Red),
        };
        f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), rows[2]);
    }

    let loading = app.controller.state().is_loading();
    let label = if loading {
        format!("{} {}", spinner_frame(app.spinner), messages.analyzing)
    } else {
        messages.analyze.to_string()
    };
    let style = if app.controller.can_analyze() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    };
    f.render_widget(
        Paragraph::new(label).style(style).alignment(Alignment::Center),
        rows[3],
    );
}

fn draw_preview(f: &mut Frame, selection: &ImageSelection, area: Rect) {
    let preview = selection.preview();
    let mut caption = vec![
        Span::raw(format_size(preview.byte_len())),
        Span::raw(" · "),
        Span::raw(selection.mime().as_str()),
    ];
    if let Some((w, h)) = preview.dimensions() {
        caption.insert(0, Span::raw(format!("{w}x{h} · ")));
    }
    caption.push(Span::styled(
        format!("  {}", selection.source()),
        Style::default().fg(Color::DarkGray),
    ));

    let image_rows = area.height.saturating_sub(1);
    let mut lines = match preview.thumbnail() {
        Some(thumb) => thumbnail_lines(thumb, area.width, image_rows),
        None => Vec::new(),
    };
    lines.push(Line::from(caption));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_output_pane(f: &mut Frame, app: &App, area: Rect) {
    let messages = app.controller.messages();
    let block = Block::default()
        .title(messages.output_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let body = match app.controller.state() {
        UiState::Loading => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                spinner_frame(app.spinner),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(messages.loading, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center),
        UiState::Failure(message) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                messages.error_title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
        // Leading whitespace in the result is significant.
        UiState::Success(text) => Paragraph::new(Text::raw(text.as_str())).wrap(Wrap { trim: false }),
        UiState::Idle => Paragraph::new(vec![
            Line::from(""),
            Line::from(messages.placeholder),
            Line::from(messages.placeholder_detail),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true }),
    };

    f.render_widget(body.block(block), area);
}

/// Cursor column inside a bordered input box, pinned to its last inner cell.
fn cursor_column(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Render a thumbnail with upper-half blocks: each terminal cell shows two
/// vertically stacked pixels (foreground on top, background below).
pub fn thumbnail_lines(thumb: &Thumbnail, max_cols: u16, max_rows: u16) -> Vec<Line<'static>> {
    if max_cols == 0 || max_rows == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return Vec::new();
    }

    let (tw, th) = (thumb.width() as f32, thumb.height() as f32);
    let scale = (max_cols as f32 / tw).min(max_rows as f32 * 2.0 / th);
    let cols = ((tw * scale).round() as u16).clamp(1, max_cols);
    let px_rows = ((th * scale).round() as u32).clamp(1, max_rows as u32 * 2);
    let rows = px_rows.div_ceil(2);

    let sample = |x: u32, y: u32| {
        let [r, g, b] = thumb.pixel((x as f32 / scale) as u32, (y as f32 / scale) as u32);
        Color::Rgb(r, g, b)
    };

    (0..rows)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..cols as u32)
                .map(|col| {
                    let top = sample(col, row * 2);
                    let style = if row * 2 + 1 < px_rows {
                        Style::default().fg(top).bg(sample(col, row * 2 + 1))
                    } else {
                        Style::default().fg(top)
                    };
                    Span::styled("▀", style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
