use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use sender_core::{BackendHealth, FieldTone, FormViewModel, Mode, StatusTone};

use super::constants::*;
use super::input::Focus;
use super::layout;

pub fn render(frame: &mut Frame<'_>, view: &FormViewModel, focus: Focus) {
    let areas = layout::split(frame.area(), view.mode);

    render_header(frame, areas.header, &view.backend);
    render_tabs(frame, areas.tabs, view.mode);

    render_text_field(
        frame,
        areas.message,
        TextField {
            label: LABEL_MESSAGE,
            text: &view.message,
            placeholder: MESSAGE_PLACEHOLDER,
            tone: view.message_tone,
            error: view.message_error.as_deref(),
            focused: focus == Focus::Message,
        },
    );

    match view.mode {
        Mode::Numbers => render_text_field(
            frame,
            areas.recipients,
            TextField {
                label: LABEL_NUMBERS,
                text: &view.numbers_text,
                placeholder: NUMBERS_PLACEHOLDER,
                tone: view.numbers_tone,
                error: view.numbers_error.as_deref(),
                focused: focus == Focus::Numbers,
            },
        ),
        Mode::File => render_file_picker(frame, areas.recipients, view, focus == Focus::FilePath),
    }

    render_submit(frame, areas.submit, view, focus == Focus::Submit);
    render_status(frame, areas.status, view);

    let footer = Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Yellow));
    frame.render_widget(footer, areas.footer);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, backend: &BackendHealth) {
    let (health_text, health_color) = match backend {
        BackendHealth::Unknown => ("checking...".to_string(), Color::DarkGray),
        BackendHealth::Online => ("online".to_string(), Color::Green),
        BackendHealth::Offline(reason) => (format!("offline ({reason})"), Color::Red),
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray)),
            Span::raw("  |  Backend: "),
            Span::styled(health_text, Style::default().fg(health_color)),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, mode: Mode) {
    let selected = match mode {
        Mode::Numbers => 0,
        Mode::File => 1,
    };
    let tabs = Tabs::new(TAB_TITLES.to_vec())
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

struct TextField<'a> {
    label: &'a str,
    text: &'a str,
    placeholder: &'a str,
    tone: FieldTone,
    error: Option<&'a str>,
    focused: bool,
}

fn render_text_field(frame: &mut Frame<'_>, area: Rect, field: TextField<'_>) {
    let block = field_block(field.label, field.tone, field.error, field.focused);
    let inner = block.inner(area);

    // Only the tail that fits is drawn; the cursor sits on its last line.
    let lines: Vec<&str> = field.text.split('\n').collect();
    let visible = &lines[lines.len().saturating_sub(usize::from(inner.height))..];
    let paragraph = if field.text.is_empty() {
        Paragraph::new(field.placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(visible.iter().copied().map(Line::raw).collect::<Vec<_>>())
    };
    frame.render_widget(paragraph.block(block), area);

    if field.focused {
        let last = visible.last().copied().unwrap_or_default();
        let row = saturating_u16(visible.len()).saturating_sub(1);
        set_cursor(frame, inner, saturating_u16(last.chars().count()), row);
    }
}

fn render_file_picker(frame: &mut Frame<'_>, area: Rect, view: &FormViewModel, focused: bool) {
    let tone = if view.file_error.is_some() {
        FieldTone::Error
    } else if view.has_file {
        FieldTone::Success
    } else {
        FieldTone::Neutral
    };
    let block = field_block(LABEL_FILE, tone, view.file_error.as_deref(), focused);
    let inner = block.inner(area);

    let label_style = if view.has_file {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let picker = Paragraph::new(vec![
        Line::from(vec![Span::raw("Path: "), Span::raw(view.file_input.as_str())]),
        Line::from(Span::styled(view.file_label.as_str(), label_style)),
    ])
    .block(block);
    frame.render_widget(picker, area);

    if focused {
        let column = saturating_u16("Path: ".len())
            .saturating_add(saturating_u16(view.file_input.chars().count()));
        set_cursor(frame, inner, column, 0);
    }
}

fn render_submit(frame: &mut Frame<'_>, area: Rect, view: &FormViewModel, focused: bool) {
    let mut style = if view.submit_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let button = Paragraph::new(view.submit_label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, view: &FormViewModel) {
    let color = match view.status_tone {
        StatusTone::Error => Color::Red,
        StatusTone::Success => Color::Green,
        StatusTone::Neutral => Color::White,
    };
    let status = Paragraph::new(view.status.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(LABEL_STATUS).borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn field_block<'a>(
    label: &'a str,
    tone: FieldTone,
    error: Option<&'a str>,
    focused: bool,
) -> Block<'a> {
    let border_color = match tone {
        FieldTone::Error => Color::Red,
        FieldTone::Success => Color::Green,
        FieldTone::Neutral => Color::Gray,
    };
    let mut title_style = Style::default();
    if focused {
        title_style = title_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(label, title_style));
    if let Some(error) = error {
        block = block.title_bottom(Span::styled(error, Style::default().fg(Color::Red)));
    }
    block
}

fn saturating_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn set_cursor(frame: &mut Frame<'_>, inner: Rect, column: u16, row: u16) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let x = inner.x + column.min(inner.width - 1);
    let y = inner.y + row.min(inner.height - 1);
    frame.set_cursor_position(Position::new(x, y));
}
