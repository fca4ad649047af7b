use ratatui::layout::{Constraint, Direction, Layout, Rect};
use sender_core::Mode;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub message: Rect,
    /// Numbers textarea or file picker, depending on mode.
    pub recipients: Rect,
    pub submit: Rect,
    pub status: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect, mode: Mode) -> FormLayout {
    let recipients_height = match mode {
        Mode::Numbers => 8,
        Mode::File => 4,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(recipients_height),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    FormLayout {
        header: rows[0],
        tabs: rows[1],
        message: rows[2],
        recipients: rows[3],
        submit: centered_button(rows[4]),
        status: rows[5],
        footer: rows[6],
    }
}

fn centered_button(row: Rect) -> Rect {
    let width = row.width.min(28);
    Rect {
        x: row.x + (row.width - width) / 2,
        width,
        ..row
    }
}
