//! Step 2: optional lab report values.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::domain::{FormData, Step};
use crate::tui::form::Field;

use super::{render_input, render_key_footer, render_step_header};

const HINTS: [(&str, &str); 4] = [
    ("↑↓", "Navigate"),
    ("Enter", "Next: Symptoms"),
    ("Esc", "Back"),
    ("F2", "Sample data"),
];

/// Render the lab values step. Every field may be left blank.
pub fn render_labs(f: &mut Frame, area: Rect, form: &FormData, focus: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_step_header(
        f,
        chunks[0],
        "Lab Report Values",
        "Enter any values you have from your recent lab reports. You can leave fields blank.",
    );

    // Two columns: blood values left, blood pressure right.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[1]);

    let fields = Field::for_step(Step::Labs);
    let (left, right) = fields.split_at(3);
    render_column(f, columns[0], form, left, 0, focus);
    render_column(f, columns[1], form, right, left.len(), focus);

    render_key_footer(f, chunks[2], &HINTS, None);
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    form: &FormData,
    fields: &[Field],
    offset: usize,
    focus: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        render_input(
            f,
            rows[i],
            field.label(),
            field.value(form),
            field.placeholder(),
            offset + i == focus,
        );
    }
}
