//! Application header with the four-step progress indicator.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Step;
use crate::tui::styles::Theme;

fn step_marker(step: Step, active: Step) -> String {
    if step < active {
        "✓".to_string()
    } else {
        step.number().to_string()
    }
}

/// Render the title bar and the step indicator beneath it.
pub fn render_step_indicator(f: &mut Frame, area: Rect, active: Step) {
    let mut spans = Vec::with_capacity(Step::ALL.len() * 2);
    for (i, step) in Step::ALL.into_iter().enumerate() {
        if i > 0 {
            let connector = if step <= active {
                Theme::success()
            } else {
                Theme::text_muted()
            };
            spans.push(Span::styled(" ──── ", connector));
        }
        spans.push(Span::styled(
            format!(" {} {} ", step_marker(step, active), step.label()),
            Theme::step(step, active),
        ));
    }

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" HealthMate AI ", Theme::header()),
            Span::styled(
                " Predict, Prevent & Plan Your Wellness Journey ",
                Theme::text_secondary(),
            ),
        ]))
        .borders(Borders::BOTTOM | Borders::TOP)
        .border_style(Theme::border());

    let indicator = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(indicator, area);
}
