//! Step 3: free-text symptom description.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::symptoms_valid;
use crate::tui::form::Field;
use crate::tui::styles::Theme;

use super::{render_key_footer, render_step_header};

const HINTS: [(&str, &str); 3] = [
    ("Enter", "Get My Analysis"),
    ("Esc", "Back"),
    ("F2", "Sample data"),
];

pub fn render_symptoms(f: &mut Frame, area: Rect, symptoms: &str, error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(3),    // Text area
            Constraint::Length(1), // Length status
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_step_header(
        f,
        chunks[0],
        "How are you feeling?",
        "Describe your symptoms in your own words. Be as detailed as you can. For example: \
         \"I've been feeling constantly tired for the last two weeks, and I've noticed I'm more \
         thirsty than usual.\"",
    );

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", Field::Symptoms.label()),
            Theme::focused(),
        ))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let body = if symptoms.is_empty() {
        Line::from(Span::styled(
            Field::Symptoms.placeholder(),
            Theme::text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled(symptoms.to_string(), Theme::text()),
            Span::styled("▌", Theme::cursor()),
        ])
    };

    let text_area = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(text_area, chunks[1]);

    let count = symptoms.trim().chars().count();
    let status = if symptoms_valid(symptoms) {
        Span::styled(format!(" {count} characters"), Theme::success())
    } else {
        Span::styled(
            format!(" {count} characters (more than 10 needed)"),
            Theme::text_muted(),
        )
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[2]);

    render_key_footer(f, chunks[3], &HINTS, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::test_support::render_to_text;

    fn render(symptoms: &str) -> String {
        render_to_text(100, 16, |f| {
            let area = f.area();
            render_symptoms(f, area, symptoms, None);
        })
    }

    #[test]
    fn test_placeholder_when_empty() {
        let text = render("");
        assert!(text.contains("How are you feeling?"));
        assert!(text.contains("Describe your symptoms here..."));
        assert!(text.contains("0 characters (more than 10 needed)"));
    }

    #[test]
    fn test_counts_trimmed_characters() {
        let text = render("   headache and nausea   ");
        assert!(text.contains("headache and nausea"));
        assert!(text.contains(" 19 characters"));
        assert!(!text.contains("more than 10 needed"));
    }
}
