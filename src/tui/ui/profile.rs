//! Step 1: personal profile form with the live BMI panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{ProfileData, Sex};
use crate::tui::form::Field;
use crate::tui::styles::Theme;

use super::{render_input, render_key_footer, render_step_header};

const HINTS: [(&str, &str); 4] = [
    ("↑↓", "Navigate"),
    ("←→", "Change sex"),
    ("Enter", "Next: Lab Reports"),
    ("F2", "Sample data"),
];

/// Render the profile step. `focus` indexes `Field::for_step(Step::Profile)`.
pub fn render_profile(
    f: &mut Frame,
    area: Rect,
    profile: &ProfileData,
    focus: usize,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + BMI
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_step_header(
        f,
        chunks[0],
        "Personal Profile",
        "Let's start with the basics. This helps us personalize your analysis.",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[1]);

    render_fields(f, columns[0], profile, focus);
    render_bmi_panel(f, columns[1], profile);
    render_key_footer(f, chunks[2], &HINTS, error);
}

fn render_fields(f: &mut Frame, area: Rect, profile: &ProfileData, focus: usize) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let fields = [Field::Age, Field::Sex, Field::Height, Field::Weight];
    for (i, field) in fields.into_iter().enumerate() {
        let focused = i == focus;
        let value = match field {
            Field::Sex => {
                render_sex_selector(f, rows[i], profile.sex, focused);
                continue;
            }
            Field::Age => &profile.age,
            Field::Height => &profile.height_cm,
            _ => &profile.weight_kg,
        };
        render_input(f, rows[i], field.label(), value, field.placeholder(), focused);
    }
}

fn render_sex_selector(f: &mut Frame, area: Rect, selected: Sex, focused: bool) {
    let (border_style, title_style) = if focused {
        (Theme::border_focused(), Theme::focused())
    } else {
        (Theme::border(), Theme::text_secondary())
    };

    let mut spans = vec![Span::raw(" ")];
    for sex in Sex::ALL {
        let style = if sex == selected {
            Theme::selected()
        } else {
            Theme::text_muted()
        };
        spans.push(Span::styled(format!(" {} ", sex.label()), style));
        spans.push(Span::raw(" "));
    }

    let selector = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(" Sex ", title_style))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(selector, area);
}

fn render_bmi_panel(f: &mut Frame, area: Rect, profile: &ProfileData) {
    let block = Block::default()
        .title(Span::styled(" Your Body Mass Index (BMI) ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines = match profile.bmi() {
        Some(bmi) => {
            let style = Theme::bmi_category(bmi.category());
            vec![
                Line::from(""),
                Line::from(Span::styled(bmi.to_string(), style.add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(bmi.category().to_string(), style)),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled("—", Theme::text_muted())),
            Line::from(Span::styled(
                "Enter height and weight",
                Theme::text_muted(),
            )),
        ],
    };

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::test_support::render_to_text;

    fn render(profile: &ProfileData, error: Option<&str>) -> String {
        render_to_text(100, 22, |f| {
            let area = f.area();
            render_profile(f, area, profile, 0, error);
        })
    }

    #[test]
    fn test_bmi_panel_shows_value_and_category() {
        let profile = ProfileData {
            age: "30".to_string(),
            height_cm: "175".to_string(),
            weight_kg: "70".to_string(),
            sex: Sex::Female,
        };
        let text = render(&profile, None);
        assert!(text.contains("Personal Profile"));
        assert!(text.contains("22.86"));
        assert!(text.contains("Normal weight"));
        assert!(text.contains("Female"));
    }

    #[test]
    fn test_bmi_panel_without_measurements() {
        let text = render(&ProfileData::default(), None);
        assert!(text.contains("Enter height and weight"));
        assert!(text.contains("e.g., 35"));
    }

    #[test]
    fn test_error_replaces_hints() {
        let text = render(&ProfileData::default(), Some("Age, height and weight are required"));
        assert!(text.contains("Age, height and weight are required"));
        assert!(!text.contains("Sample data"));
    }
}
