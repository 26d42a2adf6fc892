//! UI module: View components for the TUI.

pub mod indicator;
pub mod labs;
pub mod profile;
pub mod results;
pub mod symptoms;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::Theme;

pub const DISCLAIMER: &str = "HealthMate AI provides information for educational purposes only \
     and is not a substitute for professional medical advice, diagnosis, or treatment. Always \
     seek the advice of your physician or other qualified health provider with any questions \
     you may have regarding a medical condition.";

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("Disclaimer: ", Theme::warning()),
        Span::styled(DISCLAIMER, Theme::text_muted()),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Step title with a one-line explanation underneath.
pub(crate) fn render_step_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(format!(" {title}"), Theme::title())),
        Line::from(Span::styled(format!(" {subtitle}"), Theme::text_secondary())),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

/// Key hints, or the validation error in their place.
pub(crate) fn render_key_footer(
    f: &mut Frame,
    area: Rect,
    hints: &[(&str, &str)],
    error: Option<&str>,
) {
    let content = match error {
        Some(err) => Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.to_string(), Theme::danger()),
        ]),
        None => Line::from(
            hints
                .iter()
                .flat_map(|(key, desc)| {
                    [
                        Span::styled(format!("[{key}] "), Theme::key_hint()),
                        Span::styled(format!("{desc} "), Theme::key_desc()),
                    ]
                })
                .collect::<Vec<_>>(),
        ),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

/// A bordered single-line input, placeholder shown while empty.
pub(crate) fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let (border_style, title_style) = if focused {
        (Theme::border_focused(), Theme::focused())
    } else {
        (Theme::border(), Theme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let value_display = if value.is_empty() {
        Span::styled(placeholder.to_string(), Theme::text_muted())
    } else {
        Span::styled(value.to_string(), Theme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if focused {
            Span::styled("▌", Theme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    /// Render into an off-screen terminal and return its text, row by row.
    pub fn render_to_text<F>(width: u16, height: u16, draw: F) -> String
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(draw).expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::render_to_text;
    use super::*;

    #[test]
    fn test_disclaimer_renders() {
        let text = render_to_text(200, 4, |f| {
            let area = f.area();
            render_disclaimer(f, area);
        });
        assert!(text.contains("Disclaimer:"));
        assert!(text.contains("educational purposes only"));
    }

    #[test]
    fn test_footer_prefers_error() {
        let text = render_to_text(80, 2, |f| {
            let area = f.area();
            render_key_footer(f, area, &[("Enter", "Next")], Some("Age is required"));
        });
        assert!(text.contains("Age is required"));
        assert!(!text.contains("[Enter]"));
    }
}
