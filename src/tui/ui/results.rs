//! Step 4: loading, error and results views.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{AnalysisFailure, AnalysisStatus, HealthAnalysis};
use crate::tui::styles::Theme;

use super::{render_key_footer, render_step_header};

/// Presentation state of the results step.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    /// Animated progress while loading, 0.0..=1.0
    pub progress: f64,
    /// First visible line of the analysis
    pub scroll: u16,
    /// Outcome of the last report export
    pub notice: Option<String>,
}

pub fn render_results(f: &mut Frame, area: Rect, status: &AnalysisStatus, view: &ResultsView) {
    match status {
        AnalysisStatus::Idle => render_idle(f, area),
        AnalysisStatus::Loading => render_loading(f, area, view.progress),
        AnalysisStatus::Ready(analysis) => render_analysis(f, area, analysis, view),
        AnalysisStatus::Failed(failure) => render_failure(f, area, failure),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No analysis yet", Theme::text_secondary())),
        Line::from(""),
        Line::from(Span::styled(
            "Describe your symptoms and press Enter to get your analysis",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, chunks[0]);
    render_key_footer(f, chunks[1], &[("R", "Start Over"), ("Q", "Quit")], None);
}

fn render_loading(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Analyzing Your Data...",
        Theme::subtitle(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let progress = progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(Theme::info())
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        "Our AI is processing your information to generate personalized insights. \
         This may take a moment.",
        Theme::text_muted(),
    )))
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn render_failure(f: &mut Frame, area: Rect, failure: &AnalysisFailure) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "! Analysis Failed",
            Theme::danger().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(failure.message.clone(), Theme::text())),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(content, chunks[0]);
    render_key_footer(f, chunks[1], &[("Enter", "Start Over")], None);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), Theme::subtitle()))
}

fn bullet(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  • ", Theme::text_muted()),
        Span::styled(text.to_string(), Theme::text()),
    ])
}

/// Flatten the analysis into display lines, in report order.
#[must_use]
pub fn analysis_lines(analysis: &HealthAnalysis) -> Vec<Line<'static>> {
    let mut lines = vec![section("Potential Conditions")];
    for item in &analysis.potential_conditions {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", item.condition), Theme::title()),
            Span::styled(
                format!("[{} Confidence]", item.confidence),
                Theme::confidence(&item.confidence),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", item.explanation),
            Theme::text_secondary(),
        )));
    }
    lines.push(Line::from(""));

    let diet = &analysis.dietary_suggestions;
    lines.push(section("Dietary Suggestions"));
    lines.push(Line::from(Span::styled("  General Advice", Theme::focused())));
    lines.extend(diet.general_advice.iter().map(|s| bullet(s)));
    lines.push(Line::from(Span::styled("  Meal Plan", Theme::focused())));
    for (slot, items) in diet.meal_plan.iter() {
        lines.push(Line::from(Span::styled(
            format!("   {}", slot.title()),
            Theme::text_secondary().add_modifier(Modifier::BOLD),
        )));
        lines.extend(items.iter().map(|s| bullet(s)));
    }
    lines.push(Line::from(""));

    lines.push(section("Lifestyle Recommendations"));
    lines.extend(analysis.lifestyle_recommendations.iter().map(|s| bullet(s)));
    lines.push(Line::from(""));

    lines.push(section("Next Steps: Consult a Professional"));
    lines.push(Line::from(vec![
        Span::styled(
            "  Based on this analysis, it is recommended to consult with a ",
            Theme::text(),
        ),
        Span::styled(
            analysis.specialist_recommendation.clone(),
            Theme::focused(),
        ),
        Span::styled(
            " for a comprehensive evaluation and formal diagnosis.",
            Theme::text(),
        ),
    ]));

    lines
}

fn analysis_body(analysis: &HealthAnalysis) -> Paragraph<'static> {
    Paragraph::new(analysis_lines(analysis)).wrap(Wrap { trim: false })
}

/// Largest scroll offset that still shows a line of the analysis, for a
/// results area `width` columns wide.
#[must_use]
pub fn max_scroll(analysis: &HealthAnalysis, width: u16) -> u16 {
    // Borders take one column on each side.
    let inner = width.saturating_sub(2).max(1);
    let rows = analysis_body(analysis).line_count(inner);
    u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
}

fn render_analysis(f: &mut Frame, area: Rect, analysis: &HealthAnalysis, view: &ResultsView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Scrollable body
            Constraint::Length(1), // Export notice
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_step_header(
        f,
        chunks[0],
        "Your Health Insights",
        "Here's a summary based on the information you provided.",
    );

    let body = analysis_body(analysis)
        .scroll((view.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    f.render_widget(body, chunks[1]);

    if let Some(notice) = &view.notice {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {notice}"),
                Theme::info(),
            ))),
            chunks[2],
        );
    }

    render_key_footer(
        f,
        chunks[3],
        &[
            ("↑↓", "Scroll"),
            ("D", "Download Full Report"),
            ("R", "Start a New Analysis"),
            ("Q", "Quit"),
        ],
        None,
    );
}
