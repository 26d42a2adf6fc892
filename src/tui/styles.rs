//! Wellness color palette and styles.
//!
//! Teal and slate on a dark background, with semantic colors reserved for
//! BMI bands and confidence badges.

use std::cmp::Ordering;

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{BmiCategory, Confidence, Step};

/// Application color palette.
pub struct Theme;

impl Theme {
    // === Primary Colors ===

    /// Deep teal - Primary color
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Darker teal for accents
    pub const PRIMARY_DARK: Color = Color::Rgb(15, 118, 110); // #0F766E

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - Success/normal weight
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - Warning/overweight/medium
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - Error/obese/high
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Blue - Info
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Near-black background
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for success messages
    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Style for danger/error messages
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for info messages
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for selected items
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the header
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// BMI band colouring: blue, green, amber, red.
    #[must_use]
    pub fn bmi_category(category: BmiCategory) -> Style {
        match category {
            BmiCategory::Underweight => Self::info(),
            BmiCategory::Normal => Self::success(),
            BmiCategory::Overweight => Self::warning(),
            BmiCategory::Obese => Self::danger(),
        }
    }

    /// Badge style for a condition's confidence.
    #[must_use]
    pub fn confidence(confidence: &Confidence) -> Style {
        let base = Style::default().add_modifier(Modifier::BOLD);
        match confidence {
            Confidence::Low => base.fg(Self::INFO),
            Confidence::Medium => base.fg(Self::WARNING),
            Confidence::High => base.fg(Self::DANGER),
            Confidence::Other(_) => base.fg(Self::TEXT_SECONDARY),
        }
    }

    /// Style for a step in the indicator, relative to the active step.
    #[must_use]
    pub fn step(step: Step, active: Step) -> Style {
        match step.cmp(&active) {
            Ordering::Less => Self::success(),
            Ordering::Equal => Self::selected(),
            Ordering::Greater => Self::text_muted(),
        }
    }

    /// Style for the text cursor in a focused field.
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_category_colors() {
        assert_eq!(Theme::bmi_category(BmiCategory::Underweight).fg, Some(Theme::INFO));
        assert_eq!(Theme::bmi_category(BmiCategory::Normal).fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::bmi_category(BmiCategory::Overweight).fg, Some(Theme::WARNING));
        assert_eq!(Theme::bmi_category(BmiCategory::Obese).fg, Some(Theme::DANGER));
    }

    #[test]
    fn test_step_states() {
        assert_eq!(Theme::step(Step::Profile, Step::Symptoms), Theme::success());
        assert_eq!(Theme::step(Step::Symptoms, Step::Symptoms), Theme::selected());
        assert_eq!(Theme::step(Step::Results, Step::Symptoms), Theme::text_muted());
    }
}
