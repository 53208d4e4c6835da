//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use briefly_core::SummaryStyle;

use crate::action::NoticeLevel;

/// The color palette for briefly's TUI. Dark only.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(40, 40, 60)
    }

    pub fn code_bg() -> Color {
        Color::Rgb(35, 35, 35)
    }

    // ── Summary styles ──────────────────────────────────────

    /// Left-edge color of the output card for a style.
    pub fn style_color(style: SummaryStyle) -> Color {
        match style {
            SummaryStyle::Concise => Color::Rgb(59, 130, 246),
            SummaryStyle::Detailed => Color::Rgb(34, 197, 94),
            SummaryStyle::BulletPoints => Color::Rgb(249, 115, 22),
        }
    }

    pub fn style_icon(style: SummaryStyle) -> &'static str {
        match style {
            SummaryStyle::Concise => "⚡",
            SummaryStyle::Detailed => "▤",
            SummaryStyle::BulletPoints => "≡",
        }
    }

    pub fn notice_color(level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => Self::fg_muted(),
            NoticeLevel::Success => Self::success(),
            NoticeLevel::Warning => Self::warning(),
            NoticeLevel::Error => Self::error(),
        }
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn focused_border() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn selection() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn cursor() -> Style {
        Style::default().fg(Self::bg()).bg(Self::accent())
    }

    pub fn code() -> Style {
        Style::default()
            .fg(Color::Rgb(230, 160, 120))
            .bg(Self::code_bg())
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Self::bg())
            .bg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Self::fg_dim()).bg(Self::selection_bg())
    }

    pub fn button_outline() -> Style {
        Style::default().fg(Self::fg()).bg(Self::selection_bg())
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::fg_muted())
    }
}
