use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// Rounded container used by every dashboard panel.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    /// Mark this card as focused (uses accent border color).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface));

        if self.title.is_empty() {
            block
        } else {
            block.title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
        }
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }
}

/// A headline figure with a label and an optional line below.
pub struct StatCard<'a> {
    label: String,
    value: String,
    value_color: Option<ratatui::style::Color>,
    subtitle: Option<String>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(label: impl Into<String>, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            value_color: None,
            subtitle: None,
            theme,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn value_color(mut self, color: ratatui::style::Color) -> Self {
        self.value_color = Some(color);
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let card = Card::new("", self.theme);
        let inner = card.inner(area);
        card.render_frame(frame, area);

        let mut lines = vec![
            Line::from(Span::styled(
                self.label.clone(),
                Style::default().fg(self.theme.text_muted),
            )),
            Line::from(Span::styled(
                self.value.clone(),
                Style::default()
                    .fg(self.value_color.unwrap_or(self.theme.text))
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        if let Some(sub) = &self.subtitle {
            lines.push(Line::from(Span::styled(
                sub.clone(),
                Style::default().fg(self.theme.text_muted),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
