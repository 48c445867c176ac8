use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{components::card::Card, theme::Theme};

const PLACEHOLDER: &str = "ابحث بالاسم أو التفاصيل...";

pub fn render(frame: &mut Frame<'_>, area: Rect, query: &str, focused: bool, theme: &Theme) {
    let card = Card::new("", theme).focused(focused);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut spans = vec![Span::styled("/ ", Style::default().fg(theme.accent))];
    if query.is_empty() && !focused {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(theme.text_muted)));
    } else {
        spans.push(Span::styled(query.to_string(), Style::default().fg(theme.text)));
    }
    if focused {
        spans.push(Span::styled("│", Style::default().fg(theme.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
