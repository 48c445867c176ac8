use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
};

use crate::ui::{components::centered_box, theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let row = centered_box(area.width, 1, area);
    frame.render_widget(
        Paragraph::new(Span::styled("⏳ جارٍ التحميل...", Style::default().fg(theme.accent)))
            .alignment(Alignment::Center),
        row,
    );
}
