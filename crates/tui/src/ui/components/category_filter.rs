use engine::Category;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

const ALL: &str = "الكل";

/// One chip per filterable category, preceded by "all".
pub fn render(frame: &mut Frame<'_>, area: Rect, selected: Option<Category>, theme: &Theme) {
    let options = std::iter::once(None).chain(Category::filterable().map(Some));

    let mut spans = vec![Span::raw(" ")];
    for (i, option) in options.enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = option.map_or(ALL, Category::label);
        let style = if option == selected {
            let color = option.map_or(theme.accent, |c| theme.category(c));
            Style::default()
                .fg(theme.background)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
