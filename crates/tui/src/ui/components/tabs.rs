use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::Tab, ui::theme::Theme};

/// Tab bar; the debts tab carries the unpaid count as a badge.
pub fn render_tabs(
    frame: &mut Frame<'_>,
    area: Rect,
    active: Tab,
    debt_tracking: bool,
    unpaid_debts: usize,
    theme: &Theme,
) {
    let mut spans = vec![Span::raw(" ")];

    for (i, tab) in Tab::available(debt_tracking).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = format!("{} {}", i + 1, tab.label());
        if *tab == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }

        if *tab == Tab::Debts && unpaid_debts > 0 {
            spans.push(Span::styled(
                format!(" {unpaid_debts} "),
                Style::default()
                    .fg(theme.background)
                    .bg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
