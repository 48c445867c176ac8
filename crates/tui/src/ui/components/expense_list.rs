use engine::Expense;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::ui::{components::format_date, theme::Theme};

/// History rows; `rows` is already filtered.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    rows: &[&Expense],
    selected: usize,
    searching: bool,
    theme: &Theme,
) {
    if rows.is_empty() {
        let message = if searching {
            "لا توجد نتائج للبحث"
        } else {
            "لا توجد مصروفات بعد"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(theme.text_muted)))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = rows.iter().map(|e| item(e, theme)).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn item(expense: &Expense, theme: &Theme) -> ListItem<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.category(expense.category))),
            Span::styled(
                expense.payee.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                expense.amount.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("[{}]", expense.category.label()),
                Style::default().fg(theme.text_muted),
            ),
            Span::raw(" "),
            Span::styled(format_date(expense.date), Style::default().fg(theme.text_muted)),
        ]),
    ];
    if let Some(notes) = expense.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("  {notes}"),
            Style::default().fg(theme.text_muted),
        )));
    }
    ListItem::new(lines)
}
