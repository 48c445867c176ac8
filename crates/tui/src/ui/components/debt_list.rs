use engine::{Expense, aggregates::DebtPartition};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::ui::{components::format_date, theme::Theme};

/// Unpaid debts first, then paid ones, each under a heading with its count.
/// `selected` indexes the debts in that order, headings excluded.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    debts: &DebtPartition<'_>,
    selected: usize,
    theme: &Theme,
) {
    if debts.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "لا توجد ديون مسجلة",
                Style::default().fg(theme.text_muted),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let mut items = Vec::new();
    if !debts.unpaid.is_empty() {
        items.push(heading(
            format!("ديون غير مسددة ({})", debts.unpaid.len()),
            theme.warning,
        ));
        items.extend(debts.unpaid.iter().map(|d| item(d, theme)));
    }
    if !debts.paid.is_empty() {
        items.push(heading(
            format!("ديون مسددة ({})", debts.paid.len()),
            theme.positive,
        ));
        items.extend(debts.paid.iter().map(|d| item(d, theme)));
    }

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selection))
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(row_index(debts, selected)));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Position of debt `selected` among the list items, headings included.
fn row_index(debts: &DebtPartition<'_>, selected: usize) -> usize {
    let unpaid_heading = usize::from(!debts.unpaid.is_empty());
    if selected < debts.unpaid.len() {
        selected + unpaid_heading
    } else {
        selected + unpaid_heading + 1
    }
}

fn heading(text: String, color: ratatui::style::Color) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
}

fn item(debt: &Expense, theme: &Theme) -> ListItem<'static> {
    let (badge, badge_color) = if debt.is_paid {
        ("مسدد ✓", theme.positive)
    } else {
        ("غير مسدد", theme.warning)
    };

    let mut meta = vec![
        Span::raw("  "),
        Span::styled(
            format!("[{badge}]"),
            Style::default().fg(badge_color),
        ),
        Span::raw(" "),
        Span::styled(format_date(debt.date), Style::default().fg(theme.text_muted)),
    ];
    if !debt.is_paid {
        meta.push(Span::raw("  "));
        meta.push(Span::styled("s", Style::default().fg(theme.accent)));
        meta.push(Span::raw(" تسديد"));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                debt.payee.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                debt.amount.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(meta),
    ];
    if let Some(notes) = debt.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("  {notes}"),
            Style::default().fg(theme.text_muted),
        )));
    }
    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};
    use engine::{Category, Money};

    use super::*;

    fn debt(id: &str, is_paid: bool) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "u1".to_string(),
            amount: Money::from_major(5_000),
            category: Category::Debt,
            payee: "علي".to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
            created_at: DateTime::parse_from_rfc3339("2026-10-02T10:00:00+03:00").unwrap(),
            is_paid,
        }
    }

    #[test]
    fn selection_skips_headings() {
        let (a, b, c) = (debt("a", false), debt("b", false), debt("c", true));
        let both = DebtPartition {
            unpaid: vec![&a, &b],
            paid: vec![&c],
        };
        assert_eq!(row_index(&both, 0), 1);
        assert_eq!(row_index(&both, 1), 2);
        assert_eq!(row_index(&both, 2), 4);

        let paid_only = DebtPartition {
            unpaid: Vec::new(),
            paid: vec![&c],
        };
        assert_eq!(row_index(&paid_only, 0), 1);
    }
}
