use engine::{
    Money,
    aggregates::{CategoryShare, PayeeTotal},
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{
    components::{
        card::Card,
        charts::{ascii_bar, percentage_bar},
    },
    theme::Theme,
};

const TOP_PAYEES: usize = 10;
const NO_DATA: &str = "لا توجد بيانات";

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    shares: &[CategoryShare],
    payees: &[PayeeTotal],
    theme: &Theme,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_categories(frame, columns[0], shares, theme);
    render_payees(frame, columns[1], payees, theme);
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, shares: &[CategoryShare], theme: &Theme) {
    let card = Card::new("المصروفات حسب التصنيف", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if shares.is_empty() {
        render_empty(frame, inner, theme);
        return;
    }

    let lines: Vec<Line> = shares
        .iter()
        .flat_map(|share| {
            let color = theme.category(share.category);
            [
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::styled(share.category.label(), Style::default().fg(theme.text)),
                    Span::raw("  "),
                    Span::styled(share.amount.to_string(), Style::default().fg(theme.text_muted)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", percentage_bar(share.percent, 20)),
                    Style::default().fg(color),
                )),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_payees(frame: &mut Frame<'_>, area: Rect, payees: &[PayeeTotal], theme: &Theme) {
    let card = Card::new("المصروفات حسب المستلم", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if payees.is_empty() {
        render_empty(frame, inner, theme);
        return;
    }

    let max = payees.first().map_or(Money::ZERO, |p| p.amount);
    let lines: Vec<Line> = payees
        .iter()
        .take(TOP_PAYEES)
        .enumerate()
        .flat_map(|(rank, payee)| {
            [
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(theme.accent)),
                    Span::styled(
                        payee.payee.clone(),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(payee.amount.to_string(), Style::default().fg(theme.text)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", ascii_bar(magnitude(payee.amount), magnitude(max), 20)),
                    Style::default().fg(theme.accent),
                )),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn magnitude(amount: Money) -> u64 {
    amount.minor().unsigned_abs()
}

fn render_empty(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(NO_DATA, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Center),
        area,
    );
}
