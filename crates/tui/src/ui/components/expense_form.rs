use engine::CURRENCY_SUFFIX;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{ExpenseFormState, FormField},
    ui::{
        components::{card::Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &ExpenseFormState, theme: &Theme) {
    let popup = centered_box(56, 19, area);
    frame.render_widget(Clear, popup);

    let card = Card::new(form.title(), theme).focused(true);
    let inner = card.inner(popup);
    card.render_frame(frame, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // amount
            Constraint::Length(3), // category
            Constraint::Length(3), // payee
            Constraint::Length(3), // notes
            Constraint::Length(3), // date
            Constraint::Length(1), // submit
        ])
        .split(inner);

    let amount_label = format!("المبلغ ({CURRENCY_SUFFIX})");
    render_field(frame, rows[0], &amount_label, &form.amount, "25000", form, FormField::Amount, theme);

    let (category_text, category_style) = match form.category {
        Some(category) => (
            format!("‹ {} ›", category.label()),
            Style::default().fg(theme.category(category)),
        ),
        None => ("اختر التصنيف".to_string(), Style::default().fg(theme.text_muted)),
    };
    render_row(
        frame,
        rows[1],
        "التصنيف",
        Span::styled(category_text, category_style),
        form.focus == FormField::Category,
        theme,
    );

    let payee_placeholder = if form.category.is_some_and(|c| c.is_debt()) {
        "أحمد محمد"
    } else {
        "سوق الخير"
    };
    render_field(frame, rows[2], form.payee_label(), &form.payee, payee_placeholder, form, FormField::Payee, theme);
    render_field(frame, rows[3], "التفاصيل (اختياري)", &form.notes, "تفاصيل إضافية...", form, FormField::Notes, theme);
    render_field(frame, rows[4], "التاريخ", &form.date, "YYYY-MM-DD", form, FormField::Date, theme);

    let submit = if form.pending {
        Span::styled("جارٍ الحفظ...", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            format!("Enter {}", form.submit_label()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            submit,
            Span::styled("   Esc إلغاء", Style::default().fg(theme.text_muted)),
        ])),
        rows[5],
    );
}

#[allow(clippy::too_many_arguments)]
fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    form: &ExpenseFormState,
    field: FormField,
    theme: &Theme,
) {
    let focused = form.focus == field;
    let mut spans = Vec::new();
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(theme.text_muted)));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(theme.text)));
    }
    if focused {
        spans.push(Span::styled("│", Style::default().fg(theme.accent)));
    }
    render_row(frame, area, label, Line::from(spans), focused, theme);
}

fn render_row<'a>(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    content: impl Into<Line<'a>>,
    focused: bool,
    theme: &Theme,
) {
    let card = Card::new(label, theme).focused(focused);
    let inner = card.inner(area);
    card.render_frame(frame, area);
    frame.render_widget(Paragraph::new(content.into()), inner);
}
