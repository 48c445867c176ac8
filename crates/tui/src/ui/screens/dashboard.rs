use engine::{ExpenseStore, Notifier, RecordStore, aggregates};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Tab},
    ui::{
        components::{
            category_filter, confirm_dialog, debt_list, expense_form, expense_list, header, hints,
            reports, search_bar, stats, tabs,
        },
        theme::Theme,
    },
};

pub fn render<R: RecordStore, N: Notifier>(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    store: &ExpenseStore<R, N>,
    theme: &Theme,
) {
    let dashboard = &state.dashboard;
    let history = dashboard.tab == Tab::History;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                           // header
            Constraint::Length(5),                           // stat card
            Constraint::Length(if history { 3 } else { 0 }), // search
            Constraint::Length(if history { 1 } else { 0 }), // category filter
            Constraint::Length(1),                           // tabs
            Constraint::Min(0),                              // content
            Constraint::Length(1),                           // hints
        ])
        .split(area);

    header::render(frame, layout[0], state.user_email.as_deref(), theme);

    if dashboard.tab == Tab::Debts {
        stats::render_debts(
            frame,
            layout[1],
            store.unpaid_debts_total(),
            store.unpaid_debts_count(),
            theme,
        );
    } else {
        stats::render_monthly(
            frame,
            layout[1],
            store.monthly_total(state.today),
            state.today,
            theme,
        );
    }

    if history {
        search_bar::render(frame, layout[2], &dashboard.search, dashboard.search_focused, theme);
        category_filter::render(frame, layout[3], dashboard.category_filter, theme);
    }

    let unpaid = if state.debt_tracking {
        store.unpaid_debts_count()
    } else {
        0
    };
    tabs::render_tabs(frame, layout[4], dashboard.tab, state.debt_tracking, unpaid, theme);

    let content = layout[5];
    match dashboard.tab {
        Tab::History => {
            let rows = dashboard.rows(store.expenses());
            let searching = !dashboard.search.trim().is_empty();
            expense_list::render(frame, content, &rows, dashboard.selected, searching, theme);
        }
        Tab::Debts => {
            let debts = store.debts();
            let partition = aggregates::partition_debts(&debts);
            debt_list::render(frame, content, &partition, dashboard.selected, theme);
        }
        Tab::Reports => {
            let shares = store.category_shares();
            let payees = store.payee_totals();
            reports::render(frame, content, &shares, &payees, theme);
        }
    }

    let mut bar = vec![Span::raw(" ")];
    bar.extend(hints::hints_to_spans(&hints::dashboard_hints(state), theme));
    if !dashboard.has_modal() && !dashboard.search_focused {
        bar.push(hints::hint_separator(theme));
        bar.extend(hints::hints_to_spans(&hints::global_hints(), theme));
    }
    frame.render_widget(Paragraph::new(Line::from(bar)), layout[6]);

    if let Some(form) = &dashboard.form {
        expense_form::render(frame, area, form, theme);
    }
    if dashboard.pending_delete.is_some() {
        confirm_dialog::render(frame, area, dashboard.busy, theme);
    }
}
