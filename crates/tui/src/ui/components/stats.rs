use chrono::NaiveDate;
use engine::Money;
use ratatui::{Frame, layout::Rect};

use crate::ui::{
    components::{card::StatCard, month_name},
    theme::Theme,
};

pub fn render_monthly(frame: &mut Frame<'_>, area: Rect, total: Money, today: NaiveDate, theme: &Theme) {
    StatCard::new(
        format!("إجمالي مصروفات {}", month_name(today)),
        total.to_string(),
        theme,
    )
    .value_color(theme.accent)
    .render(frame, area);
}

pub fn render_debts(frame: &mut Frame<'_>, area: Rect, total: Money, unpaid: usize, theme: &Theme) {
    StatCard::new("إجمالي الديون غير المسددة", total.to_string(), theme)
        .value_color(theme.warning)
        .subtitle(unpaid_label(unpaid))
        .render(frame, area);
}

fn unpaid_label(count: usize) -> String {
    let noun = if count == 1 { "دين" } else { "ديون" };
    format!("{count} {noun} غير مسددة")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_count_is_singular_only_for_one() {
        assert_eq!(unpaid_label(1), "1 دين غير مسددة");
        assert_eq!(unpaid_label(0), "0 ديون غير مسددة");
        assert_eq!(unpaid_label(4), "4 ديون غير مسددة");
    }
}
