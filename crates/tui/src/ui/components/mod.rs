pub mod card;
pub mod category_filter;
pub mod charts;
pub mod confirm_dialog;
pub mod debt_list;
pub mod expense_form;
pub mod expense_list;
pub mod header;
pub mod help_overlay;
pub mod hints;
pub mod reports;
pub mod search_bar;
pub mod stats;
pub mod tabs;
pub mod toast;

use chrono::{Datelike, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Month names as written in Iraq.
const MONTHS: [&str; 12] = [
    "كانون الثاني",
    "شباط",
    "آذار",
    "نيسان",
    "أيار",
    "حزيران",
    "تموز",
    "آب",
    "أيلول",
    "تشرين الأول",
    "تشرين الثاني",
    "كانون الأول",
];

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// `15 تشرين الأول 2026`
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date), date.year())
}

/// A rect of the given percentage of `area`, centered.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// A fixed-size rect centered in `area`, shrunk to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_use_iraqi_month_names() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert_eq!(format_date(date), "15 تشرين الأول 2026");
        let january = NaiveDate::from_ymd_opt(2027, 1, 3).unwrap();
        assert_eq!(month_name(january), "كانون الثاني");
    }

    #[test]
    fn centered_box_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let inner = centered_box(40, 10, area);
        assert_eq!((inner.width, inner.height), (20, 5));
    }
}
