use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Tab},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently has the keyboard on the dashboard.
pub fn dashboard_hints(state: &AppState) -> Vec<KeyHint> {
    let dashboard = &state.dashboard;
    if dashboard.pending_delete.is_some() {
        return vec![KeyHint::new("y", "حذف"), KeyHint::new("n", "إلغاء")];
    }
    if dashboard.form.is_some() {
        return vec![
            KeyHint::new("Tab", "التالي"),
            KeyHint::new("←→", "التصنيف"),
            KeyHint::new("Enter", "حفظ"),
            KeyHint::new("Esc", "إلغاء"),
        ];
    }
    if dashboard.search_focused {
        return vec![KeyHint::new("Enter", "تم"), KeyHint::new("Esc", "تم")];
    }

    let mut hints = vec![KeyHint::new("a", "إضافة"), KeyHint::new("↑↓", "تحديد")];
    match dashboard.tab {
        Tab::History => hints.extend([
            KeyHint::new("e", "تعديل"),
            KeyHint::new("d", "حذف"),
            KeyHint::new("/", "بحث"),
            KeyHint::new("[ ]", "تصنيف"),
        ]),
        Tab::Debts => hints.extend([KeyHint::new("s", "تسديد"), KeyHint::new("d", "حذف")]),
        Tab::Reports => {}
    }
    hints.push(KeyHint::new("r", "تحديث"));
    hints
}

/// Shortcuts available whenever no modal or text field has the keyboard.
pub fn global_hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("1-3", "تبويب"),
        KeyHint::new("?", "مساعدة"),
        KeyHint::new("q", "خروج"),
    ]
}
