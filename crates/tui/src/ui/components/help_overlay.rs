use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

const GENERAL: [(&str, &str); 8] = [
    ("1 2 3 / Tab", "التنقل بين التبويبات"),
    ("a", "إضافة مصروف"),
    ("↑↓ / j k", "تحديد سطر"),
    ("r", "تحديث القائمة"),
    ("L", "تسجيل الخروج"),
    ("?", "إظهار / إخفاء المساعدة"),
    ("q / Ctrl+C", "إنهاء"),
    ("Esc", "إغلاق"),
];

const HISTORY: [(&str, &str); 5] = [
    ("Enter / e", "تعديل المصروف المحدد"),
    ("d / Delete", "حذف المصروف المحدد"),
    ("/", "البحث بالاسم أو التفاصيل"),
    ("[ ] / ←→", "تغيير التصنيف"),
    ("c", "مسح البحث والتصنيف"),
];

const DEBTS: [(&str, &str); 2] = [("s", "تسديد الدين المحدد"), ("d / Delete", "حذف الدين المحدد")];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if !state.help {
        return;
    }

    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let card = Card::new("المساعدة", theme).focused(true);
    let inner = card.inner(popup);
    card.render_frame(frame, popup);

    let mut lines = section(&GENERAL, theme);
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("السجل", Style::default().fg(theme.text_muted))));
    lines.extend(section(&HISTORY, theme));
    if state.debt_tracking {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("الديون", Style::default().fg(theme.text_muted))));
        lines.extend(section(&DEBTS, theme));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn section(keys: &[(&'static str, &'static str)], theme: &Theme) -> Vec<Line<'static>> {
    keys.iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}"), Style::default().fg(theme.accent)),
                Span::raw("  "),
                Span::raw(*action),
            ])
        })
        .collect()
}
