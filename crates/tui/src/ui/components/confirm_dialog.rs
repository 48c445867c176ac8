use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::ui::{
    components::{card::Card, centered_box},
    theme::Theme,
};

/// Delete confirmation; `busy` while the delete call runs.
pub fn render(frame: &mut Frame<'_>, area: Rect, busy: bool, theme: &Theme) {
    let popup = centered_box(48, 8, area);
    frame.render_widget(Clear, popup);

    let card = Card::new("حذف المصروف", theme).focused(true);
    let inner = card.inner(popup);
    card.render_frame(frame, popup);

    let actions = if busy {
        Line::from(Span::styled("جارٍ الحذف...", Style::default().fg(theme.warning)))
    } else {
        Line::from(vec![
            Span::styled(
                "y",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" حذف   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" إلغاء"),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "هل أنت متأكد من حذف هذا المصروف؟",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "لا يمكن التراجع عن هذا الإجراء.",
            Style::default().fg(theme.text_muted),
        )),
        Line::raw(""),
        actions,
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
