use engine::NoticeLevel;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{app::ToastState, ui::theme::Theme};

/// Stacks toasts in the bottom-right corner, newest at the bottom.
pub fn render(frame: &mut Frame<'_>, area: Rect, toasts: &[ToastState], theme: &Theme) {
    let height = 3u16;
    let mut bottom = area.y + area.height.saturating_sub(1);

    for toast in toasts.iter().rev() {
        if bottom < area.y + height {
            break;
        }
        let line = Line::from(toast.message.as_str());
        let width = (line.width() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: bottom - height,
            width,
            height,
        };

        let style = match toast.level {
            NoticeLevel::Success => Style::default().fg(theme.positive),
            NoticeLevel::Error => Style::default().fg(theme.error),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(Style::default().bg(theme.surface));

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(line).style(style).block(block), rect);
        bottom -= height;
    }
}
