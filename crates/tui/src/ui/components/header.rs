use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::auth::messages::TITLE, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, email: Option<&str>, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Min(0)])
        .split(area);

    let brand = Line::from(Span::styled(
        format!(" {TITLE}"),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(brand), columns[0]);

    let account = Line::from(vec![
        Span::styled(email.unwrap_or_default().to_string(), Style::default().fg(theme.text_muted)),
        Span::raw("  "),
        Span::styled("L", Style::default().fg(theme.accent)),
        Span::raw(" خروج "),
    ]);
    frame.render_widget(
        Paragraph::new(account).alignment(Alignment::Right),
        columns[1],
    );
}
