use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{
        AppState, AuthField,
        auth::messages::{SUBTITLE, TITLE},
    },
    ui::{
        components::{card::Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let auth = &state.auth;

    let box_area = centered_box(44, 16, area);
    frame.render_widget(Clear, box_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1), // spacer
            Constraint::Min(0),    // form card
        ])
        .split(box_area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            TITLE,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(SUBTITLE, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Center),
        layout[1],
    );

    let card = Card::new(auth.mode.heading(), theme).focused(true);
    let inner = card.inner(layout[3]);
    card.render_frame(frame, layout[3]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // email label
            Constraint::Length(1), // email
            Constraint::Length(1), // spacer
            Constraint::Length(1), // password label
            Constraint::Length(1), // password
            Constraint::Length(1), // spacer
            Constraint::Length(1), // submit
            Constraint::Length(1), // switch mode
        ])
        .horizontal_margin(1)
        .split(inner);

    label(frame, rows[0], "البريد الإلكتروني", theme);
    render_input(
        frame,
        rows[1],
        &auth.email,
        "example@email.com",
        false,
        auth.focus == AuthField::Email,
        theme,
    );
    label(frame, rows[3], "كلمة المرور", theme);
    render_input(
        frame,
        rows[4],
        &auth.password,
        "••••••••",
        true,
        auth.focus == AuthField::Password,
        theme,
    );

    let submit = if auth.pending {
        Span::styled("...", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            format!("Enter {}", auth.mode.submit_label()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )
    };
    frame.render_widget(Paragraph::new(submit).alignment(Alignment::Center), rows[6]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+T ", Style::default().fg(theme.accent)),
            Span::styled(auth.mode.switch_hint(), Style::default().fg(theme.text_muted)),
        ]))
        .alignment(Alignment::Center),
        rows[7],
    );
}

fn label(frame: &mut Frame<'_>, area: Rect, text: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(theme.text_muted))),
        area,
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    value: &str,
    placeholder: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(theme.text_muted)))
    } else {
        let shown = if is_password {
            mask_password(value)
        } else {
            value.to_string()
        };
        let style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(Span::styled(format!("{shown}{cursor}"), style))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn mask_password(value: &str) -> String {
    "•".repeat(value.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_counts_characters_not_bytes() {
        assert_eq!(mask_password("سر12"), "••••");
        assert_eq!(mask_password(""), "");
    }
}
