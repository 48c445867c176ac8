pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::{ExpenseStore, Notifier, RecordStore};
use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::{AppState, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render<R: RecordStore, N: Notifier>(
    frame: &mut Frame<'_>,
    state: &AppState,
    store: &ExpenseStore<R, N>,
) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    match state.screen {
        Screen::Auth => screens::auth::render(frame, area, state, &theme),
        Screen::Loading => screens::loading::render(frame, area, &theme),
        Screen::Dashboard if store.is_loading() => screens::loading::render(frame, area, &theme),
        Screen::Dashboard => screens::dashboard::render(frame, area, state, store, &theme),
    }

    components::help_overlay::render(frame, area, state, &theme);
    components::toast::render(frame, area, &state.toasts, &theme);
}
