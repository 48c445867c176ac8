pub mod actions;
pub mod auth;
pub mod dashboard;
pub mod form;
pub mod session;

use std::time::{Duration, Instant};

use api_types::auth::AuthSession;
use chrono::NaiveDate;
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use engine::{
    EngineError, ExpenseStore, Notice, NoticeLevel, NoticeQueue, Notifier, ResultEngine,
    StoreError,
};

use crate::{
    client::{Client, ClientError},
    config::{self, AppConfig},
    error::{AppError, Result},
    local_state::LocalState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use auth::{AuthField, AuthMode, AuthState};
pub use dashboard::{DashboardState, Tab};
pub use form::{ExpenseFormState, FormField};
use session::{engine_session, refresh_due, stamp_expiry};

const TICK_RATE: Duration = Duration::from_millis(200);
const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_TOASTS: usize = 3;

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Loading,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub level: NoticeLevel,
    pub message: String,
    shown_at: Instant,
}

impl ToastState {
    fn new(notice: Notice, now: Instant) -> Self {
        Self {
            level: notice.level,
            message: notice.message,
            shown_at: now,
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_TTL
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub auth: AuthState,
    pub dashboard: DashboardState,
    /// Newest last.
    pub toasts: Vec<ToastState>,
    pub help: bool,
    pub debt_tracking: bool,
    pub today: NaiveDate,
    pub user_email: Option<String>,
}

impl AppState {
    /// Whether printable keys should be treated as text.
    pub fn is_typing(&self) -> bool {
        match self.screen {
            Screen::Auth => true,
            Screen::Loading => false,
            Screen::Dashboard => {
                self.dashboard.form.is_some()
                    || (self.dashboard.search_focused && self.dashboard.pending_delete.is_none())
            }
        }
    }

    fn push_toasts(&mut self, notices: Vec<Notice>, now: Instant) {
        self.toasts.retain(|toast| !toast.expired(now));
        self.toasts
            .extend(notices.into_iter().map(|notice| ToastState::new(notice, now)));
        let overflow = self.toasts.len().saturating_sub(MAX_TOASTS);
        self.toasts.drain(..overflow);
    }
}

pub struct App {
    config: AppConfig,
    client: Client,
    store: ExpenseStore<Client, NoticeQueue>,
    notices: NoticeQueue,
    local_state: LocalState,
    tz: Tz,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let tz = config.tz()?;
        let client = Client::new(&config.base_url, &config.api_key)?;
        let notices = NoticeQueue::new();
        let store = ExpenseStore::new(client.clone(), notices.clone(), None);

        let local_state = LocalState::load(&config.state_file).unwrap_or_else(|err| {
            tracing::warn!("ignoring unreadable state file {}: {err}", config.state_file);
            LocalState::default()
        });
        let email = if config.email.is_empty() {
            local_state.last_email.clone().unwrap_or_default()
        } else {
            config.email.clone()
        };

        let state = AppState {
            screen: Screen::Auth,
            auth: AuthState::new(email),
            dashboard: DashboardState::default(),
            toasts: Vec::new(),
            help: false,
            debt_tracking: config.debt_tracking,
            today: config::today_in(tz),
            user_email: None,
        };

        Ok(Self {
            config,
            client,
            store,
            notices,
            local_state,
            tz,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = match self.restore_session(&mut terminal).await {
            Ok(()) => self.event_loop(&mut terminal).await,
            Err(err) => Err(err),
        };
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        while !self.should_quit {
            self.draw(terminal)?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key, terminal).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Renders a frame. Called before every awaited remote call so pending
    /// indicators are visible while it runs.
    fn draw(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        self.state.today = config::today_in(self.tz);
        self.state.push_toasts(self.notices.drain(), Instant::now());

        let state = &self.state;
        let store = &self.store;
        terminal
            .draw(|frame| ui::render(frame, state, store))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent, terminal: &mut ui::Terminal) -> Result<()> {
        let action = map_key(key, self.state.is_typing());
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if self.state.help {
            if matches!(action, AppAction::Cancel | AppAction::Input('?')) {
                self.state.help = false;
            }
            return Ok(());
        }

        match self.state.screen {
            Screen::Auth => self.handle_auth_key(action, terminal).await,
            Screen::Loading => Ok(()),
            Screen::Dashboard => self.handle_dashboard_key(action, terminal).await,
        }
    }

    async fn handle_auth_key(
        &mut self,
        action: AppAction,
        terminal: &mut ui::Terminal,
    ) -> Result<()> {
        let auth = &mut self.state.auth;
        if auth.pending {
            return Ok(());
        }
        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                auth.next_field();
            }
            AppAction::ToggleMode => auth.toggle_mode(),
            AppAction::Backspace => auth.backspace(),
            AppAction::Input(ch) => auth.input(ch),
            AppAction::Submit => self.submit_auth(terminal).await?,
            _ => {}
        }
        Ok(())
    }

    async fn submit_auth(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        if let Err(message) = self.state.auth.validate() {
            self.notices.notify(Notice::error(message));
            return Ok(());
        }

        let email = self.state.auth.email.trim().to_string();
        let password = self.state.auth.password.clone();
        self.state.auth.pending = true;
        self.draw(terminal)?;

        match self.state.auth.mode {
            AuthMode::SignIn => match self.client.sign_in(&email, &password).await {
                Ok(session) => {
                    tracing::info!(user = %session.user.id, "signed in");
                    self.state.auth.password.clear();
                    self.state.auth.pending = false;
                    return self.start_session(session, terminal).await;
                }
                Err(err) => {
                    tracing::warn!("sign-in failed: {err}");
                    self.notices
                        .notify(Notice::error(auth::sign_in_error_message(&err)));
                }
            },
            AuthMode::SignUp => match self.client.sign_up(&email, &password).await {
                Ok(_) => {
                    tracing::info!("account created for {email}");
                    self.notices.notify(Notice::success(auth::messages::SIGNED_UP));
                    self.state.auth.password.clear();
                    self.state.auth.mode = AuthMode::SignIn;
                }
                Err(err) => {
                    tracing::warn!("sign-up failed: {err}");
                    self.notices
                        .notify(Notice::error(auth::sign_up_error_message(&err)));
                }
            },
        }

        self.state.auth.pending = false;
        Ok(())
    }

    /// Verifies the session saved by a previous run, refreshing it when the
    /// access token was rejected. Anything else signs the user out.
    async fn restore_session(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let Some(stored) = self.local_state.session.clone() else {
            return Ok(());
        };
        self.state.screen = Screen::Loading;
        self.draw(terminal)?;

        match self.client.current_user(&stored.access_token).await {
            Ok(user) => {
                let mut session = stored;
                session.user.id = user.id;
                if user.email.is_some() {
                    session.user.email = user.email;
                }
                return self.start_session(session, terminal).await;
            }
            Err(ClientError::Unauthorized(_) | ClientError::Forbidden) => {
                match self.client.refresh(&stored.refresh_token).await {
                    Ok(session) => {
                        tracing::info!(user = %session.user.id, "session refreshed");
                        return self.start_session(session, terminal).await;
                    }
                    Err(err) => tracing::info!("stored session expired: {err}"),
                }
            }
            Err(err) => tracing::warn!("could not verify stored session: {err}"),
        }

        self.local_state.forget_session();
        self.persist_local_state();
        self.state.screen = Screen::Auth;
        Ok(())
    }

    async fn start_session(
        &mut self,
        mut session: AuthSession,
        terminal: &mut ui::Terminal,
    ) -> Result<()> {
        stamp_expiry(&mut session, now_unix());
        self.state.user_email = Some(session.user.email.clone().unwrap_or_default());
        self.store.set_session(Some(engine_session(&session)));
        self.local_state.remember(session);
        self.persist_local_state();

        self.state.dashboard = DashboardState::default();
        self.state.screen = Screen::Dashboard;
        self.reload(terminal).await
    }

    /// Refetches the list; the dashboard shows the loading screen while the
    /// store has not loaded yet.
    async fn reload(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        if !self.ensure_fresh_token().await {
            return Ok(());
        }
        self.draw(terminal)?;
        let result = self.store.load().await;
        self.after_remote(result).await;

        let len = self.state.dashboard.rows(self.store.expenses()).len();
        self.state.dashboard.clamp_selection(len);
        Ok(())
    }

    /// Refreshes the access token ahead of a remote call when it is about to
    /// run out. Returns `false` once there is no session left.
    async fn ensure_fresh_token(&mut self) -> bool {
        let due = self
            .local_state
            .session
            .as_ref()
            .is_some_and(|session| refresh_due(session, now_unix()));
        if due {
            self.renew_session().await;
        }
        self.store.session().is_some()
    }

    /// Trades the refresh token for a new access token. A rejected refresh
    /// token ends the session; a network failure keeps it for the next call.
    async fn renew_session(&mut self) {
        let Some(refresh_token) = self
            .local_state
            .session
            .as_ref()
            .map(|session| session.refresh_token.clone())
        else {
            self.expire_session();
            return;
        };

        match self.client.refresh(&refresh_token).await {
            Ok(mut session) => {
                stamp_expiry(&mut session, now_unix());
                tracing::info!(user = %session.user.id, "access token refreshed");
                self.store.renew_session(engine_session(&session));
                self.local_state.remember(session);
                self.persist_local_state();
            }
            Err(ClientError::Transport(err)) => {
                tracing::warn!("could not refresh access token: {err}");
            }
            Err(err) => {
                tracing::info!("refresh token rejected: {err}");
                self.expire_session();
            }
        }
    }

    /// A call rejected for its token gets the token renewed. The call itself
    /// is not retried; the store already reported the failure.
    async fn after_remote(&mut self, result: ResultEngine<()>) {
        if matches!(result, Err(EngineError::Store(StoreError::Unauthorized))) {
            self.renew_session().await;
        }
    }

    fn expire_session(&mut self) {
        self.notices
            .notify(Notice::error(auth::messages::SESSION_EXPIRED));
        self.end_session();
    }

    async fn sign_out(&mut self) {
        if let Some(session) = self.store.session()
            && let Err(err) = self.client.sign_out(&session.access_token).await
        {
            tracing::warn!("remote sign-out failed: {err}");
        }
        tracing::info!("signed out");
        self.end_session();
    }

    fn end_session(&mut self) {
        self.local_state.forget_session();
        self.persist_local_state();
        self.store.set_session(None);

        self.state.dashboard = DashboardState::default();
        self.state.user_email = None;
        self.state.auth = AuthState::new(self.local_state.last_email.clone().unwrap_or_default());
        self.state.screen = Screen::Auth;
    }

    fn persist_local_state(&self) {
        if let Err(err) = self.local_state.save(&self.config.state_file) {
            tracing::warn!("could not write state file {}: {err}", self.config.state_file);
        }
    }

    async fn handle_dashboard_key(
        &mut self,
        action: AppAction,
        terminal: &mut ui::Terminal,
    ) -> Result<()> {
        if self.state.dashboard.pending_delete.is_some() {
            return self.handle_confirm_key(action, terminal).await;
        }
        if self.state.dashboard.form.is_some() {
            return self.handle_form_key(action, terminal).await;
        }
        if self.state.dashboard.search_focused {
            self.handle_search_key(action);
            return Ok(());
        }

        let debt_tracking = self.state.debt_tracking;
        let len = self.state.dashboard.rows(self.store.expenses()).len();
        let dashboard = &mut self.state.dashboard;
        match action {
            AppAction::NextField => dashboard.cycle_tab(true, debt_tracking),
            AppAction::PrevField => dashboard.cycle_tab(false, debt_tracking),
            AppAction::Up | AppAction::Input('k') => dashboard.select_prev(),
            AppAction::Down | AppAction::Input('j') => dashboard.select_next(len),
            AppAction::Left | AppAction::Input('[') if dashboard.tab == Tab::History => {
                dashboard.cycle_filter(false);
            }
            AppAction::Right | AppAction::Input(']') if dashboard.tab == Tab::History => {
                dashboard.cycle_filter(true);
            }
            AppAction::Submit | AppAction::Input('e') => self.edit_selected(),
            AppAction::Delete | AppAction::Input('d') => self.delete_selected(),
            AppAction::Input('s') => self.settle_selected(terminal).await?,
            AppAction::Input(ch @ '1'..='3') => {
                let index = usize::from(ch as u8 - b'1');
                if let Some(tab) = Tab::available(debt_tracking).get(index) {
                    dashboard.set_tab(*tab, debt_tracking);
                }
            }
            AppAction::Input('/') if dashboard.tab == Tab::History => {
                dashboard.search_focused = true;
            }
            AppAction::Input('c') => {
                dashboard.search.clear();
                dashboard.category_filter = None;
                dashboard.selected = 0;
            }
            AppAction::Input('a' | '+' | 'n') => dashboard.open_create(self.state.today),
            AppAction::Input('r') => self.reload(terminal).await?,
            AppAction::Input('L') => self.sign_out().await,
            AppAction::Input('?') => self.state.help = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, action: AppAction) {
        let dashboard = &mut self.state.dashboard;
        match action {
            AppAction::Cancel | AppAction::Submit | AppAction::Down => {
                dashboard.search_focused = false;
            }
            AppAction::Backspace => dashboard.pop_search(),
            AppAction::Input(ch) => dashboard.push_search(ch),
            _ => {}
        }
    }

    fn edit_selected(&mut self) {
        if self.state.dashboard.tab != Tab::History {
            return;
        }
        if let Some(expense) = self.state.dashboard.selected_row(self.store.expenses()) {
            let expense = expense.clone();
            self.state.dashboard.open_edit(&expense);
        }
    }

    fn delete_selected(&mut self) {
        if let Some(expense) = self.state.dashboard.selected_row(self.store.expenses()) {
            let id = expense.id.clone();
            self.state.dashboard.request_delete(id);
        }
    }

    async fn handle_form_key(
        &mut self,
        action: AppAction,
        terminal: &mut ui::Terminal,
    ) -> Result<()> {
        let Some(form) = self.state.dashboard.form.as_mut() else {
            return Ok(());
        };
        if form.pending {
            return Ok(());
        }
        match action {
            AppAction::Cancel => self.state.dashboard.close_form(),
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left if form.focus == FormField::Category => form.cycle_category(false),
            AppAction::Right if form.focus == FormField::Category => form.cycle_category(true),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit => self.submit_form(terminal).await?,
            _ => {}
        }
        Ok(())
    }

    async fn submit_form(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let Some(save) = actions::begin_save(&mut self.state.dashboard) else {
            return Ok(());
        };
        if !self.ensure_fresh_token().await {
            return Ok(());
        }
        self.draw(terminal)?;

        let result = actions::save(&mut self.store, &mut self.state.dashboard, save).await;
        self.after_remote(result).await;
        Ok(())
    }

    async fn handle_confirm_key(
        &mut self,
        action: AppAction,
        terminal: &mut ui::Terminal,
    ) -> Result<()> {
        match action {
            AppAction::Submit | AppAction::Input('y') => self.confirm_delete(terminal).await,
            AppAction::Cancel | AppAction::Input('n') => {
                self.state.dashboard.cancel_delete();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    async fn confirm_delete(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let Some(id) = actions::begin_delete(&mut self.state.dashboard) else {
            return Ok(());
        };
        if !self.ensure_fresh_token().await {
            return Ok(());
        }
        self.draw(terminal)?;

        let result = actions::delete(&mut self.store, &mut self.state.dashboard, &id).await;
        self.after_remote(result).await;
        Ok(())
    }

    async fn settle_selected(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let Some(debt) = actions::begin_settle(&mut self.state.dashboard, self.store.expenses())
        else {
            return Ok(());
        };
        if !self.ensure_fresh_token().await {
            return Ok(());
        }
        self.draw(terminal)?;

        let today = config::today_in(self.tz);
        let result = actions::settle(&mut self.store, &mut self.state.dashboard, &debt, today).await;
        self.after_remote(result).await;
        Ok(())
    }
}
