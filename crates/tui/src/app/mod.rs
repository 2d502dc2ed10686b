use std::time::Duration;

use api_types::environment::EnvironmentDescriptor;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::{
    client::{Client, RequestOutcome},
    config::AppConfig,
    credentials::{CredentialField, CredentialStore, Scope},
    error::{AppError, Result},
    login::{self, LoginEffect, Prompt, RecoveryDecision, SubmitAction},
    session::Bootstrap,
    ui,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    SettingsLogin,
    Settings,
    Search(String),
    Browse(String),
}

/// Which part of the navigation shell owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavFocus {
    Search,
    Browse,
    Account,
}

pub const ACCOUNT_MENU: [&str; 2] = ["Settings", "Logout"];

/// First Browse entry: it leads back to the home page rather than a category.
pub const BROWSE_HOME_ENTRY: &str = "Home Page";

/// Browse dropdown entries: the home page first, then every category.
pub fn browse_menu(env: &api_types::environment::EnvironmentDescriptor) -> Vec<String> {
    std::iter::once(BROWSE_HOME_ENTRY.to_string())
        .chain(env.category_list.values().map(|category| category.name.clone()))
        .collect()
}

#[derive(Debug, Default)]
pub struct NavState {
    pub search: String,
    pub focus: Option<NavFocus>,
    pub browse_selected: usize,
    pub account_selected: usize,
}

#[derive(Debug, Default)]
pub struct LoginFormState {
    pub secret: String,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ModalState {
    pub prompt: Prompt,
    pub selected: usize,
    /// Candidate secret to re-submit if the user picks `Retry`.
    retry_secret: Option<String>,
}

impl ModalState {
    pub fn selected_choice(&self) -> RecoveryDecision {
        self.prompt.choices[self.selected.min(self.prompt.choices.len() - 1)]
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub bootstrap: Bootstrap,
    pub nav: NavState,
    pub login: LoginFormState,
    pub modal: Option<ModalState>,
    pub last_refresh: Option<DateTime<Local>>,
    pub server: Option<String>,
}

/// Completed network round-trip, delivered back to the event loop.
#[derive(Debug)]
pub enum NetResponse {
    Environment(RequestOutcome<EnvironmentDescriptor>),
    ConfigValidation {
        /// Address the call actually went to; named in the unreachable
        /// prompt.
        server: String,
        secret: String,
        outcome: RequestOutcome<()>,
    },
}

/// Liveness token: an event whose generation no longer matches the app's is
/// a continuation of a torn-down mount and is dropped without touching
/// state.
#[derive(Debug)]
pub struct NetEvent {
    pub generation: u64,
    pub response: NetResponse,
}

pub struct App {
    client: Client,
    store: CredentialStore,
    pub state: AppState,
    generation: u64,
    /// The login flow issues at most one outstanding validation request.
    validation_pending: bool,
    tx: mpsc::UnboundedSender<NetEvent>,
    rx: mpsc::UnboundedReceiver<NetEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut store = CredentialStore::load(&config.credentials_path)?;
        if let Some(server) = &config.server {
            store.seed_server(server)?;
        }

        let server = store.resolve().server;
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState {
            screen: Screen::Home,
            bootstrap: Bootstrap::default(),
            nav: NavState::default(),
            login: LoginFormState::default(),
            modal: None,
            last_refresh: None,
            server,
        };

        Ok(Self {
            client: Client::new(),
            store,
            state,
            generation: 0,
            validation_pending: false,
            tx,
            rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = ui::TerminalSession::new()?;
        self.mount();
        self.event_loop(session.terminal()).await
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            while let Ok(event) = self.rx.try_recv() {
                self.handle_net(event);
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Starts a fresh bootstrap mount: resolves the credential once and
    /// issues exactly one environment request.
    fn mount(&mut self) {
        self.state.bootstrap.reset();
        self.state.nav = NavState::default();
        if self.state.bootstrap.begin() {
            self.spawn_environment();
        }
    }

    fn spawn_environment(&mut self) {
        let credential = self.store.resolve();
        tracing::debug!(
            server = ?credential.server,
            has_auth = credential.auth.is_some(),
            has_secret = credential.secret.is_some(),
            "resolved credential for bootstrap"
        );
        self.state.server = credential.server.clone();
        let server = credential.server.unwrap_or_default();
        let auth = credential.auth.unwrap_or_default();

        let client = self.client.clone();
        let tx = self.tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let outcome = client.environment(&server, &auth).await;
            let _ = tx.send(NetEvent {
                generation,
                response: NetResponse::Environment(outcome),
            });
        });
    }

    fn spawn_validation(&mut self, secret: String) {
        self.validation_pending = true;
        let server = self.store.resolve().server.unwrap_or_default();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let outcome = client.validate_config(&server, &secret).await;
            let _ = tx.send(NetEvent {
                generation,
                response: NetResponse::ConfigValidation {
                    server,
                    secret,
                    outcome,
                },
            });
        });
    }

    pub fn handle_net(&mut self, event: NetEvent) {
        if event.generation != self.generation {
            tracing::debug!(
                stale = event.generation,
                current = self.generation,
                "dropping response for a torn-down mount"
            );
            return;
        }

        match event.response {
            NetResponse::Environment(outcome) => {
                self.state.bootstrap.apply(outcome);
                self.state.last_refresh = Some(Local::now());
            }
            NetResponse::ConfigValidation {
                server,
                secret,
                outcome,
            } => {
                self.validation_pending = false;
                match login::on_outcome(&outcome, &server) {
                    LoginEffect::EnterSettings => {
                        if let Err(err) =
                            self.store
                                .persist(CredentialField::Secret, &secret, Scope::Session)
                        {
                            // Session writes are in-memory only.
                            tracing::error!("unexpected session persist failure: {err}");
                        }
                        tracing::info!("settings secret accepted");
                        self.state.login = LoginFormState::default();
                        self.state.screen = Screen::Settings;
                    }
                    LoginEffect::Prompt(prompt) => {
                        self.state.modal = Some(ModalState {
                            prompt,
                            selected: 0,
                            retry_secret: Some(secret),
                        });
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);

        if self.state.modal.is_some() {
            self.handle_modal_key(action);
            return;
        }

        if action == ui::keymap::AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.screen.clone() {
            Screen::Home => self.handle_home_key(action),
            Screen::SettingsLogin => self.handle_login_key(action),
            Screen::Settings | Screen::Search(_) | Screen::Browse(_) => {
                if action == ui::keymap::AppAction::Cancel {
                    self.state.screen = Screen::Home;
                }
            }
        }
    }

    /// While a modal is open every key that is not selection movement or
    /// confirmation is swallowed; the flow stays blocked on a decision.
    fn handle_modal_key(&mut self, action: ui::keymap::AppAction) {
        use ui::keymap::AppAction;

        let Some(modal) = self.state.modal.as_mut() else {
            return;
        };
        match action {
            AppAction::NextField | AppAction::Down => {
                modal.selected = (modal.selected + 1) % modal.prompt.choices.len();
            }
            AppAction::Up => {
                let len = modal.prompt.choices.len();
                modal.selected = (modal.selected + len - 1) % len;
            }
            AppAction::Submit => {
                let decision = modal.selected_choice();
                self.decide(decision);
            }
            AppAction::Cancel => {
                if modal.prompt.choices.contains(&RecoveryDecision::Dismiss) {
                    self.decide(RecoveryDecision::Dismiss);
                }
            }
            _ => {}
        }
    }

    pub fn decide(&mut self, decision: RecoveryDecision) {
        let retry_secret = self
            .state
            .modal
            .take()
            .and_then(|modal| modal.retry_secret);

        match decision {
            RecoveryDecision::Dismiss => {}
            RecoveryDecision::Retry => {
                // One new request with the same candidate secret, per user
                // action.
                if let Some(secret) = retry_secret {
                    self.spawn_validation(secret);
                }
            }
            RecoveryDecision::Logout => self.logout(),
            RecoveryDecision::ReloadPage => self.reload(),
        }
    }

    /// The logout destination: abandon the session and re-mount.
    fn logout(&mut self) {
        tracing::info!("logging out");
        self.store.clear_session();
        self.invalidate_inflight();
        self.state.login = LoginFormState::default();
        self.state.screen = Screen::Home;
        self.mount();
    }

    /// The reload destination: re-run the current page from scratch.
    fn reload(&mut self) {
        tracing::info!("reloading");
        self.invalidate_inflight();
        self.state.login = LoginFormState::default();
        self.mount();
    }

    /// Tears down whatever requests the current mount has outstanding:
    /// their responses arrive with a stale generation and are dropped.
    fn invalidate_inflight(&mut self) {
        self.generation += 1;
        self.validation_pending = false;
    }

    fn handle_home_key(&mut self, action: ui::keymap::AppAction) {
        use ui::keymap::AppAction;

        // Render gate: until the environment is loaded nothing
        // account/category-dependent reacts to input.
        let Some(env) = self.state.bootstrap.environment() else {
            return;
        };
        let browse_items = browse_menu(env);

        match action {
            AppAction::NextField => {
                self.state.nav.focus = match self.state.nav.focus {
                    None | Some(NavFocus::Account) => Some(NavFocus::Search),
                    Some(NavFocus::Search) => Some(NavFocus::Browse),
                    Some(NavFocus::Browse) => Some(NavFocus::Account),
                };
            }
            AppAction::Cancel => {
                self.state.nav.focus = None;
            }
            AppAction::Input(ch) => {
                if self.state.nav.focus == Some(NavFocus::Search) {
                    self.state.nav.search.push(ch);
                }
            }
            AppAction::Backspace => {
                if self.state.nav.focus == Some(NavFocus::Search) {
                    self.state.nav.search.pop();
                }
            }
            AppAction::Up => match self.state.nav.focus {
                Some(NavFocus::Browse) => {
                    self.state.nav.browse_selected =
                        self.state.nav.browse_selected.saturating_sub(1);
                }
                Some(NavFocus::Account) => {
                    self.state.nav.account_selected =
                        self.state.nav.account_selected.saturating_sub(1);
                }
                _ => {}
            },
            AppAction::Down => match self.state.nav.focus {
                Some(NavFocus::Browse) => {
                    self.state.nav.browse_selected =
                        (self.state.nav.browse_selected + 1).min(browse_items.len() - 1);
                }
                Some(NavFocus::Account) => {
                    self.state.nav.account_selected =
                        (self.state.nav.account_selected + 1).min(ACCOUNT_MENU.len() - 1);
                }
                _ => {}
            },
            AppAction::Submit => match self.state.nav.focus {
                Some(NavFocus::Search) => {
                    let query = self.state.nav.search.trim().to_string();
                    if !query.is_empty() {
                        self.state.screen = Screen::Search(query);
                    }
                }
                Some(NavFocus::Browse) => {
                    if self.state.nav.browse_selected == 0 {
                        self.state.screen = Screen::Home;
                        self.state.nav.focus = None;
                    } else if let Some(name) = browse_items.get(self.state.nav.browse_selected) {
                        self.state.screen = Screen::Browse(name.clone());
                    }
                }
                Some(NavFocus::Account) => match ACCOUNT_MENU[self.state.nav.account_selected] {
                    "Settings" => {
                        self.state.login = LoginFormState::default();
                        self.state.screen = Screen::SettingsLogin;
                    }
                    _ => self.logout(),
                },
                None => {}
            },
            AppAction::Quit | AppAction::None => {}
        }
    }

    fn handle_login_key(&mut self, action: ui::keymap::AppAction) {
        use ui::keymap::AppAction;

        match action {
            AppAction::Input(ch) => {
                self.state.login.secret.push(ch);
            }
            AppAction::Backspace => {
                self.state.login.secret.pop();
            }
            AppAction::Submit => self.submit_login(),
            AppAction::Cancel => {
                // Inline errors are dismissible; a second escape leaves the
                // form. Leaving tears the flow down, so a validation still in
                // flight must not come back and reopen it.
                if self.state.login.error.take().is_none() {
                    self.invalidate_inflight();
                    self.state.screen = Screen::Home;
                }
            }
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        if self.validation_pending {
            return;
        }
        match login::submit(&self.state.login.secret) {
            SubmitAction::SecretRequired => {
                self.state.login.error = Some("Secret is required".to_string());
            }
            SubmitAction::Validate { secret } => {
                self.state.login.error = None;
                self.spawn_validation(secret);
            }
        }
    }
}
