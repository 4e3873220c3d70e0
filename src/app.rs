//app.rs
use chrono::Local;
use eframe::egui;
use eframe::{App, Frame};
use tracing::{error, info, warn};

use crate::api::{ApiClient, User};
use crate::home::{HomeAction, HomeView};
use crate::landing::LandingView;
use crate::session::{Session, SessionStore};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Home,
}

pub struct FitTrackApp {
    screen: Screen,
    store: SessionStore,
    session: Option<Session>,
    landing: LandingView,
    home: HomeView,
    api: ApiClient,
}

impl FitTrackApp {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        let today = Local::now().date_naive();
        let session = store.load();
        let screen = if session.is_some() {
            info!("resuming existing session");
            Screen::Home
        } else {
            Screen::Landing
        };
        Self {
            screen,
            store,
            session,
            landing: LandingView::new(api.clone()),
            home: HomeView::new(today),
            api,
        }
    }

    fn log_in(&mut self, user: User) {
        let today = Local::now().date_naive();
        match self.store.establish(&user) {
            Ok(session) => {
                self.session = Some(session);
                // Fresh domain state per sign-in; nothing carries over.
                self.home = HomeView::new(today);
                self.screen = Screen::Home;
            }
            Err(e) => error!("failed to persist session: {e}"),
        }
    }

    fn log_out(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to clear session file: {e}");
        }
        info!("logged out");
        self.session = None;
        self.landing = LandingView::new(self.api.clone());
        self.screen = Screen::Landing;
    }
}

impl App for FitTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Route guard, both directions.
        match self.screen {
            Screen::Home if self.session.is_none() => self.screen = Screen::Landing,
            Screen::Landing if self.session.is_some() => self.screen = Screen::Home,
            _ => {}
        }

        match self.screen {
            Screen::Landing => {
                if let Some(user) = self.landing.show(ctx) {
                    self.log_in(user);
                }
            }
            Screen::Home => {
                let today = Local::now().date_naive();
                let action = match &self.session {
                    Some(session) => self.home.show(ctx, session, today),
                    None => None,
                };
                if let Some(HomeAction::Logout) = action {
                    self.log_out();
                }
            }
        }
    }
}
