//landing.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use eframe::egui::{self, Align2, Color32, Context, RichText};
use regex::Regex;
use tracing::info;

use crate::api::{ApiClient, ApiError, Credentials, SignupData, User};
use crate::models::ValidationError;

fn looks_like_email(value: &str) -> bool {
    static EMAIL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
    EMAIL.is_match(value)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthModal {
    Login,
    Signup,
}

#[derive(Default)]
struct LoginForm {
    username: String,
    password: String,
}

impl LoginForm {
    fn validate(&self) -> Result<Credentials, ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Default)]
struct SignupForm {
    username: String,
    email: String,
    password: String,
}

impl SignupForm {
    fn validate(&self) -> Result<SignupData, ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if self.username.chars().count() < 3 {
            return Err(ValidationError::UsernameTooShort);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !looks_like_email(&self.email) {
            return Err(ValidationError::EmailInvalid);
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(SignupData {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// An auth request running on a worker thread. `token` ties the response
/// to the submission that issued it.
struct PendingAuth {
    rx: Receiver<Result<User, ApiError>>,
    token: u64,
}

/// Public marketing screen with the login and signup dialogs.
pub struct LandingView {
    api: ApiClient,
    active_modal: Option<AuthModal>,
    login: LoginForm,
    signup: SignupForm,
    error: Option<String>,
    pending: Option<PendingAuth>,
    latest_token: u64,
}

impl LandingView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            active_modal: None,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            error: None,
            pending: None,
            latest_token: 0,
        }
    }

    /// Render one frame. Returns the authenticated user once a login or
    /// signup request has come back successfully.
    pub fn show(&mut self, ctx: &Context) -> Option<User> {
        let authenticated = self.poll();
        if self.pending.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("landing_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("FitTrack").heading().strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign Up").clicked() {
                        self.open_modal(AuthModal::Signup);
                    }
                    if ui.button("Login").clicked() {
                        self.open_modal(AuthModal::Login);
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                ui.add_space(60.0);
                ui.label(
                    RichText::new("Transform Your Fitness Journey")
                        .heading()
                        .size(40.0)
                        .strong(),
                );
                ui.add_space(12.0);
                ui.label(
                    "Track your workouts, monitor your progress, and achieve your \
                     fitness goals with our comprehensive fitness tracking platform.",
                );
                ui.add_space(20.0);
                if ui
                    .button(RichText::new("Start Your Journey Today").size(20.0))
                    .clicked()
                {
                    self.open_modal(AuthModal::Signup);
                }
                ui.add_space(50.0);
                ui.separator();
                ui.add_space(20.0);
                ui.columns(3, |columns| {
                    let features = [
                        (
                            "Progress Tracking",
                            "Monitor your fitness journey with detailed weekly summaries.",
                        ),
                        (
                            "Workout History",
                            "Log every session with duration, calories and date.",
                        ),
                        (
                            "Goal Setting",
                            "Set targets, watch them fill up, and mark them done.",
                        ),
                    ];
                    for (column, (title, blurb)) in columns.iter_mut().zip(features) {
                        column.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                            ui.label(RichText::new(title).strong().size(20.0));
                            ui.add_space(4.0);
                            ui.label(blurb);
                        });
                    }
                });
            });
        });

        match self.active_modal {
            Some(AuthModal::Login) => self.show_login_modal(ctx),
            Some(AuthModal::Signup) => self.show_signup_modal(ctx),
            None => {}
        }

        authenticated
    }

    fn open_modal(&mut self, modal: AuthModal) {
        self.active_modal = Some(modal);
        self.error = None;
    }

    fn close_modal(&mut self) {
        self.abandon_pending();
        self.active_modal = None;
        self.login = LoginForm::default();
        self.signup = SignupForm::default();
        self.error = None;
    }

    /// Drop the in-flight request, if any, and move the token forward so
    /// its response can no longer be mistaken for a current one.
    fn abandon_pending(&mut self) {
        if self.pending.take().is_some() {
            self.latest_token += 1;
        }
    }

    fn loading(&self) -> bool {
        self.pending.is_some()
    }

    fn submit_login(&mut self) {
        match self.login.validate() {
            Ok(credentials) => self.spawn(move |api| api.login(&credentials)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn submit_signup(&mut self) {
        match self.signup.validate() {
            Ok(data) => self.spawn(move |api| api.signup(&data)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(ApiClient) -> Result<User, ApiError> + Send + 'static,
    {
        self.error = None;
        self.latest_token += 1;
        let token = self.latest_token;
        let (tx, rx) = mpsc::channel();
        let api = self.api.clone();
        thread::spawn(move || {
            let _ = tx.send(job(api));
        });
        self.pending = Some(PendingAuth { rx, token });
    }

    /// Check the worker channel. A response stamped with an outdated
    /// token belongs to an abandoned attempt and is dropped on the floor.
    fn poll(&mut self) -> Option<User> {
        let pending = self.pending.take()?;
        match pending.rx.try_recv() {
            Ok(outcome) => {
                if pending.token != self.latest_token {
                    return None;
                }
                match outcome {
                    Ok(user) => {
                        info!("authenticated as {}", user.username);
                        self.close_modal();
                        Some(user)
                    }
                    Err(err) => {
                        self.error = Some(err.to_string());
                        None
                    }
                }
            }
            Err(TryRecvError::Empty) => {
                self.pending = Some(pending);
                None
            }
            Err(TryRecvError::Disconnected) => {
                self.error =
                    Some("The request was interrupted before a response arrived".to_string());
                None
            }
        }
    }

    fn show_login_modal(&mut self, ctx: &Context) {
        let mut open = true;
        let mut submitted = false;
        let mut switch = false;
        egui::Window::new("Login to Your Account")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let loading = self.loading();
                if let Some(error) = &self.error {
                    ui.colored_label(Color32::LIGHT_RED, error);
                    ui.add_space(6.0);
                }
                ui.add_enabled_ui(!loading, |ui| {
                    egui::Grid::new("login_form")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Username");
                            ui.text_edit_singleline(&mut self.login.username);
                            ui.end_row();
                            ui.label("Password");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.login.password)
                                    .password(true),
                            );
                            ui.end_row();
                        });
                });
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let label = if loading { "Logging in..." } else { "Login" };
                    if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                        submitted = true;
                    }
                    if loading {
                        ui.spinner();
                    }
                });
                ui.add_space(6.0);
                ui.add_enabled_ui(!loading, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Don't have an account?");
                        if ui.link("Sign up here").clicked() {
                            switch = true;
                        }
                    });
                });
            });

        if submitted {
            self.submit_login();
        }
        if switch {
            self.open_modal(AuthModal::Signup);
        }
        if !open {
            self.close_modal();
        }
    }

    fn show_signup_modal(&mut self, ctx: &Context) {
        let mut open = true;
        let mut submitted = false;
        let mut switch = false;
        egui::Window::new("Create Your Account")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let loading = self.loading();
                if let Some(error) = &self.error {
                    ui.colored_label(Color32::LIGHT_RED, error);
                    ui.add_space(6.0);
                }
                ui.add_enabled_ui(!loading, |ui| {
                    egui::Grid::new("signup_form")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Username");
                            ui.text_edit_singleline(&mut self.signup.username);
                            ui.end_row();
                            ui.label("Email");
                            ui.text_edit_singleline(&mut self.signup.email);
                            ui.end_row();
                            ui.label("Password");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.signup.password)
                                    .password(true),
                            );
                            ui.end_row();
                        });
                });
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let label = if loading {
                        "Creating Account..."
                    } else {
                        "Sign Up"
                    };
                    if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                        submitted = true;
                    }
                    if loading {
                        ui.spinner();
                    }
                });
                ui.add_space(6.0);
                ui.add_enabled_ui(!loading, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Already have an account?");
                        if ui.link("Login here").clicked() {
                            switch = true;
                        }
                    });
                });
            });

        if submitted {
            self.submit_signup();
        }
        if switch {
            self.open_modal(AuthModal::Login);
        }
        if !open {
            self.close_modal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> LandingView {
        LandingView::new(ApiClient::new("http://localhost:9").unwrap())
    }

    fn valid_signup() -> SignupForm {
        SignupForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn valid_signup_draft_passes() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn each_signup_rule_fails_with_its_own_message() {
        let mut form = valid_signup();
        form.username = String::new();
        assert_eq!(form.validate(), Err(ValidationError::UsernameRequired));

        let mut form = valid_signup();
        form.username = "ab".to_string();
        assert_eq!(form.validate(), Err(ValidationError::UsernameTooShort));

        let mut form = valid_signup();
        form.email = String::new();
        assert_eq!(form.validate(), Err(ValidationError::EmailRequired));

        let mut form = valid_signup();
        form.email = "not-an-email".to_string();
        assert_eq!(form.validate(), Err(ValidationError::EmailInvalid));

        let mut form = valid_signup();
        form.password = String::new();
        assert_eq!(form.validate(), Err(ValidationError::PasswordRequired));

        let mut form = valid_signup();
        form.password = "short".to_string();
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: String::new(),
            password: "pw".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::UsernameRequired));

        let form = LoginForm {
            username: "alice".to_string(),
            password: "   ".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordRequired));
    }

    #[test]
    fn failed_validation_never_spawns_a_request() {
        let mut view = view();
        view.submit_login();
        assert!(view.pending.is_none());
        assert_eq!(
            view.error,
            Some(ValidationError::UsernameRequired.to_string())
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = view();
        let (tx, rx) = mpsc::channel();
        view.pending = Some(PendingAuth { rx, token: 1 });
        view.latest_token = 2;
        tx.send(Ok(User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }))
        .unwrap();

        assert!(view.poll().is_none());
        assert!(view.pending.is_none());
        assert!(view.error.is_none());
    }

    #[test]
    fn current_response_is_accepted() {
        let mut view = view();
        let (tx, rx) = mpsc::channel();
        view.pending = Some(PendingAuth { rx, token: 1 });
        view.latest_token = 1;
        tx.send(Ok(User {
            id: 7,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
        }))
        .unwrap();

        let user = view.poll().unwrap();
        assert_eq!(user.id, 7);
        assert!(view.pending.is_none());
    }

    #[test]
    fn gateway_error_surfaces_in_the_form() {
        let mut view = view();
        let (tx, rx) = mpsc::channel();
        view.pending = Some(PendingAuth { rx, token: 1 });
        view.latest_token = 1;
        tx.send(Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        )))
        .unwrap();

        assert!(view.poll().is_none());
        assert_eq!(
            view.error,
            Some("Invalid username or password".to_string())
        );
    }

    #[test]
    fn email_pattern_requires_at_sign_and_dot() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@sub.domain.org"));
        assert!(!looks_like_email("missing-at.com"));
        assert!(!looks_like_email("no-dot@domain"));
    }
}
