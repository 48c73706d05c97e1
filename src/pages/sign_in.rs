//! Sign-in / sign-up page controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the form state and drives one auth call per submission. Success
//! redirects to the `returnUrl` query parameter (or `/`); failure is
//! normalized into the inline error and an error banner. Rendering lives in
//! `components`, which only reads controller state.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::auth::normalize::normalize_failure;
use crate::auth::{AuthFailure, AuthService};
use crate::state::form::{Field, FormState, Mode, SubmitError, SubmitRequest};
use crate::state::notification::{NotificationKind, Notifier};

pub const DEFAULT_DESTINATION: &str = "/";
pub const RETURN_URL_PARAM: &str = "returnUrl";

pub const LOGIN_SUCCESS: &str = "登录成功！";
pub const REGISTER_SUCCESS: &str = "注册成功！";
pub const LOGIN_FAILURE: &str = "登录失败！";
pub const REGISTER_FAILURE: &str = "注册失败！";

/// Performs redirects after a successful submission.
pub trait Navigator {
    fn navigate(&mut self, destination: &str);
}

/// How a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service accepted the credentials; `destination` was navigated to.
    Succeeded { destination: String },
    /// The service rejected the credentials; `message` is the normalized text.
    Failed { message: String },
}

/// Read the return destination from a raw query string (leading `?` optional).
///
/// Missing or empty `returnUrl` yields `None`.
#[must_use]
pub fn return_url_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == RETURN_URL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Returns the form to idle when dropped, including when the submit future
/// is cancelled mid-request.
struct SettleOnDrop<'a> {
    form: &'a mut FormState,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        self.form.settle();
    }
}

pub struct AuthFormController<S, N> {
    form: FormState,
    service: S,
    navigator: N,
    notifier: Notifier,
    return_url: Option<String>,
}

impl<S, N> AuthFormController<S, N>
where
    S: AuthService,
    N: Navigator,
{
    #[must_use]
    pub fn new(service: S, navigator: N, notifier: Notifier, return_url: Option<String>) -> Self {
        Self { form: FormState::default(), service, navigator, notifier, return_url }
    }

    /// Build from the page's query string.
    #[must_use]
    pub fn from_query(service: S, navigator: N, notifier: Notifier, query: &str) -> Self {
        Self::new(service, navigator, notifier, return_url_from_query(query))
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Where a successful submission redirects to.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.return_url.as_deref().unwrap_or(DEFAULT_DESTINATION)
    }

    /// Flip login/register. Returns `false` while submitting.
    pub fn toggle_mode(&mut self) -> bool {
        self.form.toggle_mode()
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Submit the form and wait for the auth service to settle.
    ///
    /// Every accepted submission ends idle with the credential fields cleared,
    /// also when this future is dropped before the service call settles.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submission is refused up front (a
    /// required field is empty or another submission is pending). Service
    /// failures are not errors here; they settle as [`SubmitOutcome::Failed`].
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let request = self.form.begin_submit()?;
        let mode = request.mode();
        let span = info_span!("submit", attempt = %Uuid::new_v4(), ?mode);

        let service = &self.service;
        let result = {
            let _settle = SettleOnDrop { form: &mut self.form };
            async {
                info!("auth request started");
                match &request {
                    SubmitRequest::Login { name, password } => service.login(name, password).await,
                    SubmitRequest::Register { name, email, password } => {
                        service.register(name, email, password).await
                    }
                }
            }
            .instrument(span.clone())
            .await
        };

        Ok(span.in_scope(|| self.resolve(mode, result)))
    }

    fn resolve(&mut self, mode: Mode, result: Result<(), AuthFailure>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                let message = match mode {
                    Mode::Login => LOGIN_SUCCESS,
                    Mode::Register => REGISTER_SUCCESS,
                };
                self.notifier.show(message, NotificationKind::Success);
                if mode == Mode::Register {
                    self.form.mode = Mode::Login;
                }
                let destination = self.destination().to_owned();
                info!(%destination, "auth request succeeded");
                self.navigator.navigate(&destination);
                SubmitOutcome::Succeeded { destination }
            }
            Err(failure) => {
                warn!(error = %failure, "auth request failed");
                let message = normalize_failure(&failure);
                self.form.fail(message.clone());
                let banner = match mode {
                    Mode::Login => LOGIN_FAILURE.to_owned(),
                    Mode::Register => format!("{REGISTER_FAILURE}\n{message}"),
                };
                self.notifier.show(banner, NotificationKind::Error);
                SubmitOutcome::Failed { message }
            }
        }
    }
}
