//! Sign-in / sign-up form state and its submission lifecycle.
//!
//! DESIGN
//! ======
//! Two lifecycle states: idle (`pending == false`) and submitting. A submit
//! snapshots the credentials and enters submitting; settlement always clears
//! the credential fields and returns to idle, whatever the outcome. Text
//! fields stay editable while submitting; only the submit and mode-toggle
//! controls are disabled.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

/// Which operation the form performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Login,
    Register,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Editable text inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Why a submission was refused before reaching the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadyPending,
    #[error("{} is required", .0.as_str())]
    MissingField(Field),
}

/// Credentials captured at submit time.
#[derive(Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Login { name: String, password: String },
    Register { name: String, email: String, password: String },
}

impl SubmitRequest {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Login { .. } => Mode::Login,
            Self::Register { .. } => Mode::Register,
        }
    }
}

impl std::fmt::Debug for SubmitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login { name, .. } => f
                .debug_struct("Login")
                .field("name", name)
                .field("password", &"<redacted>")
                .finish(),
            Self::Register { name, email, .. } => f
                .debug_struct("Register")
                .field("name", name)
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Form fields plus submission status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: Mode,
    pub name: String,
    /// Only submitted in `Mode::Register`.
    pub email: String,
    pub password: String,
    pub pending: bool,
    /// Normalized text of the most recent failure. Persists until the next submit.
    pub error: Option<String>,
}

impl FormState {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Flip between login and registration. Entered values are kept.
    ///
    /// Returns `false` (and does nothing) while a submission is pending.
    pub fn toggle_mode(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.mode = self.mode.toggled();
        true
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }

    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    /// Required inputs for the current mode, in display order.
    #[must_use]
    pub fn required_fields(&self) -> &'static [Field] {
        match self.mode {
            Mode::Login => &[Field::Name, Field::Password],
            Mode::Register => &[Field::Name, Field::Email, Field::Password],
        }
    }

    /// Enter the submitting state and snapshot the credentials.
    ///
    /// # Errors
    ///
    /// Refuses without touching any state when a submission is already
    /// pending or a required field is empty.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitError> {
        if self.pending {
            return Err(SubmitError::AlreadyPending);
        }
        if let Some(field) = self.required_fields().iter().copied().find(|f| self.field(*f).is_empty()) {
            return Err(SubmitError::MissingField(field));
        }

        self.pending = true;
        self.error = None;

        let request = match self.mode {
            Mode::Login => SubmitRequest::Login { name: self.name.clone(), password: self.password.clone() },
            Mode::Register => SubmitRequest::Register {
                name: self.name.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            },
        };
        Ok(request)
    }

    /// Record a failed attempt's normalized message.
    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Leave the submitting state. Runs after every attempt.
    pub fn settle(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.pending = false;
    }
}
