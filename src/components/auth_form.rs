//! Sign-in / sign-up form view.
//!
//! DESIGN
//! ======
//! While submitting, only the submit button and the mode toggle are
//! disabled. Inputs stay editable, matching the page's original disablement
//! surface.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use crate::state::form::{Field, FormState, Mode};

pub const PRODUCT_TITLE: &str = "LAYRA";
pub const SENDING_LABEL: &str = "Sending";
pub const EMAIL_PLACEHOLDER: &str = "邮箱暂不校验正确性";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub field: Field,
    pub label: &'static str,
    pub kind: InputKind,
    pub value: String,
    pub autocomplete: &'static str,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub editable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub heading: &'static str,
    /// Inline error banner, persistent until the next submission.
    pub error: Option<String>,
    pub inputs: Vec<InputView>,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub toggle_prompt: &'static str,
    pub toggle_label: &'static str,
    pub toggle_disabled: bool,
}

impl FormView {
    #[must_use]
    pub fn from_state(form: &FormState) -> Self {
        let (heading, submit_label, toggle_prompt, toggle_label) = match form.mode {
            Mode::Login => ("登录", "Sign In", "Don't have an account?", "Sign Up"),
            Mode::Register => ("注册", "Sign Up", "Already have an account?", "Sign In"),
        };
        let busy = |label| if form.pending { SENDING_LABEL } else { label };

        Self {
            title: PRODUCT_TITLE,
            heading,
            error: form.error.clone().filter(|e| !e.is_empty()),
            inputs: form.required_fields().iter().map(|&field| input(form, field)).collect(),
            submit_label: busy(submit_label),
            submit_disabled: form.pending,
            toggle_prompt,
            toggle_label: busy(toggle_label),
            toggle_disabled: form.pending,
        }
    }

    /// Plain-text rendering, one entry per terminal line. Password values are masked.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.to_owned(), self.heading.to_owned()];
        if let Some(error) = &self.error {
            lines.extend(error.split('\n').map(|line| format!("! {line}")));
        }
        for input in &self.inputs {
            let value = match input.kind {
                InputKind::Password => "*".repeat(input.value.chars().count()),
                InputKind::Text => input.value.clone(),
            };
            let hint = match (input.placeholder, value.is_empty()) {
                (Some(placeholder), true) => format!(" ({placeholder})"),
                _ => String::new(),
            };
            lines.push(format!("{}: {value}{hint}", input.label));
        }
        let disabled = |flag: bool| if flag { " (disabled)" } else { "" };
        lines.push(format!("[{}]{}", self.submit_label, disabled(self.submit_disabled)));
        lines.push(format!("{} [{}]{}", self.toggle_prompt, self.toggle_label, disabled(self.toggle_disabled)));
        lines
    }
}

fn input(form: &FormState, field: Field) -> InputView {
    let (label, kind, autocomplete, placeholder) = match field {
        Field::Name => ("Name", InputKind::Text, "name", None),
        Field::Email => ("Email address", InputKind::Text, "email", Some(EMAIL_PLACEHOLDER)),
        Field::Password => ("Password", InputKind::Password, "current-password", None),
    };
    InputView {
        field,
        label,
        kind,
        value: form.field(field).to_owned(),
        autocomplete,
        placeholder,
        required: true,
        editable: true,
    }
}
