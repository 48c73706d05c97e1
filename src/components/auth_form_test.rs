use super::*;

fn fields(view: &FormView) -> Vec<Field> {
    view.inputs.iter().map(|input| input.field).collect()
}

#[test]
fn login_view_hides_email() {
    let view = FormView::from_state(&FormState::new(Mode::Login));
    assert_eq!(view.title, "LAYRA");
    assert_eq!(view.heading, "登录");
    assert_eq!(fields(&view), vec![Field::Name, Field::Password]);
    assert_eq!(view.submit_label, "Sign In");
    assert_eq!(view.toggle_prompt, "Don't have an account?");
    assert_eq!(view.toggle_label, "Sign Up");
    assert!(!view.submit_disabled);
    assert!(!view.toggle_disabled);
    assert_eq!(view.error, None);
}

#[test]
fn register_view_shows_email_with_placeholder() {
    let view = FormView::from_state(&FormState::new(Mode::Register));
    assert_eq!(view.heading, "注册");
    assert_eq!(fields(&view), vec![Field::Name, Field::Email, Field::Password]);
    assert_eq!(view.inputs[1].placeholder, Some(EMAIL_PLACEHOLDER));
    assert_eq!(view.submit_label, "Sign Up");
    assert_eq!(view.toggle_label, "Sign In");
}

#[test]
fn pending_disables_controls_but_not_inputs() {
    let mut form = FormState::new(Mode::Login);
    form.name = "alice".into();
    form.password = "secret".into();
    form.begin_submit().unwrap();

    let view = FormView::from_state(&form);
    assert!(view.submit_disabled);
    assert!(view.toggle_disabled);
    assert_eq!(view.submit_label, SENDING_LABEL);
    assert_eq!(view.toggle_label, SENDING_LABEL);
    assert!(view.inputs.iter().all(|input| input.editable && input.required));
}

#[test]
fn render_lines_masks_password_and_splits_error() {
    let mut form = FormState::new(Mode::Register);
    form.name = "alice".into();
    form.password = "secret".into();
    form.error = Some("用户名: taken\n密码: too short".into());

    let lines = FormView::from_state(&form).render_lines();
    assert_eq!(
        lines,
        vec![
            "LAYRA",
            "注册",
            "! 用户名: taken",
            "! 密码: too short",
            "Name: alice",
            "Email address:  (邮箱暂不校验正确性)",
            "Password: ******",
            "[Sign Up]",
            "Already have an account? [Sign In]",
        ]
    );
}

#[test]
fn empty_error_is_not_rendered() {
    let mut form = FormState::default();
    form.error = Some(String::new());
    assert_eq!(FormView::from_state(&form).error, None);
}
