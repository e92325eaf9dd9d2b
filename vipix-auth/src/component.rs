use crate::models::{
    AdminLoginRequest, AuthOutcome, LoginMode, LoginRequest, LoginState, RegisterRequest,
};
use crate::service::{AuthError, AuthService};
use dioxus::prelude::*;

/// Props for the LoginComponent
#[derive(Props, Clone, PartialEq)]
pub struct LoginProps {
    /// Backend base URL
    pub base_url: String,
    /// Form shown first. Account and Register can be toggled by the user.
    #[props(default)]
    pub mode: LoginMode,
    /// Callback when authentication succeeds
    pub on_success: EventHandler<AuthOutcome>,
    /// Callback when authentication fails
    #[props(default)]
    pub on_error: Option<EventHandler<AuthError>>,
    /// Custom labels for UI elements (optional)
    #[props(default)]
    pub labels: Option<AuthLabels>,
}

/// Custom labels for the login UI
#[derive(Clone, PartialEq)]
pub struct AuthLabels {
    pub title_login: String,
    pub title_register: String,
    pub title_admin: String,
    pub subtitle_login: String,
    pub subtitle_register: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub submit_login: String,
    pub submit_register: String,
    pub submitting: String,
    pub switch_to_register: String,
    pub switch_to_login: String,
    pub error_title: String,
}

impl Default for AuthLabels {
    fn default() -> Self {
        Self {
            title_login: "Welcome Back".to_string(),
            title_register: "Join VIPix".to_string(),
            title_admin: "Admin Login".to_string(),
            subtitle_login: "Sign in to your account to manage your events".to_string(),
            subtitle_register: "Create your account to start sharing event photos".to_string(),
            username: "Username".to_string(),
            email: "Email".to_string(),
            password: "Password".to_string(),
            submit_login: "Sign In".to_string(),
            submit_register: "Create Account".to_string(),
            submitting: "Please wait...".to_string(),
            switch_to_register: "Don't have an account? Sign up".to_string(),
            switch_to_login: "Already have an account? Sign in".to_string(),
            error_title: "Authentication failed".to_string(),
        }
    }
}

/// Checks the fields a mode needs before any request is sent
pub fn validate_fields(
    mode: LoginMode,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), String> {
    if matches!(mode, LoginMode::Register | LoginMode::Admin) && username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if matches!(mode, LoginMode::Account | LoginMode::Register) {
        let email = email.trim();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        if !email.contains('@') {
            return Err("Please enter a valid email address".to_string());
        }
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

/// Login/registration form
///
/// Admin mode shows username and password only and yields an
/// [`AuthOutcome::Admin`] session. Nothing is stored by the component.
#[component]
pub fn LoginComponent(props: LoginProps) -> Element {
    let mut mode = use_signal(|| props.mode);
    let mut login_state = use_signal(LoginState::default);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);

    let labels = props.labels.clone().unwrap_or_default();
    let on_success = props.on_success;
    let on_error = props.on_error;

    let submit = {
        let base_url = props.base_url.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let current_mode = mode();
            let (user, mail, pass) = (username(), email(), password());

            if let Err(msg) = validate_fields(current_mode, &user, &mail, &pass) {
                login_state.set(LoginState::Error(msg));
                return;
            }

            login_state.set(LoginState::Submitting);
            let service = AuthService::new(base_url.clone());

            spawn(async move {
                let result = match current_mode {
                    LoginMode::Account => service
                        .login(&LoginRequest {
                            email: mail.trim().to_string(),
                            password: pass,
                        })
                        .await
                        .map(AuthOutcome::SignedIn),
                    LoginMode::Register => service
                        .register(&RegisterRequest {
                            username: user.trim().to_string(),
                            email: mail.trim().to_string(),
                            password: pass,
                            first_name: None,
                            last_name: None,
                        })
                        .await
                        .map(AuthOutcome::Registered),
                    LoginMode::Admin => service
                        .admin_login(&AdminLoginRequest {
                            username: user.trim().to_string(),
                            password: pass,
                        })
                        .await
                        .map(AuthOutcome::Admin),
                };

                match result {
                    Ok(outcome) => {
                        login_state.set(LoginState::Success(outcome.clone()));
                        on_success.call(outcome);
                    }
                    Err(e) => {
                        log::error!("Authentication failed: {}", e);
                        login_state.set(LoginState::Error(e.to_string()));
                        if let Some(handler) = on_error {
                            handler.call(e);
                        }
                    }
                }
            });
        }
    };

    let current_mode = mode();
    let (title, subtitle) = match current_mode {
        LoginMode::Account => (labels.title_login.clone(), labels.subtitle_login.clone()),
        LoginMode::Register => (
            labels.title_register.clone(),
            labels.subtitle_register.clone(),
        ),
        LoginMode::Admin => (labels.title_admin.clone(), String::new()),
    };
    let submitting = login_state() == LoginState::Submitting;
    let submit_label = if submitting {
        labels.submitting.clone()
    } else if current_mode == LoginMode::Register {
        labels.submit_register.clone()
    } else {
        labels.submit_login.clone()
    };
    let needs_username = current_mode != LoginMode::Account;
    let needs_email = current_mode != LoginMode::Admin;
    let password_type = if show_password() { "text" } else { "password" };

    rsx! {
        div { class: "card", style: "max-width: 420px; margin: 0 auto; padding: 24px;",
            h2 { style: "margin: 0 0 8px 0; font-size: 26px; text-align: center;", "{title}" }
            if !subtitle.is_empty() {
                p { style: "margin: 0 0 20px 0; color: #666; text-align: center;", "{subtitle}" }
            }

            form { onsubmit: submit, style: "display: flex; flex-direction: column; gap: 14px;",
                if needs_username {
                    label { style: "font-size: 14px; font-weight: 500;",
                        "{labels.username}"
                        input {
                            r#type: "text",
                            value: "{username}",
                            style: "width: 100%; padding: 10px; margin-top: 4px;",
                            oninput: move |e| username.set(e.value()),
                        }
                    }
                }
                if needs_email {
                    label { style: "font-size: 14px; font-weight: 500;",
                        "{labels.email}"
                        input {
                            r#type: "email",
                            value: "{email}",
                            style: "width: 100%; padding: 10px; margin-top: 4px;",
                            oninput: move |e| email.set(e.value()),
                        }
                    }
                }
                label { style: "font-size: 14px; font-weight: 500;",
                    "{labels.password}"
                    div { style: "display: flex; gap: 8px; margin-top: 4px;",
                        input {
                            r#type: "{password_type}",
                            value: "{password}",
                            style: "flex: 1; padding: 10px;",
                            oninput: move |e| password.set(e.value()),
                        }
                        button {
                            r#type: "button",
                            class: "btn-secondary",
                            onclick: move |_| show_password.set(!show_password()),
                            if show_password() { "🙈" } else { "👁" }
                        }
                    }
                }

                if let LoginState::Error(error) = login_state() {
                    div { style: "padding: 12px; background: #f8d7da; border-radius: 4px; color: #721c24;",
                        p { style: "margin: 0 0 4px 0; font-weight: 600;", "{labels.error_title}" }
                        p { style: "margin: 0; font-size: 14px;", "{error}" }
                    }
                }

                button {
                    r#type: "submit",
                    class: "btn-primary",
                    style: "padding: 12px;",
                    disabled: submitting,
                    "{submit_label}"
                }
            }

            if current_mode != LoginMode::Admin {
                button {
                    class: "btn-link",
                    style: "margin-top: 16px; width: 100%; background: none; border: none; color: #2563eb;",
                    onclick: move |_| {
                        login_state.set(LoginState::Idle);
                        mode.set(if mode() == LoginMode::Account {
                            LoginMode::Register
                        } else {
                            LoginMode::Account
                        });
                    },
                    if current_mode == LoginMode::Account {
                        "{labels.switch_to_register}"
                    } else {
                        "{labels.switch_to_login}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_needs_username_not_email() {
        assert!(validate_fields(LoginMode::Admin, "root", "", "pw").is_ok());
        assert_eq!(
            validate_fields(LoginMode::Admin, " ", "", "pw"),
            Err("Username is required".to_string())
        );
    }

    #[test]
    fn test_account_login_checks_email() {
        assert_eq!(
            validate_fields(LoginMode::Account, "", "nobody", "pw"),
            Err("Please enter a valid email address".to_string())
        );
        assert_eq!(
            validate_fields(LoginMode::Account, "", "a@b.io", ""),
            Err("Password is required".to_string())
        );
        assert!(validate_fields(LoginMode::Account, "", "a@b.io", "pw").is_ok());
    }
}
