use crate::config::AppConfig;
use crate::database;
use crate::notifications::Notifications;
use crate::routes::Screen;
use crate::services::{session_service, Session};
use dioxus::prelude::*;
use vipix_auth::{AuthOutcome, AuthUser, LoginComponent, LoginMode};

/// Stores the signed-in organizer locally and in the session context
pub fn remember_user(user: &AuthUser, mut session: Signal<Session>) {
    let stored = database::init_database()
        .and_then(|conn| session_service::save_user(&conn, user));
    if let Err(e) = stored {
        log::error!("Could not store session for user {}: {}", user.id, e);
    }
    session.write().user = Some(user.clone());
}

#[component]
pub fn LoginScreen(on_navigate: EventHandler<Screen>) -> Element {
    let config = use_context::<AppConfig>();
    let session = use_context::<Signal<Session>>();
    let mut notifications = use_context::<Signal<Notifications>>();

    let on_success = move |outcome: AuthOutcome| {
        let (user, title) = match outcome {
            AuthOutcome::SignedIn(user) => (user, "Welcome back!"),
            AuthOutcome::Registered(user) => (user, "Account created successfully!"),
            AuthOutcome::Admin(_) => return,
        };
        remember_user(&user, session);
        notifications
            .write()
            .success(title, format!("Signed in as {}", user.display_name()));
        on_navigate.call(Screen::Dashboard);
    };

    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px; background: #f9fafb;",
            div { style: "width: 100%; max-width: 440px;",
                button {
                    class: "btn-link",
                    style: "background: none; border: none; color: #6b7280; margin-bottom: 12px; cursor: pointer;",
                    onclick: move |_| on_navigate.call(Screen::Landing),
                    "← Back"
                }
                LoginComponent {
                    base_url: config.api_base_url.clone(),
                    mode: LoginMode::Account,
                    on_success,
                }
            }
        }
    }
}
