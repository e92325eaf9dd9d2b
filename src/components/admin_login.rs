use crate::config::AppConfig;
use crate::database;
use crate::notifications::Notifications;
use crate::routes::Screen;
use crate::services::{session_service, Session};
use dioxus::prelude::*;
use vipix_auth::{AuthLabels, AuthOutcome, LoginComponent, LoginMode};

#[component]
pub fn AdminLoginScreen(on_navigate: EventHandler<Screen>) -> Element {
    let config = use_context::<AppConfig>();
    let mut session = use_context::<Signal<Session>>();
    let mut notifications = use_context::<Signal<Notifications>>();

    let on_success = move |outcome: AuthOutcome| {
        let AuthOutcome::Admin(admin) = outcome else {
            return;
        };
        let stored = database::init_database()
            .and_then(|conn| session_service::save_admin_session(&conn, &admin));
        if let Err(e) = stored {
            log::error!("Could not store admin session: {}", e);
            notifications.write().error("Session not saved", e.user_message());
        }
        notifications
            .write()
            .success("Login successful", format!("Welcome, {}", admin.user.username));
        session.write().admin = Some(admin);
        on_navigate.call(Screen::Admin);
    };

    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px; background: #111827;",
            div { style: "width: 100%; max-width: 440px; background: #fff; border-radius: 12px; padding: 8px;",
                LoginComponent {
                    base_url: config.api_base_url.clone(),
                    mode: LoginMode::Admin,
                    labels: AuthLabels {
                        title_admin: "VIPix Admin".to_string(),
                        ..AuthLabels::default()
                    },
                    on_success,
                }
            }
        }
    }
}
