use super::camera::CaptureView;
use crate::forms::AccessCheck;
use crate::models::EventAccess;
use crate::routes::Screen;
use crate::services::{event_service, ApiClient};
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
enum Lookup {
    Pending,
    Ready(EventAccess),
    Refused(String),
}

/// `/camera/:code`: capture for the event behind a login code
#[component]
pub fn EventCameraScreen(code: String, on_navigate: EventHandler<Screen>) -> Element {
    let client = use_context::<ApiClient>();
    let mut lookup = use_signal(|| Lookup::Pending);

    use_effect(use_reactive!(|(code,)| {
        let client = client.clone();
        lookup.set(Lookup::Pending);
        spawn(async move {
            let reply = event_service::camera_access(&client, &code).await;
            let next = match reply {
                Ok(access) if access.access_granted && access.event_id.is_some() => {
                    Lookup::Ready(access)
                }
                other => match AccessCheck::from_reply(&code, other) {
                    AccessCheck::Denied(msg) | AccessCheck::Failed(msg) => Lookup::Refused(msg),
                    AccessCheck::Granted { .. } => {
                        Lookup::Refused("Event not found. Please check your code.".to_string())
                    }
                },
            };
            lookup.set(next);
        });
    }));

    match lookup() {
        Lookup::Pending => rsx! {
            div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center;",
                p { style: "color: #6b7280;", "Accessing event..." }
            }
        },
        Lookup::Refused(message) => rsx! {
            div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px;",
                div { class: "card", style: "max-width: 400px; padding: 24px; text-align: center;",
                    h2 { "Access Denied" }
                    p { style: "color: #6b7280;", "{message}" }
                    button {
                        class: "btn-primary",
                        style: "padding: 12px 24px;",
                        onclick: move |_| on_navigate.call(Screen::CameraAccess),
                        "Enter another code"
                    }
                }
            }
        },
        Lookup::Ready(access) => {
            let subtitle = match access.remaining_photos {
                Some(n) => format!("{} photos left", n),
                None => String::new(),
            };
            rsx! {
                CaptureView {
                    event_id: access.event_id.unwrap_or_default(),
                    title: access.event_name.clone().unwrap_or_else(|| "Event Camera".to_string()),
                    subtitle,
                    on_back: move |_| on_navigate.call(Screen::CameraAccess),
                }
            }
        }
    }
}
