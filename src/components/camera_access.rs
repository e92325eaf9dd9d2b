use crate::forms::{AccessCheck, CodeEntry};
use crate::routes::Screen;
use crate::services::{event_service, ApiClient};
use dioxus::prelude::*;

/// `/event-camera`: verify a login code before opening the camera
#[component]
pub fn CameraAccessScreen(on_navigate: EventHandler<Screen>) -> Element {
    let client = use_context::<ApiClient>();
    let mut entry = use_signal(CodeEntry::default);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(code) = entry.write().submit() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let check = AccessCheck::from_reply(&code, event_service::camera_access(&client, &code).await);
            entry.write().finish(&check);
            if let AccessCheck::Granted { code } = check {
                on_navigate.call(Screen::EventCamera(code));
            }
        });
    };

    let state = entry();

    rsx! {
        div { style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 16px; background: linear-gradient(135deg, #7c3aed, #db2777);",
            form {
                class: "card",
                style: "width: 100%; max-width: 400px; padding: 24px; background: #fff; border-radius: 12px; display: flex; flex-direction: column; gap: 12px;",
                onsubmit: submit,
                h2 { style: "margin: 0; text-align: center;", "Event Camera" }
                p { style: "margin: 0; color: #6b7280; text-align: center;", "Enter your event code to start taking photos" }
                input {
                    r#type: "text",
                    value: "{state.code}",
                    placeholder: "EVENT CODE",
                    maxlength: "10",
                    style: "padding: 12px; font-size: 20px; text-align: center; letter-spacing: 4px; font-family: monospace;",
                    oninput: move |e| entry.write().set_code(&e.value()),
                }
                if let Some(err) = state.error {
                    p { style: "margin: 0; color: #dc2626; font-size: 14px;", "{err}" }
                }
                button {
                    r#type: "submit",
                    class: "btn-primary",
                    style: "padding: 12px;",
                    disabled: state.checking,
                    if state.checking { "Verifying..." } else { "Access Camera" }
                }
            }
        }
    }
}
