use crate::cache::{use_query, QueryClient};
use crate::config::AppConfig;
use crate::filesystem;
use crate::models::Event;
use crate::notifications::Notifications;
use crate::services::{admin_service, event_service, ApiClient};
use dioxus::prelude::*;

/// Fetches the QR image bytes, from a data URL or over HTTP
async fn qr_bytes(client: &ApiClient, qr: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = filesystem::decode_data_url(qr) {
        return Some(bytes);
    }
    let url = if qr.starts_with('/') {
        client.url(qr)
    } else {
        qr.to_string()
    };
    let response = reqwest::get(&url).await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.bytes().await.ok().map(|b| b.to_vec())
}

fn copy_to_clipboard(text: &str) {
    let script = format!("navigator.clipboard && navigator.clipboard.writeText({:?});", text);
    let _ = document::eval(&script);
}

#[component]
pub fn QrModal(event_id: i64, on_close: EventHandler<()>) -> Element {
    let config = use_context::<AppConfig>();
    let client = use_context::<ApiClient>();
    let mut query = use_context::<QueryClient>();
    let mut notifications = use_context::<Signal<Notifications>>();
    let mut regenerating = use_signal(|| false);

    let path = event_service::event_path(event_id);
    let event = use_query::<Event>(path.clone());

    let regenerate = {
        let client = client.clone();
        let path = path.clone();
        move |_| {
            if regenerating() {
                return;
            }
            regenerating.set(true);
            let client = client.clone();
            let path = path.clone();
            spawn(async move {
                match event_service::regenerate_qr(&client, event_id).await {
                    Ok(_) => {
                        notifications.write().info("QR code generated successfully");
                        query.invalidate(&path);
                        query.invalidate(admin_service::ADMIN_EVENTS_PATH);
                    }
                    Err(e) => {
                        notifications
                            .write()
                            .error("Failed to generate QR code", e.message_or("Please try again."));
                    }
                }
                regenerating.set(false);
            });
        }
    };

    let regenerate_all = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                match admin_service::regenerate_all_qr_codes(&client).await {
                    Ok(reply) => {
                        let message = reply
                            .message
                            .unwrap_or_else(|| "All QR codes regenerated".to_string());
                        notifications.write().info(message);
                        query.invalidate_prefix("/api/events");
                        query.invalidate(admin_service::ADMIN_EVENTS_PATH);
                    }
                    Err(e) => {
                        notifications.write().error(
                            "Failed to regenerate all QR codes",
                            e.message_or("Please try again."),
                        );
                    }
                }
            });
        }
    };

    let Some(ev) = event.data.clone() else {
        let load_error = event.error.map(|e| e.message_or("Could not load event"));
        return rsx! {
            ModalFrame { on_close,
                if let Some(err) = load_error {
                    p { style: "color: #dc2626;", "{err}" }
                } else {
                    p { "Loading..." }
                }
            }
        };
    };

    let link = ev.share_link(&config.public_origin);
    let download = {
        let client = client.clone();
        let ev = ev.clone();
        move |_| {
            let Some(qr) = ev.qr_code.clone().filter(|q| !q.is_empty()) else {
                notifications.write().error("No QR code to download", "Generate one first.");
                return;
            };
            let client = client.clone();
            let file_name = filesystem::qr_code_file_name(&ev.name);
            spawn(async move {
                let saved = match qr_bytes(&client, &qr).await {
                    Some(bytes) => filesystem::save_file(&filesystem::downloads_dir(), &file_name, &bytes)
                        .map_err(|e| e.to_string()),
                    None => Err("Could not read QR image".to_string()),
                };
                match saved {
                    Ok(_) => {
                        notifications.write().info("QR code downloaded successfully");
                    }
                    Err(e) => {
                        log::error!("QR download failed: {}", e);
                        notifications.write().error("Download failed", e);
                    }
                }
            });
        }
    };

    rsx! {
        ModalFrame { on_close,
            h2 { style: "margin: 0 0 4px 0;", "{ev.name}" }
            if let Some(code) = ev.login_code.clone() {
                p { style: "margin: 0 0 16px 0; color: #4b5563;",
                    "Login code: "
                    strong { style: "font-family: monospace;", "{code}" }
                }
            }
            div { style: "display: flex; justify-content: center; padding: 16px; background: #f9fafb; border-radius: 8px;",
                if let Some(qr) = ev.qr_code.clone().filter(|q| !q.is_empty()) {
                    img { src: "{qr}", alt: "QR code for {ev.name}", style: "width: 240px; height: 240px;" }
                } else {
                    p { style: "color: #6b7280;", "No QR code generated yet" }
                }
            }
            if let Some(link) = link {
                div { style: "display: flex; gap: 8px; margin-top: 16px;",
                    input { readonly: true, value: "{link}", style: "flex: 1; padding: 8px;" }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| {
                            copy_to_clipboard(&link);
                            notifications.write().info("Access link copied to clipboard");
                        },
                        "Copy"
                    }
                }
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 8px; margin-top: 16px;",
                button { class: "btn-primary", onclick: download, "Download" }
                button {
                    class: "btn-secondary",
                    disabled: regenerating(),
                    onclick: regenerate,
                    if regenerating() { "Generating..." } else { "Regenerate" }
                }
                button { class: "btn-secondary", onclick: regenerate_all, "Regenerate All" }
            }
        }
    }
}

#[component]
fn ModalFrame(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 500;",
            div { style: "background: #fff; width: 100%; max-width: 440px; padding: 24px; border-radius: 12px; position: relative;",
                button {
                    style: "position: absolute; top: 12px; right: 12px; border: none; background: none; font-size: 18px; cursor: pointer;",
                    onclick: move |_| on_close.call(()),
                    "✕"
                }
                {children}
            }
        }
    }
}
