use crate::cache::{use_query, QueryClient};
use crate::models::{Event, QrCodeItem, QrGalleryStats};
use crate::notifications::Notifications;
use crate::routes::Screen;
use crate::services::{admin_service, ApiClient};
use dioxus::prelude::*;

const DEFAULT_BATCH: u32 = 10;

/// Pre-generated QR codes: stats, batch generation, assignment to events
#[component]
pub fn AdminQrGalleryScreen(on_navigate: EventHandler<Screen>) -> Element {
    let client = use_context::<ApiClient>();
    let mut query = use_context::<QueryClient>();
    let mut notifications = use_context::<Signal<Notifications>>();

    let stats = use_query::<QrGalleryStats>(admin_service::QR_STATS_PATH.to_string());
    let codes = use_query::<Vec<QrCodeItem>>(admin_service::QR_AVAILABLE_PATH.to_string());
    let events = use_query::<Vec<Event>>(admin_service::ADMIN_EVENTS_PATH.to_string());

    let mut batch_size = use_signal(|| DEFAULT_BATCH.to_string());
    let mut generating = use_signal(|| false);
    let mut selected_code = use_signal(|| None::<QrCodeItem>);
    let mut selected_event = use_signal(|| None::<i64>);

    let refresh = move || {
        query.invalidate(admin_service::QR_STATS_PATH);
        query.invalidate(admin_service::QR_AVAILABLE_PATH);
    };

    let generate = {
        let client = client.clone();
        move |_| {
            let count = match batch_size().trim().parse::<u32>() {
                Ok(n) if (1..=100).contains(&n) => n,
                _ => {
                    notifications
                        .write()
                        .error("Invalid count", "Enter a number between 1 and 100");
                    return;
                }
            };
            generating.set(true);
            let client = client.clone();
            let mut refresh = refresh;
            spawn(async move {
                match admin_service::generate_batch(&client, count).await {
                    Ok(reply) => {
                        notifications
                            .write()
                            .success("QR Codes Generated", admin_service::batch_message(&reply, count));
                        refresh();
                    }
                    Err(e) => {
                        notifications
                            .write()
                            .error("Generation Failed", e.message_or("Could not generate QR codes"));
                    }
                }
                generating.set(false);
            });
        }
    };

    let assign = {
        let client = client.clone();
        move |_| {
            let picked = selected_code();
            let (code_id, event_id) =
                match admin_service::validate_assignment(picked.as_ref(), selected_event()) {
                    Ok(ids) => ids,
                    Err(msg) => {
                        notifications.write().error("Missing selection", msg);
                        return;
                    }
                };
            let client = client.clone();
            let mut refresh = refresh;
            spawn(async move {
                match admin_service::assign_qr_code(&client, code_id, event_id).await {
                    Ok(()) => {
                        notifications
                            .write()
                            .success("QR Code Assigned", "The event can now be joined with this code.");
                        selected_code.set(None);
                        selected_event.set(None);
                        refresh();
                        query.invalidate(admin_service::ADMIN_EVENTS_PATH);
                    }
                    Err(e) => {
                        notifications
                            .write()
                            .error("Assignment Failed", e.message_or("Could not assign the QR code"));
                    }
                }
            });
        }
    };

    let s = stats.data.unwrap_or_default();
    let available = codes.data.clone().unwrap_or_default();
    let targets = admin_service::assignable_events(events.data.as_deref().unwrap_or_default());
    let current_code = selected_code().map(|c| c.id);

    rsx! {
        div { style: "min-height: 100vh; background: #f9fafb; padding: 16px;",
            div { style: "max-width: 1100px; margin: 0 auto;",
                div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                    h1 { style: "margin: 0; font-size: 24px;", "QR Code Gallery" }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_navigate.call(Screen::Admin),
                        "← Admin Dashboard"
                    }
                }

                div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; margin-bottom: 16px;",
                    for (label , value) in [("Total", s.total), ("Assigned", s.assigned), ("Available", s.available)] {
                        div { key: "{label}", class: "card", style: "padding: 16px; text-align: center;",
                            p { style: "margin: 0; color: #6b7280; font-size: 13px;", "{label}" }
                            p { style: "margin: 4px 0 0 0; font-size: 24px; font-weight: 700;", "{value}" }
                        }
                    }
                }

                div { class: "card", style: "padding: 16px; margin-bottom: 16px; display: flex; gap: 8px; align-items: end; flex-wrap: wrap;",
                    label { style: "font-size: 14px; font-weight: 500;",
                        "Batch size"
                        input {
                            r#type: "number",
                            min: "1",
                            max: "100",
                            value: "{batch_size}",
                            style: "display: block; padding: 8px; margin-top: 4px; width: 120px;",
                            oninput: move |e| batch_size.set(e.value()),
                        }
                    }
                    button {
                        class: "btn-primary",
                        disabled: generating(),
                        onclick: generate,
                        if generating() { "Generating..." } else { "Generate Batch" }
                    }
                }

                div { class: "card", style: "padding: 16px; margin-bottom: 16px; display: flex; gap: 8px; align-items: end; flex-wrap: wrap;",
                    label { style: "font-size: 14px; font-weight: 500; flex: 1;",
                        "Assign selected code to"
                        select {
                            style: "display: block; width: 100%; padding: 8px; margin-top: 4px;",
                            onchange: move |e: FormEvent| selected_event.set(e.value().parse::<i64>().ok()),
                            option { value: "", "Select an event" }
                            for event in targets {
                                option { key: "{event.id}", value: "{event.id}", "{event.name}" }
                            }
                        }
                    }
                    button { class: "btn-primary", onclick: assign, "Assign" }
                }

                if let Some(err) = codes.error.clone() {
                    p { style: "color: #dc2626;", "Could not load QR codes: {err}" }
                }
                div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 12px;",
                    for item in available {
                        {
                            let picked = current_code == Some(item.id);
                            let chosen = item.clone();
                            rsx! {
                                div {
                                    key: "{item.id}",
                                    class: "card",
                                    style: if picked { "padding: 12px; text-align: center; cursor: pointer; border: 2px solid #7c3aed;" } else { "padding: 12px; text-align: center; cursor: pointer; border: 1px solid #e5e7eb;" },
                                    onclick: move |_| selected_code.set(Some(chosen.clone())),
                                    img { src: "{item.qr_code_url}", alt: "QR {item.code}", style: "width: 120px; height: 120px;" }
                                    p { style: "margin: 6px 0 0 0; font-family: monospace; font-weight: 600;", "{item.code}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
