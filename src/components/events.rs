use super::create_event_modal::CreateEventModal;
use super::qr_modal::QrModal;
use crate::cache::use_query;
use crate::models::Event;
use crate::routes::Screen;
use crate::services::event_service;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn StatusBadge(label: String, background: String, color: String) -> Element {
    rsx! {
        span { style: "padding: 2px 10px; border-radius: 999px; font-size: 12px; font-weight: 600; background: {background}; color: {color};",
            "{label}"
        }
    }
}

#[component]
fn EventCard(event: Event, on_show_qr: EventHandler<i64>, on_open_camera: EventHandler<String>) -> Element {
    let (bg, fg) = event.status.badge_colors();
    let id = event.id;
    let code = event.login_code.clone().filter(|c| !c.is_empty());

    rsx! {
        div { class: "card", style: "padding: 16px; display: flex; flex-direction: column; gap: 8px;",
            div { style: "display: flex; justify-content: space-between; align-items: start; gap: 8px;",
                div {
                    h3 { style: "margin: 0;", "{event.name}" }
                    p { style: "margin: 2px 0 0 0; color: #6b7280; font-size: 13px;", "{event.display_date()}" }
                }
                StatusBadge { label: event.status.label().to_string(), background: bg.to_string(), color: fg.to_string() }
            }
            if let Some(desc) = event.description.clone().filter(|d| !d.is_empty()) {
                p { style: "margin: 0; color: #4b5563; font-size: 14px;", "{desc}" }
            }
            div { style: "display: flex; gap: 12px; font-size: 13px; color: #4b5563;",
                span { "{event.package_type.icon()} {event.package_type.as_str()}" }
                span { "📸 {event.photo_banner()}" }
                if let Some(code) = code.clone() {
                    span { style: "font-family: monospace;", "🔑 {code}" }
                }
            }
            div { style: "display: flex; gap: 8px; margin-top: 4px;",
                button {
                    class: "btn-secondary",
                    onclick: move |_| on_show_qr.call(id),
                    if event.qr_ready() { "QR Code" } else { "Generate QR" }
                }
                if let Some(code) = code {
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_open_camera.call(code.clone()),
                        "Open Camera"
                    }
                }
            }
        }
    }
}

/// The organizer's events with QR and create actions
#[component]
pub fn EventsScreen(on_navigate: EventHandler<Screen>) -> Element {
    let events = use_query::<Vec<Event>>(event_service::EVENTS_PATH.to_string());
    let mut show_create = use_signal(|| false);
    let mut qr_event = use_signal(|| None::<i64>);

    let list = events.data.clone().unwrap_or_default();

    rsx! {
        div { style: "padding: 16px; padding-bottom: 90px; max-width: 960px; margin: 0 auto;",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h1 { style: "margin: 0; font-size: 24px;", {t!("events-title")} }
                button {
                    class: "btn-primary",
                    onclick: move |_| show_create.set(true),
                    "+ {t!(\"action-create-event\")}"
                }
            }

            if let Some(err) = events.error.clone() {
                p { style: "color: #dc2626;", "Could not load events: {err}" }
            }
            if events.loading && list.is_empty() {
                p { style: "color: #6b7280;", "Loading..." }
            } else if list.is_empty() {
                div { class: "card", style: "padding: 32px; text-align: center; color: #6b7280;",
                    p { {t!("events-empty")} }
                }
            }

            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 12px;",
                for event in list {
                    EventCard {
                        key: "{event.id}",
                        event: event.clone(),
                        on_show_qr: move |id| qr_event.set(Some(id)),
                        on_open_camera: move |code| on_navigate.call(Screen::EventCamera(code)),
                    }
                }
            }

            if show_create() {
                CreateEventModal { on_close: move |_| show_create.set(false) }
            }
            if let Some(id) = qr_event() {
                QrModal { event_id: id, on_close: move |_| qr_event.set(None) }
            }
        }
    }
}
