use super::create_event_modal::CreateEventModal;
use crate::cache::use_query;
use crate::models::{recent_activity, DashboardStats, Event};
use crate::routes::Screen;
use crate::services::{event_service, Session};
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
fn StatCard(icon: String, label: String, value: String) -> Element {
    rsx! {
        div { class: "card", style: "padding: 16px; display: flex; align-items: center; gap: 12px;",
            div { style: "font-size: 28px;", "{icon}" }
            div {
                p { style: "margin: 0; color: #6b7280; font-size: 13px;", "{label}" }
                p { style: "margin: 0; font-size: 22px; font-weight: 700;", "{value}" }
            }
        }
    }
}

/// Organizer overview: counters from `/api/stats` and recent events
#[component]
pub fn DashboardScreen(on_navigate: EventHandler<Screen>) -> Element {
    let session = use_context::<Signal<Session>>();
    let stats = use_query::<DashboardStats>(event_service::STATS_PATH.to_string());
    let events = use_query::<Vec<Event>>(event_service::EVENTS_PATH.to_string());
    let mut show_create = use_signal(|| false);

    let greeting = match session.read().user.as_ref() {
        Some(user) => format!("Welcome back, {}", user.display_name()),
        None => t!("dashboard-title"),
    };
    let s = stats.data.unwrap_or_default();
    let activity = recent_activity(events.data.as_deref().unwrap_or_default(), 5);

    rsx! {
        div { style: "padding: 16px; padding-bottom: 90px; max-width: 960px; margin: 0 auto;",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h1 { style: "margin: 0; font-size: 24px;", "{greeting}" }
                button {
                    class: "btn-primary",
                    onclick: move |_| show_create.set(true),
                    "+ {t!(\"action-create-event\")}"
                }
            }

            if let Some(err) = stats.error {
                p { style: "color: #dc2626;", "Could not load statistics: {err}" }
            }

            div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 12px;",
                StatCard { icon: "📅", label: t!("dashboard-active-events"), value: s.active_events.to_string() }
                StatCard { icon: "📸", label: t!("dashboard-photos"), value: s.photos_count.to_string() }
                StatCard { icon: "🛡", label: t!("dashboard-moderation"), value: s.moderation_queue.to_string() }
                StatCard { icon: "💰", label: t!("dashboard-revenue"), value: format!("${:.2}", s.revenue) }
            }

            div { class: "card", style: "padding: 16px; margin-top: 16px;",
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { style: "margin: 0;", {t!("dashboard-recent-activity")} }
                    button {
                        style: "background: none; border: none; color: #2563eb; cursor: pointer;",
                        onclick: move |_| on_navigate.call(Screen::Events),
                        {t!("dashboard-view-events")}
                    }
                }
                if activity.is_empty() {
                    p { style: "color: #6b7280;", {t!("dashboard-no-activity")} }
                }
                for item in activity {
                    div { key: "{item.id}", style: "padding: 8px 0; border-bottom: 1px solid #f3f4f6;",
                        p { style: "margin: 0;", "{item.description}" }
                        p { style: "margin: 0; color: #9ca3af; font-size: 12px;", "{item.timestamp}" }
                    }
                }
            }

            if show_create() {
                CreateEventModal { on_close: move |_| show_create.set(false) }
            }
        }
    }
}
