use super::create_event_modal::TextField;
use super::events::StatusBadge;
use super::qr_modal::QrModal;
use crate::cache::{use_query, QueryClient};
use crate::database;
use crate::forms::admin_event::created_message;
use crate::forms::{AdminEventDraft, AdminField};
use crate::models::{AdminStats, Event, PackageType, PaymentRecord, UserAccount};
use crate::notifications::Notifications;
use crate::routes::Screen;
use crate::services::{admin_service, event_service, session_service, ApiClient, Session, SessionKind};
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Events,
    Payments,
    Users,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Events, Tab::Payments, Tab::Users];

    fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Events => "Events",
            Tab::Payments => "Payments",
            Tab::Users => "Users",
        }
    }
}

fn package_badge(kind: PackageType) -> (&'static str, &'static str) {
    match kind {
        PackageType::Premium => ("#ede9fe", "#6d28d9"),
        PackageType::Standard => ("#dbeafe", "#1d4ed8"),
    }
}

const TH: &str = "text-align: left; padding: 8px; font-size: 12px; color: #6b7280; border-bottom: 1px solid #e5e7eb;";
const TD: &str = "padding: 8px; font-size: 14px; border-bottom: 1px solid #f3f4f6;";

#[component]
pub fn AdminScreen(on_navigate: EventHandler<Screen>) -> Element {
    let mut session = use_context::<Signal<Session>>();
    let mut tab = use_signal(|| Tab::Overview);
    let mut show_create = use_signal(|| false);

    let logout = move |_| {
        let cleared = database::init_database()
            .and_then(|conn| session_service::clear_session(&conn, SessionKind::Admin));
        if let Err(e) = cleared {
            log::error!("Could not clear admin session: {}", e);
        }
        session.write().admin = None;
        on_navigate.call(Screen::AdminLogin);
    };

    let admin_name = session
        .read()
        .admin
        .as_ref()
        .map(|a| a.user.username.clone())
        .unwrap_or_default();

    rsx! {
        div { style: "min-height: 100vh; background: #f9fafb;",
            div { style: "background: #111827; color: #fff; padding: 16px; display: flex; justify-content: space-between; align-items: center;",
                div {
                    h1 { style: "margin: 0; font-size: 20px;", "VIPix Admin" }
                    p { style: "margin: 0; font-size: 13px; color: #9ca3af;", "Signed in as {admin_name}" }
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        class: "btn-primary",
                        onclick: move |_| show_create.set(true),
                        "+ Create Event"
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_navigate.call(Screen::AdminQrGallery),
                        "QR Gallery"
                    }
                    button { class: "btn-secondary", onclick: logout, "Logout" }
                }
            }
            div { style: "display: flex; gap: 4px; padding: 12px 16px; border-bottom: 1px solid #e5e7eb; background: #fff;",
                for t in Tab::ALL {
                    button {
                        key: "{t.label()}",
                        style: if tab() == t { "padding: 8px 14px; border: none; border-radius: 6px; background: #111827; color: #fff; cursor: pointer;" } else { "padding: 8px 14px; border: none; border-radius: 6px; background: transparent; color: #374151; cursor: pointer;" },
                        onclick: move |_| tab.set(t),
                        "{t.label()}"
                    }
                }
            }
            div { style: "padding: 16px; max-width: 1100px; margin: 0 auto;",
                match tab() {
                    Tab::Overview => rsx! { StatsPanel {} },
                    Tab::Events => rsx! { EventsPanel {} },
                    Tab::Payments => rsx! { PaymentsPanel {} },
                    Tab::Users => rsx! { UsersPanel {} },
                }
            }
            if show_create() {
                CreateEventDialog { on_close: move |_| show_create.set(false) }
            }
        }
    }
}

/// Direct event creation, no payment step
#[component]
fn CreateEventDialog(on_close: EventHandler<()>) -> Element {
    let client = use_context::<ApiClient>();
    let mut query = use_context::<QueryClient>();
    let mut notifications = use_context::<Signal<Notifications>>();
    let mut draft = use_signal(AdminEventDraft::default);
    let mut errors = use_signal(Vec::<(AdminField, String)>::new);
    let mut submitting = use_signal(|| false);

    let mut edit = move |field: AdminField, value: String| draft.write().set(field, value);
    let error_for = move |field: AdminField| {
        errors
            .read()
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.clone())
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let found = draft.read().validate();
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        let code = draft.read().login_code_or_generated();
        let request = draft.read().to_request(code.clone());
        let client = client.clone();
        submitting.set(true);
        spawn(async move {
            match event_service::create_direct_event(&client, &request).await {
                Ok(event) => {
                    query.invalidate(admin_service::ADMIN_EVENTS_PATH);
                    query.invalidate(admin_service::ADMIN_STATS_PATH);
                    notifications
                        .write()
                        .success("Event Created Successfully", created_message(&event, &code));
                    draft.set(AdminEventDraft::default());
                    on_close.call(());
                }
                Err(e) => {
                    log::warn!("Admin event creation failed: {}", e);
                    notifications
                        .write()
                        .error("Failed to Create Event", e.message_or("Failed to create event"));
                }
            }
            submitting.set(false);
        });
    };

    let current = draft();

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 500;",
            div { class: "card", style: "background: #fff; width: 100%; max-width: 520px; max-height: 90vh; overflow-y: auto; padding: 24px; border-radius: 12px;",
                div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                    h2 { style: "margin: 0;", "Create New Event" }
                    button {
                        style: "border: none; background: none; font-size: 20px; cursor: pointer;",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                form { style: "display: flex; flex-direction: column; gap: 12px;", onsubmit: submit,
                    TextField {
                        label: "Event Name",
                        value: current.name.clone(),
                        error: error_for(AdminField::Name),
                        on_input: move |v| edit(AdminField::Name, v),
                    }
                    TextField {
                        label: "Description (optional)",
                        value: current.description.clone(),
                        on_input: move |v| edit(AdminField::Description, v),
                    }
                    TextField {
                        label: "Event Date",
                        input_type: "date",
                        value: current.event_date.clone(),
                        error: error_for(AdminField::EventDate),
                        on_input: move |v| edit(AdminField::EventDate, v),
                    }
                    label { style: "font-size: 14px; font-weight: 500;",
                        "Package"
                        select {
                            style: "width: 100%; padding: 10px; margin-top: 4px;",
                            value: "{current.package_type.as_str()}",
                            onchange: move |e: FormEvent| {
                                if let Some(kind) = PackageType::from_query(&e.value()) {
                                    draft.write().package_type = kind;
                                }
                            },
                            option { value: "standard", "Standard ($50)" }
                            option { value: "premium", "Premium ($75)" }
                        }
                    }
                    TextField {
                        label: "Folder Name (optional)",
                        value: current.folder_name.clone(),
                        on_input: move |v| edit(AdminField::FolderName, v),
                    }
                    TextField {
                        label: "Login Code (leave empty to generate)",
                        value: current.login_code.clone(),
                        on_input: move |v| edit(AdminField::LoginCode, v),
                    }
                    button {
                        r#type: "submit",
                        class: "btn-primary",
                        style: "padding: 12px;",
                        disabled: submitting(),
                        if submitting() { "Creating..." } else { "Create Event" }
                    }
                }
            }
        }
    }
}

#[component]
fn StatsPanel() -> Element {
    let stats = use_query::<AdminStats>(admin_service::ADMIN_STATS_PATH.to_string());
    let s = stats.data.unwrap_or_default();
    let cards = [
        ("Total Users", s.total_users.to_string()),
        ("Total Events", s.total_events.to_string()),
        ("Payments", s.total_payments.to_string()),
        ("Revenue", format!("${:.2}", s.total_revenue)),
        ("Active Subscriptions", s.active_subscriptions.to_string()),
        ("Flagged Issues", s.flagged_issues.to_string()),
        ("Photos Moderated", s.photos_moderated.to_string()),
        ("Storage Used", s.storage_used.clone()),
    ];

    rsx! {
        if let Some(err) = stats.error {
            p { style: "color: #dc2626;", "Could not load statistics: {err}" }
        }
        div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 12px;",
            for (label , value) in cards {
                div { key: "{label}", class: "card", style: "padding: 16px;",
                    p { style: "margin: 0; color: #6b7280; font-size: 13px;", "{label}" }
                    p { style: "margin: 4px 0 0 0; font-size: 22px; font-weight: 700;", "{value}" }
                }
            }
        }
    }
}

#[component]
fn EventsPanel() -> Element {
    let client = use_context::<ApiClient>();
    let mut query = use_context::<QueryClient>();
    let mut notifications = use_context::<Signal<Notifications>>();
    let events = use_query::<Vec<Event>>(admin_service::ADMIN_EVENTS_PATH.to_string());
    let mut qr_event = use_signal(|| None::<i64>);

    let regenerate = move |id: i64| {
        let client = client.clone();
        spawn(async move {
            match event_service::regenerate_qr(&client, id).await {
                Ok(_) => {
                    notifications
                        .write()
                        .success("QR Code Regenerated", "The event QR code has been updated.");
                    query.invalidate(admin_service::ADMIN_EVENTS_PATH);
                    query.invalidate(&event_service::event_path(id));
                }
                Err(e) => {
                    notifications
                        .write()
                        .error("Regeneration Failed", e.message_or("Could not regenerate the QR code."));
                }
            }
        });
    };

    let list = events.data.clone().unwrap_or_default();

    rsx! {
        if let Some(err) = events.error.clone() {
            p { style: "color: #dc2626;", "Could not load events: {err}" }
        }
        div { class: "card", style: "overflow-x: auto;",
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: TH, "Event" }
                        th { style: TH, "Owner" }
                        th { style: TH, "Date" }
                        th { style: TH, "Package" }
                        th { style: TH, "Status" }
                        th { style: TH, "Photos" }
                        th { style: TH, "QR" }
                        th { style: TH, "" }
                    }
                }
                tbody {
                    for event in list {
                        {
                            let (status_bg, status_fg) = event.status.badge_colors();
                            let (pkg_bg, pkg_fg) = package_badge(event.package_type);
                            let id = event.id;
                            let regenerate = regenerate.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { style: TD,
                                        strong { "{event.name}" }
                                        if let Some(code) = event.login_code.clone() {
                                            div { style: "font-family: monospace; font-size: 12px; color: #6b7280;", "{code}" }
                                        }
                                    }
                                    td { style: TD, "{event.user_email.clone().unwrap_or_default()}" }
                                    td { style: TD, "{event.display_date()}" }
                                    td { style: TD,
                                        StatusBadge { label: event.package_type.as_str().to_string(), background: pkg_bg.to_string(), color: pkg_fg.to_string() }
                                    }
                                    td { style: TD,
                                        StatusBadge { label: event.status.label().to_string(), background: status_bg.to_string(), color: status_fg.to_string() }
                                    }
                                    td { style: TD, "{event.photo_banner()}" }
                                    td { style: TD,
                                        if event.qr_ready() {
                                            button {
                                                style: "background: none; border: none; color: #16a34a; cursor: pointer;",
                                                onclick: move |_| qr_event.set(Some(id)),
                                                "✓ Ready"
                                            }
                                        } else {
                                            span { style: "color: #9ca3af;", "Missing" }
                                        }
                                    }
                                    td { style: TD,
                                        button {
                                            class: "btn-secondary",
                                            onclick: move |_| regenerate(id),
                                            "Regenerate"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        if let Some(id) = qr_event() {
            QrModal { event_id: id, on_close: move |_| qr_event.set(None) }
        }
    }
}

#[component]
fn PaymentsPanel() -> Element {
    let payments = use_query::<Vec<PaymentRecord>>(admin_service::ADMIN_PAYMENTS_PATH.to_string());
    let list = payments.data.clone().unwrap_or_default();

    rsx! {
        if let Some(err) = payments.error.clone() {
            p { style: "color: #dc2626;", "Could not load payments: {err}" }
        }
        div { class: "card", style: "overflow-x: auto;",
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: TH, "Event" }
                        th { style: TH, "Customer" }
                        th { style: TH, "Amount" }
                        th { style: TH, "Status" }
                        th { style: TH, "Date" }
                    }
                }
                tbody {
                    for payment in list {
                        tr { key: "{payment.id}",
                            td { style: TD, "{payment.event_name}" }
                            td { style: TD, "{payment.user_email}" }
                            td { style: TD, "{payment.amount_label()}" }
                            td { style: TD, "{payment.status}" }
                            td { style: TD, "{payment.created_at}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn UsersPanel() -> Element {
    let users = use_query::<Vec<UserAccount>>(admin_service::ADMIN_USERS_PATH.to_string());
    let list = users.data.clone().unwrap_or_default();

    rsx! {
        if let Some(err) = users.error.clone() {
            p { style: "color: #dc2626;", "Could not load users: {err}" }
        }
        div { class: "card", style: "overflow-x: auto;",
            table { style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: TH, "Username" }
                        th { style: TH, "Email" }
                        th { style: TH, "Role" }
                        th { style: TH, "Events" }
                        th { style: TH, "Photos" }
                        th { style: TH, "Joined" }
                    }
                }
                tbody {
                    for user in list {
                        tr { key: "{user.id}",
                            td { style: TD, "{user.username}" }
                            td { style: TD, "{user.email}" }
                            td { style: TD, if user.is_admin { "Admin" } else { "Organizer" } }
                            td { style: TD, "{user.event_count}" }
                            td { style: TD, "{user.photo_count}" }
                            td { style: TD, "{user.created_at}" }
                        }
                    }
                }
            }
        }
    }
}
