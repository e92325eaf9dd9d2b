use super::checkout_form::{outcome_notice, CheckoutForm};
use super::create_event_modal::TextField;
use super::login::remember_user;
use crate::config::AppConfig;
use crate::forms::create_event::GUEST_RANGES;
use crate::forms::registration::{
    RegField, RegistrationAction, RegistrationEffect, RegistrationFlow, RegistrationStep,
    RegistrationTransition,
};
use crate::models::{GalleryType, Package, PaymentOutcome};
use crate::notifications::{Notifications, Variant};
use crate::routes::Screen;
use crate::services::{event_service, ApiClient, Session};
use dioxus::prelude::*;
use vipix_auth::AuthService;

#[derive(Clone, Copy)]
struct Ctx {
    flow: Signal<RegistrationFlow>,
    notifications: Signal<Notifications>,
    session: Signal<Session>,
}

fn run_effects(transition: RegistrationTransition, mut ctx: Ctx, client: ApiClient, auth: AuthService) {
    ctx.flow.set(transition.state);

    for effect in transition.effects {
        match effect {
            RegistrationEffect::Register(request) => {
                let (client, auth) = (client.clone(), auth.clone());
                spawn(async move {
                    let action = match auth.register(&request).await {
                        Ok(user) => RegistrationAction::UserCreated(user),
                        Err(e) => RegistrationAction::RegisterFailed(e),
                    };
                    dispatch(action, ctx, client, auth);
                });
            }
            RegistrationEffect::CreateEvent(request) => {
                let (client, auth) = (client.clone(), auth.clone());
                spawn(async move {
                    let action = match event_service::create_direct_event(&client, &request).await {
                        Ok(event) => RegistrationAction::EventCreated(event),
                        Err(e) => RegistrationAction::EventFailed(e.message_or(&e.to_string())),
                    };
                    dispatch(action, ctx, client, auth);
                });
            }
            RegistrationEffect::RequestPaymentIntent(request) => {
                let (client, auth) = (client.clone(), auth.clone());
                spawn(async move {
                    let action = match event_service::create_payment_intent(&client, &request).await {
                        Ok(secret) => RegistrationAction::PaymentIntentCreated(secret),
                        Err(e) => {
                            log::error!("Payment intent failed: {}", e);
                            RegistrationAction::PaymentIntentFailed
                        }
                    };
                    dispatch(action, ctx, client, auth);
                });
            }
            RegistrationEffect::StoreUser(user) => remember_user(&user, ctx.session),
            RegistrationEffect::Notify {
                title,
                description,
                destructive,
            } => {
                let variant = if destructive {
                    Variant::Destructive
                } else {
                    Variant::Default
                };
                ctx.notifications.write().push(title, Some(description), variant);
            }
        }
    }
}

fn edit(mut flow: Signal<RegistrationFlow>, field: RegField) -> impl FnMut(String) {
    move |value| flow.write().edit(field, value)
}

fn dispatch(action: RegistrationAction, ctx: Ctx, client: ApiClient, auth: AuthService) {
    let transition = ctx.flow.peek().clone().reduce(action);
    run_effects(transition, ctx, client, auth);
}

/// Organizer sign-up with the first event and its payment
#[component]
pub fn RegisterScreen(package: Option<String>, on_navigate: EventHandler<Screen>) -> Element {
    let config = use_context::<AppConfig>();
    let client = use_context::<ApiClient>();
    let mut notifications = use_context::<Signal<Notifications>>();
    let ctx = Ctx {
        flow: use_signal(|| RegistrationFlow::new(package.as_deref())),
        notifications,
        session: use_context::<Signal<Session>>(),
    };
    let auth = AuthService::new(config.api_base_url.clone());

    let send = move |action: RegistrationAction| dispatch(action, ctx, client.clone(), auth.clone());
    let mut flow = ctx.flow;

    let state = flow();
    let selected = Package::for_type(state.package);

    rsx! {
        div { style: "min-height: 100vh; background: #f9fafb; padding: 24px 16px;",
            div { style: "max-width: 640px; margin: 0 auto;",
                button {
                    style: "background: none; border: none; color: #6b7280; cursor: pointer; margin-bottom: 12px;",
                    onclick: move |_| on_navigate.call(Screen::Packages),
                    "← Back to packages"
                }
                div { class: "card", style: "padding: 16px; margin-bottom: 16px; display: flex; justify-content: space-between; align-items: center;",
                    div {
                        strong { "{selected.kind.icon()} {selected.name} Package" }
                        p { style: "margin: 4px 0 0 0; color: #6b7280; font-size: 14px;", "{selected.description}" }
                    }
                    strong { style: "font-size: 22px;", "${selected.price_usd}" }
                }

                match state.step {
                    RegistrationStep::Registration => rsx! {
                        form {
                            class: "card",
                            style: "padding: 24px; display: flex; flex-direction: column; gap: 12px;",
                            onsubmit: {
                                let send = send.clone();
                                move |evt: FormEvent| {
                                    evt.prevent_default();
                                    send(RegistrationAction::Submit);
                                }
                            },
                            h3 { style: "margin: 0;", "Your Account" }
                            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
                                TextField {
                                    label: "First Name",
                                    value: state.form.first_name.clone(),
                                    error: state.error_for(RegField::FirstName).map(str::to_string),
                                    on_input: edit(flow, RegField::FirstName),
                                }
                                TextField {
                                    label: "Last Name",
                                    value: state.form.last_name.clone(),
                                    error: state.error_for(RegField::LastName).map(str::to_string),
                                    on_input: edit(flow, RegField::LastName),
                                }
                            }
                            TextField {
                                label: "Email",
                                input_type: "email",
                                value: state.form.email.clone(),
                                error: state.error_for(RegField::Email).map(str::to_string),
                                on_input: edit(flow, RegField::Email),
                            }
                            TextField {
                                label: "Password",
                                input_type: "password",
                                value: state.form.password.clone(),
                                error: state.error_for(RegField::Password).map(str::to_string),
                                on_input: edit(flow, RegField::Password),
                            }
                            TextField {
                                label: "Confirm Password",
                                input_type: "password",
                                value: state.form.confirm_password.clone(),
                                error: state.error_for(RegField::ConfirmPassword).map(str::to_string),
                                on_input: edit(flow, RegField::ConfirmPassword),
                            }

                            h3 { style: "margin: 12px 0 0 0;", "Your Event" }
                            TextField {
                                label: "Event Name",
                                value: state.form.event_name.clone(),
                                error: state.error_for(RegField::EventName).map(str::to_string),
                                on_input: edit(flow, RegField::EventName),
                            }
                            TextField {
                                label: "Description (optional)",
                                value: state.form.event_description.clone(),
                                on_input: edit(flow, RegField::EventDescription),
                            }
                            TextField {
                                label: "Event Date",
                                input_type: "date",
                                value: state.form.event_date.clone(),
                                error: state.error_for(RegField::EventDate).map(str::to_string),
                                on_input: edit(flow, RegField::EventDate),
                            }
                            label { style: "font-size: 14px; font-weight: 500;",
                                "Expected Guests"
                                select {
                                    style: "width: 100%; padding: 10px; margin-top: 4px;",
                                    value: "{state.form.guest_count}",
                                    onchange: move |e: FormEvent| flow.write().edit(RegField::GuestCount, e.value()),
                                    option { value: "", "Select guest count" }
                                    for range in GUEST_RANGES {
                                        option { key: "{range}", value: "{range}", "{range} guests" }
                                    }
                                }
                                if let Some(err) = state.error_for(RegField::GuestCount) {
                                    p { style: "color: #dc2626; font-size: 13px; margin: 4px 0 0 0;", "{err}" }
                                }
                            }
                            TextField {
                                label: "Folder Name (optional)",
                                value: state.form.folder_name.clone(),
                                on_input: edit(flow, RegField::FolderName),
                            }
                            label { style: "font-size: 14px; font-weight: 500;",
                                "Gallery"
                                select {
                                    style: "width: 100%; padding: 10px; margin-top: 4px;",
                                    value: "{state.form.gallery_type.as_str()}",
                                    onchange: move |e: FormEvent| {
                                        flow.write().form.gallery_type = if e.value() == "public" {
                                            GalleryType::Public
                                        } else {
                                            GalleryType::Private
                                        };
                                    },
                                    option { value: "private", "Private (guests only)" }
                                    option { value: "public", "Public" }
                                }
                            }

                            if !state.duplicate_options.is_empty() {
                                div { style: "padding: 12px; background: #fef3c7; border-radius: 8px; display: flex; flex-direction: column; gap: 8px;",
                                    p { style: "margin: 0; font-weight: 600;", "This email is already registered" }
                                    for option in state.duplicate_options.clone() {
                                        button {
                                            key: "{option.label}",
                                            r#type: "button",
                                            class: "btn-secondary",
                                            onclick: move |_| {
                                                if option.action.as_deref() == Some("login") {
                                                    on_navigate.call(Screen::Login);
                                                } else if let Some(url) = option.url.clone() {
                                                    on_navigate.call(Screen::from_path(&url));
                                                }
                                            },
                                            "{option.label}"
                                        }
                                    }
                                }
                            }

                            button {
                                r#type: "submit",
                                class: "btn-primary",
                                style: "padding: 12px;",
                                disabled: state.busy,
                                if state.busy { "Creating account..." } else { "Create Account & Continue" }
                            }
                            button {
                                r#type: "button",
                                style: "background: none; border: none; color: #2563eb; cursor: pointer;",
                                onclick: move |_| on_navigate.call(Screen::Login),
                                "Already have an account? Sign in"
                            }
                        }
                    },
                    RegistrationStep::Payment => rsx! {
                        div { class: "card", style: "padding: 24px; display: flex; flex-direction: column; gap: 12px;",
                            h3 { style: "margin: 0;", "Complete Payment" }
                            if let Some(event) = state.event.clone() {
                                p { style: "margin: 0; color: #4b5563;", "Event: {event.name}" }
                            }
                            if let Some(secret) = state.client_secret.clone() {
                                CheckoutForm {
                                    client_secret: secret,
                                    on_outcome: {
                                        let send = send.clone();
                                        move |outcome: PaymentOutcome| {
                                            if outcome == PaymentOutcome::Succeeded {
                                                send(RegistrationAction::PaymentSucceeded);
                                            } else {
                                                let (title, text, _) = outcome_notice(&outcome);
                                                notifications.write().error(title, text);
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    },
                    RegistrationStep::Success => rsx! {
                        div { class: "card", style: "padding: 32px; text-align: center;",
                            div { style: "font-size: 48px;", "🎉" }
                            h2 { "You're all set!" }
                            if let Some(event) = state.event.clone() {
                                p { style: "color: #4b5563;", "Your event \"{event.name}\" is ready." }
                                if let Some(code) = event.login_code.clone() {
                                    p { "Guests can join with code "
                                        strong { style: "font-family: monospace;", "{code}" }
                                    }
                                }
                            }
                            button {
                                class: "btn-primary",
                                style: "padding: 12px 24px; margin-top: 16px;",
                                onclick: move |_| on_navigate.call(Screen::Dashboard),
                                "Go to Dashboard"
                            }
                        }
                    },
                }
            }
        }
    }
}
