use super::checkout_form::{outcome_notice, CheckoutForm};
use crate::cache::QueryClient;
use crate::forms::create_event::{Field, WizardTransition, GUEST_RANGES};
use crate::forms::{CreateEventWizard, WizardAction, WizardEffect, WizardStep};
use crate::models::package::CATALOG;
use crate::models::PaymentOutcome;
use crate::notifications::{Notifications, Variant};
use crate::services::{event_service, ApiClient};
use dioxus::prelude::*;

/// Runs the requests a wizard transition asked for and feeds replies back
fn run_effects(
    transition: WizardTransition,
    mut wizard: Signal<CreateEventWizard>,
    mut notifications: Signal<Notifications>,
    mut query: QueryClient,
    client: ApiClient,
    on_close: EventHandler<()>,
) {
    wizard.set(transition.state);

    for effect in transition.effects {
        match effect {
            WizardEffect::RequestPaymentIntent(request) => {
                let client = client.clone();
                spawn(async move {
                    let action = match event_service::create_payment_intent(&client, &request).await {
                        Ok(secret) => WizardAction::PaymentIntentCreated(secret),
                        Err(e) => WizardAction::PaymentIntentFailed(e.to_string()),
                    };
                    dispatch(action, wizard, notifications, query, client, on_close);
                });
            }
            WizardEffect::CreateEvent(request) => {
                let client = client.clone();
                spawn(async move {
                    let action = match event_service::create_event(&client, &request).await {
                        Ok(_) => WizardAction::EventCreated,
                        Err(e) => WizardAction::EventCreateFailed(e.message_or(&e.to_string())),
                    };
                    dispatch(action, wizard, notifications, query, client, on_close);
                });
            }
            WizardEffect::Notify {
                title,
                description,
                destructive,
            } => {
                let variant = if destructive {
                    Variant::Destructive
                } else {
                    Variant::Default
                };
                notifications.write().push(title, Some(description), variant);
            }
            WizardEffect::InvalidateEvents => query.invalidate(event_service::EVENTS_PATH),
            WizardEffect::Close => on_close.call(()),
        }
    }
}

fn dispatch(
    action: WizardAction,
    wizard: Signal<CreateEventWizard>,
    notifications: Signal<Notifications>,
    query: QueryClient,
    client: ApiClient,
    on_close: EventHandler<()>,
) {
    let transition = wizard.peek().clone().reduce(action);
    run_effects(transition, wizard, notifications, query, client, on_close);
}

#[component]
pub fn CreateEventModal(on_close: EventHandler<()>) -> Element {
    let wizard = use_signal(CreateEventWizard::default);
    let mut notifications = use_context::<Signal<Notifications>>();
    let query = use_context::<QueryClient>();
    let client = use_context::<ApiClient>();

    let send = move |action: WizardAction| {
        dispatch(action, wizard, notifications, query, client.clone(), on_close);
    };

    let state = wizard();
    let step = state.step;
    let selected = state.selected_package();

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 500;",
            div { class: "card", style: "background: #fff; width: 100%; max-width: 560px; max-height: 90vh; overflow-y: auto; padding: 24px; border-radius: 12px;",
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h2 { style: "margin: 0;", "Create New Event" }
                    button {
                        style: "border: none; background: none; font-size: 20px; cursor: pointer;",
                        onclick: {
                            let send = send.clone();
                            move |_| {
                                send(WizardAction::Reset);
                                on_close.call(());
                            }
                        },
                        "✕"
                    }
                }
                StepIndicator { current: step }

                match step {
                    WizardStep::Details => rsx! {
                        form {
                            style: "display: flex; flex-direction: column; gap: 12px;",
                            onsubmit: {
                                let send = send.clone();
                                move |evt: FormEvent| {
                                    evt.prevent_default();
                                    send(WizardAction::SubmitDetails);
                                }
                            },
                            TextField {
                                label: "Event Name",
                                value: state.draft.name.clone(),
                                error: state.error_for(Field::Name).map(str::to_string),
                                on_input: {
                                    let send = send.clone();
                                    move |v| send(WizardAction::Edit(Field::Name, v))
                                },
                            }
                            TextField {
                                label: "Description (optional)",
                                value: state.draft.description.clone(),
                                on_input: {
                                    let send = send.clone();
                                    move |v| send(WizardAction::Edit(Field::Description, v))
                                },
                            }
                            TextField {
                                label: "Event Date",
                                input_type: "date",
                                value: state.draft.event_date.clone(),
                                error: state.error_for(Field::EventDate).map(str::to_string),
                                on_input: {
                                    let send = send.clone();
                                    move |v| send(WizardAction::Edit(Field::EventDate, v))
                                },
                            }
                            label { style: "font-size: 14px; font-weight: 500;",
                                "Expected Guests"
                                select {
                                    style: "width: 100%; padding: 10px; margin-top: 4px;",
                                    value: "{state.draft.expected_guests}",
                                    onchange: {
                                        let send = send.clone();
                                        move |e: FormEvent| send(WizardAction::Edit(Field::ExpectedGuests, e.value()))
                                    },
                                    option { value: "", "Select guest count" }
                                    for range in GUEST_RANGES {
                                        option { key: "{range}", value: "{range}", "{range} guests" }
                                    }
                                }
                                if let Some(err) = state.error_for(Field::ExpectedGuests) {
                                    p { style: "color: #dc2626; font-size: 13px; margin: 4px 0 0 0;", "{err}" }
                                }
                            }
                            TextField {
                                label: "Custom Login Code (optional)",
                                value: state.draft.login_code.clone(),
                                on_input: {
                                    let send = send.clone();
                                    move |v| send(WizardAction::Edit(Field::LoginCode, v))
                                },
                            }
                            TextField {
                                label: "Folder Name (optional)",
                                value: state.draft.folder_name.clone(),
                                on_input: {
                                    let send = send.clone();
                                    move |v| send(WizardAction::Edit(Field::FolderName, v))
                                },
                            }
                            button { r#type: "submit", class: "btn-primary", style: "padding: 12px;", "Continue" }
                        }
                    },
                    WizardStep::Package => rsx! {
                        div { style: "display: flex; flex-direction: column; gap: 12px;",
                            for pkg in CATALOG.iter() {
                                div {
                                    key: "{pkg.name}",
                                    class: "card",
                                    style: if pkg.kind == state.package { "padding: 16px; border: 2px solid #7c3aed; cursor: pointer;" } else { "padding: 16px; border: 1px solid #e5e7eb; cursor: pointer;" },
                                    onclick: {
                                        let send = send.clone();
                                        let kind = pkg.kind;
                                        move |_| send(WizardAction::SelectPackage(kind))
                                    },
                                    div { style: "display: flex; justify-content: space-between;",
                                        strong { "{pkg.kind.icon()} {pkg.name}" }
                                        strong { "${pkg.price_usd}" }
                                    }
                                    if pkg.popular {
                                        span { style: "font-size: 12px; color: #7c3aed;", "Most Popular" }
                                    }
                                    ul { style: "margin: 8px 0 0 0; padding-left: 20px; font-size: 14px; color: #374151;",
                                        for feature in pkg.features.iter() {
                                            li { key: "{feature}", "{feature}" }
                                        }
                                    }
                                }
                            }
                            div { style: "display: flex; justify-content: space-between;",
                                button {
                                    class: "btn-secondary",
                                    onclick: {
                                        let send = send.clone();
                                        move |_| send(WizardAction::Back)
                                    },
                                    "Back"
                                }
                                button {
                                    class: "btn-primary",
                                    disabled: state.busy,
                                    onclick: {
                                        let send = send.clone();
                                        move |_| send(WizardAction::SubmitPackage)
                                    },
                                    if state.busy { "Setting up payment..." } else { "Continue to Payment" }
                                }
                            }
                        }
                    },
                    WizardStep::Payment => rsx! {
                        div { style: "display: flex; flex-direction: column; gap: 12px;",
                            h4 { style: "margin: 0;", "Payment Information" }
                            div { style: "background: #f9fafb; border-radius: 8px; padding: 12px; display: flex; justify-content: space-between;",
                                span { "{selected.name} Package" }
                                strong { "${selected.price_usd}" }
                            }
                            if let Some(secret) = state.client_secret.clone() {
                                CheckoutForm {
                                    client_secret: secret,
                                    on_outcome: {
                                        let send = send.clone();
                                        move |outcome: PaymentOutcome| {
                                            match outcome {
                                                PaymentOutcome::Succeeded => send(WizardAction::PaymentSucceeded),
                                                PaymentOutcome::Failed(msg) => send(WizardAction::PaymentFailed(msg)),
                                                other => {
                                                    let (title, text, _) = outcome_notice(&other);
                                                    notifications.write().error(title, text);
                                                }
                                            }
                                        }
                                    },
                                }
                            }
                            button {
                                class: "btn-secondary",
                                disabled: state.busy,
                                onclick: {
                                    let send = send.clone();
                                    move |_| send(WizardAction::Back)
                                },
                                "Back"
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn StepIndicator(current: WizardStep) -> Element {
    let labels = [
        (WizardStep::Details, "Event Details"),
        (WizardStep::Package, "Package"),
        (WizardStep::Payment, "Payment"),
    ];
    rsx! {
        div { style: "display: flex; gap: 8px; margin: 16px 0;",
            for (step , label) in labels {
                div {
                    key: "{label}",
                    style: if step.number() <= current.number() { "flex: 1; padding: 6px; text-align: center; border-radius: 6px; background: #7c3aed; color: #fff; font-size: 13px;" } else { "flex: 1; padding: 6px; text-align: center; border-radius: 6px; background: #f3f4f6; color: #6b7280; font-size: 13px;" },
                    "{step.number()}. {label}"
                }
            }
        }
    }
}

/// Labelled text input with an optional field error
#[component]
pub fn TextField(
    label: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] error: Option<String>,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label { style: "font-size: 14px; font-weight: 500;",
            "{label}"
            input {
                r#type: "{input_type}",
                value: "{value}",
                style: if error.is_some() { "width: 100%; padding: 10px; margin-top: 4px; border: 1px solid #dc2626;" } else { "width: 100%; padding: 10px; margin-top: 4px;" },
                oninput: move |e| on_input.call(e.value()),
            }
            if let Some(ref err) = error {
                p { style: "color: #dc2626; font-size: 13px; margin: 4px 0 0 0;", "{err}" }
            }
        }
    }
}
