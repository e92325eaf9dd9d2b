//! Three-step create-event wizard: Details, Package, Payment.
//!
//! Same shape as the camera reducer: [`CreateEventWizard::reduce`] is pure
//! and returns the requests to run as [`WizardEffect`]s. The modal runs them
//! and feeds the replies back as actions.

use crate::models::{NewEvent, Package, PackageType, PaymentIntentRequest};

pub const GUEST_RANGES: [&str; 4] = ["1-25", "26-50", "51-100", "100+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Details,
    Package,
    Payment,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Package => 2,
            WizardStep::Payment => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    EventDate,
    ExpectedGuests,
    LoginCode,
    FolderName,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub event_date: String,
    pub expected_guests: String,
    pub login_code: String,
    pub folder_name: String,
}

/// Lower-case, every character outside `[a-z0-9-]` becomes `-`
pub fn sanitize_folder_name(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl EventDraft {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Description => self.description = value,
            Field::EventDate => self.event_date = value,
            Field::ExpectedGuests => self.expected_guests = value,
            Field::LoginCode => self.login_code = value.to_uppercase(),
            Field::FolderName => self.folder_name = sanitize_folder_name(&value),
        }
    }

    pub fn validate(&self) -> Vec<(Field, String)> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push((Field::Name, "Event name is required".to_string()));
        }
        if self.event_date.trim().is_empty() {
            errors.push((Field::EventDate, "Event date is required".to_string()));
        }
        if !GUEST_RANGES.contains(&self.expected_guests.as_str()) {
            errors.push((
                Field::ExpectedGuests,
                "Expected guests is required".to_string(),
            ));
        }
        errors
    }

    pub fn to_request(&self, package_type: PackageType) -> NewEvent {
        NewEvent {
            name: self.name.trim().to_string(),
            description: non_empty(&self.description),
            event_date: self.event_date.trim().to_string(),
            expected_guests: self.expected_guests.clone(),
            login_code: non_empty(&self.login_code),
            folder_name: non_empty(&self.folder_name),
            package_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    Edit(Field, String),
    SubmitDetails,
    SelectPackage(PackageType),
    SubmitPackage,
    PaymentIntentCreated(String),
    PaymentIntentFailed(String),
    PaymentSucceeded,
    PaymentFailed(String),
    EventCreated,
    EventCreateFailed(String),
    Back,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    RequestPaymentIntent(PaymentIntentRequest),
    CreateEvent(NewEvent),
    Notify {
        title: String,
        description: String,
        destructive: bool,
    },
    /// Drop the cached event listing
    InvalidateEvents,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventWizard {
    pub step: WizardStep,
    pub draft: EventDraft,
    pub package: PackageType,
    pub errors: Vec<(Field, String)>,
    pub client_secret: Option<String>,
    /// A request is in flight; further submits are ignored
    pub busy: bool,
}

impl Default for CreateEventWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Details,
            draft: EventDraft::default(),
            package: PackageType::Premium,
            errors: Vec::new(),
            client_secret: None,
            busy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardTransition {
    pub state: CreateEventWizard,
    pub effects: Vec<WizardEffect>,
}

impl CreateEventWizard {
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn selected_package(&self) -> &'static Package {
        Package::for_type(self.package)
    }

    pub fn reduce(self, action: WizardAction) -> WizardTransition {
        let mut state = self;
        let mut effects = Vec::new();

        match action {
            WizardAction::Edit(field, value) => {
                state.draft.set(field, value);
                state.errors.retain(|(f, _)| *f != field);
            }
            WizardAction::SubmitDetails => {
                state.errors = state.draft.validate();
                if state.errors.is_empty() {
                    state.step = WizardStep::Package;
                }
            }
            WizardAction::SelectPackage(package) => {
                if state.step == WizardStep::Package {
                    state.package = package;
                }
            }
            WizardAction::SubmitPackage => {
                if state.step == WizardStep::Package && !state.busy {
                    state.busy = true;
                    effects.push(WizardEffect::RequestPaymentIntent(
                        PaymentIntentRequest::ForDraft {
                            package_type: state.package,
                            event_data: state.draft.to_request(state.package),
                        },
                    ));
                }
            }
            WizardAction::PaymentIntentCreated(secret) => {
                state.busy = false;
                state.client_secret = Some(secret);
                state.step = WizardStep::Payment;
            }
            WizardAction::PaymentIntentFailed(message) => {
                state.busy = false;
                effects.push(WizardEffect::Notify {
                    title: "Payment setup failed".to_string(),
                    description: message,
                    destructive: true,
                });
            }
            WizardAction::PaymentSucceeded => {
                if state.step == WizardStep::Payment && !state.busy {
                    state.busy = true;
                    effects.push(WizardEffect::CreateEvent(
                        state.draft.to_request(state.package),
                    ));
                }
            }
            WizardAction::PaymentFailed(message) => {
                effects.push(WizardEffect::Notify {
                    title: "Payment Failed".to_string(),
                    description: message,
                    destructive: true,
                });
            }
            WizardAction::EventCreated => {
                effects.push(WizardEffect::Notify {
                    title: "Event created successfully".to_string(),
                    description: "Your event has been created and is ready for photos!"
                        .to_string(),
                    destructive: false,
                });
                effects.push(WizardEffect::InvalidateEvents);
                effects.push(WizardEffect::Close);
                state = CreateEventWizard::default();
            }
            WizardAction::EventCreateFailed(message) => {
                state.busy = false;
                effects.push(WizardEffect::Notify {
                    title: "Failed to create event".to_string(),
                    description: message,
                    destructive: true,
                });
            }
            WizardAction::Back => {
                if !state.busy {
                    state.step = match state.step {
                        WizardStep::Details | WizardStep::Package => WizardStep::Details,
                        WizardStep::Payment => {
                            state.client_secret = None;
                            WizardStep::Package
                        }
                    };
                }
            }
            WizardAction::Reset => state = CreateEventWizard::default(),
        }

        WizardTransition { state, effects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CreateEventWizard {
        let mut wizard = CreateEventWizard::default();
        for (field, value) in [
            (Field::Name, "Summer Gala"),
            (Field::EventDate, "2025-08-01"),
            (Field::ExpectedGuests, "51-100"),
        ] {
            wizard = wizard.reduce(WizardAction::Edit(field, value.to_string())).state;
        }
        wizard
    }

    #[test]
    fn test_empty_name_blocks_without_request() {
        let mut wizard = filled();
        wizard.draft.name = "   ".to_string();

        let t = wizard.reduce(WizardAction::SubmitDetails);
        assert!(t.effects.is_empty());
        assert_eq!(t.state.step, WizardStep::Details);
        assert_eq!(t.state.error_for(Field::Name), Some("Event name is required"));

        // Package submit is ignored while still on details
        let t = t.state.reduce(WizardAction::SubmitPackage);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_inputs_are_normalized() {
        let wizard = CreateEventWizard::default()
            .reduce(WizardAction::Edit(Field::LoginCode, "gala25".to_string()))
            .state
            .reduce(WizardAction::Edit(
                Field::FolderName,
                "Summer Gala_2025!".to_string(),
            ))
            .state;
        assert_eq!(wizard.draft.login_code, "GALA25");
        assert_eq!(wizard.draft.folder_name, "summer-gala-2025-");
    }

    #[test]
    fn test_happy_path_defaults_to_premium() {
        let t = filled().reduce(WizardAction::SubmitDetails);
        assert_eq!(t.state.step, WizardStep::Package);
        assert_eq!(t.state.package, PackageType::Premium);

        let t = t.state.reduce(WizardAction::SubmitPackage);
        match &t.effects[..] {
            [WizardEffect::RequestPaymentIntent(PaymentIntentRequest::ForDraft {
                package_type,
                event_data,
            })] => {
                assert_eq!(*package_type, PackageType::Premium);
                assert_eq!(event_data.name, "Summer Gala");
            }
            other => panic!("unexpected effects {:?}", other),
        }

        // Double submit while the intent is pending
        let t = t.state.reduce(WizardAction::SubmitPackage);
        assert!(t.effects.is_empty());

        let t = t
            .state
            .reduce(WizardAction::PaymentIntentCreated("pi_secret".to_string()));
        assert_eq!(t.state.step, WizardStep::Payment);

        let t = t.state.reduce(WizardAction::PaymentSucceeded);
        assert!(matches!(t.effects[..], [WizardEffect::CreateEvent(_)]));

        let t = t.state.reduce(WizardAction::EventCreated);
        assert!(t.effects.contains(&WizardEffect::InvalidateEvents));
        assert!(t.effects.contains(&WizardEffect::Close));
        assert_eq!(t.state, CreateEventWizard::default());
    }

    #[test]
    fn test_intent_failure_stays_on_package() {
        let t = filled()
            .reduce(WizardAction::SubmitDetails)
            .state
            .reduce(WizardAction::SubmitPackage)
            .state
            .reduce(WizardAction::PaymentIntentFailed("Stripe unavailable".to_string()));
        assert_eq!(t.state.step, WizardStep::Package);
        assert!(!t.state.busy);
        assert_eq!(
            t.effects,
            vec![WizardEffect::Notify {
                title: "Payment setup failed".to_string(),
                description: "Stripe unavailable".to_string(),
                destructive: true,
            }]
        );
    }
}
