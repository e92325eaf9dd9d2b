//! Organizer sign-up: account, first event and payment in one flow.

use super::is_valid_email;
use crate::models::{DirectEvent, Event, GalleryType, Package, PackageType, PaymentIntentRequest};
use vipix_auth::{AuthError, AuthUser, DuplicateEmailOption, RegisterRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    EventName,
    EventDescription,
    EventDate,
    GuestCount,
    FolderName,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub event_name: String,
    pub event_description: String,
    pub event_date: String,
    pub guest_count: String,
    pub folder_name: String,
    pub gallery_type: GalleryType,
}

/// Event name lower-cased with whitespace runs collapsed to `-`
pub fn default_folder_name(event_name: &str) -> String {
    event_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl RegistrationForm {
    pub fn set(&mut self, field: RegField, value: String) {
        match field {
            RegField::FirstName => self.first_name = value,
            RegField::LastName => self.last_name = value,
            RegField::Email => self.email = value,
            RegField::Password => self.password = value,
            RegField::ConfirmPassword => self.confirm_password = value,
            RegField::EventName => self.event_name = value,
            RegField::EventDescription => self.event_description = value,
            RegField::EventDate => self.event_date = value,
            RegField::GuestCount => self.guest_count = value,
            RegField::FolderName => self.folder_name = value,
        }
    }

    pub fn validate(&self) -> Vec<(RegField, String)> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: RegField, msg: &str| {
            if !ok {
                errors.push((field, msg.to_string()));
            }
        };
        check(
            self.first_name.trim().chars().count() >= 2,
            RegField::FirstName,
            "First name must be at least 2 characters",
        );
        check(
            self.last_name.trim().chars().count() >= 2,
            RegField::LastName,
            "Last name must be at least 2 characters",
        );
        check(
            is_valid_email(&self.email),
            RegField::Email,
            "Please enter a valid email address",
        );
        check(
            self.password.chars().count() >= 6,
            RegField::Password,
            "Password must be at least 6 characters",
        );
        check(
            self.password == self.confirm_password,
            RegField::ConfirmPassword,
            "Passwords don't match",
        );
        check(
            self.event_name.trim().chars().count() >= 3,
            RegField::EventName,
            "Event name must be at least 3 characters",
        );
        check(
            !self.event_date.trim().is_empty(),
            RegField::EventDate,
            "Please select an event date",
        );
        check(
            !self.guest_count.trim().is_empty(),
            RegField::GuestCount,
            "Please estimate guest count",
        );
        errors
    }

    pub fn register_request(&self) -> RegisterRequest {
        let email = self.email.trim().to_string();
        RegisterRequest {
            username: email.clone(),
            email,
            password: self.password.clone(),
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
        }
    }

    pub fn event_request(&self, package: PackageType, user_id: i64) -> DirectEvent {
        let folder_name = match self.folder_name.trim() {
            "" => default_folder_name(self.event_name.trim()),
            given => given.to_string(),
        };
        DirectEvent {
            name: self.event_name.trim().to_string(),
            description: self.event_description.trim().to_string(),
            event_date: self.event_date.clone(),
            package_type: package,
            folder_name,
            user_id,
            gallery_type: self.gallery_type,
            login_code: None,
            status: None,
            price: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationStep {
    #[default]
    Registration,
    Payment,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationAction {
    Submit,
    UserCreated(AuthUser),
    RegisterFailed(AuthError),
    EventCreated(Event),
    EventFailed(String),
    PaymentIntentCreated(String),
    PaymentIntentFailed,
    PaymentSucceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationEffect {
    Register(RegisterRequest),
    CreateEvent(DirectEvent),
    RequestPaymentIntent(PaymentIntentRequest),
    /// Remember the new account as the signed-in user
    StoreUser(AuthUser),
    Notify {
        title: String,
        description: String,
        destructive: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationFlow {
    pub step: RegistrationStep,
    pub form: RegistrationForm,
    pub package: PackageType,
    pub errors: Vec<(RegField, String)>,
    pub user: Option<AuthUser>,
    pub event: Option<Event>,
    pub client_secret: Option<String>,
    /// Choices offered when the email is already registered
    pub duplicate_options: Vec<DuplicateEmailOption>,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationTransition {
    pub state: RegistrationFlow,
    pub effects: Vec<RegistrationEffect>,
}

fn notify(title: &str, description: impl Into<String>, destructive: bool) -> RegistrationEffect {
    RegistrationEffect::Notify {
        title: title.to_string(),
        description: description.into(),
        destructive,
    }
}

impl RegistrationFlow {
    /// Starts with the package from `?package=`, standard otherwise
    pub fn new(package_param: Option<&str>) -> Self {
        Self {
            package: package_param
                .and_then(PackageType::from_query)
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn error_for(&self, field: RegField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn edit(&mut self, field: RegField, value: String) {
        self.form.set(field, value);
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn reduce(self, action: RegistrationAction) -> RegistrationTransition {
        let mut state = self;
        let mut effects = Vec::new();

        match action {
            RegistrationAction::Submit => {
                if state.step == RegistrationStep::Registration && !state.busy {
                    state.errors = state.form.validate();
                    if state.errors.is_empty() {
                        state.busy = true;
                        state.duplicate_options.clear();
                        effects.push(RegistrationEffect::Register(state.form.register_request()));
                    }
                }
            }
            RegistrationAction::UserCreated(user) => {
                effects.push(RegistrationEffect::CreateEvent(
                    state.form.event_request(state.package, user.id),
                ));
                effects.push(RegistrationEffect::StoreUser(user.clone()));
                state.user = Some(user);
            }
            RegistrationAction::RegisterFailed(AuthError::DuplicateEmail { options, .. }) => {
                state.busy = false;
                state.duplicate_options = options;
                effects.push(notify(
                    "Account Already Exists",
                    "This email is already registered. Choose an option below:",
                    true,
                ));
            }
            RegistrationAction::RegisterFailed(error) => {
                state.busy = false;
                effects.push(notify("Registration Failed", error.to_string(), true));
            }
            RegistrationAction::EventCreated(event) => {
                let (Some(user), true) = (state.user.as_ref(), event.id > 0) else {
                    state.busy = false;
                    effects.push(notify(
                        "Registration Failed",
                        "Event creation failed: Invalid event data received",
                        true,
                    ));
                    return RegistrationTransition { state, effects };
                };
                let name = user.first_name.clone().unwrap_or_default();
                effects.push(notify(
                    "Account Created Successfully!",
                    format!("Welcome {}! Your event \"{}\" is ready.", name, event.name),
                    false,
                ));
                effects.push(RegistrationEffect::RequestPaymentIntent(
                    PaymentIntentRequest::ForEvent {
                        amount: Package::for_type(state.package).price_usd,
                        event_id: event.id,
                        user_id: user.id,
                    },
                ));
                state.event = Some(event);
            }
            RegistrationAction::EventFailed(message) => {
                state.busy = false;
                effects.push(notify(
                    "Registration Failed",
                    format!("Event creation failed: {}", message),
                    true,
                ));
            }
            RegistrationAction::PaymentIntentCreated(secret) => {
                state.busy = false;
                state.client_secret = Some(secret);
                state.step = RegistrationStep::Payment;
            }
            RegistrationAction::PaymentIntentFailed => {
                state.busy = false;
                effects.push(notify(
                    "Payment Setup Error",
                    "There was an issue setting up payment. Please contact support.",
                    true,
                ));
            }
            RegistrationAction::PaymentSucceeded => {
                if state.step == RegistrationStep::Payment {
                    state.step = RegistrationStep::Success;
                    effects.push(notify(
                        "Payment Successful!",
                        "Your event is ready! Your QR code is being prepared...",
                        false,
                    ));
                }
            }
        }

        RegistrationTransition { state, effects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Sarah".to_string(),
            last_name: "Miller".to_string(),
            email: "sarah@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            event_name: "Sarah & John Wedding".to_string(),
            event_date: "2025-06-15".to_string(),
            guest_count: "51-100".to_string(),
            ..RegistrationForm::default()
        }
    }

    fn user() -> AuthUser {
        AuthUser {
            id: 12,
            username: "sarah@example.com".to_string(),
            email: "sarah@example.com".to_string(),
            first_name: Some("Sarah".to_string()),
            last_name: Some("Miller".to_string()),
        }
    }

    #[test]
    fn test_password_mismatch_reported_on_confirm() {
        let mut form = valid_form();
        form.confirm_password = "other".to_string();
        let errors = form.validate();
        assert_eq!(
            errors,
            vec![(RegField::ConfirmPassword, "Passwords don't match".to_string())]
        );
    }

    #[test]
    fn test_folder_name_defaults_from_event_name() {
        let request = valid_form().event_request(PackageType::Premium, 12);
        assert_eq!(request.folder_name, "sarah-&-john-wedding");
        assert_eq!(request.user_id, 12);
        assert_eq!(request.gallery_type, GalleryType::Private);
    }

    #[test]
    fn test_package_from_query() {
        assert_eq!(RegistrationFlow::new(Some("premium")).package, PackageType::Premium);
        assert_eq!(RegistrationFlow::new(Some("gold")).package, PackageType::Standard);
        assert_eq!(RegistrationFlow::new(None).package, PackageType::Standard);
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let flow = RegistrationFlow::new(None);
        let t = flow.reduce(RegistrationAction::Submit);
        assert!(t.effects.is_empty());
        assert!(t.state.error_for(RegField::Email).is_some());
    }

    #[test]
    fn test_full_flow_requests_payment_for_package_price() {
        let mut flow = RegistrationFlow::new(Some("premium"));
        flow.form = valid_form();

        let t = flow.reduce(RegistrationAction::Submit);
        match &t.effects[..] {
            [RegistrationEffect::Register(req)] => assert_eq!(req.username, "sarah@example.com"),
            other => panic!("unexpected effects {:?}", other),
        }

        let t = t.state.reduce(RegistrationAction::UserCreated(user()));
        assert!(matches!(t.effects[0], RegistrationEffect::CreateEvent(_)));

        let event = Event {
            id: 33,
            name: "Sarah & John Wedding".to_string(),
            ..Event::default()
        };
        let t = t.state.reduce(RegistrationAction::EventCreated(event));
        assert!(t.effects.contains(&RegistrationEffect::RequestPaymentIntent(
            PaymentIntentRequest::ForEvent {
                amount: 75,
                event_id: 33,
                user_id: 12,
            }
        )));

        let t = t
            .state
            .reduce(RegistrationAction::PaymentIntentCreated("pi_1".to_string()));
        assert_eq!(t.state.step, RegistrationStep::Payment);
        let t = t.state.reduce(RegistrationAction::PaymentSucceeded);
        assert_eq!(t.state.step, RegistrationStep::Success);
    }

    #[test]
    fn test_duplicate_email_keeps_options() {
        let mut flow = RegistrationFlow::new(None);
        flow.form = valid_form();
        let t = flow.reduce(RegistrationAction::Submit).state.reduce(
            RegistrationAction::RegisterFailed(AuthError::DuplicateEmail {
                message: "An account with this email already exists".to_string(),
                options: vec![DuplicateEmailOption {
                    label: "Sign in instead".to_string(),
                    action: Some("login".to_string()),
                    url: Some("/login".to_string()),
                }],
            }),
        );
        assert_eq!(t.state.duplicate_options.len(), 1);
        assert!(!t.state.busy);
        assert!(matches!(
            &t.effects[0],
            RegistrationEffect::Notify { title, .. } if title == "Account Already Exists"
        ));
    }
}
