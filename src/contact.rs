//! Contact form validation and submission flow.

use std::cell::RefCell;

use serde::Serialize;
use thiserror::Error;

use crate::config::EmailJsConfig;
use crate::telemetry::{log_event, LogLevel};

pub const FORM_ID: &str = "contact-form";
pub const NAME_FIELD_ID: &str = "contact-name";
pub const EMAIL_FIELD_ID: &str = "contact-email";
pub const SUBJECT_FIELD_ID: &str = "contact-subject";
pub const MESSAGE_FIELD_ID: &str = "contact-message";
pub const DATE_FIELD_ID: &str = "contact-date";
pub const SUBMIT_BUTTON_ID: &str = "submit-btn";
pub const SUBMIT_TEXT_ID: &str = "btn-text";
pub const SUBMIT_ICON_ID: &str = "btn-icon";
pub const STATUS_ID: &str = "form-status";

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUBMIT_ICON: &str = "fa-solid fa-paper-plane";
pub const SENDING_ICON: &str = "fa-solid fa-spinner fa-spin";

pub const STATUS_HIDE_MS: u32 = 5_000;
pub const SUCCESS_RELEASE_MS: u32 = 2_000;

pub const SENT_MESSAGE: &str = "✅ Message sent successfully! I'll get back to you soon.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "⚠️ EmailJS not configured yet. Please check the setup instructions.";
pub const SEND_FAILED_MESSAGE: &str =
    "❌ Failed to send message. Please try again or email me directly.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<Self, FormError> {
        let trimmed = self.trimmed();

        if [&trimmed.name, &trimmed.email, &trimmed.subject, &trimmed.message]
            .iter()
            .any(|value| value.is_empty())
        {
            return Err(FormError::MissingFields);
        }
        if !is_valid_email(&trimmed.email) {
            return Err(FormError::InvalidEmail);
        }

        Ok(trimmed)
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields!")]
    MissingFields,
    #[error("Please enter a valid email address!")]
    InvalidEmail,
    #[error("A message is already being sent.")]
    Busy,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("email service answered with status {status}")]
    Rejected { status: u16 },
}

/// Accepts `local@domain.tld` shapes: one `@`, no whitespace, and a dot in
/// the domain with text on both sides.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(position, character)| {
            character == '.' && position > 0 && position + 1 < domain.len()
        })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub date: String,
}

/// JSON body for the EmailJS `email/send` endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailJsRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl EmailJsRequest {
    pub fn new(config: &EmailJsConfig, fields: ContactFields, date: String) -> Self {
        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            user_id: config.public_key.clone(),
            template_params: TemplateParams {
                name: fields.name,
                email: fields.email,
                subject: fields.subject,
                message: fields.message,
                date,
            },
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, request: &EmailJsRequest) -> Result<(), DeliveryError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn success(text: &str) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.to_string(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Inline style applied to the status element.
    pub fn style_properties(&self) -> [(&'static str, &'static str); 3] {
        match self.kind {
            StatusKind::Success => [
                ("background", "rgba(34, 197, 94, 0.1)"),
                ("border", "1px solid rgba(34, 197, 94, 0.3)"),
                ("color", "#22c55e"),
            ],
            StatusKind::Error => [
                ("background", "rgba(239, 68, 68, 0.1)"),
                ("border", "1px solid rgba(239, 68, 68, 0.3)"),
                ("color", "#ef4444"),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub status: StatusMessage,
    pub clear_fields: bool,
    pub release_after_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Sending,
}

#[derive(Debug)]
pub struct ContactForm {
    config: EmailJsConfig,
    phase: FormPhase,
}

impl ContactForm {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            config,
            phase: FormPhase::Idle,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Validates the fields and moves to sending. On error the form stays
    /// idle and nothing is sent.
    pub fn begin(
        &mut self,
        fields: &ContactFields,
        date: String,
    ) -> Result<EmailJsRequest, FormError> {
        if self.phase == FormPhase::Sending {
            return Err(FormError::Busy);
        }

        let fields = fields.validate()?;
        self.phase = FormPhase::Sending;
        Ok(EmailJsRequest::new(&self.config, fields, date))
    }

    pub fn resolve(&mut self, outcome: Result<(), DeliveryError>) -> Resolution {
        self.phase = FormPhase::Idle;

        match outcome {
            Ok(()) => Resolution {
                status: StatusMessage::success(SENT_MESSAGE),
                clear_fields: true,
                release_after_ms: SUCCESS_RELEASE_MS,
            },
            Err(_) => Resolution {
                status: StatusMessage::error(if self.config.is_configured() {
                    SEND_FAILED_MESSAGE
                } else {
                    NOT_CONFIGURED_MESSAGE
                }),
                clear_fields: false,
                release_after_ms: 0,
            },
        }
    }
}

/// The on-page pieces the submission flow drives.
pub trait FormView {
    fn show_pending(&self);
    /// Shows a status and hides it again after [`STATUS_HIDE_MS`].
    fn show_status(&self, status: &StatusMessage);
    fn clear_fields(&self);
    /// Re-enables the submit control, immediately when `after_ms` is zero.
    fn release_submit(&self, after_ms: u32);
}

pub async fn submit<M: Mailer, V: FormView>(
    form: &RefCell<ContactForm>,
    mailer: &M,
    view: &V,
    fields: &ContactFields,
    date: String,
) {
    let begun = form.borrow_mut().begin(fields, date);
    let request = match begun {
        Ok(request) => request,
        Err(FormError::Busy) => return,
        Err(error) => {
            log_event(
                LogLevel::Debug,
                "contact_rejected",
                serde_json::json!({ "reason": error.to_string() }),
            );
            view.show_status(&StatusMessage::error(error.to_string()));
            return;
        }
    };

    view.show_pending();
    log_event(
        LogLevel::Info,
        "contact_send_start",
        serde_json::json!({ "service_configured": form.borrow().config.is_configured() }),
    );

    let outcome = mailer.send(&request).await;
    if let Err(error) = &outcome {
        log_event(
            LogLevel::Warn,
            "contact_send_failed",
            serde_json::json!({ "error": error.to_string() }),
        );
    }

    let resolution = form.borrow_mut().resolve(outcome);
    view.show_status(&resolution.status);
    if resolution.clear_fields {
        view.clear_fields();
    }
    view.release_submit(resolution.release_after_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    enum ViewEvent {
        Pending,
        Status(StatusMessage),
        Cleared,
        Released(u32),
    }

    #[derive(Default)]
    struct RecordingView {
        events: RefCell<Vec<ViewEvent>>,
    }

    impl FormView for RecordingView {
        fn show_pending(&self) {
            self.events.borrow_mut().push(ViewEvent::Pending);
        }

        fn show_status(&self, status: &StatusMessage) {
            self.events.borrow_mut().push(ViewEvent::Status(status.clone()));
        }

        fn clear_fields(&self) {
            self.events.borrow_mut().push(ViewEvent::Cleared);
        }

        fn release_submit(&self, after_ms: u32) {
            self.events.borrow_mut().push(ViewEvent::Released(after_ms));
        }
    }

    struct FakeMailer {
        outcome: Result<(), DeliveryError>,
        calls: Cell<usize>,
        last: RefCell<Option<EmailJsRequest>>,
    }

    impl FakeMailer {
        fn answering(outcome: Result<(), DeliveryError>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
                last: RefCell::new(None),
            }
        }
    }

    impl Mailer for FakeMailer {
        async fn send(&self, request: &EmailJsRequest) -> Result<(), DeliveryError> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some(request.clone());
            self.outcome.clone()
        }
    }

    fn valid_fields() -> ContactFields {
        ContactFields {
            name: " Ada ".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Nice site".to_string(),
        }
    }

    fn configured() -> EmailJsConfig {
        EmailJsConfig {
            service_id: "service_live".to_string(),
            template_id: "template_live".to_string(),
            public_key: "public_live".to_string(),
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a b@c.d"));
    }

    #[test]
    fn each_empty_field_is_rejected() {
        let blanks: [fn(&mut ContactFields); 4] = [
            |fields| fields.name = "  ".to_string(),
            |fields| fields.email = String::new(),
            |fields| fields.subject = "\t".to_string(),
            |fields| fields.message = String::new(),
        ];

        for blank in blanks {
            let mut fields = valid_fields();
            blank(&mut fields);
            assert_eq!(fields.validate(), Err(FormError::MissingFields));
        }
    }

    #[test]
    fn request_carries_trimmed_fields_and_credentials() {
        let mut form = ContactForm::new(configured());
        let request = form
            .begin(&valid_fields(), "Monday".to_string())
            .expect("fields are valid");

        assert_eq!(form.phase(), FormPhase::Sending);
        let body = serde_json::to_value(&request).expect("request serializes");
        assert_eq!(body["service_id"], "service_live");
        assert_eq!(body["user_id"], "public_live");
        assert_eq!(body["template_params"]["name"], "Ada");
        assert_eq!(body["template_params"]["date"], "Monday");
    }

    #[test]
    fn second_submit_while_sending_is_busy() {
        let mut form = ContactForm::new(configured());
        form.begin(&valid_fields(), String::new()).expect("fields are valid");

        assert_eq!(form.begin(&valid_fields(), String::new()), Err(FormError::Busy));
    }

    #[test]
    fn failure_message_depends_on_configuration() {
        let mut unconfigured = ContactForm::new(EmailJsConfig::default());
        let resolution = unconfigured.resolve(Err(DeliveryError::Rejected { status: 400 }));
        assert_eq!(resolution.status.text, NOT_CONFIGURED_MESSAGE);
        assert_eq!(resolution.release_after_ms, 0);
        assert!(!resolution.clear_fields);

        let mut live = ContactForm::new(configured());
        let resolution = live.resolve(Err(DeliveryError::Network("offline".to_string())));
        assert_eq!(resolution.status.text, SEND_FAILED_MESSAGE);
        assert_eq!(resolution.status.kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn valid_submit_goes_pending_then_clears_on_success() {
        let form = RefCell::new(ContactForm::new(configured()));
        let mailer = FakeMailer::answering(Ok(()));
        let view = RecordingView::default();

        submit(&form, &mailer, &view, &valid_fields(), "today".to_string()).await;

        assert_eq!(mailer.calls.get(), 1);
        assert_eq!(
            *view.events.borrow(),
            vec![
                ViewEvent::Pending,
                ViewEvent::Status(StatusMessage::success(SENT_MESSAGE)),
                ViewEvent::Cleared,
                ViewEvent::Released(SUCCESS_RELEASE_MS),
            ]
        );
        assert_eq!(form.borrow().phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn invalid_submit_never_sends() {
        let form = RefCell::new(ContactForm::new(configured()));
        let mailer = FakeMailer::answering(Ok(()));
        let view = RecordingView::default();
        let fields = ContactFields {
            email: "not-an-email".to_string(),
            ..valid_fields()
        };

        submit(&form, &mailer, &view, &fields, String::new()).await;

        assert_eq!(mailer.calls.get(), 0);
        assert_eq!(
            *view.events.borrow(),
            vec![ViewEvent::Status(StatusMessage::error(
                "Please enter a valid email address!"
            ))]
        );
        assert_eq!(form.borrow().phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn failed_send_keeps_fields_for_retry() {
        let form = RefCell::new(ContactForm::new(configured()));
        let mailer = FakeMailer::answering(Err(DeliveryError::Rejected { status: 500 }));
        let view = RecordingView::default();

        submit(&form, &mailer, &view, &valid_fields(), String::new()).await;

        let events = view.events.borrow();
        assert!(!events.contains(&ViewEvent::Cleared));
        assert_eq!(events.last(), Some(&ViewEvent::Released(0)));
        assert_eq!(
            mailer.last.borrow().as_ref().map(|request| request.template_params.subject.clone()),
            Some("Hello".to_string())
        );
    }
}
