use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::{Date, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use super::dom;
use crate::config::{EmailJsConfig, EMAILJS_ENDPOINT};
use crate::contact::{
    submit, ContactFields, ContactForm, DeliveryError, EmailJsRequest, FormView, Mailer,
    StatusMessage, DATE_FIELD_ID, EMAIL_FIELD_ID, FORM_ID, MESSAGE_FIELD_ID, NAME_FIELD_ID,
    SENDING_ICON, SENDING_LABEL, STATUS_HIDE_MS, STATUS_ID, SUBJECT_FIELD_ID, SUBMIT_BUTTON_ID,
    SUBMIT_ICON, SUBMIT_ICON_ID, SUBMIT_LABEL, SUBMIT_TEXT_ID,
};

struct EmailJsMailer;

impl Mailer for EmailJsMailer {
    async fn send(&self, request: &EmailJsRequest) -> Result<(), DeliveryError> {
        let response = Request::post(EMAILJS_ENDPOINT)
            .json(request)
            .map_err(|error| DeliveryError::Network(error.to_string()))?
            .send()
            .await
            .map_err(|error| DeliveryError::Network(error.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: response.status(),
            })
        }
    }
}

struct DomFormView {
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    label: Option<Element>,
    icon: Option<Element>,
    status: Option<HtmlElement>,
}

impl DomFormView {
    fn resolve(form: HtmlFormElement) -> Self {
        Self {
            form,
            submit: dom::by_id_as::<HtmlButtonElement>(SUBMIT_BUTTON_ID),
            label: dom::by_id(SUBMIT_TEXT_ID),
            icon: dom::by_id(SUBMIT_ICON_ID),
            status: dom::by_id_as::<HtmlElement>(STATUS_ID),
        }
    }

    fn set_submit(&self, disabled: bool, label: &str, icon: &str) {
        if let Some(submit) = &self.submit {
            submit.set_disabled(disabled);
        }
        if let Some(element) = &self.label {
            element.set_text_content(Some(label));
        }
        if let Some(element) = &self.icon {
            element.set_class_name(icon);
        }
    }
}

impl FormView for DomFormView {
    fn show_pending(&self) {
        self.set_submit(true, SENDING_LABEL, SENDING_ICON);
        if let Some(status) = &self.status {
            dom::set_style(status, "display", "none");
        }
    }

    fn show_status(&self, message: &StatusMessage) {
        let Some(status) = self.status.clone() else {
            return;
        };

        status.set_text_content(Some(&message.text));
        dom::set_style(&status, "display", "block");
        dom::set_style(&status, "padding", "15px");
        dom::set_style(&status, "border-radius", "12px");
        dom::set_style(&status, "font-size", "0.95rem");
        dom::set_style(&status, "font-weight", "500");
        for (property, value) in message.style_properties() {
            dom::set_style(&status, property, value);
        }

        Timeout::new(STATUS_HIDE_MS, move || {
            dom::set_style(&status, "display", "none");
        })
        .forget();
    }

    fn clear_fields(&self) {
        self.form.reset();
    }

    fn release_submit(&self, after_ms: u32) {
        if after_ms == 0 {
            self.set_submit(false, SUBMIT_LABEL, SUBMIT_ICON);
            return;
        }

        let submit = self.submit.clone();
        let label = self.label.clone();
        let icon = self.icon.clone();
        Timeout::new(after_ms, move || {
            if let Some(submit) = submit {
                submit.set_disabled(false);
            }
            if let Some(label) = label {
                label.set_text_content(Some(SUBMIT_LABEL));
            }
            if let Some(icon) = icon {
                icon.set_class_name(SUBMIT_ICON);
            }
        })
        .forget();
    }
}

fn field_value(id: &str) -> String {
    let Some(element) = dom::by_id(id) else {
        return String::new();
    };

    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_fields() -> ContactFields {
    ContactFields {
        name: field_value(NAME_FIELD_ID),
        email: field_value(EMAIL_FIELD_ID),
        subject: field_value(SUBJECT_FIELD_ID),
        message: field_value(MESSAGE_FIELD_ID),
    }
}

/// Local date and time, e.g. "Sunday, October 18, 2026 at 09:30 PM".
fn formatted_now() -> String {
    let options = Object::new();
    for (key, value) in [
        ("weekday", "long"),
        ("year", "numeric"),
        ("month", "long"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }

    String::from(Date::new_0().to_locale_string("en-US", &options))
}

fn stamp_date() -> String {
    let date = formatted_now();
    if let Some(field) = dom::by_id_as::<HtmlInputElement>(DATE_FIELD_ID) {
        field.set_value(&date);
    }
    date
}

pub fn install() {
    let Some(form) = dom::by_id_as::<HtmlFormElement>(FORM_ID) else {
        dom::missing("contact", FORM_ID);
        return;
    };
    let state = Rc::new(RefCell::new(ContactForm::new(EmailJsConfig::from_build_env())));
    let view = Rc::new(DomFormView::resolve(form.clone()));

    dom::listen::<Event, _>(&form, "submit", move |event| {
        event.prevent_default();
        let fields = read_fields();
        let date = stamp_date();
        let state = state.clone();
        let view = view.clone();

        spawn_local(async move {
            submit(&state, &EmailJsMailer, view.as_ref(), &fields, date).await;
        });
    });
}
