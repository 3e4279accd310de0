use std::collections::BTreeMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::forms::{BookingForm, ContactForm, FormFields, PREFERRED_CONTACT_OPTIONS, TIMEZONES};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.contains("..") {
        return false;
    }
    EMAIL_RE.is_match(value)
}

/// A single check applied to the trimmed field value.
#[derive(Debug, Clone)]
pub enum Rule {
    Required(&'static str),
    /// Stops evaluation with a pass when the value is empty.
    Optional,
    MinLen(usize, &'static str),
    MaxLen(usize, &'static str),
    Email(&'static str),
    OneOf(&'static [&'static str], &'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        match self {
            Rule::Required(msg) if value.is_empty() => Some(*msg),
            Rule::MinLen(min, msg) if len < *min => Some(*msg),
            Rule::MaxLen(max, msg) if len > *max => Some(*msg),
            Rule::Email(msg) if !is_valid_email(value) => Some(*msg),
            Rule::OneOf(options, msg) if !options.iter().any(|o| *o == value) => Some(*msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: &'static str, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }

    /// First violated message, if any.
    pub fn evaluate(&self, raw: &str) -> Option<&'static str> {
        let value = raw.trim();
        for rule in &self.rules {
            if matches!(rule, Rule::Optional) {
                if value.is_empty() {
                    return None;
                }
                continue;
            }
            if let Some(msg) = rule.check(value) {
                return Some(msg);
            }
        }
        None
    }
}

/// Field name to the message of the first rule it violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn clear_field(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Ordered rule set for one form.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// Checks every field; never short-circuits across fields.
    pub fn validate<F: FormFields>(&self, form: &F) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for rules in &self.fields {
            let value = form.field(rules.field).unwrap_or_default();
            if let Some(msg) = rules.evaluate(value) {
                errors.insert(rules.field, msg);
            }
        }
        errors
    }
}

pub fn booking_schema() -> Schema {
    Schema::new(vec![
        FieldRules::new(BookingForm::FULL_NAME, vec![
            Rule::Required("Full name is required"),
            Rule::MaxLen(100, "Full name must be less than 100 characters"),
        ]),
        FieldRules::new(BookingForm::EMAIL, vec![
            Rule::Email("Invalid email address"),
            Rule::MaxLen(255, "Email must be less than 255 characters"),
        ]),
        FieldRules::new(BookingForm::PHONE, vec![
            Rule::Required("Phone is required"),
            Rule::MaxLen(20, "Phone must be less than 20 characters"),
        ]),
        FieldRules::new(BookingForm::TIMEZONE, vec![
            Rule::OneOf(&TIMEZONES, "Please select a timezone"),
        ]),
        FieldRules::new(BookingForm::NOTES, vec![
            Rule::Optional,
            Rule::MaxLen(500, "Notes must be less than 500 characters"),
        ]),
    ])
}

pub fn contact_schema() -> Schema {
    Schema::new(vec![
        FieldRules::new(ContactForm::NAME, vec![
            Rule::Required("Name is required"),
            Rule::MaxLen(100, "Name must be less than 100 characters"),
        ]),
        FieldRules::new(ContactForm::EMAIL, vec![
            Rule::Email("Invalid email address"),
            Rule::MaxLen(255, "Email must be less than 255 characters"),
        ]),
        FieldRules::new(ContactForm::PHONE, vec![
            Rule::Required("Phone is required"),
            Rule::MaxLen(20, "Phone must be less than 20 characters"),
        ]),
        FieldRules::new(ContactForm::PREFERRED_CONTACT, vec![
            Rule::OneOf(&PREFERRED_CONTACT_OPTIONS, "Please choose a contact method"),
        ]),
        FieldRules::new(ContactForm::MESSAGE, vec![
            Rule::MinLen(10, "Message must be at least 10 characters"),
            Rule::MaxLen(1000, "Message must be less than 1000 characters"),
        ]),
    ])
}
