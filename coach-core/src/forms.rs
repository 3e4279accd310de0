use serde::{Deserialize, Serialize};
use crate::{CoreError, CoreResult};

/// Zones offered in the booking form. `UTC` is preselected.
pub const TIMEZONES: [&str; 8] = [
    "UTC",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Paris",
    "Asia/Tokyo",
];

pub const PREFERRED_CONTACT_OPTIONS: [&str; 3] = ["email", "phone", "either"];

/// Field-by-field access used by the validator and by partial edits.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
    fn set_field(&mut self, name: &str, value: String) -> CoreResult<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub timezone: String,
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            timezone: TIMEZONES[0].to_string(),
            notes: String::new(),
        }
    }
}

impl BookingForm {
    pub const FULL_NAME: &'static str = "fullName";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
    pub const TIMEZONE: &'static str = "timezone";
    pub const NOTES: &'static str = "notes";
}

impl FormFields for BookingForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            Self::FULL_NAME => Some(&self.full_name),
            Self::EMAIL => Some(&self.email),
            Self::PHONE => Some(&self.phone),
            Self::TIMEZONE => Some(&self.timezone),
            Self::NOTES => Some(&self.notes),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> CoreResult<()> {
        let slot = match name {
            Self::FULL_NAME => &mut self.full_name,
            Self::EMAIL => &mut self.email,
            Self::PHONE => &mut self.phone,
            Self::TIMEZONE => &mut self.timezone,
            Self::NOTES => &mut self.notes,
            other => return Err(CoreError::UnknownField(other.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: String,
    pub message: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            preferred_contact: PREFERRED_CONTACT_OPTIONS[0].to_string(),
            message: String::new(),
        }
    }
}

impl ContactForm {
    pub const NAME: &'static str = "name";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
    pub const PREFERRED_CONTACT: &'static str = "preferredContact";
    pub const MESSAGE: &'static str = "message";
}

impl FormFields for ContactForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            Self::NAME => Some(&self.name),
            Self::EMAIL => Some(&self.email),
            Self::PHONE => Some(&self.phone),
            Self::PREFERRED_CONTACT => Some(&self.preferred_contact),
            Self::MESSAGE => Some(&self.message),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> CoreResult<()> {
        let slot = match name {
            Self::NAME => &mut self.name,
            Self::EMAIL => &mut self.email,
            Self::PHONE => &mut self.phone,
            Self::PREFERRED_CONTACT => &mut self.preferred_contact,
            Self::MESSAGE => &mut self.message,
            other => return Err(CoreError::UnknownField(other.to_string())),
        };
        *slot = value;
        Ok(())
    }
}
