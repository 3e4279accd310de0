use uuid::Uuid;
use crate::pii::Masked;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub receipt_id: String,
    pub full_name: String,
    pub email: Masked<String>,
    pub timezone: String,
    pub amount: i32,
    pub currency: String,
    pub session_dates: Vec<String>, // en-US long labels, in session order
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ContactSubmittedEvent {
    pub inquiry_id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub preferred_contact: String,
    pub message_length: usize,
    pub timestamp: i64,
}

/// Everything the notification worker fans out to email/calendar delivery.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    BookingConfirmed(BookingConfirmedEvent),
    ContactSubmitted(ContactSubmittedEvent),
}

impl NotificationEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            NotificationEvent::BookingConfirmed(_) => "booking.confirmed",
            NotificationEvent::ContactSubmitted(_) => "contact.submitted",
        }
    }
}
