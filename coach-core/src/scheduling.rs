use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use coach_shared::pii::Masked;
use crate::calendar::SessionSlot;

pub const SESSIONS_PER_PACKAGE: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub booking_id: Uuid,
    pub full_name: String,
    pub email: Masked<String>,
    pub timezone: String,
    pub requested_at: DateTime<Utc>,
}

/// Exactly one slot per session of the package, in session order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SessionSlot>", into = "Vec<SessionSlot>")]
pub struct ConfirmedSlots(Vec<SessionSlot>);

impl TryFrom<Vec<SessionSlot>> for ConfirmedSlots {
    type Error = SchedulingError;

    fn try_from(slots: Vec<SessionSlot>) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}

impl From<ConfirmedSlots> for Vec<SessionSlot> {
    fn from(confirmed: ConfirmedSlots) -> Self {
        confirmed.0
    }
}

impl ConfirmedSlots {
    pub fn new(slots: Vec<SessionSlot>) -> Result<Self, SchedulingError> {
        if slots.len() != SESSIONS_PER_PACKAGE {
            return Err(SchedulingError::Rejected(format!(
                "expected {} slots, got {}",
                SESSIONS_PER_PACKAGE,
                slots.len()
            )));
        }
        Ok(Self(slots))
    }

    pub fn slots(&self) -> &[SessionSlot] {
        &self.0
    }

    pub fn date_labels(&self) -> Vec<String> {
        self.0.iter().map(|s| s.date_label.clone()).collect()
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Scheduling temporarily failed: {0}")]
    Transient(String),
    #[error("Scheduling rejected: {0}")]
    Rejected(String),
}

impl SchedulingError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SchedulingError::Transient(_))
    }
}

#[async_trait]
pub trait SessionScheduler: Send + Sync {
    async fn schedule_sessions(&self, booking: &BookingRequest) -> Result<ConfirmedSlots, SchedulingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generate_session_slots;
    use chrono::NaiveDate;

    #[test]
    fn test_confirmed_slots_require_three() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let slots = generate_session_slots(today, "UTC");

        let confirmed = ConfirmedSlots::new(slots.clone()).unwrap();
        assert_eq!(confirmed.slots().len(), 3);
        assert_eq!(confirmed.date_labels()[0], "Monday, October 26, 2026");

        let err = ConfirmedSlots::new(slots[..2].to_vec()).unwrap_err();
        assert!(!err.is_transient());
    }

    #[test]
    fn test_deserialize_checks_slot_count() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let slots = generate_session_slots(today, "UTC");

        let json = serde_json::to_string(&ConfirmedSlots::new(slots.clone()).unwrap()).unwrap();
        assert!(json.starts_with('['));
        let parsed: ConfirmedSlots = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.slots(), slots.as_slice());

        let short = serde_json::to_string(&slots[..2]).unwrap();
        assert!(serde_json::from_str::<ConfirmedSlots>(&short).is_err());
    }
}
