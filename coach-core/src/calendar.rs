use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Minimum number of days between booking and the first session anchor.
pub const LEAD_DAYS: i64 = 3;

pub const SESSION_TIME: &str = "8:00 PM";

#[derive(Debug, Clone, Copy)]
pub struct SessionTemplate {
    pub weekday: Weekday,
    pub title: &'static str,
    pub time: &'static str,
}

/// Monday / Wednesday / Friday evenings, one topic each.
pub const WEEKLY_TEMPLATE: [SessionTemplate; 3] = [
    SessionTemplate { weekday: Weekday::Mon, title: "CV Review & Optimization", time: SESSION_TIME },
    SessionTemplate { weekday: Weekday::Wed, title: "Networking & Referral Strategy", time: SESSION_TIME },
    SessionTemplate { weekday: Weekday::Fri, title: "Future Skills & Interview Prep", time: SESSION_TIME },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSlot {
    pub sequence_number: u8,
    pub title: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub time: String,
    pub timezone: String,
}

/// e.g. "Monday, October 26, 2026"
pub fn long_date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Mon, Oct 26, 2026"
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Calendar dates of the three sessions for a booking made on `today`.
///
/// The anchor is `today + LEAD_DAYS`. Each session lands on the next
/// occurrence of its weekday counted from the anchor, pushed out by one week
/// per index so the sessions fall in successive weeks. A later session whose
/// weekday equals the anchor's is moved a full week forward.
pub fn session_dates(today: NaiveDate) -> [NaiveDate; 3] {
    let anchor = today + Duration::days(LEAD_DAYS);
    let anchor_day = anchor.weekday().num_days_from_sunday() as i64;

    let mut dates = [anchor; 3];
    for (i, template) in WEEKLY_TEMPLATE.iter().enumerate() {
        let target_day = template.weekday.num_days_from_sunday() as i64;
        let mut days_until = (target_day - anchor_day + 7) % 7;
        if days_until == 0 && i > 0 {
            days_until = 7;
        }
        dates[i] = anchor + Duration::days(days_until + 7 * i as i64);
    }
    dates
}

pub fn generate_session_slots(today: NaiveDate, timezone: &str) -> Vec<SessionSlot> {
    session_dates(today)
        .into_iter()
        .zip(WEEKLY_TEMPLATE.iter())
        .enumerate()
        .map(|(i, (date, template))| SessionSlot {
            sequence_number: (i + 1) as u8,
            title: template.title.to_string(),
            date,
            date_label: long_date_label(date),
            time: template.time.to_string(),
            timezone: timezone.to_string(),
        })
        .collect()
}
