use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use coach_core::calendar::short_date_label;

pub const SAMPLE_TIMES: [&str; 4] = ["10:00 AM", "2:30 PM", "4:00 PM", "6:00 PM"];
const FIRST_OFFSET_DAYS: i64 = 2;
const WINDOW_DAYS: i64 = 7;
const MAX_SLOTS: usize = 5;

/// Illustrative availability shown on the sessions page. Not bookable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleSlot {
    pub date: NaiveDate,
    pub date_label: String,
    pub time: String,
}

/// Weekdays in the seven days starting two days out, each with a random
/// time label, capped at five.
pub fn sample_slots<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<SampleSlot> {
    let start = today + Duration::days(FIRST_OFFSET_DAYS);
    let mut slots = Vec::with_capacity(MAX_SLOTS);

    for offset in 0..WINDOW_DAYS {
        let date = start + Duration::days(offset);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let time = SAMPLE_TIMES.choose(rng).copied().unwrap_or(SAMPLE_TIMES[0]);
        slots.push(SampleSlot {
            date,
            date_label: short_date_label(date),
            time: time.to_string(),
        });

        if slots.len() >= MAX_SLOTS {
            break;
        }
    }

    slots
}
