//! Session keys: the `(date, time)` pair that identifies one play session

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::ranking::ScoreRecord;
use crate::sim::ScoreState;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub date: String,
    pub time: String,
}

impl SessionKey {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Key for a session starting now (UTC)
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_secs(secs)
    }

    /// Format as `"dd Mon yyyy"` and `"hh:mm:ss AM"`
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let secs_of_day = secs % 86_400;
        let (year, month, day) = civil_from_days(days);

        let hour = secs_of_day / 3600;
        let minute = (secs_of_day % 3600) / 60;
        let second = secs_of_day % 60;
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };

        Self {
            date: format!("{day:02} {} {year}", MONTHS[(month - 1) as usize]),
            time: format!("{hour12:02}:{minute:02}:{second:02} {meridiem}"),
        }
    }

    pub fn record(&self, score: &ScoreState) -> ScoreRecord {
        ScoreRecord::new(
            self.date.clone(),
            self.time.clone(),
            score.total_score,
            score.asteroids_destroyed,
        )
    }
}

/// Days since 1970-01-01 to (year, month, day) in the proleptic Gregorian calendar
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let key = SessionKey::from_unix_secs(0);
        assert_eq!(key.date, "01 Jan 1970");
        assert_eq!(key.time, "12:00:00 AM");
    }

    #[test]
    fn test_afternoon_in_leap_year() {
        // 2024-02-29 15:04:05 UTC
        let key = SessionKey::from_unix_secs(1_709_219_045);
        assert_eq!(key.date, "29 Feb 2024");
        assert_eq!(key.time, "03:04:05 PM");
    }

    #[test]
    fn test_noon_is_pm() {
        // 2000-03-01 12:00:00 UTC
        let key = SessionKey::from_unix_secs(951_912_000);
        assert_eq!(key.date, "01 Mar 2000");
        assert_eq!(key.time, "12:00:00 PM");
    }

    #[test]
    fn test_record_carries_key_and_score() {
        let key = SessionKey::new("19 Oct 2026", "09:30:00 PM");
        let score = ScoreState {
            total_score: 12,
            asteroids_destroyed: 3,
        };
        let record = key.record(&score);
        assert_eq!(record, ScoreRecord::new("19 Oct 2026", "09:30:00 PM", 12, 3));
    }
}
