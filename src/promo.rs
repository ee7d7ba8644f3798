use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const PROMO_WINDOW_HOURS: i64 = 48;

/// Cosmetic 48-hour offer deadline. Everything is a pure function of the
/// deadline and the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCountdown {
    pub deadline: DateTime<Utc>,
}

impl PromoCountdown {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            deadline: now + Duration::hours(PROMO_WINDOW_HOURS),
        }
    }

    /// Time left, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).num_seconds() <= 0
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let total = self.remaining(now).num_seconds();
        if total <= 0 {
            return "Promotion ended".to_string();
        }
        let (hours, rest) = (total / 3600, total % 3600);
        let (minutes, seconds) = (rest / 60, rest % 60);
        format!("Promotion valid for {:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, minute, second).unwrap()
    }

    #[test]
    fn test_new_countdown_shows_full_window() {
        let now = at(10, 0, 0);
        let promo = PromoCountdown::starting_at(now);
        assert_eq!(promo.render(now), "Promotion valid for 48:00:00");
        assert!(!promo.has_ended(now));
    }

    #[test]
    fn test_countdown_ticks_down() {
        let promo = PromoCountdown::starting_at(at(10, 0, 0));
        let later = at(10, 0, 0) + Duration::hours(47) + Duration::minutes(58) + Duration::seconds(55);
        assert_eq!(promo.render(later), "Promotion valid for 00:01:05");
    }

    #[test]
    fn test_countdown_ends() {
        let promo = PromoCountdown::starting_at(at(10, 0, 0));
        let after = at(10, 0, 0) + Duration::hours(49);
        assert_eq!(promo.remaining(after), Duration::zero());
        assert!(promo.has_ended(after));
        assert_eq!(promo.render(after), "Promotion ended");
    }
}
