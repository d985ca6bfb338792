use boggle_types::GameState;
use chrono::{DateTime, Utc};

pub const MIN_TIME_LIMIT: i32 = 5;
pub const MAX_TIME_LIMIT: i32 = 120;
pub const MAX_NICKNAME_LENGTH: usize = 50;

/// The timing fields stored for a game session.
///
/// Lifecycle state is never stored; every read derives it from these two
/// fields and the current wall-clock time, at one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    pub start_time: Option<DateTime<Utc>>,
    pub time_limit: i32,
}

impl SessionClock {
    pub fn new(start_time: Option<DateTime<Utc>>, time_limit: i32) -> Self {
        Self {
            start_time,
            time_limit,
        }
    }

    /// Whole seconds since the session started, or `None` while pending.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.start_time
            .map(|start| (now - start).num_seconds().max(0))
    }

    /// Whole seconds left to play, clamped at zero. `None` while pending.
    pub fn time_left(&self, now: DateTime<Utc>) -> Option<i32> {
        self.elapsed_seconds(now)
            .map(|elapsed| (i64::from(self.time_limit) - elapsed).max(0) as i32)
    }

    pub fn state(&self, now: DateTime<Utc>) -> GameState {
        match self.time_left(now) {
            None => GameState::Pending,
            Some(left) if left >= 1 => GameState::Active,
            Some(_) => GameState::Completed,
        }
    }
}

pub fn is_valid_time_limit(time_limit: i32) -> bool {
    (MIN_TIME_LIMIT..=MAX_TIME_LIMIT).contains(&time_limit)
}

/// Combined limit once both players have asked for one. Halves round up.
pub fn average_time_limit(first: i32, second: i32) -> i32 {
    (first + second + 1) / 2
}

/// Trimmed nickname, or `None` if it is missing, blank, or too long.
pub fn normalize_nickname(nickname: Option<&str>) -> Option<String> {
    let trimmed = nickname?.trim();
    let length = trimmed.chars().count();
    (1..=MAX_NICKNAME_LENGTH)
        .contains(&length)
        .then(|| trimmed.to_string())
}

/// Canonical form of a played word: trimmed and upper-cased. Board search,
/// dictionary lookup, duplicate detection and storage all use this form.
pub fn normalize_word(word: &str) -> Option<String> {
    let trimmed = word.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn started(seconds_ago: i64, limit: i32) -> (SessionClock, DateTime<Utc>) {
        let now = Utc::now();
        let clock = SessionClock::new(Some(now - Duration::seconds(seconds_ago)), limit);
        (clock, now)
    }

    #[test]
    fn test_pending_without_start_time() {
        let clock = SessionClock::new(None, 60);
        let now = Utc::now();
        assert_eq!(clock.state(now), GameState::Pending);
        assert_eq!(clock.time_left(now), None);
        assert_eq!(clock.elapsed_seconds(now), None);
    }

    #[test]
    fn test_active_then_completed() {
        let (clock, now) = started(10, 60);
        assert_eq!(clock.state(now), GameState::Active);
        assert_eq!(clock.time_left(now), Some(50));

        let (clock, now) = started(59, 60);
        assert_eq!(clock.state(now), GameState::Active);
        assert_eq!(clock.time_left(now), Some(1));

        let (clock, now) = started(60, 60);
        assert_eq!(clock.state(now), GameState::Completed);
        assert_eq!(clock.time_left(now), Some(0));

        let (clock, now) = started(500, 60);
        assert_eq!(clock.state(now), GameState::Completed);
        assert_eq!(clock.time_left(now), Some(0));
    }

    #[test]
    fn test_state_depends_only_on_inputs() {
        let start = Utc::now();
        let clock = SessionClock::new(Some(start), 75);

        // Reading out of order gives the same answers
        let late = start + Duration::seconds(80);
        let early = start + Duration::seconds(5);
        assert_eq!(clock.state(late), GameState::Completed);
        assert_eq!(clock.state(early), GameState::Active);
        assert_eq!(clock.state(late), GameState::Completed);
    }

    #[test]
    fn test_start_in_future_counts_as_zero_elapsed() {
        let now = Utc::now();
        let clock = SessionClock::new(Some(now + Duration::seconds(3)), 30);
        assert_eq!(clock.elapsed_seconds(now), Some(0));
        assert_eq!(clock.time_left(now), Some(30));
    }

    #[test]
    fn test_time_limit_bounds() {
        assert!(!is_valid_time_limit(4));
        assert!(is_valid_time_limit(5));
        assert!(is_valid_time_limit(120));
        assert!(!is_valid_time_limit(121));
        assert!(!is_valid_time_limit(-10));
    }

    #[test]
    fn test_average_time_limit() {
        assert_eq!(average_time_limit(60, 90), 75);
        assert_eq!(average_time_limit(60, 91), 76);
        assert_eq!(average_time_limit(5, 5), 5);
        assert_eq!(average_time_limit(5, 120), 63);
    }

    #[test]
    fn test_normalize_nickname() {
        assert_eq!(normalize_nickname(Some("  Alice ")), Some("Alice".to_string()));
        assert_eq!(normalize_nickname(Some("   ")), None);
        assert_eq!(normalize_nickname(Some("")), None);
        assert_eq!(normalize_nickname(None), None);

        let fifty = "x".repeat(50);
        assert_eq!(normalize_nickname(Some(&fifty)), Some(fifty.clone()));
        let fifty_one = "x".repeat(51);
        assert_eq!(normalize_nickname(Some(&fifty_one)), None);
        // Surrounding whitespace does not count against the limit
        assert!(normalize_nickname(Some(&format!("  {}  ", fifty))).is_some());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word(" cat "), Some("CAT".to_string()));
        assert_eq!(normalize_word("Quit"), Some("QUIT".to_string()));
        assert_eq!(normalize_word("   "), None);
        assert_eq!(normalize_word(""), None);
    }
}
