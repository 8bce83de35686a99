// src/models.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A poll prompt with its publication timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// True when `pub_date` falls within the day leading up to `now`, both ends inclusive.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    /// Future-dated questions stay hidden until `pub_date` is reached.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

/// An option belonging to one question, with its vote counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// Form body of `POST /polls/{question_id}/vote/`.
///
/// `choice` stays a raw string so that a missing or garbled value is
/// reported back on the detail page instead of being rejected by the extractor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// Builds the form from decoded key/value pairs. A repeated `choice` keeps its last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let choice = pairs
            .into_iter()
            .filter(|(key, _)| key == "choice")
            .map(|(_, value)| value)
            .last();
        Self { choice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn question_at(pub_date: DateTime<Utc>) -> Question {
        Question {
            id: 1,
            question_text: "Best framework?".to_string(),
            pub_date,
        }
    }

    #[test]
    fn future_question_is_not_recent() {
        let q = question_at(now() + Duration::days(30));
        assert!(!q.was_published_recently(now()));
    }

    #[test]
    fn old_question_is_not_recent() {
        let q = question_at(now() - Duration::days(1) - Duration::seconds(1));
        assert!(!q.was_published_recently(now()));
    }

    #[test]
    fn recent_question_is_recent() {
        let q = question_at(now() - Duration::hours(23) - Duration::minutes(59) - Duration::seconds(59));
        assert!(q.was_published_recently(now()));
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(question_at(now() - Duration::days(1)).was_published_recently(now()));
        assert!(question_at(now()).was_published_recently(now()));
    }

    #[test]
    fn future_question_is_unpublished() {
        assert!(!question_at(now() + Duration::seconds(1)).is_published(now()));
        assert!(question_at(now()).is_published(now()));
    }

    #[test]
    fn last_repeated_choice_wins() {
        let form = VoteForm::from_pairs([
            ("choice".to_string(), "1".to_string()),
            ("csrf".to_string(), "x".to_string()),
            ("choice".to_string(), "2".to_string()),
        ]);
        assert_eq!(form.choice.as_deref(), Some("2"));
        assert_eq!(VoteForm::from_pairs(Vec::new()), VoteForm::default());
    }

    #[test]
    fn display_uses_text() {
        let q = question_at(now());
        let c = Choice {
            id: 1,
            question_id: q.id,
            choice_text: "Django".to_string(),
            votes: 5,
        };
        assert_eq!(q.to_string(), "Best framework?");
        assert_eq!(c.to_string(), "Django");
    }
}
