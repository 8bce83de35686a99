// src/seed.rs
use chrono::{DateTime, Duration, Utc};

use crate::repository::{PollRepository, RepositoryResult};

const DEMO_POLLS: &[(&str, &[&str])] = &[
    ("What's up?", &["Not much", "The sky", "Just hacking again"]),
    ("Best framework?", &["Django", "Rails", "Axum"]),
];

/// Inserts a couple of demo polls when the store has no published questions.
///
/// Returns the number of questions created.
pub async fn seed_demo_data(repo: &dyn PollRepository, now: DateTime<Utc>) -> RepositoryResult<usize> {
    if !repo.latest_questions(now, 1).await?.is_empty() {
        return Ok(0);
    }

    for (offset, (text, choices)) in (0_i64..).zip(DEMO_POLLS) {
        let question = repo.create_question(text, now - Duration::hours(offset)).await?;
        for choice in choices.iter() {
            repo.create_choice(question.id, choice, 0).await?;
        }
    }
    tracing::info!(count = DEMO_POLLS.len(), "seeded demo polls");
    Ok(DEMO_POLLS.len())
}
