// src/poll.rs
use crate::models::{Choice, Question};
use crate::repository::{PollRepository, RepositoryResult};

/// Shown on the detail page when a vote cannot be recorded.
pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

/// Number of questions listed on the index page.
pub const LATEST_QUESTIONS_LIMIT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded(Choice),
    /// The submitted choice was missing, unparsable, or not one of the question's choices.
    NoChoiceSelected,
}

/// Adds one vote to the submitted choice of `question`.
///
/// A bad submission is an expected outcome, not an error; only persistence
/// failures come back as `Err`.
pub async fn vote(
    repo: &dyn PollRepository,
    question: &Question,
    submitted_choice: Option<&str>,
) -> RepositoryResult<VoteOutcome> {
    let Some(choice_id) = submitted_choice.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
        return Ok(VoteOutcome::NoChoiceSelected);
    };

    Ok(match repo.record_vote(question.id, choice_id).await? {
        Some(choice) => VoteOutcome::Recorded(choice),
        None => VoteOutcome::NoChoiceSelected,
    })
}

pub fn results_url(question_id: i64) -> String {
    format!("/polls/{question_id}/results/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPollRepository;
    use chrono::Utc;

    async fn setup() -> (InMemoryPollRepository, Question, Choice) {
        let repo = InMemoryPollRepository::new();
        let question = repo.create_question("Favorite language?", Utc::now()).await.unwrap();
        let choice = repo.create_choice(question.id, "Rust", 0).await.unwrap();
        (repo, question, choice)
    }

    #[tokio::test]
    async fn valid_choice_is_recorded() {
        let (repo, question, choice) = setup().await;
        let id = choice.id.to_string();

        let outcome = vote(&repo, &question, Some(&id)).await.unwrap();

        match outcome {
            VoteOutcome::Recorded(updated) => assert_eq!(updated.votes, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_and_garbled_choices_are_rejected() {
        let (repo, question, choice) = setup().await;

        for submitted in [None, Some(""), Some("abc"), Some("999")] {
            let outcome = vote(&repo, &question, submitted).await.unwrap();
            assert_eq!(outcome, VoteOutcome::NoChoiceSelected);
        }
        assert_eq!(repo.find_choice(choice.id).await.unwrap().unwrap().votes, 0);
    }

    #[test]
    fn results_url_points_at_question() {
        assert_eq!(results_url(7), "/polls/7/results/");
    }
}
