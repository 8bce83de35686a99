// src/repository.rs
//! Data-access contract shared by the Postgres and in-memory stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Choice, Question};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence operations the handlers depend on.
#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> RepositoryResult<Question>;

    /// Adds a choice under an existing question.
    ///
    /// Returns [`RepositoryError::QuestionNotFound`] when the question does not exist.
    async fn create_choice(
        &self,
        question_id: i64,
        choice_text: &str,
        votes: i64,
    ) -> RepositoryResult<Choice>;

    /// Removes a question together with all of its choices.
    async fn delete_question(&self, question_id: i64) -> RepositoryResult<()>;

    /// Questions published at or before `now`, newest first, at most `limit`.
    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepositoryResult<Vec<Question>>;

    async fn find_question(&self, question_id: i64) -> RepositoryResult<Option<Question>>;

    /// Choices of a question ordered by id.
    async fn choices_for(&self, question_id: i64) -> RepositoryResult<Vec<Choice>>;

    async fn find_choice(&self, choice_id: i64) -> RepositoryResult<Option<Choice>>;

    /// Atomically adds one vote to `choice_id` if it belongs to `question_id`.
    ///
    /// Returns the updated choice, or `None` when no such choice exists under
    /// that question. Nothing is written in the `None` case.
    async fn record_vote(&self, question_id: i64, choice_id: i64)
        -> RepositoryResult<Option<Choice>>;
}

#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("question not found: {0}")]
    QuestionNotFound(i64),

    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::persistence(err)
    }
}
