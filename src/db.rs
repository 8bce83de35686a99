// src/db.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};

use crate::models::{Choice, Question};
use crate::repository::{PollRepository, RepositoryError, RepositoryResult};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollRepository for PgPollRepository {
    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> RepositoryResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question_text, pub_date) VALUES ($1, $2)
             RETURNING id, question_text, pub_date",
        )
        .bind(question_text)
        .bind(pub_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    async fn create_choice(
        &self,
        question_id: i64,
        choice_text: &str,
        votes: i64,
    ) -> RepositoryResult<Choice> {
        let choice = sqlx::query_as::<_, Choice>(
            "INSERT INTO choices (question_id, choice_text, votes)
             SELECT id, $2, $3 FROM questions WHERE id = $1
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(question_id)
        .bind(choice_text)
        .bind(votes)
        .fetch_optional(&self.pool)
        .await?;
        choice.ok_or(RepositoryError::QuestionNotFound(question_id))
    }

    async fn delete_question(&self, question_id: i64) -> RepositoryResult<()> {
        // choices go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::QuestionNotFound(question_id));
        }
        Ok(())
    }

    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepositoryResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date FROM questions
             WHERE pub_date <= $1
             ORDER BY pub_date DESC
             LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn find_question(&self, question_id: i64) -> RepositoryResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question_text, pub_date FROM questions WHERE id = $1",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn choices_for(&self, question_id: i64) -> RepositoryResult<Vec<Choice>> {
        let choices = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, choice_text, votes FROM choices
             WHERE question_id = $1
             ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(choices)
    }

    async fn find_choice(&self, choice_id: i64) -> RepositoryResult<Option<Choice>> {
        let choice = sqlx::query_as::<_, Choice>(
            "SELECT id, question_id, choice_text, votes FROM choices WHERE id = $1",
        )
        .bind(choice_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(choice)
    }

    async fn record_vote(
        &self,
        question_id: i64,
        choice_id: i64,
    ) -> RepositoryResult<Option<Choice>> {
        // Single statement, so concurrent votes cannot overwrite each other.
        let choice = sqlx::query_as::<_, Choice>(
            "UPDATE choices SET votes = votes + 1
             WHERE id = $1 AND question_id = $2
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(choice_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(choice)
    }
}
