// src/memory.rs
//! In-memory store, used by the test suite and when no database is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Choice, Question};
use crate::repository::{PollRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPollRepository {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_question_id: i64,
    last_choice_id: i64,
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
}

impl InMemoryPollRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl PollRepository for InMemoryPollRepository {
    async fn create_question(
        &self,
        question_text: &str,
        pub_date: DateTime<Utc>,
    ) -> RepositoryResult<Question> {
        let mut state = self.write()?;
        state.last_question_id += 1;
        let question = Question {
            id: state.last_question_id,
            question_text: question_text.to_owned(),
            pub_date,
        };
        state.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn create_choice(
        &self,
        question_id: i64,
        choice_text: &str,
        votes: i64,
    ) -> RepositoryResult<Choice> {
        let mut state = self.write()?;
        if !state.questions.contains_key(&question_id) {
            return Err(RepositoryError::QuestionNotFound(question_id));
        }
        state.last_choice_id += 1;
        let choice = Choice {
            id: state.last_choice_id,
            question_id,
            choice_text: choice_text.to_owned(),
            votes,
        };
        state.choices.insert(choice.id, choice.clone());
        Ok(choice)
    }

    async fn delete_question(&self, question_id: i64) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.questions.remove(&question_id).is_none() {
            return Err(RepositoryError::QuestionNotFound(question_id));
        }
        state.choices.retain(|_, choice| choice.question_id != question_id);
        Ok(())
    }

    async fn latest_questions(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepositoryResult<Vec<Question>> {
        let state = self.read()?;
        let mut published: Vec<Question> = state
            .questions
            .values()
            .filter(|q| q.is_published(now))
            .cloned()
            .collect();
        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        published.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(published)
    }

    async fn find_question(&self, question_id: i64) -> RepositoryResult<Option<Question>> {
        Ok(self.read()?.questions.get(&question_id).cloned())
    }

    async fn choices_for(&self, question_id: i64) -> RepositoryResult<Vec<Choice>> {
        let state = self.read()?;
        Ok(state
            .choices
            .values()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn find_choice(&self, choice_id: i64) -> RepositoryResult<Option<Choice>> {
        Ok(self.read()?.choices.get(&choice_id).cloned())
    }

    async fn record_vote(
        &self,
        question_id: i64,
        choice_id: i64,
    ) -> RepositoryResult<Option<Choice>> {
        let mut state = self.write()?;
        Ok(state
            .choices
            .get_mut(&choice_id)
            .filter(|c| c.question_id == question_id)
            .map(|c| {
                c.votes += 1;
                c.clone()
            }))
    }
}
