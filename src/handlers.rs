// src/handlers.rs
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::context;
use mockable::Clock;
use std::sync::Arc;

use crate::error::AppError;
use crate::extract::QuestionId;
use crate::models::{Question, VoteForm};
use crate::poll::{self, VoteOutcome, LATEST_QUESTIONS_LIMIT, NO_CHOICE_SELECTED};
use crate::repository::PollRepository;
use crate::templates::{Templates, DETAIL, INDEX, RESULTS};

/// Shared handler dependencies.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PollRepository>,
    pub templates: Arc<Templates>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn PollRepository>,
        templates: Templates,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            repo,
            templates: Arc::new(templates),
            clock,
        }
    }

    /// Looks up a question, treating unknown and not-yet-published ones alike.
    async fn published_question(&self, question_id: i64) -> Result<Question, AppError> {
        self.repo
            .find_question(question_id)
            .await?
            .filter(|q| q.is_published(self.clock.utc()))
            .ok_or(AppError::NotFound)
    }

    async fn render_detail(
        &self,
        question: &Question,
        error_message: Option<&str>,
    ) -> Result<Html<String>, AppError> {
        let choices = self.repo.choices_for(question.id).await?;
        let body = self.templates.render(
            DETAIL,
            context! { question, choices, error_message },
        )?;
        Ok(Html(body))
    }
}

/// `GET /polls/`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let latest_question_list = state
        .repo
        .latest_questions(state.clock.utc(), LATEST_QUESTIONS_LIMIT)
        .await?;
    let body = state
        .templates
        .render(INDEX, context! { latest_question_list })?;
    Ok(Html(body))
}

/// `GET /polls/{question_id}/`
pub async fn detail(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
) -> Result<Html<String>, AppError> {
    let question = state.published_question(question_id).await?;
    state.render_detail(&question, None).await
}

/// `GET /polls/{question_id}/results/`
pub async fn results(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
) -> Result<Html<String>, AppError> {
    let question = state.published_question(question_id).await?;
    let choices = state.repo.choices_for(question.id).await?;
    let body = state
        .templates
        .render(RESULTS, context! { question, choices })?;
    Ok(Html(body))
}

/// `POST /polls/{question_id}/vote/`
///
/// Redirects to the results page on success. A missing or foreign choice
/// re-renders the detail page with an inline error and a 200 status.
pub async fn vote(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
    form: VoteForm,
) -> Result<Response, AppError> {
    let question = state.published_question(question_id).await?;

    match poll::vote(state.repo.as_ref(), &question, form.choice.as_deref()).await? {
        VoteOutcome::Recorded(choice) => {
            tracing::info!(question_id, choice_id = choice.id, votes = choice.votes, "vote recorded");
            Ok(Redirect::to(&poll::results_url(question_id)).into_response())
        }
        VoteOutcome::NoChoiceSelected => {
            tracing::debug!(question_id, submitted = ?form.choice, "vote rejected");
            Ok(state
                .render_detail(&question, Some(NO_CHOICE_SELECTED))
                .await?
                .into_response())
        }
    }
}

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::to("/polls/")
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
