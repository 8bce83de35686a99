// src/extract.rs
//! Request extractors that fold malformed input into the app's own outcomes.

use axum::extract::{Form, FromRequest, FromRequestParts, Multipart, Path, Request};
use http::header::CONTENT_TYPE;
use http::request::Parts;
use std::convert::Infallible;

use crate::error::AppError;
use crate::models::VoteForm;

/// Question id taken from the path. Anything that is not an integer is a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for QuestionId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(question_id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "unparsable question id");
                AppError::NotFound
            })?;
        Ok(Self(question_id))
    }
}

/// Reads the vote body as urlencoded or multipart form data.
///
/// Never rejects: an unreadable body yields a form without a choice.
impl<S: Send + Sync> FromRequest<S> for VoteForm {
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            return Ok(match Multipart::from_request(req, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(rejection) => {
                    tracing::debug!(%rejection, "unreadable multipart vote");
                    Self::default()
                }
            });
        }

        Ok(match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Self::from_pairs(pairs),
            Err(rejection) => {
                tracing::debug!(%rejection, "unreadable vote form");
                Self::default()
            }
        })
    }
}

async fn read_multipart(mut multipart: Multipart) -> VoteForm {
    let mut choice = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("choice") {
            continue;
        }
        if let Ok(text) = field.text().await {
            choice = Some(text);
        }
    }
    VoteForm { choice }
}
