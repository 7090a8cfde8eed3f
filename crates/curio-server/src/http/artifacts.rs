//! `/api/artifacts` handlers.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use curio_core::app::NewArtifact;
use curio_core::domain::{
    Artifact, ArtifactId, ArtifactView, CommentView, CommentsView, LikesView, validate_comment_text,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::auth::require_auth;
use super::error::{ApiError, ApiResult};
use super::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateArtifactRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddCommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub message: &'static str,
    pub total_likes: usize,
}

#[derive(Debug, Serialize)]
pub struct AddCommentResponse {
    pub message: &'static str,
    pub comments: Vec<CommentView>,
}

type BodyInput = Result<Bytes, BytesRejection>;
type IdInput = Result<Path<String>, PathRejection>;

/// An empty body reads as `{}`, matching a bare POST from clients.
fn parse_body<T: DeserializeOwned + Default>(body: BodyInput) -> ApiResult<T> {
    let body = body?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&body).map_err(|err| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON body").with_error(err.to_string())
    })
}

/// Unparseable ids (including segments that are not UTF-8) can never match
/// a record, so they read as missing.
fn parse_artifact_id(id: IdInput) -> ApiResult<ArtifactId> {
    match id {
        Ok(Path(raw)) => raw.parse().map_err(|_| ApiError::not_found()),
        Err(PathRejection::FailedToDeserializePathParams(err)) => {
            Err(ApiError::not_found().with_error(err.body_text()))
        }
        Err(rejection) => Err(ApiError::new(rejection.status(), rejection.body_text())),
    }
}

pub(crate) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: BodyInput,
) -> ApiResult<(StatusCode, Json<Artifact>)> {
    let caller = require_auth(&state, &headers).await?;
    let request: CreateArtifactRequest = parse_body(body)?;

    let artifact = state
        .service
        .create_artifact(
            &caller,
            NewArtifact {
                title: request.title,
                description: request.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(artifact)))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<ArtifactView>>> {
    require_auth(&state, &headers).await?;
    Ok(Json(state.service.list_artifacts().await?))
}

pub(crate) async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: IdInput,
) -> ApiResult<Json<ToggleLikeResponse>> {
    let caller = require_auth(&state, &headers).await?;
    let id = parse_artifact_id(id)?;

    let toggled = state.service.toggle_like(&caller, id).await?;
    Ok(Json(ToggleLikeResponse {
        liked: toggled.liked,
        message: if toggled.liked {
            "Artifact liked"
        } else {
            "Artifact unliked"
        },
        total_likes: toggled.total_likes,
    }))
}

pub(crate) async fn likes(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: IdInput,
) -> ApiResult<Json<LikesView>> {
    require_auth(&state, &headers).await?;
    let id = parse_artifact_id(id)?;
    Ok(Json(state.service.get_likes(id).await?))
}

pub(crate) async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: IdInput,
    body: BodyInput,
) -> ApiResult<Json<AddCommentResponse>> {
    let caller = require_auth(&state, &headers).await?;
    let request: AddCommentRequest = parse_body(body)?;
    let text = request.text.as_deref();

    // Comment validation is reported before an unknown id.
    let comments = match parse_artifact_id(id) {
        Ok(id) => state.service.add_comment(&caller, id, text).await?,
        Err(not_found) => {
            validate_comment_text(text)?;
            return Err(not_found);
        }
    };

    Ok(Json(AddCommentResponse {
        message: "Comment added",
        comments,
    }))
}

pub(crate) async fn comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: IdInput,
) -> ApiResult<Json<CommentsView>> {
    require_auth(&state, &headers).await?;
    let id = parse_artifact_id(id)?;
    Ok(Json(state.service.get_comments(id).await?))
}
