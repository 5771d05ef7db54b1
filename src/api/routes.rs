//! HTTP route handlers for Axum.

use std::path::{Path, PathBuf};

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request, State},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::LexiconError,
    lexicon::{Analysis, RecommendQuery},
    nlp,
};

use super::{
    error::ApiError,
    types::{AnalyzeParams, HealthResponse, RecommendParams, RecommendResponse},
    AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Query-string extractor whose rejections are JSON errors.
pub struct JsonQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for JsonQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Body extractor accepting `application/json` or a url-encoded form.
///
/// Form keys sent more than once (checkbox groups) arrive as a list.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            let value = serde_json::from_value(form_fields(pairs))
                .map_err(|e| ApiError::bad_request(format!("Failed to deserialize form body: {e}")))?;
            Ok(Self(value))
        }
    }
}

/// Collect form pairs into an object; a repeated key becomes an array of its values.
fn form_fields(pairs: Vec<(String, String)>) -> Value {
    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    Value::Object(fields)
}

pub async fn recommend_query(
    state: State<AppState>,
    JsonQuery(params): JsonQuery<RecommendParams>,
) -> ApiResult<RecommendResponse> {
    recommend(state, params).await
}

pub async fn recommend_body(
    state: State<AppState>,
    JsonOrForm(params): JsonOrForm<RecommendParams>,
) -> ApiResult<RecommendResponse> {
    recommend(state, params).await
}

async fn recommend(
    State(state): State<AppState>,
    params: RecommendParams,
) -> ApiResult<RecommendResponse> {
    let query = RecommendQuery::try_from(params)?;
    debug!(word = %query.word, "recommend request");
    let lexicon = state.lexicon.clone();
    let recommendations = tokio::task::spawn_blocking(move || lexicon.recommend(&query))
        .await
        .map_err(anyhow::Error::from)??;
    Ok(Json(RecommendResponse { recommendations }))
}

pub async fn analyze_query(
    state: State<AppState>,
    JsonQuery(params): JsonQuery<AnalyzeParams>,
) -> ApiResult<Analysis> {
    analyze(state, params).await
}

pub async fn analyze_body(
    state: State<AppState>,
    JsonOrForm(params): JsonOrForm<AnalyzeParams>,
) -> ApiResult<Analysis> {
    analyze(state, params).await
}

async fn analyze(State(state): State<AppState>, params: AnalyzeParams) -> ApiResult<Analysis> {
    let lexicon = state.lexicon.clone();
    let documents_dir = state.settings.documents_dir.clone();
    let analysis = tokio::task::spawn_blocking(move || -> anyhow::Result<Analysis> {
        let text = match (params.text, params.path) {
            (Some(text), _) => text,
            (None, Some(path)) => nlp::read_text(&resolve_document(&documents_dir, &path)?)?,
            (None, None) => {
                return Err(LexiconError::invalid("missing parameter 'text' or 'path'").into())
            }
        };
        lexicon.analyze(&text)
    })
    .await
    .map_err(anyhow::Error::from)??;
    Ok(Json(analysis))
}

pub async fn health(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok",
        vocabulary: state.lexicon.model().len(),
        entries: state.lexicon.store().len()?,
    }))
}

/// Resolve `requested` inside `root`, refusing anything that escapes it.
fn resolve_document(root: &Path, requested: &str) -> Result<PathBuf, LexiconError> {
    let not_found = || LexiconError::invalid(format!("document '{requested}' not found"));
    let root = root.canonicalize().map_err(|_| not_found())?;
    let candidate = root
        .join(requested.trim_start_matches('/'))
        .canonicalize()
        .map_err(|_| not_found())?;
    if !candidate.starts_with(&root) || !candidate.is_file() {
        return Err(not_found());
    }
    Ok(candidate)
}
