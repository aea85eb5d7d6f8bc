//! Request handlers
//!
//! Each handler maps one-to-one onto a repository operation and runs it
//! through [`AppState::run`].

use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::log::commit_view::{CommitDetails, CommitSummary};
use crate::artifacts::status::status_info::StatusInfo;
use crate::commands::porcelain::log::DEFAULT_LOG_LIMIT;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const DASHBOARD: &str = include_str!("../../assets/index.html");

/// How file content travels inside JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "base64")]
    Base64,
}

#[derive(Debug, Deserialize)]
pub struct FileUpload {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub encoding: ContentEncoding,
}

impl FileUpload {
    fn decode(self) -> ApiResult<(String, Bytes)> {
        let content = match self.encoding {
            ContentEncoding::Utf8 => Bytes::from(self.content),
            ContentEncoding::Base64 => STANDARD
                .decode(self.content.as_bytes())
                .map(Bytes::from)
                .map_err(|error| {
                    ApiError::bad_request(format!("invalid base64 content for {}: {error}", self.name))
                })?,
        };

        Ok((self.name, content))
    }
}

#[derive(Debug, Serialize)]
pub struct FileContent {
    pub name: String,
    pub content: String,
    pub encoding: ContentEncoding,
}

impl FileContent {
    /// Text files travel as-is, anything else as base64
    pub fn new(name: String, content: Bytes) -> Self {
        match String::from_utf8(content.to_vec()) {
            Ok(text) => FileContent {
                name,
                content: text,
                encoding: ContentEncoding::Utf8,
            },
            Err(_) => FileContent {
                name,
                content: STANDARD.encode(&content),
                encoding: ContentEncoding::Base64,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ShowQuery {
    pub id: Option<String>,
}

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD)
}

pub async fn init(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<Value>)> {
    let path = state
        .run(|repository| {
            repository.init()?;
            Ok(repository.path().to_path_buf())
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Initialized empty minigit repository in {}", path.display()),
            "path": path,
        })),
    ))
}

pub async fn status(State(state): State<AppState>) -> ApiResult<Json<StatusInfo>> {
    let status = state.run(|repository| repository.status()).await?;

    Ok(Json(status))
}

pub async fn add(
    State(state): State<AppState>,
    Json(uploads): Json<Vec<FileUpload>>,
) -> ApiResult<Json<Value>> {
    let files = uploads
        .into_iter()
        .map(FileUpload::decode)
        .collect::<ApiResult<Vec<_>>>()?;

    let staged = state
        .run(move |repository| repository.write_and_stage(&files))
        .await?;

    Ok(Json(json!({ "staged": staged })))
}

pub async fn commit(
    State(state): State<AppState>,
    Json(request): Json<CommitRequest>,
) -> ApiResult<(StatusCode, Json<CommitSummary>)> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("commit message must not be empty"));
    }

    let summary = state
        .run(move |repository| repository.commit(&request.message))
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> ApiResult<Json<Vec<CommitSummary>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let commits = state.run(move |repository| repository.log(limit)).await?;

    Ok(Json(commits))
}

pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ShowQuery>,
) -> ApiResult<Json<CommitDetails>> {
    let details = state
        .run(move |repository| repository.show(query.id.as_deref()))
        .await?;

    Ok(Json(details))
}

pub async fn commit_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CommitDetails>> {
    let details = state
        .run(move |repository| repository.show(Some(&id)))
        .await?;

    Ok(Json(details))
}

pub async fn list_files(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let files = state.run(|repository| repository.list_files()).await?;

    Ok(Json(json!({ "files": files })))
}

pub async fn read_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<FileContent>> {
    let content = state
        .run({
            let path = path.clone();
            move |repository| repository.read_file(&path)
        })
        .await?;

    Ok(Json(FileContent::new(path, content)))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<Value>> {
    let was_staged = state
        .run({
            let path = path.clone();
            move |repository| repository.delete_file(&path)
        })
        .await?;

    Ok(Json(json!({
        "path": path,
        "deleted": true,
        "unstaged": was_staged,
    })))
}

pub async fn diff(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<FileDiff>> {
    let file_diff = state.run(move |repository| repository.diff(&path)).await?;

    Ok(Json(file_diff))
}

pub async fn stage(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<Value>> {
    let entry = state.run(move |repository| repository.stage(&path)).await?;

    Ok(Json(json!({ "path": entry.name, "blob": entry.oid })))
}

pub async fn unstage(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<Value>> {
    let was_staged = state
        .run({
            let path = path.clone();
            move |repository| repository.unstage(&path)
        })
        .await?;

    Ok(Json(json!({ "path": path, "unstaged": was_staged })))
}
