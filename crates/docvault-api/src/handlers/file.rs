//! File tree handlers: listing, upload, folders, updates, recursive
//! deletion, and blob streaming.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use docvault_core::error::AppError;
use docvault_entity::node::NodeChanges;
use docvault_service::node::listing::ListRequest;
use docvault_service::node::service::{BlobContent, CreateFolderRequest as SvcCreateFolder, UploadRequest};

use crate::dto::request::{CreateFolderRequest, UpdateNodeRequest};
use crate::dto::response::{
    CreatedResponse, DeleteResponse, MessageResponse, NodePageResponse, UploadResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Scope parameters of GET /api/files.
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesQuery {
    /// Folder whose children to list; absent lists the root.
    pub parent_id: Option<Uuid>,
    /// Substring search across the whole accessible tree.
    pub search: Option<String>,
}

/// GET /api/files?parent_id=&search=&page=&limit=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<ListFilesQuery>,
) -> Result<Json<NodePageResponse>, ApiError> {
    let page = state
        .listing_service
        .list(
            &auth,
            ListRequest {
                parent_id: filter.parent_id,
                search: filter.search,
                page: pagination.into_page_request(),
            },
        )
        .await?;

    Ok(Json(page.into()))
}

/// POST /api/files/upload — multipart upload.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut parent_id: Option<Uuid> = None;
    let mut access_level: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(String::from);
                content_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "parent_id" => {
                let text = read_text_field(field).await?;
                parent_id = Some(
                    Uuid::parse_str(&text).map_err(|_| AppError::validation("Invalid parent_id"))?,
                );
            }
            "access_level" => {
                let text = read_text_field(field).await?;
                access_level = Some(
                    text.parse::<i32>()
                        .map_err(|_| AppError::validation("Invalid access_level"))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let data = data.ok_or_else(|| AppError::validation("No file uploaded"))?;

    let node = state
        .node_service
        .upload(
            &auth,
            UploadRequest {
                file_name,
                content_type,
                data,
                parent_id,
                clearance_level: access_level,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded".to_string(),
            file_id: node.id,
        }),
    ))
}

/// POST /api/files/folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .node_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
                clearance_level: req.access_level,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Folder created".to_string(),
            id: folder.id,
        }),
    ))
}

/// PUT /api/files/:id — rename, move, reclassify, or any combination.
pub async fn update_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNodeRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .node_service
        .update(
            &auth,
            id,
            NodeChanges {
                name: req.name,
                parent_id: req.parent_id,
                clearance_level: req.access_level,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Updated successfully")))
}

/// DELETE /api/files/:id — recursive delete.
pub async fn delete_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state.deletion_engine.delete_subtree(&auth, id).await?;

    Ok(Json(DeleteResponse {
        message: "Deleted successfully".to_string(),
        removed,
    }))
}

/// GET /api/files/download/:id
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let content = state.node_service.open_blob(&auth, id).await?;
    blob_response(content, "attachment")
}

/// GET /api/files/preview/:id
pub async fn preview_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let content = state.node_service.open_blob(&auth, id).await?;
    blob_response(content, "inline")
}

/// Stream a blob back with its metadata headers.
///
/// The filename travels as RFC 5987 `filename*` so non-ASCII names survive
/// every browser.
fn blob_response(content: BlobContent, disposition: &str) -> Result<Response, ApiError> {
    let content_type = content
        .node
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content.node.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "{disposition}; filename*=UTF-8''{}",
                urlencoding::encode(&content.node.name)
            ),
        )
        .body(Body::from_stream(content.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Read a multipart text field.
async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}
