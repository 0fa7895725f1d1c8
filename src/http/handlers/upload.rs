//! Upload mode.
//!
//! Accepts `POST` multipart forms with a file part named `Name` and saves
//! it under the base name of the uploaded filename in the working
//! directory, replacing any existing file. Two uploads with the same base
//! name race and the last writer wins.

use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError},
        FromRequest, Multipart, Request, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::http::handlers::peer;
use crate::http::server::AppState;

/// Form field carrying the file.
pub const FORM_FIELD: &str = "Name";

const MISSING_FIELD: &str = "Form field 'Name' is missing, use 'curl -X POST -F Name=@filename'";

#[derive(Debug, Error)]
enum UploadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Multipart(#[from] MultipartError),
}

pub async fn accept_upload(State(state): State<AppState>, request: Request) -> Response {
    if request.method() != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    }
    let peer = peer(&request);

    let mut multipart = match Multipart::from_request(request, &state).await {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::warn!(error = %e.body_text(), "{}", MISSING_FIELD);
            return (StatusCode::BAD_REQUEST, MISSING_FIELD).into_response();
        }
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FORM_FIELD) => {
                return save(field, &peer).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("{}", MISSING_FIELD);
                return (StatusCode::BAD_REQUEST, MISSING_FIELD).into_response();
            }
            Err(e) => return (StatusCode::BAD_REQUEST, e.body_text()).into_response(),
        }
    }
}

async fn save(mut field: Field<'_>, peer: &str) -> Response {
    let Some(target) = field.file_name().and_then(target_name) else {
        return (StatusCode::BAD_REQUEST, "Uploaded part has no file name").into_response();
    };
    tracing::debug!("Uploading {} from {}", target.display(), peer);

    match write_field(&mut field, &target).await {
        Ok(written) => {
            tracing::debug!(file = %target.display(), bytes = written, "Upload stored");
            Response::new(Body::from("Upload successful"))
        }
        Err(e) => {
            tracing::warn!(file = %target.display(), error = %e, "Upload failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn write_field(field: &mut Field<'_>, target: &Path) -> Result<u64, UploadError> {
    let mut file = File::create(target).await?;
    let mut written = 0u64;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

/// Base name of an uploaded filename, e.g. `a/b/c.txt` -> `c.txt`.
pub fn target_name(file_name: &str) -> Option<PathBuf> {
    Path::new(file_name).file_name().map(PathBuf::from)
}
