//! File mode.
//!
//! The file is opened on every request and streamed in chunks of up to
//! [`FILE_BUFFER_SIZE`] bytes. A read error after the headers went out
//! aborts only this response.

use std::io;
use std::path::PathBuf;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, BytesMut};
use futures_util::{Stream, TryStreamExt};
use tokio::{fs::File, io::AsyncReadExt};

use crate::config::FILE_BUFFER_SIZE;
use crate::http::handlers::peer;
use crate::http::server::AppState;

pub async fn serve_file(State(state): State<AppState>, request: Request) -> Response {
    let path = state.config.file.clone();
    tracing::debug!("Serving {} to {}", path.display(), peer(&request));

    let mut length = None;
    if state.config.content_length {
        match tokio::fs::metadata(&path).await {
            Ok(meta) => length = Some(meta.len()),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Unable to stat file");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error, can't stat file",
                )
                    .into_response();
            }
        }
    }

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Unable to load file");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error, can't open file",
            )
                .into_response();
        }
    };

    let mut response = Response::new(Body::from_stream(chunks(file, path)));
    if let Some(length) = length {
        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
    response
}

/// Stream `file` in buffer-sized chunks.
pub fn chunks(file: File, path: PathBuf) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
    futures_util::stream::try_unfold(file, |mut file| async move {
        let mut buffer = BytesMut::with_capacity(FILE_BUFFER_SIZE);
        while buffer.len() < FILE_BUFFER_SIZE {
            let remaining = FILE_BUFFER_SIZE - buffer.len();
            let mut window = (&mut buffer).limit(remaining);
            if file.read_buf(&mut window).await? == 0 {
                break;
            }
        }
        if buffer.is_empty() {
            return Ok::<_, io::Error>(None);
        }
        Ok(Some((buffer.freeze(), file)))
    })
    .inspect_err(move |e| {
        tracing::warn!(file = %path.display(), error = %e, "Error reading file, aborting response");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::io::Write;

    async fn collect(len: usize) -> (Vec<u8>, Vec<usize>) {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        let content: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        tmp.write_all(&content).unwrap();

        let file = File::open(tmp.path()).await.unwrap();
        let parts: Vec<Bytes> = chunks(file, tmp.path().to_path_buf())
            .map(|chunk| chunk.unwrap())
            .collect()
            .await;
        let sizes = parts.iter().map(|p| p.len()).collect();
        assert_eq!(parts.concat(), content);
        (parts.concat(), sizes)
    }

    #[tokio::test]
    async fn empty_file_yields_no_chunks() {
        let (_, sizes) = collect(0).await;
        assert!(sizes.is_empty());
    }

    #[tokio::test]
    async fn chunks_are_buffer_sized() {
        let (_, sizes) = collect(FILE_BUFFER_SIZE + 1).await;
        assert_eq!(sizes, vec![FILE_BUFFER_SIZE, 1]);
    }
}
