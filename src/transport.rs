//! JSON request/response handling around the decode pipeline.
//!
//! A request carries the record as base64 plus the file extension naming its format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{data::GameData, error::DecodeError, summary::Summary};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Base64 encoded record bytes.
    pub file: String,
    /// Format tag, e.g. `pk3`.
    pub extension: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Summary(Summary),
    Error { error: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl TransportError {
    /// HTTP-style status code for the failure.
    pub fn status(&self) -> u16 {
        match self {
            TransportError::InvalidJson(_) | TransportError::InvalidBase64(_) => 400,
            TransportError::Decode(DecodeError::UnsupportedFormat { .. }) => 415,
            TransportError::Decode(
                DecodeError::TruncatedInput { .. } | DecodeError::FieldDecodeOverflow { .. },
            ) => 422,
            TransportError::Decode(
                DecodeError::InvalidDescriptor { .. } | DecodeError::CipherOverflow { .. },
            ) => 500,
        }
    }
}

pub fn handle_request(request: &Request, data: &GameData) -> Result<Summary, TransportError> {
    let bytes = STANDARD.decode(request.file.trim())?;
    Ok(crate::summarize(&bytes, &request.extension, data)?)
}

/// Parses one JSON request and always produces a response.
pub fn handle_line(line: &str, data: &GameData) -> Response {
    let result = serde_json::from_str::<Request>(line)
        .map_err(TransportError::from)
        .and_then(|request| handle_request(&request, data));

    match result {
        Ok(summary) => Response::Summary(summary),
        Err(err) => {
            log::warn!("Rejected request: {err}");
            Response::Error {
                status: err.status(),
                error: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(bytes: &[u8], extension: &str) -> String {
        serde_json::to_string(&Request {
            file: STANDARD.encode(bytes),
            extension: extension.to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        let data = GameData::builtin();
        let Response::Summary(summary) = handle_line(&request(&[0u8; 136], "pk4"), &data) else {
            panic!("expected a summary");
        };
        assert_eq!(summary.level, 1);
        assert_eq!(summary.hp, 11);
    }

    #[test]
    fn test_error_statuses() {
        let data = GameData::builtin();
        let status = |line: &str| match handle_line(line, &data) {
            Response::Error { status, .. } => status,
            Response::Summary(_) => panic!("expected an error for {line}"),
        };

        assert_eq!(status("not json"), 400);
        assert_eq!(status(r#"{"file": "***", "extension": "pk3"}"#), 400);
        assert_eq!(status(&request(&[0u8; 80], "pkx")), 415);
        assert_eq!(status(&request(&[0u8; 79], "pk3")), 422);
    }

    #[test]
    fn test_error_response_shape() {
        let response = handle_line(&request(&[0u8; 10], "pk3"), &GameData::builtin());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 422);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("expected at least 80 bytes"));
    }
}
