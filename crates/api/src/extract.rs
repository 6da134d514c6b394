//! Request body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// JSON object body parsed regardless of the `Content-Type` header.
///
/// Overlay editors post JSON without always setting the header, so the body
/// is read as bytes and parsed directly. Parse failures become a structured
/// 400 instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn create(AnyJson(input): AnyJson<OverlayFields>) -> AppResult<Json<()>> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct AnyJson<T>(pub T);

impl<S, T> FromRequest<S> for AnyJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

        Ok(AnyJson(parse_json_object(&bytes)?))
    }
}

/// Parse `bytes` as a JSON object and deserialize it into `T`.
///
/// Arrays, strings and other non-object documents are rejected before `T`
/// sees them; serde would otherwise fill struct fields by position.
pub fn parse_json_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let object = json_object(bytes)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Parse `bytes` as a JSON document that must be an object.
pub fn json_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::BadRequest(format!("Invalid JSON body: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Pair {
        a: Option<i32>,
        b: Option<String>,
    }

    #[test]
    fn object_bodies_are_accepted() {
        let pair: Pair = parse_json_object(br#"{"a": 1, "c": true}"#).unwrap();
        assert_eq!(pair.a, Some(1));
        assert_eq!(pair.b, None);
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let bodies: [&[u8]; 5] = [br#"[1, "x"]"#, b"\"text\"", b"42", b"null", b"{oops"];
        for body in bodies {
            assert_matches!(
                parse_json_object::<Pair>(body),
                Err(AppError::BadRequest(_)),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
