//! Shared response envelope for mutation endpoints.
//!
//! Successful writes answer `{ "ok": true, ...fields }`. Use [`OkResponse`]
//! instead of ad-hoc `serde_json::json!` so the shape stays consistent.

use serde::Serialize;

/// `{ "ok": true }` merged with the fields of `T`.
#[derive(Debug, Serialize)]
pub struct OkResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(body: T) -> Self {
        Self { ok: true, body }
    }
}

/// No extra fields.
#[derive(Debug, Default, Serialize)]
pub struct Empty {}

impl OkResponse<Empty> {
    pub fn empty() -> Self {
        Self::new(Empty {})
    }
}
