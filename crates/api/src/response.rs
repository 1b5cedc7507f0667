//! Response envelope for successful handler results.
//!
//! Every successful endpoint answers `{ "data": ... }`; errors take the
//! `{ "error", "code" }` shape produced in `error.rs`. Handlers wrap
//! their payload in [`DataResponse`] rather than building the envelope
//! with `serde_json::json!` so the payload type stays visible.

use serde::Serialize;

/// The `{ "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: group }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
