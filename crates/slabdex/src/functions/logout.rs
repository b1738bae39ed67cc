//! The logout handler.
//!
//! `POST /logout`. Tokens carry their own expiry and there is no
//! session state to tear down, so this is a stateless acknowledgement
//! kept for client symmetry.

use super::{FunctionRequest, FunctionResponse, Method};
use crate::error::Error;
use serde_json::json;

/// Handle one logout event.
#[must_use]
pub fn handle(request: &FunctionRequest) -> FunctionResponse {
    if request.method != Method::Post {
        return FunctionResponse::from_error(&Error::MethodNotAllowed);
    }
    FunctionResponse::ok(&json!({ "message": "Logged out successfully" }))
}
