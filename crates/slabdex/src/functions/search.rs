//! The search handler.
//!
//! `GET /search?blockNo=...&partNo=...&thickness=...` behind a bearer
//! token. Responds with the JSON array of projected records.

use super::{FunctionRequest, FunctionResponse, Method, respond};
use crate::app::App;
use crate::engine::{ResultSet, SearchQuery};
use crate::error::{Error, Result};

/// Handle one search event.
pub async fn handle(app: &App, request: &FunctionRequest) -> FunctionResponse {
    respond(run(app, request).await)
}

async fn run(app: &App, request: &FunctionRequest) -> Result<ResultSet> {
    if request.method != Method::Get {
        return Err(Error::MethodNotAllowed);
    }

    let token = request
        .bearer_token()
        .ok_or_else(|| Error::Unauthorized("No authorization header".to_string()))?;
    let claims = app.signer().verify(token)?;
    tracing::debug!(username = %claims.username, "authenticated search request");

    let block_no = request
        .get_param("blockNo")
        .ok_or_else(|| Error::InvalidQuery("Block number is required".to_string()))?;
    // A secondary param supplied empty (`?partNo=`) is as good as absent.
    let mut query = SearchQuery::new(block_no);
    query.part_no = request
        .get_param("partNo")
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    query.thickness = request
        .get_param("thickness")
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    app.search().search(&query).await
}
