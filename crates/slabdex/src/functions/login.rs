//! The login handler.
//!
//! `POST /login` with a `{username, password}` JSON body. Issues a
//! bearer token on success.

use super::{FunctionRequest, FunctionResponse, Method, respond};
use crate::app::App;
use crate::error::{Error, Result};
use crate::users::PublicUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Successful login payload: the token plus the public user view.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user, digest omitted.
    pub user: PublicUser,
}

/// Handle one login event.
pub async fn handle(app: &App, request: &FunctionRequest) -> FunctionResponse {
    respond(run(app, request).await)
}

async fn run(app: &App, request: &FunctionRequest) -> Result<LoginResponse> {
    if request.method != Method::Post {
        return Err(Error::MethodNotAllowed);
    }

    let body: LoginBody = request.json_body()?;
    if body.username.is_empty() || body.password.is_empty() {
        return Err(Error::InvalidQuery(
            "Username and password are required".to_string(),
        ));
    }

    let (token, user) = app
        .signer()
        .authenticate(app.users(), &body.username, &body.password)
        .await?;
    tracing::info!(username = %user.username, "user logged in");

    Ok(LoginResponse {
        token,
        user: PublicUser::from(&user),
    })
}
