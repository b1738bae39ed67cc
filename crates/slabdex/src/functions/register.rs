//! The registration handler.
//!
//! `POST /register` with a `{username, email, password}` JSON body.
//! Appends the new user to the user tab and responds with the public
//! view; the password digest is never echoed back.

use super::{FunctionRequest, FunctionResponse, Method, respond};
use crate::app::App;
use crate::error::{Error, Result};
use crate::users::{NewUser, PublicUser};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RegisterBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Handle one registration event.
pub async fn handle(app: &App, request: &FunctionRequest) -> FunctionResponse {
    respond(run(app, request).await)
}

async fn run(app: &App, request: &FunctionRequest) -> Result<PublicUser> {
    if request.method != Method::Post {
        return Err(Error::MethodNotAllowed);
    }

    let body: RegisterBody = request.json_body()?;
    if body.username.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(Error::InvalidQuery(
            "Username, email and password are required".to_string(),
        ));
    }

    let user = app
        .users()
        .create(NewUser {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(PublicUser::from(&user))
}
