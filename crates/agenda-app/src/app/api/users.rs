//! User registration and lookup.

use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use agenda_core::constants::USERS_ROUTE_COMPONENT;

use super::dto::{RegisterUserRequest, UserResponse};
use super::response::{bad_request, id_param_or_render, render_error, users_or_render};

/// ## Summary
/// POST /users - Register a user
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, a blank name, an invalid e-mail or a short password
/// Returns HTTP 409 if the e-mail is already registered
#[handler]
async fn register_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(users) = users_or_render(depot, res) else {
        return;
    };

    let body: RegisterUserRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to parse user registration");
            bad_request(res, "invalid request body");
            return;
        }
    };

    match users.register(body.into()).await {
        Ok(user) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(UserResponse::from(&user)));
        }
        Err(e) => render_error(res, &e.into()),
    }
}

/// ## Summary
/// GET /users/{id} - Fetch a registered user
///
/// ## Errors
/// Returns HTTP 400 if the id is not an integer
/// Returns HTTP 404 if no user has this id
#[handler]
async fn get_user(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(users) = users_or_render(depot, res) else {
        return;
    };
    let Some(id) = id_param_or_render(req, res, "id") else {
        return;
    };

    match users.find(id).await {
        Ok(user) => res.render(Json(UserResponse::from(&user))),
        Err(e) => render_error(res, &e.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(USERS_ROUTE_COMPONENT)
        .post(register_user)
        .push(Router::with_path("{id}").get(get_user))
}
