use salvo::Router;

mod healthcheck;
mod policy;

#[must_use]
pub fn routes() -> Router {
    Router::with_path("app")
        .push(healthcheck::routes())
        .push(policy::routes())
}
