use salvo::Router;

use airboard_core::constants::EVENTS_ROUTE_COMPONENT;

mod expand;
mod types;


#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .push(Router::with_path("expand").post(expand::expand))
        .push(Router::with_path("calendar").post(expand::calendar))
}
