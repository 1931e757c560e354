mod app_specific;
mod events;

use airboard_core::constants::API_ROUTE_COMPONENT;
use salvo::Router;

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(events::routes())
}
