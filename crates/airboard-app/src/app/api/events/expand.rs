//! Expansion endpoints for calendar screens.

use airboard_calendar::expand::QueryWindow;
use airboard_calendar::{CalendarView, RecurrenceExpander};
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, handler};
use std::sync::Arc;

use super::types::{ErrorResponse, ExpandRequest};
use crate::expander_handler::get_expander_from_depot;

/// ## Summary
/// POST /api/events/expand - Materialize recurring events over a window
///
/// Responds with the flat list of instances. Events whose recurrence data
/// is malformed are left out without an error.
///
/// ## Errors
/// Returns 400 for an unreadable body or a window that ends before it
/// starts, 500 if the expander is not configured.
#[handler]
#[tracing::instrument(skip_all)]
pub async fn expand(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((request, expander)) = prepare(req, depot, res).await else {
        return;
    };

    let instances = expander.expand(&request.events, request.start, request.end);
    tracing::debug!(
        events = request.events.len(),
        instances = instances.len(),
        "Expanded recurring events"
    );

    res.render(Json(instances));
}

/// ## Summary
/// POST /api/events/calendar - Build the calendar view for a window
///
/// Responds with `{ "events": [...], "recurring_instances": [...] }`.
///
/// ## Errors
/// Same as [`expand`].
#[handler]
#[tracing::instrument(skip_all)]
pub async fn calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((request, expander)) = prepare(req, depot, res).await else {
        return;
    };

    let view = CalendarView::build(&request.events, request.start, request.end, &expander);

    res.render(Json(view));
}

/// Parses and validates the body, writing the error response on failure.
async fn prepare(
    req: &mut Request,
    depot: &Depot,
    res: &mut Response,
) -> Option<(ExpandRequest, Arc<RecurrenceExpander>)> {
    let expander = match get_expander_from_depot(depot) {
        Ok(expander) => expander,
        Err(e) => {
            tracing::error!("Failed to get recurrence expander: {}", e);
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            return None;
        }
    };

    let request: ExpandRequest = match req.parse_json().await {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to parse expansion request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return None;
        }
    };

    if let Err(e) = QueryWindow::try_new(request.start, request.end) {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: e.to_string(),
        }));
        return None;
    }

    Some((request, expander))
}
