use airboard_calendar::RecurrenceExpander;
use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use airboard_core::error::CoreError;

/// Hoop that makes the shared expander available to handlers.
pub struct ExpanderHandler {
    pub expander: Arc<RecurrenceExpander>,
}

#[async_trait]
impl salvo::Handler for ExpanderHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.expander));
    }
}

/// ## Summary
/// Retrieves the recurrence expander from the depot.
///
/// ## Errors
/// Returns an error if the expander is not found in the depot.
pub fn get_expander_from_depot(depot: &salvo::Depot) -> AppResult<Arc<RecurrenceExpander>> {
    depot
        .obtain::<Arc<RecurrenceExpander>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Recurrence expander not found in depot").into())
}
