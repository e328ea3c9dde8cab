use axum::Router;
use domain_requests::{ItemRequestService, PgItemRequestRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgItemRequestRepository::new(state.db.clone());
    handlers::router(ItemRequestService::new(repository))
}
