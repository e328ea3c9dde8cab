use super::Forwarded;
use crate::client::{Call, ServerClient};
use crate::error::GatewayError;
use crate::models::{BookingListQuery, BookingState, Decision, NewBooking};
use axum::{Router, extract::State, routing::get};
use axum_helpers::{IdPath, SharerUserId, ValidatedJson, ValidatedQuery};
use tracing::info;

pub fn router() -> Router<ServerClient> {
    Router::new()
        .route("/", get(list_for_booker).post(create_booking))
        .route("/owner", get(list_for_owner))
        .route("/{booking_id}", get(get_booking).patch(decide))
}

/// Shared by both listings; the state is checked here so the server never
/// sees an unknown value.
fn list_call(path: &str, user_id: i64, query: &BookingListQuery) -> Result<Call, GatewayError> {
    let state = BookingState::parse(query.state.as_deref())?;
    Ok(Call::get(path)
        .user(user_id)
        .query("state", state)
        .page(query.page()))
}

async fn list_for_booker(
    State(server): State<ServerClient>,
    SharerUserId(booker_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> Forwarded {
    let call = list_call("/bookings", booker_id, &query)?;
    Ok(server.forward(call).await?)
}

async fn list_for_owner(
    State(server): State<ServerClient>,
    SharerUserId(owner_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<BookingListQuery>,
) -> Forwarded {
    let call = list_call("/bookings/owner", owner_id, &query)?;
    Ok(server.forward(call).await?)
}

async fn create_booking(
    State(server): State<ServerClient>,
    SharerUserId(booker_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<NewBooking>,
) -> Forwarded {
    info!(booker_id, item_id = ?input.item_id, "Forwarding booking");
    let call = Call::post("/bookings").user(booker_id).json(&input)?;
    Ok(server.forward(call).await?)
}

async fn get_booking(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Forwarded {
    let call = Call::get(format!("/bookings/{}", id)).user(user_id);
    Ok(server.forward(call).await?)
}

async fn decide(
    State(server): State<ServerClient>,
    SharerUserId(owner_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedQuery(decision): ValidatedQuery<Decision>,
) -> Forwarded {
    info!(owner_id, booking_id = id, approved = decision.approved, "Forwarding booking decision");
    let call = Call::patch(format!("/bookings/{}", id))
        .user(owner_id)
        .query("approved", decision.approved);
    Ok(server.forward(call).await?)
}
