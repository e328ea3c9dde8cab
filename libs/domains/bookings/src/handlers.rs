use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUserHeaderResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingListParams, CreateBooking, DecisionParams};
use crate::repository::BookingRepository;
use crate::service::BookingService;

pub const TAG: &str = "bookings";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_for_booker,
        create_booking,
        list_for_owner,
        get_booking,
        decide_booking
    ),
    components(
        schemas(Booking, CreateBooking),
        responses(
            NotFoundResponse,
            ForbiddenResponse,
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Booking requests and owner decisions")
    )
)]
pub struct ApiDoc;

pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_for_booker).post(create_booking))
        .route("/owner", get(list_for_owner))
        .route("/{booking_id}", get(get_booking).patch(decide_booking))
        .with_state(shared_service)
}

/// Bookings made by the caller
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(BookingListParams, ("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<Booking>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_for_booker<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<BookingListParams>,
) -> BookingResult<Json<Vec<Booking>>> {
    let bookings = service
        .list_for_booker(user_id, params.state.as_deref(), params.page())
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created, waiting for the owner", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;

    AuditEvent::new(
        Some(user_id),
        "booking.create",
        Some(format!("booking:{}", booking.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "item_id": booking.item.id }))
    .log();

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Bookings of the caller's items
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(BookingListParams, ("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<Booking>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_for_owner<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<BookingListParams>,
) -> BookingResult<Json<Vec<Booking>>> {
    let bookings = service
        .list_for_owner(user_id, params.state.as_deref(), params.page())
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/{booking_id}",
    tag = TAG,
    params(
        ("booking_id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(booking_id): IdPath,
) -> BookingResult<Json<Booking>> {
    Ok(Json(service.get_booking(user_id, booking_id).await?))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/{booking_id}",
    tag = TAG,
    params(
        ("booking_id" = i64, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        DecisionParams
    ),
    responses(
        (status = 200, description = "Booking decided", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decide_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    IdPath(booking_id): IdPath,
    ValidatedQuery(params): ValidatedQuery<DecisionParams>,
) -> BookingResult<Json<Booking>> {
    let result = service.decide(user_id, booking_id, params.approved).await;

    let outcome = match &result {
        Ok(_) => AuditOutcome::Success,
        Err(BookingError::NotOwner { .. }) => AuditOutcome::Denied,
        Err(_) => AuditOutcome::Failure,
    };
    AuditEvent::new(
        Some(user_id),
        "booking.decide",
        Some(format!("booking:{}", booking_id)),
        outcome,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "approved": params.approved }))
    .log();

    Ok(Json(result?))
}
