use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, DEFAULT_PAGE_SIZE, IdPath, PageParams, SharerUserId, ValidatedJson,
    ValidatedQuery,
    errors::responses::{
        BadRequestUserHeaderResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{CreateItemRequest, ItemRequest};
use crate::repository::ItemRequestRepository;
use crate::service::ItemRequestService;

pub const TAG: &str = "requests";

#[derive(OpenApi)]
#[openapi(
    paths(list_own, create_request, list_others, get_request),
    components(
        schemas(ItemRequest, CreateItemRequest),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Requests for items not yet listed")
    )
)]
pub struct ApiDoc;

pub fn router<R: ItemRequestRepository + 'static>(service: ItemRequestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own).post(create_request))
        .route("/all", get(list_others))
        .route("/{request_id}", get(get_request))
        .with_state(shared_service)
}

/// The caller's own requests, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Author")),
    responses(
        (status = 200, description = "Own requests with their items", body = Vec<ItemRequest>),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_own<R: ItemRequestRepository>(
    State(service): State<Arc<ItemRequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
) -> RequestResult<Json<Vec<ItemRequest>>> {
    Ok(Json(service.list_own(user_id).await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Author")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_request<R: ItemRequestRepository>(
    State(service): State<Arc<ItemRequestService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> RequestResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;

    AuditEvent::new(
        Some(user_id),
        "request.create",
        Some(format!("request:{}", request.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(request)))
}

/// Other users' requests, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(PageParams, ("X-Sharer-User-Id" = i64, Header, description = "Viewer")),
    responses(
        (status = 200, description = "Requests with their items", body = Vec<ItemRequest>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_others<R: ItemRequestRepository>(
    State(service): State<Arc<ItemRequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> RequestResult<Json<Vec<ItemRequest>>> {
    let requests = service
        .list_others(user_id, params.resolve(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/{request_id}",
    tag = TAG,
    params(
        ("request_id" = i64, Path, description = "Item request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Viewer")
    ),
    responses(
        (status = 200, description = "Request with its items", body = ItemRequest),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_request<R: ItemRequestRepository>(
    State(service): State<Arc<ItemRequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(request_id): IdPath,
) -> RequestResult<Json<ItemRequest>> {
    Ok(Json(service.get_request(user_id, request_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRequestRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::{Page, SHARER_USER_ID_HEADER};
    use chrono::Local;
    use domain_items::Item;
    use http_body_util::BodyExt;
    use mockall::predicate::*;
    use tower::ServiceExt;

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn answered() -> ItemRequest {
        ItemRequest {
            id: 4,
            description: "Need a tent".into(),
            created: Local::now().naive_local(),
            items: vec![Item {
                id: 12,
                name: "Tent".into(),
                description: "Two person".into(),
                available: true,
                request_id: Some(4),
                owner_id: 2,
            }],
        }
    }

    #[tokio::test]
    async fn test_get_request_includes_items() {
        let mut repo = MockItemRequestRepository::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_find_by_id()
            .with(eq(4))
            .returning(|_| Ok(Some(answered())));
        let app = router(ItemRequestService::new(repo));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/4")
                    .header(SHARER_USER_ID_HEADER, "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body["items"][0]["requestId"], 4);
    }

    #[tokio::test]
    async fn test_all_uses_default_page() {
        let mut repo = MockItemRequestRepository::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_find_others()
            .with(eq(1), eq(Page::new(0, DEFAULT_PAGE_SIZE)))
            .returning(|_, _| Ok(vec![]));
        let app = router(ItemRequestService::new(repo));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/all")
                    .header(SHARER_USER_ID_HEADER, "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_negative_from_returns_400() {
        let repo = MockItemRequestRepository::new();
        let app = router(ItemRequestService::new(repo));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/all?from=-1")
                    .header(SHARER_USER_ID_HEADER, "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_request_returns_201() {
        let mut repo = MockItemRequestRepository::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_create().returning(|_, description, created| {
            Ok(ItemRequest {
                id: 1,
                description,
                created,
                items: vec![],
            })
        });
        let app = router(ItemRequestService::new(repo));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(SHARER_USER_ID_HEADER, "1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"description":"Need a tent"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: ItemRequest = json_body(response.into_body()).await;
        assert_eq!(created.description, "Need a tent");
    }
}
