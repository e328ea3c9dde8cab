use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, DEFAULT_PAGE_SIZE, IdPath, PageParams, SharerUserId, ValidatedJson,
    ValidatedQuery,
    errors::responses::{
        BadRequestUserHeaderResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    BookingShort, Comment, CreateComment, CreateItem, Item, ItemDetails, SearchParams, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const TAG: &str = "items";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_owner_items,
        create_item,
        search_items,
        get_item,
        update_item,
        delete_item,
        add_comment
    ),
    components(
        schemas(Item, ItemDetails, BookingShort, Comment, CreateItem, UpdateItem, CreateComment),
        responses(
            NotFoundResponse,
            ForbiddenResponse,
            BadRequestValidationResponse,
            BadRequestUserHeaderResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Items, search and comments")
    )
)]
pub struct ApiDoc;

pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_owner_items).post(create_item))
        .route("/search", get(search_items))
        .route(
            "/{item_id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/{item_id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// The caller's own items with comments and adjacent bookings
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageParams, ("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    responses(
        (status = 200, description = "Owner's items ordered by id", body = Vec<ItemDetails>),
        (status = 400, response = BadRequestUserHeaderResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owner_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> ItemResult<Json<Vec<ItemDetails>>> {
    let items = service
        .list_owner_items(user_id, params.resolve(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;

    AuditEvent::new(
        Some(user_id),
        "item.create",
        Some(format!("item:{}", item.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "name": item.name, "request_id": item.request_id }))
    .log();

    Ok((StatusCode::CREATED, Json(item)))
}

/// Available items matching `text` in name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching items ordered by id", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> ItemResult<Json<Vec<Item>>> {
    let text = params.text.as_deref().unwrap_or_default();
    Ok(Json(service.search(text, params.page()).await?))
}

#[utoipa::path(
    get,
    path = "/{item_id}",
    tag = TAG,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    responses(
        (status = 200, description = "Item with comments", body = ItemDetails),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(item_id): IdPath,
) -> ItemResult<Json<ItemDetails>> {
    Ok(Json(service.get_item(user_id, item_id).await?))
}

/// Partially update an item; owner only
#[utoipa::path(
    patch,
    path = "/{item_id}",
    tag = TAG,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(item_id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    Ok(Json(service.update_item(user_id, item_id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{item_id}",
    tag = TAG,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Owner")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    IdPath(item_id): IdPath,
) -> ItemResult<impl IntoResponse> {
    service.delete_item(user_id, item_id).await?;

    AuditEvent::new(
        Some(user_id),
        "item.delete",
        Some(format!("item:{}", item_id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::OK)
}

/// Comment on an item the caller has rented before
#[utoipa::path(
    post,
    path = "/{item_id}/comment",
    tag = TAG,
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Author")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = Comment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    headers: HeaderMap,
    SharerUserId(user_id): SharerUserId,
    IdPath(item_id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<Json<Comment>> {
    let comment = service.add_comment(user_id, item_id, input).await?;

    AuditEvent::new(
        Some(user_id),
        "item.comment",
        Some(format!("item:{}", item_id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "comment_id": comment.id }))
    .log();

    Ok(Json(comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::{Page, SHARER_USER_ID_HEADER};
    use http_body_util::BodyExt;
    use mockall::predicate::*;
    use std::collections::HashMap;
    use tower::ServiceExt;

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn drill() -> Item {
        Item {
            id: 10,
            name: "Drill".into(),
            description: "Cordless drill".into(),
            available: true,
            request_id: None,
            owner_id: 1,
        }
    }

    fn request(method: &str, uri: &str, user: Option<i64>, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(SHARER_USER_ID_HEADER, user.to_string());
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_item_returns_201() {
        let mut repo = MockItemRepository::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_create()
            .withf(|owner, input| *owner == 1 && input.name == "Drill")
            .returning(|_, _| Ok(drill()));
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request(
                "POST",
                "/",
                Some(1),
                Some(json!({"name": "Drill", "description": "Cordless drill", "available": true})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body["id"], 10);
        assert!(body.get("ownerId").is_none());
    }

    #[tokio::test]
    async fn test_create_item_without_header_returns_400() {
        let repo = MockItemRepository::new();
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request(
                "POST",
                "/",
                None,
                Some(json!({"name": "Drill", "description": "Cordless", "available": true})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_by_stranger_returns_403() {
        let mut repo = MockItemRepository::new();
        repo.expect_user_exists().returning(|_| Ok(true));
        repo.expect_find_by_id().returning(|_| Ok(Some(drill())));
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request(
                "PATCH",
                "/10",
                Some(2),
                Some(json!({"available": false})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_search_passes_page() {
        let mut repo = MockItemRepository::new();
        repo.expect_search()
            .withf(|text, page| text == "dRiLL" && *page == Page::new(5, 5))
            .returning(|_, _| Ok(vec![drill()]));
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request("GET", "/search?text=dRiLL&from=5&size=5", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let items: Vec<Item> = json_body(response.into_body()).await;
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_search_rejects_zero_size() {
        let repo = MockItemRepository::new();
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request("GET", "/search?text=drill&size=0", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_item_returns_details() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(drill())));
        repo.expect_comments_for_items()
            .returning(|_| Ok(HashMap::new()));
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request("GET", "/10", Some(2), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let details: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(details["name"], "Drill");
        assert!(details["lastBooking"].is_null());
        assert_eq!(details["comments"], json!([]));
    }

    #[tokio::test]
    async fn test_comment_without_rental_returns_400() {
        let mut repo = MockItemRepository::new();
        repo.expect_has_finished_booking()
            .returning(|_, _, _| Ok(false));
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request(
                "POST",
                "/10/comment",
                Some(2),
                Some(json!({"text": "Great drill"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_comment_returns_400() {
        let mut repo = MockItemRepository::new();
        repo.expect_has_finished_booking().never();
        let app = router(ItemService::new(repo));

        let response = app
            .oneshot(request("POST", "/10/comment", Some(2), Some(json!({"text": "  "}))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
