use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, CreateUser, UpdateUser),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User registration and profiles")
    )
)]
pub struct ApiDoc;

pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All users ordered by id", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    Ok(Json(service.list_users().await?))
}

/// Register a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    AuditEvent::new(
        Some(user.id),
        "user.create",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "email": user.email }))
    .log();

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    Ok(Json(service.get_user(id).await?))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<User>> {
    Ok(Json(service.update_user(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;

    AuditEvent::new(
        Some(id),
        "user.delete",
        Some(format!("user:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::repository::MockUserRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_returns_201() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().returning(|input| {
            Ok(User {
                id: 1,
                name: input.name,
                email: input.email,
            })
        });
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"name": "Ann", "email": "ann@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let user: User = json_body(response.into_body()).await;
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"name": "Ann", "email": "nope"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|input| Err(UserError::DuplicateEmail(input.email)));
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({"name": "Ann", "email": "ann@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_unknown_user_returns_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_returns_400() {
        let repo = MockUserRepository::new();
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(Request::builder().uri("/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(Some(User {
                id,
                name: "Ann".into(),
                email: "ann@example.com".into(),
            }))
        });
        repo.expect_update().returning(|user, input| {
            Ok(User {
                email: input.email.unwrap_or(user.email),
                ..user
            })
        });
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/1",
                json!({"email": "anna@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let user: User = json_body(response.into_body()).await;
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "anna@example.com");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(true));
        let app = router(UserService::new(repo));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
