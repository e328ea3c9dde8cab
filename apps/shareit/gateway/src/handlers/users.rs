use super::Forwarded;
use crate::client::{Call, ServerClient};
use crate::models::{NewUser, UserPatch};
use axum::{Router, extract::State, routing::get};
use axum_helpers::{IdPath, ValidatedJson};
use tracing::info;

pub fn router() -> Router<ServerClient> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

async fn list_users(State(server): State<ServerClient>) -> Forwarded {
    Ok(server.forward(Call::get("/users")).await?)
}

async fn create_user(
    State(server): State<ServerClient>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> Forwarded {
    info!(email = %input.email, "Forwarding user creation");
    Ok(server.forward(Call::post("/users").json(&input)?).await?)
}

async fn get_user(State(server): State<ServerClient>, IdPath(id): IdPath) -> Forwarded {
    Ok(server.forward(Call::get(format!("/users/{}", id))).await?)
}

async fn update_user(
    State(server): State<ServerClient>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UserPatch>,
) -> Forwarded {
    info!(user_id = id, "Forwarding user update");
    let call = Call::patch(format!("/users/{}", id)).json(&input)?;
    Ok(server.forward(call).await?)
}

async fn delete_user(State(server): State<ServerClient>, IdPath(id): IdPath) -> Forwarded {
    info!(user_id = id, "Forwarding user deletion");
    Ok(server.forward(Call::delete(format!("/users/{}", id))).await?)
}

#[cfg(test)]
mod tests {
    use super::super::routes;
    use super::super::testing::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_user_is_forwarded() {
        let app = routes(echo_server().await);
        let (status, body) = send(
            app,
            with_json(
                Method::POST,
                "/users",
                None,
                json!({"name": "Ann", "email": "ann@example.com"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/users");
        assert_eq!(body["body"]["email"], "ann@example.com");
    }

    #[tokio::test]
    async fn test_bad_email_never_reaches_server() {
        let app = routes(unreachable_server());
        let (status, body) = send(
            app,
            with_json(
                Method::POST,
                "/users",
                None,
                json!({"name": "Ann", "email": "ann.example.com"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_patch_sends_only_given_fields() {
        let app = routes(echo_server().await);
        let (status, body) = send(
            app,
            with_json(Method::PATCH, "/users/3", None, json!({"name": "Bob"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], "/users/3");
        assert_eq!(body["body"], json!({"name": "Bob"}));
    }

    #[tokio::test]
    async fn test_non_positive_id_is_rejected() {
        let app = routes(unreachable_server());
        let (status, _) = send(app, get("/users/0", None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
