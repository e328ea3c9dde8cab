use super::Forwarded;
use crate::client::{Call, ServerClient};
use crate::models::NewItemRequest;
use axum::{Router, extract::State, routing::get};
use axum_helpers::{
    GATEWAY_PAGE_SIZE, IdPath, PageParams, SharerUserId, ValidatedJson, ValidatedQuery,
};
use tracing::info;

pub fn router() -> Router<ServerClient> {
    Router::new()
        .route("/", get(list_own).post(create_request))
        .route("/all", get(list_others))
        .route("/{request_id}", get(get_request))
}

async fn create_request(
    State(server): State<ServerClient>,
    SharerUserId(author_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<NewItemRequest>,
) -> Forwarded {
    info!(author_id, "Forwarding item request");
    let call = Call::post("/requests").user(author_id).json(&input)?;
    Ok(server.forward(call).await?)
}

async fn list_own(
    State(server): State<ServerClient>,
    SharerUserId(author_id): SharerUserId,
) -> Forwarded {
    Ok(server.forward(Call::get("/requests").user(author_id)).await?)
}

async fn list_others(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Forwarded {
    let call = Call::get("/requests/all")
        .user(user_id)
        .page(params.resolve(GATEWAY_PAGE_SIZE));
    Ok(server.forward(call).await?)
}

async fn get_request(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Forwarded {
    let call = Call::get(format!("/requests/{}", id)).user(user_id);
    Ok(server.forward(call).await?)
}
