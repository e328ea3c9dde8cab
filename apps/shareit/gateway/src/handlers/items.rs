use super::Forwarded;
use crate::client::{Call, ServerClient};
use crate::models::{ItemPatch, NewComment, NewItem, SearchQuery};
use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    GATEWAY_PAGE_SIZE, IdPath, PageParams, SharerUserId, ValidatedJson, ValidatedQuery,
};
use tracing::info;

pub fn router() -> Router<ServerClient> {
    Router::new()
        .route("/", get(list_owner_items).post(create_item))
        .route("/search", get(search_items))
        .route(
            "/{item_id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/{item_id}/comment", post(add_comment))
}

async fn list_owner_items(
    State(server): State<ServerClient>,
    SharerUserId(owner_id): SharerUserId,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Forwarded {
    let call = Call::get("/items")
        .user(owner_id)
        .page(params.resolve(GATEWAY_PAGE_SIZE));
    Ok(server.forward(call).await?)
}

async fn create_item(
    State(server): State<ServerClient>,
    SharerUserId(owner_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<NewItem>,
) -> Forwarded {
    info!(owner_id, name = %input.name, "Forwarding item creation");
    let call = Call::post("/items").user(owner_id).json(&input)?;
    Ok(server.forward(call).await?)
}

async fn search_items(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> Forwarded {
    let call = Call::get("/items/search")
        .user(user_id)
        .query("text", &query.text)
        .page(query.page());
    Ok(server.forward(call).await?)
}

async fn get_item(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Forwarded {
    let call = Call::get(format!("/items/{}", id)).user(user_id);
    Ok(server.forward(call).await?)
}

async fn update_item(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ItemPatch>,
) -> Forwarded {
    info!(user_id, item_id = id, "Forwarding item update");
    let call = Call::patch(format!("/items/{}", id))
        .user(user_id)
        .json(&input)?;
    Ok(server.forward(call).await?)
}

async fn delete_item(
    State(server): State<ServerClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Forwarded {
    info!(user_id, item_id = id, "Forwarding item deletion");
    let call = Call::delete(format!("/items/{}", id)).user(user_id);
    Ok(server.forward(call).await?)
}

async fn add_comment(
    State(server): State<ServerClient>,
    SharerUserId(author_id): SharerUserId,
    IdPath(item_id): IdPath,
    ValidatedJson(input): ValidatedJson<NewComment>,
) -> Forwarded {
    info!(author_id, item_id, "Forwarding comment");
    let call = Call::post(format!("/items/{}/comment", item_id))
        .user(author_id)
        .json(&input)?;
    Ok(server.forward(call).await?)
}
