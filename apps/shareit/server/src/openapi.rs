use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt API",
        version = "0.1.0",
        description = "Users, items, bookings and item requests. The acting user is passed in the X-Sharer-User-Id header."
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/items", api = domain_items::handlers::ApiDoc),
        (path = "/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/requests", api = domain_requests::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_domain() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for prefix in ["/users", "/items", "/bookings", "/requests"] {
            assert!(
                paths.iter().any(|p| p.starts_with(prefix)),
                "missing {} in {:?}",
                prefix,
                paths
            );
        }
        assert!(paths.iter().any(|p| p.as_str() == "/bookings/{booking_id}"));
    }
}
