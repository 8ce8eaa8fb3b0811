use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::health::health_handler),
    components(
        schemas(axum_helpers::ErrorResponse),
        responses(axum_helpers::errors::responses::InternalServerErrorResponse)
    ),
    info(
        title = "User API",
        version = "1.0.0",
        description = "In-memory user directory with create, read, update, delete and list"
    ),
    tags((name = crate::api::health::TAG, description = "Service health")),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
