//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat API",
        version = "0.1.0",
        description = "User account management for the chat application",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/user", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User account lifecycle (MongoDB)")
    )
)]
pub struct ApiDoc;
