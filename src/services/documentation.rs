use utoipa::OpenApi;

/// Aggregated OpenAPI specification for the tally bot HTTP API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::tallies::get_tallies,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::tallies::TalliesSnapshot,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tallies", description = "Read-only tally data"),
    )
)]
pub struct ApiDoc;
