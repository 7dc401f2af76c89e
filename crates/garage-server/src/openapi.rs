use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garage API",
        version = "0.1.0",
        description = "Vehicle catalog: segments, brands, and vehicles behind token authentication."
    ),
    paths(
        crate::routes::accounts::register,
        crate::routes::accounts::login,
        crate::routes::accounts::logout,
        crate::routes::accounts::profile,
        crate::routes::accounts::update_profile,
        crate::routes::accounts::partial_update_profile,
        crate::routes::segments::list_segments,
        crate::routes::segments::create_segment,
        crate::routes::segments::get_segment,
        crate::routes::segments::update_segment,
        crate::routes::segments::partial_update_segment,
        crate::routes::segments::delete_segment,
        crate::routes::brands::list_brands,
        crate::routes::brands::create_brand,
        crate::routes::brands::get_brand,
        crate::routes::brands::update_brand,
        crate::routes::brands::partial_update_brand,
        crate::routes::brands::delete_brand,
        crate::routes::vehicles::list_vehicles,
        crate::routes::vehicles::create_vehicle,
        crate::routes::vehicles::get_vehicle,
        crate::routes::vehicles::update_vehicle,
        crate::routes::vehicles::partial_update_vehicle,
        crate::routes::vehicles::delete_vehicle,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::RegisterRequest,
        crate::dto::LoginRequest,
        crate::dto::UserResponse,
        crate::dto::TokenResponse,
        crate::dto::SegmentRequest,
        crate::dto::SegmentResponse,
        crate::dto::BrandRequest,
        crate::dto::BrandResponse,
        crate::dto::VehicleRequest,
        crate::dto::VehicleResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
        crate::dto::MessageResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, tokens, and profile"),
        (name = "segments", description = "Vehicle segments"),
        (name = "brands", description = "Vehicle brands"),
        (name = "vehicles", description = "Vehicle listings"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("token")
                        .description(Some("Token issued by POST /api/auth."))
                        .build(),
                ),
            );
        }
    }
}
