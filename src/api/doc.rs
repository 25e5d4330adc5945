use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const COMPANY_TAG: &str = "Company";
pub const USER_TAG: &str = "Users";
pub const STOCK_TAG: &str = "Followed Stocks";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equity",
        description = "Company fundamentals, price charts and watchlists",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::charting::ChartData,
            crate::charting::OwnershipBreakdown,
        )
    ),
    tags(
        (name = COMPANY_TAG, description = "Company snapshot and price chart endpoints"),
        (name = USER_TAG, description = "User sign-up and listing endpoints"),
        (name = STOCK_TAG, description = "Watchlist of the authenticated user"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("RS256 session token issued by the identity provider"))
                        .build(),
                ),
            )
        }
    }
}
