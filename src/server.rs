use poem::listener::TcpListener;
use poem::middleware::{NormalizePath, Tracing, TrailingSlash};
use poem::{Endpoint, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;

use crate::api::{AuditApi, AuthApi, HealthApi, ImagesApi};
use crate::app_data::AppData;
use crate::config::AppSettings;

/// Compose the API under `/api` and the Swagger UI under `/swagger`
///
/// Trailing slashes are trimmed before routing, so `/api/register/` and
/// `/api/register` reach the same handler.
pub fn build_app(app_data: &AppData, server_url: &str) -> impl Endpoint {
    let apis = (
        HealthApi,
        AuthApi::new(app_data.auth_service.clone()),
        ImagesApi::new(app_data.authorization.clone(), app_data.audit_logger.clone()),
        AuditApi::new(app_data.authorization.clone(), app_data.audit_store.clone()),
    );

    let api_service = OpenApiService::new(apis, "AWS Image Manager API", env!("CARGO_PKG_VERSION"))
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(NormalizePath::new(TrailingSlash::Trim))
        .with(Tracing)
}

/// Serve until the process is stopped
pub async fn run(app_data: &AppData, settings: &AppSettings) -> Result<(), std::io::Error> {
    let address = settings.server_address();
    let public_url = format!("http://{}", address);

    tracing::info!("Starting server on {}", public_url);
    tracing::info!("Swagger UI available at {}/swagger", public_url);

    Server::new(TcpListener::bind(address))
        .run(build_app(app_data, &public_url))
        .await
}
