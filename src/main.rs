use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use smart_path::logging::init_logging;
use smart_path::orchestrator::{get_swap_in_path_quote, validate_request};
use smart_path::types::{ResponsePool, Route, SmartPathConfig, SwapPathRequest, SwapPathResponse};
use smart_path::SmartPath;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct SmartPathState {
    smart_path: Arc<SmartPath>,
}

#[derive(OpenApi)]
#[openapi(
    paths(get_swap_in_path),
    components(
        schemas(SwapPathRequest, SwapPathResponse, Route, ResponsePool)
    ),
    tags(
        (name = "swap path", description = "Best Uniswap V2/V3 route for an exact-in swap")
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/swap_in_path",
    params(SwapPathRequest),
    responses(
        (status = 200, description = "Best route, empty routes when none exists", body = SwapPathResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Token metadata could not be resolved")
    ),
    tag = "swap path"
)]
async fn get_swap_in_path(
    State(state): State<SmartPathState>,
    Query(params): Query<SwapPathRequest>,
) -> Result<Json<SwapPathResponse>, (StatusCode, String)> {
    validate_request(&params).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let response = get_swap_in_path_quote(state.smart_path.as_ref(), params)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "swap path request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
        })?;
    Ok(Json(response))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = PathBuf::from("smart_path.toml");
    let config = SmartPathConfig::load_from(config_path)?;
    init_logging(&config.log_level);

    let mut builder = SmartPath::builder().settings(config.clone());
    if let Some(rpc_url) = &config.rpc_url {
        builder = builder.rpc_url(rpc_url.as_str());
    }
    let state = SmartPathState {
        smart_path: Arc::new(builder.build().await?),
    };

    let app = Router::new()
        .route("/swap_in_path", get(get_swap_in_path))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr.as_str()).await?;
    tracing::info!("Server running on http://{}", config.listen_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
