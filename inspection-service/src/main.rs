use inspection_service::config::InspectionConfig;
use inspection_service::startup::Application;
use service_core::observability::init_tracing;

const SERVICE_NAME: &str = "inspection-service";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();

    let config = match InspectionConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // Config is what names the log level, so fall back to the default.
            init_tracing(SERVICE_NAME, "info", otlp_endpoint.as_deref());
            tracing::error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        otlp_endpoint.as_deref(),
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
