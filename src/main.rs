use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use qaboard::{http, Config, InMemoryStore, QuestionService};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env();
    info!(port = config.port, "starting qaboard");

    let service = Arc::new(QuestionService::new(InMemoryStore::new()));
    http::serve(service, &config.bind_addr(), config.request_timeout).await
}
