use std::io;

use tracing_subscriber::{fmt, EnvFilter};

use job_portal::config::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    job_portal::run(settings).await
}
