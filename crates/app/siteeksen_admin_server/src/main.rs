//! SiteEksen admin panel server binary.
//!
//! Serves the login page, the route-guarded dashboard and the session
//! endpoints, forwarding to the backend API configured with `--api-url`.

use std::time::Duration;

use clap::Parser;
use siteeksen_admin::config::AdminConfig;
use tracing::info;

/// CLI arguments for the admin server. Each flag overrides the matching
/// environment variable read by [`AdminConfig::from_env`].
#[derive(Parser, Debug)]
#[command(name = "siteeksen_admin_server", about = "SiteEksen admin panel server")]
struct Args {
    /// Address to listen on (`BIND_ADDR`).
    #[arg(long)]
    bind_addr: Option<String>,

    /// Backend API base URL including the version prefix (`API_URL`).
    #[arg(long)]
    api_url: Option<String>,

    /// Mark the session cookie `Secure` (`COOKIE_SECURE`). Enable behind HTTPS.
    #[arg(long)]
    cookie_secure: bool,

    /// Country code prefixed to national phone numbers (`PHONE_COUNTRY_CODE`).
    #[arg(long)]
    phone_country_code: Option<String>,

    /// Timeout in seconds for each backend call (`UPSTREAM_TIMEOUT_SECS`).
    #[arg(long)]
    upstream_timeout_secs: Option<u64>,
}

impl Args {
    fn apply(self, mut config: AdminConfig) -> AdminConfig {
        if let Some(bind_addr) = self.bind_addr {
            config.bind_addr = bind_addr;
        }
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }
        if self.cookie_secure {
            config.cookie_secure = true;
        }
        if let Some(code) = self.phone_country_code {
            config.phone_country_code = code;
        }
        if let Some(secs) = self.upstream_timeout_secs {
            config.upstream_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,siteeksen_admin=debug,siteeksen_core=debug"
                    .parse()
                    .unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    let config = args.apply(AdminConfig::from_env());

    info!(
        api_url = %config.api_url,
        cookie_secure = config.cookie_secure,
        "starting siteeksen_admin_server"
    );

    let state = siteeksen_admin::AppState::new(config.clone())?;
    let app = siteeksen_admin::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "admin panel listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("admin panel stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
