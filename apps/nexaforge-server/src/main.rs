mod app;
mod config;
mod cors;
mod health;
mod logging;
mod signals;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use contact::{ContactService, NotificationTemplate, SmtpMailer, domain::service::ServiceConfig};
use reviews::{ReviewService, SeaOrmReviewsRepository};
use tokio_util::sync::CancellationToken;

use crate::app::{AppServices, build_router};
use crate::config::AppConfig;

/// Contact form relay and customer reviews API
#[derive(Parser)]
#[command(name = "nexaforge-server")]
#[command(about = "NexaForge API server: contact form relay and customer reviews")]
#[command(version)]
struct Cli {
    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (NEXAFORGE_CONFIG) -> 3) legacy env -> 4) env (NEXAFORGE__*) -> 5) CLI
    let mut config = AppConfig::load()?;
    config.apply_cli_overrides(cli.port);

    logging::init_logging(&config.logging)?;
    tracing::info!("NexaForge server starting");

    let db = reviews::infra::db::connect(&config.database)
        .await
        .context("failed to connect to the review store")?;
    reviews::infra::db::migrate(&db)
        .await
        .context("review store migrations failed")?;
    tracing::info!("review store connected");

    let (verifier, key_provider) = nexa_auth::build_identity_verifier(&config.identity)
        .context("identity verifier setup failed")?;
    let cancel = CancellationToken::new();
    let jwks_refresh = tokio::spawn(nexa_auth::run_jwks_refresh_task(
        key_provider,
        cancel.clone(),
    ));

    let mailer = SmtpMailer::new(&config.mail).context("SMTP transport setup failed")?;
    let template = NotificationTemplate::new(config.branding.clone())
        .context("email template failed to compile")?;
    if config.mail.operator_mailbox().is_none() {
        tracing::warn!("mail.operator_mailbox is unset; contact submissions will fail");
    }
    let contact = Arc::new(ContactService::new(
        Arc::new(mailer),
        template,
        ServiceConfig {
            sender_address: config.mail.username.clone(),
            operator_mailbox: config.mail.operator_mailbox().map(str::to_owned),
        },
    ));

    let reviews = Arc::new(ReviewService::new(
        Arc::new(SeaOrmReviewsRepository::new(db.clone())),
        config.reviews.clone(),
    ));

    let router = build_router(
        AppServices {
            contact,
            reviews,
            verifier,
        },
        &config.server,
    )?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening; health check at /health");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await;

    cancel.cancel();
    if let Err(e) = jwks_refresh.await {
        tracing::warn!(error = %e, "JWKS refresh task ended abnormally");
    }
    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "review store did not close cleanly");
    }
    tracing::info!("NexaForge server stopped");

    served.context("HTTP server failed")
}
