//! lithos-admin - Back office service
//!
//! Product CRUD, enquiry tracking and site-content image uploads for the
//! Lithos marketing site.

use anyhow::Result;
use clap::Parser;
use lithos_admin::auth::AuthGate;
use lithos_admin::storage::HttpObjectStore;
use lithos_admin::{build_router, AppState};
use lithos_common::config::{self, SiteConfig};
use lithos_common::db::init_database;
use lithos_common::events::EventBus;
use lithos_common::remote::HttpEnquiryBackend;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "lithos-admin", about = "Lithos back office service")]
struct Args {
    /// Root folder holding the catalog database
    #[arg(long)]
    root_folder: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Lithos Back Office (lithos-admin) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let mut site_config = SiteConfig::load_default();
    if let Some(port) = args.port {
        site_config.admin.port = port;
    }

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    let pool = init_database(&db_path).await?;

    let event_bus = EventBus::new(1000);
    let backend = Arc::new(HttpEnquiryBackend::new(&site_config.document_store));
    let objects = Arc::new(HttpObjectStore::new(&site_config.object_store));

    let auth = Arc::new(AuthGate::new(&site_config.admin.password));
    if auth.enabled() {
        info!("Admin login gate enabled");
    } else {
        warn!("Admin password not configured - login gate DISABLED");
    }

    let state = AppState::new(pool, event_bus, backend, objects, auth);
    let app = build_router(state);

    let bind_addr = site_config.admin_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("lithos-admin listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
