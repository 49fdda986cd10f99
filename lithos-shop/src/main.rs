//! lithos-shop - Shopfront service
//!
//! Product catalog plus the enquiry workflow (pending store, upsert,
//! aggregate list, batch submission) for the Lithos marketing site.

use anyhow::Result;
use clap::Parser;
use lithos_common::config::{self, SiteConfig};
use lithos_common::db::init_database;
use lithos_common::events::EventBus;
use lithos_common::mail::{EnquiryMailer, HttpEnquiryMailer};
use lithos_common::remote::HttpEnquiryBackend;
use lithos_shop::store::JsonFileStore;
use lithos_shop::submit::SubmissionCoordinator;
use lithos_shop::{build_router, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "lithos-shop", about = "Lithos shopfront service")]
struct Args {
    /// Root folder holding the database and pending-enquiry file
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
        "Starting Lithos Shopfront (lithos-shop) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let mut site_config = SiteConfig::load_default();
    if let Some(port) = args.port {
        site_config.shop.port = port;
    }

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let db_path = config::database_path(&root_folder);
    let pool = init_database(&db_path).await?;

    let event_bus = EventBus::new(1000);

    let store = Arc::new(JsonFileStore::new(config::pending_enquiry_path(&root_folder)));
    let backend = Arc::new(HttpEnquiryBackend::new(&site_config.document_store));
    let mailer: Option<Arc<dyn EnquiryMailer>> = if site_config.mail.enabled {
        Some(Arc::new(HttpEnquiryMailer::new(&site_config.mail)))
    } else {
        info!("Mail side channel disabled by configuration");
        None
    };

    let coordinator = Arc::new(SubmissionCoordinator::new(
        store.clone(),
        backend,
        mailer,
        site_config.mail.to_address.clone(),
        event_bus.clone(),
    ));

    let state = AppState::new(pool, event_bus, store, coordinator);
    let app = build_router(state);

    let bind_addr = site_config.shop_bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("lithos-shop listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
