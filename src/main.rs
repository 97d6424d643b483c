//! Products API server.

use clap::Parser;
use products_api::{build_app, connect_db, AppState, InMemoryProductStore, PgProductStore, ProductStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "REST API for products")]
struct Cli {
    /// Drop and recreate the products table, then exit.
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let store: Arc<dyn ProductStore> = if settings.uses_memory_store() {
        tracing::info!("using in-memory product store");
        Arc::new(InMemoryProductStore::new())
    } else {
        Arc::new(PgProductStore::connect_lazy(&settings.database_url, settings.max_connections)?)
    };

    if cli.clear {
        return match store.sync(true).await {
            Ok(()) => {
                tracing::info!("Datos eliminados correctamente");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to clear products");
                Err(e.into())
            }
        };
    }

    connect_db(store.as_ref()).await;

    let app = build_app(AppState { store }, &settings);
    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!("REST API en el puerto {}", listener.local_addr()?.port());
    axum::serve(listener, app).await?;
    Ok(())
}
