use pos_checkout_rust::cart::AppState;
use pos_checkout_rust::catalog::RawProduct;
use pos_checkout_rust::router::create_app_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Demo catalog snapshot loaded at startup. A real deployment replaces this
/// with a fetch from the product service.
fn seed_catalog(state: &AppState) {
    let records = vec![
        RawProduct {
            id: "prd-americano".to_string(),
            name: "Americano".to_string(),
            sku: "BEV-001".to_string(),
            price: 15000,
            stock: 50,
            unit: "cup".to_string(),
        },
        RawProduct {
            id: "prd-latte".to_string(),
            name: "Cafe Latte".to_string(),
            sku: "BEV-002".to_string(),
            price: 22000,
            stock: 40,
            unit: "cup".to_string(),
        },
        RawProduct {
            id: "prd-croissant".to_string(),
            name: "Butter Croissant".to_string(),
            sku: "BKY-001".to_string(),
            price: 18000,
            stock: 25,
            unit: "pcs".to_string(),
        },
        RawProduct {
            id: "prd-beans".to_string(),
            name: "House Blend Beans 250g".to_string(),
            sku: "RTL-001".to_string(),
            price: 95000,
            stock: 12,
            unit: "bag".to_string(),
        },
    ];
    state.catalog.replace_all(records);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Initialize application state with a demo catalog snapshot
    let state = Arc::new(AppState::new());
    seed_catalog(&state);
    tracing::info!("catalog loaded with {} products", state.catalog.len());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("server running on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
