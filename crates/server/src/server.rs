use std::sync::Arc;

use axum::{Router, routing::get};
use engine::ExpenseStore;

use crate::{categories, expenses};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<ExpenseStore>,
}

pub fn router(store: ExpenseStore) -> Router {
    let state = ServerState {
        store: Arc::new(store),
    };

    Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/categories", get(categories::totals))
        .route("/api/expenses", get(expenses::list_raw))
        .with_state(state)
}

pub async fn run(store: ExpenseStore) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    store: ExpenseStore,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(store)).await
}

pub fn spawn_with_listener(
    store: ExpenseStore,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
