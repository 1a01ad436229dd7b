//! Category aggregation endpoints.

use api_types::category::{CategoryTotalsResponse, CategoryTotalView};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Per-category sums over every stored expense.
pub async fn totals(
    State(state): State<ServerState>,
) -> Result<Json<CategoryTotalsResponse>, ServerError> {
    let categories = state
        .store
        .category_totals()
        .await?
        .into_iter()
        .map(|total| CategoryTotalView {
            category: total.category,
            total: total.total,
        })
        .collect();

    Ok(Json(CategoryTotalsResponse { categories }))
}
