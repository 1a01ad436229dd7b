//! Expense API endpoints.

use api_types::expense::{ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        category: expense.category,
        date: expense.date.format("%Y-%m-%d").to_string(),
        description: expense.description,
    }
}

/// Listing with the running total, newest date first.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let expenses = state.store.list_all().await?;
    let total_amount = engine::total_amount(&expenses);
    let expenses = expenses.into_iter().map(map_expense).collect();

    Ok(Json(ExpenseListResponse {
        expenses,
        total_amount,
    }))
}

/// Bare JSON array of expenses, in the same order as the listing.
pub async fn list_raw(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state
        .store
        .list_all()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(expenses))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state
        .store
        .create(
            &payload.title,
            &payload.amount,
            &payload.category,
            payload.date.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.store.get(id).await?;
    Ok(Json(map_expense(expense)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .store
        .update(
            id,
            &payload.title,
            &payload.amount,
            &payload.category,
            payload.date.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(Json(map_expense(expense)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
