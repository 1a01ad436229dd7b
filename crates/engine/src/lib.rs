use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, QueryOrder, prelude::*};
use serde::Serialize;

pub use error::StoreError;
pub use expense::Expense;

mod error;
mod expense;

type StoreResult<T> = Result<T, StoreError>;

const TITLE_MAX: usize = 100;
const CATEGORY_MAX: usize = 50;

/// Validated CRUD over expense records backed by a durable store.
///
/// The store is constructed explicitly around a database connection and
/// passed by reference to whoever needs it; tests build an independent
/// in-memory instance per run.
#[derive(Clone, Debug)]
pub struct ExpenseStore {
    database: DatabaseConnection,
}

/// Per-category sum produced by [`ExpenseStore::category_totals`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl ExpenseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Record a new expense and return it with its assigned id.
    ///
    /// `amount` and `date` arrive as the caller's raw text. A missing `date`
    /// defaults to the current UTC date. All fields are validated before the
    /// insert, so a failure leaves the store untouched.
    pub async fn create(
        &self,
        title: &str,
        amount: &str,
        category: &str,
        date: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<Expense> {
        let title = required_text("title", title, TITLE_MAX)?;
        let amount = parse_amount(amount)?;
        let category = required_text("category", category, CATEGORY_MAX)?;
        let date = match date {
            Some(text) => parse_date(text)?,
            None => Utc::now().date_naive(),
        };

        let model = expense::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(title),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category),
            date: ActiveValue::Set(date),
            description: ActiveValue::Set(description.map(|s| s.to_string())),
        };
        let inserted = model.insert(&self.database).await?;
        Ok(Expense::from(inserted))
    }

    /// Look up a single expense by id.
    pub async fn get(&self, id: i32) -> StoreResult<Expense> {
        let model = expense::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        Ok(Expense::from(model))
    }

    /// Replace the fields of an existing expense.
    ///
    /// Every supplied field overwrites the stored value; there is no partial
    /// update. The one exception is `date`: when absent the stored date is
    /// retained, unlike [`create`] which substitutes today. An absent
    /// `description` clears it.
    ///
    /// [`create`]: ExpenseStore::create
    pub async fn update(
        &self,
        id: i32,
        title: &str,
        amount: &str,
        category: &str,
        date: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<Expense> {
        let title = required_text("title", title, TITLE_MAX)?;
        let amount = parse_amount(amount)?;
        let category = required_text("category", category, CATEGORY_MAX)?;
        let date = date.map(parse_date).transpose()?;

        let current = expense::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let model = expense::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: ActiveValue::Set(title),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category),
            date: ActiveValue::Set(date.unwrap_or(current.date)),
            description: ActiveValue::Set(description.map(|s| s.to_string())),
        };
        let updated = model.update(&self.database).await?;
        Ok(Expense::from(updated))
    }

    /// Permanently remove an expense. No soft delete; the id is never reused.
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = expense::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// All expenses ordered by date descending.
    ///
    /// Equal dates fall back to id descending, so among same-day records the
    /// most recently created one comes first.
    pub async fn list_all(&self) -> StoreResult<Vec<Expense>> {
        let models = expense::Entity::find()
            .order_by_desc(expense::Column::Date)
            .order_by_desc(expense::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Per-category sums over every stored expense.
    ///
    /// Category strings are compared as-is: no trimming, no case folding.
    /// Entries appear in first-occurrence order of the scan, which keeps the
    /// result stable within a single computation.
    pub async fn category_totals(&self) -> StoreResult<Vec<CategoryTotal>> {
        let models = expense::Entity::find().all(&self.database).await?;

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for model in models {
            match positions.get(&model.category) {
                Some(&pos) => totals[pos].total += model.amount,
                None => {
                    positions.insert(model.category.clone(), totals.len());
                    totals.push(CategoryTotal {
                        category: model.category,
                        total: model.amount,
                    });
                }
            }
        }
        Ok(totals)
    }
}

/// Sum of `amount` over a sequence of expenses. Empty input sums to zero.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

fn required_text(field: &'static str, value: &str, max: usize) -> StoreResult<String> {
    if value.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(StoreError::TooLong { field, max });
    }
    Ok(value.to_string())
}

fn parse_amount(text: &str) -> StoreResult<f64> {
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidAmount(text.to_string()))?;
    // NaN and infinities parse fine but cannot round-trip through JSON.
    if !amount.is_finite() {
        return Err(StoreError::InvalidAmount(text.to_string()));
    }
    Ok(amount)
}

fn parse_date(text: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| StoreError::InvalidDate(text.to_string()))
}
