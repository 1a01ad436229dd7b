//! The module contains the `Expense` type representing one recorded spending
//! event, along with its database entity.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A persisted expense record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.title, self.amount, self.category)
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            amount: model.amount,
            category: model.category,
            date: model.date,
            description: model.description,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub category: String,
    pub date: Date,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
