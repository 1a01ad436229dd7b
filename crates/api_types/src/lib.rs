use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for recording a new expense.
    ///
    /// `amount` and `date` travel as raw text: the store owns parsing, so
    /// the HTTP layer forwards the caller's input untouched.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        pub amount: String,
        pub category: String,
        /// `YYYY-MM-DD`; today's date is used when absent.
        pub date: Option<String>,
        pub description: Option<String>,
    }

    /// Request body for replacing an expense's fields.
    ///
    /// Every field is resupplied. An absent `date` keeps the stored one; an
    /// absent `description` clears it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: String,
        pub amount: String,
        pub category: String,
        /// `YYYY-MM-DD`; the stored date is kept when absent.
        pub date: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub title: String,
        pub amount: f64,
        pub category: String,
        /// `YYYY-MM-DD`.
        pub date: String,
        pub description: Option<String>,
    }

    /// Response body for the expense listing, newest date first.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
        pub total_amount: f64,
    }
}

pub mod category {
    use super::*;

    /// One category with the summed amount of its expenses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotalsResponse {
        pub categories: Vec<CategoryTotalView>,
    }
}
