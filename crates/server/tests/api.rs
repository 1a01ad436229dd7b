use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use engine::ExpenseStore;
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    server::router(ExpenseStore::new(db))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_sample(router: &Router) {
    let samples = [
        json!({
            "title": "Grocery Shopping",
            "amount": "150.75",
            "category": "Food",
            "date": "2025-05-01",
            "description": "Weekly groceries"
        }),
        json!({
            "title": "Electric Bill",
            "amount": "87.30",
            "category": "Utilities",
            "date": "2025-05-05",
            "description": "Monthly electricity bill"
        }),
        json!({
            "title": "Movie Tickets",
            "amount": "35.50",
            "category": "Entertainment",
            "date": "2025-05-10",
            "description": "Weekend movie"
        }),
    ];

    for sample in &samples {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/expenses", sample))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn create_returns_created_expense_with_id() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "Grocery Shopping",
                "amount": "150.75",
                "category": "Food",
                "date": "2025-05-01",
                "description": "Weekly groceries"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["title"], "Grocery Shopping");
    assert_eq!(body["amount"], 150.75);
    assert_eq!(body["category"], "Food");
    assert_eq!(body["date"], "2025-05-01");
    assert_eq!(body["description"], "Weekly groceries");
}

#[tokio::test]
async fn create_with_bad_amount_returns_422() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "Lunch",
                "amount": "not-a-number",
                "category": "Food"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("amount"));

    // The failed create must not have inserted anything.
    let response = router.clone().oneshot(get("/api/expenses")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_with_empty_title_returns_422() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "",
                "amount": "10",
                "category": "Food"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn create_with_bad_date_returns_422() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "Lunch",
                "amount": "10",
                "category": "Food",
                "date": "05/01/2025"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let router = test_router().await;

    let response = router.clone().oneshot(get("/expenses/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_date_when_absent() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "Lunch",
                "amount": "10",
                "category": "Food",
                "date": "2025-05-01",
                "description": "sandwich"
            }),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/expenses/{id}"),
            &json!({
                "title": "Dinner",
                "amount": "25.50",
                "category": "Restaurants"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Dinner");
    assert_eq!(body["amount"], 25.50);
    assert_eq!(body["category"], "Restaurants");
    assert_eq!(body["date"], "2025-05-01");
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/expenses/999",
            &json!({
                "title": "Dinner",
                "amount": "25.50",
                "category": "Restaurants"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_expense() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/expenses",
            &json!({
                "title": "Lunch",
                "amount": "10",
                "category": "Food"
            }),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/expenses/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .clone()
        .oneshot(get(&format!("/expenses/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/expenses/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_expenses_and_total_newest_first() {
    let router = test_router().await;
    seed_sample(&router).await;

    let response = router.clone().oneshot(get("/expenses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body["expenses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Movie Tickets", "Electric Bill", "Grocery Shopping"]);
    assert!((body["total_amount"].as_f64().unwrap() - 273.55).abs() < 1e-9);
}

#[tokio::test]
async fn api_expenses_returns_bare_array() {
    let router = test_router().await;
    seed_sample(&router).await;

    let response = router.clone().oneshot(get("/api/expenses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let expenses = body.as_array().unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[0]["title"], "Movie Tickets");

    for expense in expenses {
        let object = expense.as_object().unwrap();
        for key in ["id", "title", "amount", "category", "date", "description"] {
            assert!(object.contains_key(key), "missing {key}");
        }
    }
}

#[tokio::test]
async fn categories_returns_per_category_totals() {
    let router = test_router().await;
    seed_sample(&router).await;

    let response = router.clone().oneshot(get("/categories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);

    let lookup = |name: &str| {
        categories
            .iter()
            .find(|c| c["category"] == name)
            .unwrap_or_else(|| panic!("missing category {name}"))["total"]
            .as_f64()
            .unwrap()
    };
    assert!((lookup("Food") - 150.75).abs() < 1e-9);
    assert!((lookup("Utilities") - 87.30).abs() < 1e-9);
    assert!((lookup("Entertainment") - 35.50).abs() < 1e-9);
}
