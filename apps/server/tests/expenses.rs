mod common;

use axum::http::{Method, StatusCode};
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn add_and_list_with_total() {
    let app = spawn_app().await;
    let token = app.register("ada").await;

    let empty = app
        .send(Method::GET, "/api/v1/expenses", Some(&token), None)
        .await;
    assert_eq!(empty.json()["total"].as_f64(), Some(0.0));

    let lunch = app.add_expense(&token, "Lunch", json!(15.50)).await;
    app.add_expense(&token, "Bus", json!("2.00")).await;
    assert_eq!(lunch["description"], "Lunch");
    assert_eq!(lunch["createdAt"], "2024-05-15T12:00:00Z");

    let listed = app
        .send(Method::GET, "/api/v1/expenses", Some(&token), None)
        .await
        .json();
    assert_eq!(listed["expenses"].as_array().unwrap().len(), 2);
    assert_eq!(listed["total"].as_f64(), Some(17.5));
}

#[tokio::test]
async fn invalid_submission_echoes_what_was_typed() {
    let app = spawn_app().await;
    let token = app.register("ada").await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/expenses",
            Some(&token),
            Some(json!({ "description": "Taxi", "amount": "twelve" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json();
    assert_eq!(body["message"], "Amount must be a number");
    assert_eq!(body["attempted"]["description"], "Taxi");
    assert_eq!(body["attempted"]["amount"], "twelve");

    let negative = app
        .send(
            Method::POST,
            "/api/v1/expenses",
            Some(&token),
            Some(json!({ "description": "Refund", "amount": -3 })),
        )
        .await;
    assert_eq!(negative.status, StatusCode::UNPROCESSABLE_ENTITY);

    for amount in ["79228162514264337593543950335", "0.001"] {
        let rejected = app
            .send(
                Method::POST,
                "/api/v1/expenses",
                Some(&token),
                Some(json!({ "description": "Odd", "amount": amount })),
            )
            .await;
        assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(rejected.json()["attempted"]["amount"], amount);
    }

    let listed = app
        .send(Method::GET, "/api/v1/expenses", Some(&token), None)
        .await
        .json();
    assert!(listed["expenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn edit_and_delete_own_expense() {
    let app = spawn_app().await;
    let token = app.register("ada").await;
    let created = app.add_expense(&token, "Lunch", json!("15.50")).await;
    let uri = format!("/api/v1/expenses/{}", created["id"].as_str().unwrap());

    let fetched = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["id"], created["id"]);

    let updated = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "description": "Dinner", "amount": "42.10" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let updated = updated.json();
    assert_eq!(updated["description"], "Dinner");
    assert_eq!(updated["amount"].as_f64(), Some(42.1));
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let deleted = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    let again = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_records_are_invisible() {
    let app = spawn_app().await;
    let ada = app.register("ada").await;
    let bob = app.register("bob").await;
    let created = app.add_expense(&ada, "Lunch", json!(15.5)).await;
    let uri = format!("/api/v1/expenses/{}", created["id"].as_str().unwrap());
    let missing = "/api/v1/expenses/does-not-exist";

    let read = app.send(Method::GET, &uri, Some(&bob), None).await;
    let read_missing = app.send(Method::GET, missing, Some(&bob), None).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.json(), read_missing.json());

    let edit = app
        .send(
            Method::PUT,
            &uri,
            Some(&bob),
            Some(json!({ "description": "Mine now", "amount": 1 })),
        )
        .await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);

    let delete = app.send(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let bobs = app
        .send(Method::GET, "/api/v1/expenses", Some(&bob), None)
        .await
        .json();
    assert!(bobs["expenses"].as_array().unwrap().is_empty());

    let still_there = app.send(Method::GET, &uri, Some(&ada), None).await.json();
    assert_eq!(still_there["description"], "Lunch");
    assert_eq!(still_there["amount"].as_f64(), Some(15.5));
}
