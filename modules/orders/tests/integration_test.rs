//! Integration tests for the orders module.
//!
//! - Each test runs on a fresh in-memory SQLite DB with migrations applied.
//! - The REST layer is exercised through the real route registration.
//! - The local client is checked against the same wiring.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    attach_product, call, create_test_db, delete, get, json, orders_with_page_size, router,
    seed_orders, seed_product, seed_user,
};
use orders::contract::{ActingUser, NewOrder, OrderPatch, OrdersError};

async fn create_order(router: &axum::Router, acting: i32, body: Value) -> Value {
    let (status, created) = call(router, json("POST", "/orders", Some(acting), body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created
}

#[tokio::test]
async fn create_then_show_round_trip() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let created = create_order(
        &app,
        7,
        json!({"status": "new", "total_amount": 1500, "notes": "leave at door"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // client_id defaults to the acting user
    assert_eq!(created["client_id"], 7);
    assert_eq!(created["created_by"], 7);
    assert!(created.get("products").is_none());

    let (status, shown) = call(&app, get(&format!("/orders/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["id"], created["id"]);
    assert_eq!(shown["status"], "new");
    assert_eq!(shown["total_amount"], 1500);
    assert_eq!(shown["notes"], "leave at door");
    assert_eq!(shown["products"], json!([]));
}

#[tokio::test]
async fn show_includes_products_and_no_client_name() {
    let db = create_test_db().await;
    seed_user(&db, 7, "Ann").await;
    seed_product(&db, 1, "Keyboard", 4900).await;
    seed_product(&db, 2, "Mouse", 1900).await;
    let orders = orders_with_page_size(db.clone(), 10);
    let app = router(&orders);

    let created = create_order(&app, 7, json!({"status": "new", "total_amount": 6800})).await;
    let id = created["id"].as_i64().unwrap() as i32;
    attach_product(&db, id, 2, 1).await;
    attach_product(&db, id, 1, 1).await;

    let (status, shown) = call(&app, get(&format!("/orders/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(shown.get("client_name").is_none());

    let products = shown["products"].as_array().unwrap();
    let names: Vec<&str> = products.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Keyboard", "Mouse"]);
}

#[tokio::test]
async fn unknown_id_is_404_for_show_update_destroy() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let (status, body) = call(&app, get("/orders/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ORDERS_NOT_FOUND");
    assert_eq!(body["instance"], "/orders/999");

    let (status, _) = call(&app, json("PUT", "/orders/999", None, json!({"status": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, delete("/orders/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let created = create_order(
        &app,
        7,
        json!({"client_id": 9, "status": "new", "total_amount": 1500, "notes": "fragile"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/orders/{id}");

    let (status, body) = call(&app, json("PATCH", &uri, None, json!({"status": "paid"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, shown) = call(&app, get(&uri)).await;
    assert_eq!(shown["status"], "paid");
    assert_eq!(shown["client_id"], 9);
    assert_eq!(shown["total_amount"], 1500);
    assert_eq!(shown["notes"], "fragile");

    // explicit null clears notes
    let (status, _) = call(&app, json("PUT", &uri, None, json!({"notes": null}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, shown) = call(&app, get(&uri)).await;
    assert_eq!(shown["notes"], Value::Null);
    assert_eq!(shown["status"], "paid");

    // empty patch still succeeds
    let (status, body) = call(&app, json("PATCH", &uri, None, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));
}

#[tokio::test]
async fn delete_then_show_is_404() {
    let db = create_test_db().await;
    seed_product(&db, 1, "Keyboard", 4900).await;
    let orders = orders_with_page_size(db.clone(), 10);
    let app = router(&orders);

    let created = create_order(&app, 7, json!({"status": "new", "total_amount": 10})).await;
    let id = created["id"].as_i64().unwrap() as i32;
    // pivot rows go with the order
    attach_product(&db, id, 1, 2).await;
    let uri = format!("/orders/{id}");

    let (status, body) = call(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, _) = call(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn with_client_names_resolves_each_row() {
    let db = create_test_db().await;
    seed_user(&db, 7, "Ann").await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    for client_id in [7, 7, 9] {
        create_order(
            &app,
            1,
            json!({"client_id": client_id, "status": "new", "total_amount": 100}),
        )
        .await;
    }

    let (status, body) = call(&app, get("/orders/with-client-names")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    for row in rows {
        // always present, possibly null
        assert!(row.get("client_name").is_some());
        assert!(row["products"].is_array());
    }
    let names: Vec<Value> = rows.iter().map(|r| r["client_name"].clone()).collect();
    assert_eq!(names, vec![json!("Ann"), json!("Ann"), Value::Null]);
    let clients: Vec<i64> = rows.iter().map(|r| r["client_id"].as_i64().unwrap()).collect();
    assert_eq!(clients, vec![7, 7, 9]);
}

#[tokio::test]
async fn with_client_names_on_empty_table() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let (status, body) = call(&app, get("/orders/with-client-names")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn index_lists_orders_with_products() {
    let db = create_test_db().await;
    seed_product(&db, 1, "Keyboard", 4900).await;
    let orders = orders_with_page_size(db.clone(), 10);
    let app = router(&orders);

    let first = create_order(&app, 7, json!({"status": "new", "total_amount": 4900})).await;
    create_order(&app, 8, json!({"status": "new", "total_amount": 0})).await;
    attach_product(&db, first["id"].as_i64().unwrap() as i32, 1, 1).await;

    let (status, body) = call(&app, get("/orders")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["products"].as_array().unwrap().len(), 1);
    assert_eq!(rows[1]["products"], json!([]));
    assert!(rows[0].get("client_name").is_none());
}

#[tokio::test]
async fn paginate_uses_configured_page_size() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 2);
    let app = router(&orders);

    for amount in [1, 2, 3] {
        create_order(&app, 7, json!({"status": "new", "total_amount": amount})).await;
    }

    let (status, body) = call(&app, get("/orders/page")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["page_info"]["current_page"], 1);
    assert_eq!(body["page_info"]["per_page"], 2);
    assert_eq!(body["page_info"]["total"], 3);
    assert_eq!(body["page_info"]["last_page"], 2);

    let (_, body) = call(&app, get("/orders/page?page=2")).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["total_amount"], 3);

    let (_, body) = call(&app, get("/orders/page?page=5")).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn paginate_max_page_is_empty_with_totals() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    for amount in [1, 2, 3] {
        create_order(&app, 7, json!({"status": "new", "total_amount": amount})).await;
    }

    let (status, body) = call(&app, get("/orders/page?page=18446744073709551615")).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["page_info"]["current_page"], u64::MAX);
    assert_eq!(body["page_info"]["per_page"], 10);
    assert_eq!(body["page_info"]["total"], 3);
    assert_eq!(body["page_info"]["last_page"], 1);
}

#[tokio::test]
async fn listings_scale_past_sqlite_variable_limit() {
    const COUNT: i32 = 33_000;

    let db = create_test_db().await;
    seed_user(&db, 1, "Ann").await;
    seed_user(&db, COUNT, "Zed").await;
    seed_product(&db, 1, "Keyboard", 4900).await;
    // distinct client per order, ids follow insertion order
    seed_orders(&db, 1..=COUNT).await;
    attach_product(&db, COUNT, 1, 1).await;

    let orders = orders_with_page_size(db, 10);
    let repo = orders.repository();

    let all = repo.all().await.unwrap();
    assert_eq!(all.len(), COUNT as usize);
    assert!(all[0].products.is_empty());
    assert_eq!(all[COUNT as usize - 1].products.len(), 1);

    let named = repo.all_orders_with_user_name().await.unwrap();
    assert_eq!(named.len(), COUNT as usize);
    assert_eq!(named[0].client_name.as_deref(), Some("Ann"));
    assert_eq!(named[1].client_name, None);
    let last = &named[COUNT as usize - 1];
    assert_eq!(last.order.client_id, COUNT);
    assert_eq!(last.client_name.as_deref(), Some("Zed"));
    assert_eq!(last.products[0].name, "Keyboard");
}

#[tokio::test]
async fn create_requires_acting_user() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let (status, body) = call(
        &app,
        json("POST", "/orders", None, json!({"status": "new", "total_amount": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "ORDERS_UNAUTHENTICATED");
}

#[tokio::test]
async fn create_rejects_invalid_payload() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let app = router(&orders);

    let (status, body) = call(
        &app,
        json("POST", "/orders", Some(7), json!({"status": "", "total_amount": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "ORDERS_VALIDATION");
    let pointers: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["pointer"].as_str().unwrap())
        .collect();
    assert_eq!(pointers, vec!["/status", "/total_amount"]);

    // unknown attributes never reach the store
    let (status, _) = call(
        &app,
        json(
            "POST",
            "/orders",
            Some(7),
            json!({"status": "new", "total_amount": 1, "id": 42}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = call(&app, get("/orders")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn local_client_maps_errors() {
    let db = create_test_db().await;
    let orders = orders_with_page_size(db, 10);
    let client = orders.client();

    let err = client.get_order(5).await.unwrap_err();
    assert_eq!(err, OrdersError::NotFound { id: 5 });

    let created = client
        .create_order(
            NewOrder {
                client_id: None,
                status: "new".into(),
                total_amount: 250,
                notes: None,
            },
            ActingUser { id: 3 },
        )
        .await
        .unwrap();
    assert_eq!(created.client_id, 3);
    assert_eq!(created.created_by, Some(3));

    let updated = client
        .update_order(
            created.id,
            OrderPatch {
                total_amount: Some(300),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated);

    let fetched = client.get_order(created.id).await.unwrap();
    assert_eq!(fetched.order.total_amount, 300);
    assert!(fetched.order.updated_at >= created.updated_at);

    let listed = client.list_orders_with_client_names().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].client_name, None);

    assert!(client.delete_order(created.id).await.unwrap());
    assert_eq!(
        client.delete_order(created.id).await.unwrap_err(),
        OrdersError::NotFound { id: created.id }
    );
    assert!(client.list_orders().await.unwrap().is_empty());
}
