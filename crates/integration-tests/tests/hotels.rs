//! Hotel endpoints.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use hotel_booking_integration_tests::TestServer;

#[tokio::test]
async fn anonymous_list_is_allowed_and_create_is_not() {
    let server = TestServer::spawn().await;

    let response = Client::new().get(server.url("/hotels/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await.unwrap(), json!([]));

    let response = Client::new()
        .post(server.url("/hotels/"))
        .json(&json!({"name": "Hotel A", "address": "Main St 1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn hotel_lifecycle() {
    let server = TestServer::spawn().await;
    let user = server.register("owner@gmail.com").await;

    let hotel = server.create_hotel(&user, "Hotel A").await;
    assert_eq!(hotel["name"], "Hotel A");
    assert_eq!(hotel["address"], "Main St 1");
    let path = format!("/hotels/{}/", hotel["id"]);

    let response = user.get(&server, &path).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await.unwrap(), hotel);

    let response = user
        .put(&server, &path, &json!({"name": "Hotel B", "address": "Side St 2"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], hotel["id"]);
    assert_eq!(updated["name"], "Hotel B");

    let response = user.delete(&server, &path).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = user.get(&server, &path).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().is_empty());

    let response = user.delete(&server, &path).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_hotel_is_rejected() {
    let server = TestServer::spawn().await;
    let user = server.register("owner@gmail.com").await;

    let response = user.post(&server, "/hotels/", &json!({"name": "  "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({
            "name": ["This field may not be blank."],
            "address": ["This field is required."],
        })
    );
}

#[tokio::test]
async fn detail_requires_authentication() {
    let server = TestServer::spawn().await;
    let user = server.register("owner@gmail.com").await;
    let hotel = server.create_hotel(&user, "Hotel A").await;

    let response = Client::new()
        .get(server.url(&format!("/hotels/{}/", hotel["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let server = TestServer::spawn().await;
    let user = server.register("owner@gmail.com").await;

    for path in ["/hotels/999/", "/hotels/abc/", "/hotels/-1/"] {
        let response = user.get(&server, path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }

    let response = user
        .put(&server, "/hotels/999/", &json!({"name": "Hotel B", "address": "Side St 2"}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let server = TestServer::spawn().await;
    let mut user = server.register("owner@gmail.com").await;
    user.password = "not-the-password".to_owned();

    let response = user
        .post(&server, "/hotels/", &json!({"name": "Hotel A", "address": "Main St 1"}))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
