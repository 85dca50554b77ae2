//! End-to-end tests for the host shell.

use std::time::Duration;
use reqwest::StatusCode;
use serde_json::{json, Value};
use reservation_router::config::{FallbackPolicy, RouteConfig, RouterConfig};
use reservation_router::View;

mod common;

#[tokio::test]
async fn test_spa_entry_renders_views() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let home: Value = client.get(shell.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(home["route"], "home");
    assert_eq!(home["view"], "HomeView");
    assert_eq!(home["params"], json!({}));

    let create: Value = client
        .get(shell.url("/reservations/create"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(create["route"], "reservations.create");
    assert_eq!(create["view"], "ReservationCreate");

    let show: Value = client
        .get(shell.url("/reservations/ABC123?tab=guests"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(show["route"], "reservations.show");
    assert_eq!(show["view"], "ReservationShow");
    assert_eq!(show["params"]["reservationRefNo"], "ABC123");
    assert_eq!(show["query"]["tab"], json!(["guests"]));
}

#[tokio::test]
async fn test_unmatched_path_is_404() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    for path in ["/unknown/path", "/reservations/"] {
        let res = client.get(shell.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn test_redirect_fallback() {
    let mut config = RouterConfig::default();
    config.fallback.policy = FallbackPolicy::Redirect;
    config.fallback.redirect_to = Some("/".into());
    let shell = common::start_shell(config).await;

    let res = common::client().get(shell.url("/unknown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/");
}

#[tokio::test]
async fn test_history_base() {
    let mut config = RouterConfig::default();
    config.history.base = "/app/".into();
    let shell = common::start_shell(config).await;
    let client = common::client();

    let show: Value = client
        .get(shell.url("/app/reservations/R-9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(show["params"]["reservationRefNo"], "R-9");

    let outside = client.get(shell.url("/reservations/R-9")).send().await.unwrap();
    assert_eq!(outside.status(), StatusCode::NOT_FOUND);
    let body: Value = outside.json().await.unwrap();
    assert_eq!(body["error"], "outside_base");

    let href: Value = client
        .get(shell.url("/api/href/reservations.show?reservationRefNo=R-9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(href["href"], "/app/reservations/R-9");
}

#[tokio::test]
async fn test_request_id_header() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let res = client.get(shell.url("/")).send().await.unwrap();
    let id = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let res = client
        .get(shell.url("/"))
        .header("x-request-id", "given-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "given-id");
}

#[tokio::test]
async fn test_api_routes_and_resolve() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let routes: Value = client.get(shell.url("/api/routes")).send().await.unwrap().json().await.unwrap();
    let names: Vec<&str> = routes
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["home", "reservations.create", "reservations.show"]);
    assert_eq!(routes[2]["params"], json!(["reservationRefNo"]));

    let resolved: Value = client
        .get(shell.url("/api/resolve"))
        .query(&[("path", "/reservations/create")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resolved["route"], "reservations.create");

    let missing = client
        .get(shell.url("/api/resolve"))
        .query(&[("path", "/reservations/")])
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    // Pure resolution never sets the current navigation.
    let current = client.get(shell.url("/api/navigation")).send().await.unwrap();
    assert_eq!(current.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_href_errors() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let missing = client.get(shell.url("/api/href/reservations.show")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown = client.get(shell.url("/api/href/reservations.edit")).send().await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_navigate_sets_current() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let nav: Value = client
        .post(shell.url("/api/navigate"))
        .json(&json!({ "location": "/reservations/XYZ#notes" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(nav["route"], "reservations.show");
    assert_eq!(nav["fragment"], "notes");

    let rejected = client
        .post(shell.url("/api/navigate"))
        .json(&json!({ "location": "/nowhere" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::NOT_FOUND);

    let current: Value = client.get(shell.url("/api/navigation")).send().await.unwrap().json().await.unwrap();
    assert_eq!(current["navigation_id"], nav["navigation_id"]);
    assert_eq!(current["params"]["reservationRefNo"], "XYZ");
}

#[tokio::test]
async fn test_reload_swaps_table() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let mut config = RouterConfig::default();
    config.routes = vec![
        RouteConfig {
            path: "/".into(),
            name: "home".into(),
            view: View::Home,
        },
        RouteConfig {
            path: "/bookings/:reservationRefNo".into(),
            name: "reservations.show".into(),
            view: View::ReservationShow,
        },
    ];
    shell.updates.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let old = client.get(shell.url("/reservations/A1")).send().await.unwrap();
    assert_eq!(old.status(), StatusCode::NOT_FOUND);

    let new: Value = client.get(shell.url("/bookings/A1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(new["route"], "reservations.show");
}

#[tokio::test]
async fn test_non_get_entry_rejected() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let res = common::client().delete(shell.url("/reservations/A1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_head_does_not_navigate() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let res = client.head(shell.url("/reservations/A1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let current = client.get(shell.url("/api/navigation")).send().await.unwrap();
    assert_eq!(current.status(), StatusCode::NO_CONTENT);

    let nav: Value = client.get(shell.url("/reservations/A1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(nav["navigation_id"], 1);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let body: Value = client
            .get(shell.url("/api/resolve"))
            .query(&[("path", "/reservations/AB12?tab=guests")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
    assert!(bodies[0].get("navigation_id").is_none());
}

#[tokio::test]
async fn test_foreign_location_rejected() {
    let shell = common::start_shell(RouterConfig::default()).await;

    let res = common::client()
        .get(shell.url("/api/resolve"))
        .query(&[("path", "/\\evil.example/reservations/create")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_location");
}

#[tokio::test]
async fn test_reload_swaps_fallback_with_table() {
    let shell = common::start_shell(RouterConfig::default()).await;
    let client = common::client();

    let mut config = RouterConfig::default();
    config.fallback.policy = FallbackPolicy::Redirect;
    config.fallback.redirect_to = Some("/reservations/create?from=fallback".into());
    shell.updates.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(shell.url("/unknown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/reservations/create?from=fallback");

    // A target that is not a plain path is rejected as a whole.
    let mut config = RouterConfig::default();
    config.routes = vec![RouteConfig {
        path: "/".into(),
        name: "home".into(),
        view: View::Home,
    }];
    config.fallback.policy = FallbackPolicy::Redirect;
    config.fallback.redirect_to = Some("/reservations/a\nb".into());
    shell.updates.send(config).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let kept = client.get(shell.url("/reservations/create")).send().await.unwrap();
    assert_eq!(kept.status(), StatusCode::OK);
    let res = client.get(shell.url("/unknown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()["location"], "/reservations/create?from=fallback");
}
