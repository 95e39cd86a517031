//! End-to-end tests for the convention dispatcher over a live server.

use reqwest::header::ACCEPT;
use serde_json::Value;

use admin_api::config::AppConfig;

mod common;

#[tokio::test]
async fn missing_or_wrong_accept_header_never_dispatches() {
    let (base, _shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    // reqwest's default Accept (*/*) is not the configured guard value.
    let res = client
        .get(format!("{base}/api/user/group"))
        .send()
        .await
        .expect("server reachable");
    assert_eq!(res.status(), 404);
    // A plain 404, not the API envelope.
    assert!(res.text().await.expect("body").is_empty());

    // Wrong Accept value, same path shape.
    let res = client
        .get(format!("{base}/api/user/group"))
        .header(ACCEPT, "application/json")
        .send()
        .await
        .expect("send");
    assert_eq!(res.status(), 404);

    // Nothing reached the route table.
    let routes: Vec<Value> = client
        .get(format!("{base}/admin/routes"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert!(routes.is_empty());
}

#[tokio::test]
async fn matching_guard_dispatches_and_registers_the_route() {
    let (base, _shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();
    let accept = common::api_accept();

    let res = client
        .get(format!("{base}/api/user/group"))
        .header(ACCEPT, &accept)
        .send()
        .await
        .expect("send");
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["data"]["paging"]["total"], 0);

    let res = client
        .get(format!("{base}/api/user/group/5"))
        .header(ACCEPT, &accept)
        .send()
        .await
        .expect("send");
    // Resolved to `get` on an empty store: a not-found in the envelope.
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["message"], "group not found");

    let routes: Vec<Value> = client
        .get(format!("{base}/admin/routes"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let shapes: Vec<(String, String, String)> = routes
        .iter()
        .map(|r| {
            (
                r["method"].as_str().unwrap().to_string(),
                r["template"].as_str().unwrap().to_string(),
                r["action"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert!(shapes.contains(&("GET".into(), "/user/group".into(), "search".into())));
    assert!(shapes.contains(&("GET".into(), "/user/group/{params1}".into(), "get".into())));
}

#[tokio::test]
async fn put_with_trailing_id_reaches_the_user_controller() {
    let (base, _shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .put(format!("{base}/api/user/user/7"))
        .header(ACCEPT, common::api_accept())
        .json(&serde_json::json!({ "name": "sunny" }))
        .send()
        .await
        .expect("send");
    // Update resolved and ran; the record simply does not exist yet.
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["message"], "user not found");

    let routes: Vec<Value> = client
        .get(format!("{base}/admin/routes"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["controller"], "User::UserController");
    assert_eq!(routes[0]["action"], "update");
    assert_eq!(routes[0]["template"], "/user/user/{params1}");
}

#[tokio::test]
async fn query_strings_do_not_change_the_registered_shape() {
    let (base, _shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();
    let accept = common::api_accept();

    for uri in [
        format!("{base}/api/user/group"),
        format!("{base}/api/user/group?name=ops&limit=5"),
    ] {
        let res = client
            .get(uri)
            .header(ACCEPT, &accept)
            .send()
            .await
            .expect("send");
        assert_eq!(res.status(), 200);
    }

    let routes: Vec<Value> = client
        .get(format!("{base}/admin/routes"))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    // Both requests collapse onto one registered shape.
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["template"], "/user/group");
}

#[tokio::test]
async fn unhandled_verbs_fall_through() {
    let (base, _shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .head(format!("{base}/api/user/group"))
        .header(ACCEPT, common::api_accept())
        .send()
        .await
        .expect("send");
    assert_eq!(res.status(), 404);
}
