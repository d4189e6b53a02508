mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

fn user_row(username: &str, is_admin: bool) -> serde_json::Value {
    json!({
        "username": username,
        "first_name": "Test",
        "last_name": "User",
        "email": format!("{}@example.com", username),
        "is_admin": is_admin
    })
}

#[tokio::test]
async fn owner_and_admin_may_read_a_user() -> Result<()> {
    let app = TestApp::new()?;
    let alice = app.token_for("alice", false)?;
    let bob = app.token_for("bob", false)?;
    let root = app.token_for("root", true)?;

    let (status, _) = app.get("/users/alice", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/users/alice", Some(&bob)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.db.queries().is_empty());

    app.db.respond_with(vec![user_row("alice", false)]);
    let (status, body) = app.get("/users/alice", Some(&alice)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstName"], "Test");
    assert!(body["data"].get("password").is_none());

    app.db.respond_with(vec![user_row("alice", false)]);
    let (status, _) = app.get("/users/alice", Some(&root)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn collection_is_admin_only() -> Result<()> {
    let app = TestApp::new()?;
    let alice = app.token_for("alice", false)?;
    let root = app.token_for("root", true)?;

    let (status, _) = app.get("/users", Some(&alice)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.db.respond_with(vec![user_row("alice", false), user_row("root", true)]);
    let (status, body) = app.get("/users", Some(&root)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"][1]["isAdmin"], true);
    Ok(())
}

#[tokio::test]
async fn admin_can_create_admins() -> Result<()> {
    let app = TestApp::new()?;
    let root = app.token_for("root", true)?;
    app.db.respond_with(vec![user_row("ops", true)]);

    let (status, body) = app
        .send(
            Method::POST,
            "/users",
            Some(&root),
            Some(json!({
                "username": "ops",
                "password": "password1",
                "firstName": "Op",
                "lastName": "S",
                "email": "ops@example.com",
                "isAdmin": true
            })),
        )
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["isAdmin"], true);
    assert!(app.codec.verify(body["data"]["token"].as_str().unwrap_or_default())?.is_admin);
    assert_eq!(app.db.last_query().map(|q| q.params[5].clone()), Some(json!(true)));
    Ok(())
}

#[tokio::test]
async fn self_update_cannot_touch_admin_flag() -> Result<()> {
    let app = TestApp::new()?;
    let alice = app.token_for("alice", false)?;

    let (status, body) = app
        .send(Method::PATCH, "/users/alice", Some(&alice), Some(json!({ "isAdmin": true })))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["isAdmin"], "Unknown field");
    assert!(app.db.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn self_update_binds_username_last() -> Result<()> {
    let app = TestApp::new()?;
    let alice = app.token_for("alice", false)?;
    app.db.respond_with(vec![user_row("alice", false)]);

    let (status, _) = app
        .send(Method::PATCH, "/users/alice", Some(&alice), Some(json!({ "email": "new@example.com" })))
        .await?;

    assert_eq!(status, StatusCode::OK);
    let query = app.db.last_query().expect("update query");
    assert!(query.sql.starts_with("UPDATE users SET email = $1 WHERE username = $2"));
    assert_eq!(query.params, vec![json!("new@example.com"), json!("alice")]);
    Ok(())
}

#[tokio::test]
async fn self_update_rejects_null_profile_fields() -> Result<()> {
    let app = TestApp::new()?;
    let alice = app.token_for("alice", false)?;

    for body in [json!({ "firstName": null }), json!({ "password": 12345 })] {
        let (status, body) = app.send(Method::PATCH, "/users/alice", Some(&alice), Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    assert!(app.db.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_by_other_user_is_rejected() -> Result<()> {
    let app = TestApp::new()?;
    let bob = app.token_for("bob", false)?;
    let alice = app.token_for("alice", false)?;

    let (status, _) = app.send(Method::DELETE, "/users/alice", Some(&bob), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.db.respond_with(vec![json!({ "username": "alice" })]);
    let (status, body) = app.send(Method::DELETE, "/users/alice", Some(&alice), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], "alice");
    Ok(())
}
