//! # User Flows
//!
//! Registration validation order and login through `/api/users` and
//! `/api/login`.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;

    use crate::integration::harness::TestApp;

    async fn app_with_root() -> TestApp {
        let app = TestApp::new();
        let (status, _) = app.register("root", "Superuser", "sekret").await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    #[tokio::test]
    async fn test_creation_succeeds_with_fresh_username() {
        let app = app_with_root().await;
        let before = app.users().await.len();

        let (status, body) = app.register("mluukkai", "Matti Luukkainen", "salainen").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "mluukkai");
        assert_eq!(body["name"], "Matti Luukkainen");
        assert_eq!(body["blogs"], json!([]));
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let users = app.users().await;
        assert_eq!(users.len(), before + 1);
        assert!(users.iter().any(|u| u["username"] == "mluukkai"));
    }

    #[tokio::test]
    async fn test_missing_username() {
        let app = app_with_root().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "name": "Nameless", "password": "salainen" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing username");
    }

    #[tokio::test]
    async fn test_missing_password() {
        let app = app_with_root().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "username": "nopass", "name": "No Pass" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing password");
    }

    #[tokio::test]
    async fn test_short_username() {
        let app = app_with_root().await;
        let (status, body) = app.register("ml", "Short Name", "salainen").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username must have a minimum length of 3 characters");
    }

    #[tokio::test]
    async fn test_short_password() {
        let app = app_with_root().await;
        let (status, body) = app.register("mluukkai", "Matti", "sa").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must have a minimum length of 3 characters");
    }

    #[tokio::test]
    async fn test_password_checked_before_username() {
        let app = app_with_root().await;
        let (status, body) = app.register("ml", "Both Short", "sa").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Password must have a minimum length of 3 characters");
    }

    #[tokio::test]
    async fn test_repeated_username() {
        let app = app_with_root().await;
        let before = app.users().await.len();

        let (status, body) = app.register("root", "Another Root", "salainen").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "username already taken");
        assert_eq!(app.users().await.len(), before);
    }

    #[tokio::test]
    async fn test_users_returned_as_json() {
        let app = app_with_root().await;
        let request = Request::builder()
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();

        let (status, body) = app.send_request(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["username"], "root");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let (status, body) = app.send_request(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    // =========================================================================
    // LOGIN
    // =========================================================================

    #[tokio::test]
    async fn test_login_returns_token() {
        let app = app_with_root().await;

        let (status, body) = app.login("root", "sekret").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "root");
        assert_eq!(body["name"], "Superuser");
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_or_unknown_user() {
        let app = app_with_root().await;

        let (status, body) = app.login("root", "wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid username or password");

        let (status, body) = app.login("nobody", "sekret").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid username or password");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let app = app_with_root().await;
        let (status, _) = app
            .send(Method::POST, "/api/login", None, Some(json!({ "username": "root" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_identifies_creator() {
        let app = app_with_root().await;
        let (_, login) = app.login("root", "sekret").await;
        let token = login["token"].as_str().unwrap();

        let (status, blog) = app
            .create_blog(token, json!({ "title": "Owned", "url": "http://owned.example.com" }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(blog["user"]["username"], "root");

        let scheme_lowercase = Request::builder()
            .method(Method::POST)
            .uri("/api/blogs")
            .header(header::AUTHORIZATION, format!("bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "title": "Also owned", "url": "http://owned.example.com" }).to_string(),
            ))
            .unwrap();
        let (status, _) = app.send_request(scheme_lowercase).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}
