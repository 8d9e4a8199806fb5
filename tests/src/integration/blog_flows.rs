//! # Blog Flows
//!
//! `/api/blogs` through the full middleware stack:
//!
//! 1. Listing with owners populated
//! 2. Token-gated creation, owner bookkeeping on the user
//! 3. Open updates, owner-only deletes
//! 4. Statistics over the stored catalog

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    use crate::integration::harness::{initial_blogs, TestApp};

    fn id_of(blog: &Value) -> String {
        blog["id"].as_str().unwrap().to_string()
    }

    // =========================================================================
    // LISTING
    // =========================================================================

    #[tokio::test]
    async fn test_blogs_are_returned_as_json_with_ids() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        app.seed(&token).await;

        let blogs = app.blogs().await;
        assert_eq!(blogs.len(), initial_blogs().len());
        for blog in &blogs {
            assert!(blog["id"].is_string());
            assert!(blog.get("_id").is_none());
        }
    }

    #[tokio::test]
    async fn test_listing_preserves_creation_order_and_populates_owner() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        app.seed(&token).await;

        let blogs = app.blogs().await;
        let titles: Vec<_> = blogs.iter().map(|b| b["title"].as_str().unwrap()).collect();
        assert_eq!(titles[0], "React patterns");
        assert_eq!(titles[5], "Type wars");

        let owner = &blogs[0]["user"];
        assert_eq!(owner["username"], "root");
        assert_eq!(owner["name"], "Test User");
        assert!(owner.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_single_blog_lookup() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;

        let (status, body) = app.get(&format!("/api/blogs/{}", id_of(&created[2]))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Canonical string reduction");

        let (status, body) = app.get("/api/blogs/5a422a851b54a676234d17f7").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformatted id");

        let (status, _) = app.get("/api/blogs/00000000-0000-4000-8000-000000000000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    #[tokio::test]
    async fn test_creation_succeeds_with_valid_data() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        app.seed(&token).await;

        let new_blog = json!({
            "title": "Dinner recipes for dummies",
            "author": "Ray Clark",
            "url": "http://cooking-for-dummies.com",
            "likes": 53
        });
        let (status, body) = app.create_blog(&token, new_blog).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["likes"], 53);
        assert_eq!(body["user"]["username"], "root");

        let blogs = app.blogs().await;
        assert_eq!(blogs.len(), initial_blogs().len() + 1);
        assert!(blogs.iter().any(|b| b["title"] == "Dinner recipes for dummies"));
    }

    #[tokio::test]
    async fn test_creation_links_blog_to_user() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;

        let users = app.users().await;
        let root = users.iter().find(|u| u["username"] == "root").unwrap();
        let blog_ids: Vec<_> = root["blogs"].as_array().unwrap().iter().map(id_of).collect();
        let created_ids: Vec<_> = created.iter().map(id_of).collect();
        assert_eq!(blog_ids, created_ids);

        let first = &root["blogs"][0];
        assert_eq!(first["title"], "React patterns");
        assert!(first.get("likes").is_none());
    }

    #[tokio::test]
    async fn test_missing_likes_defaults_to_zero() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;

        let (status, body) = app
            .create_blog(
                &token,
                json!({ "title": "A tale of a blog without likes", "author": "Mr. Nobody", "url": "http://givesomelikes.com" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["likes"], 0);
    }

    #[tokio::test]
    async fn test_missing_title_or_url_is_bad_request() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;

        let (status, body) = app
            .create_blog(&token, json!({ "author": "Mr. Nobody", "url": "http://notitle.com" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "title is required");

        let (status, body) = app
            .create_blog(&token, json!({ "title": "Tales from nobody", "author": "Mr. Nobody" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "url is required");

        assert!(app.blogs().await.is_empty());
    }

    #[tokio::test]
    async fn test_creation_requires_token() {
        let app = TestApp::new();
        let blog = json!({ "title": "Anonymous", "url": "http://anon.example.com" });

        let (status, body) = app.send(Method::POST, "/api/blogs", None, Some(blog.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "token missing or invalid");

        let (status, _) = app.create_blog("forged.token", blog).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.blogs().await.is_empty());
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let app = TestApp::new();
        let mut other_config = crate::integration::harness::test_config();
        other_config.auth.secret = "somebody-else".to_string();
        let other = TestApp::with_config(other_config);
        let foreign_token = other.user_token("root", "salainen").await;

        let (status, _) = app
            .create_blog(&foreign_token, json!({ "title": "t", "url": "http://u.example.com" }))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    #[tokio::test]
    async fn test_update_likes_without_token() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;
        let target = id_of(&created[0]);

        let (status, body) = app
            .send(Method::PUT, &format!("/api/blogs/{}", target), None, Some(json!({ "likes": 99 })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"], 99);
        assert_eq!(body["title"], "React patterns");
        assert_eq!(body["user"]["username"], "root");

        let (_, stored) = app.get(&format!("/api/blogs/{}", target)).await;
        assert_eq!(stored["likes"], 99);
    }

    #[tokio::test]
    async fn test_update_failures() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;
        let target = format!("/api/blogs/{}", id_of(&created[0]));

        let (status, _) = app
            .send(Method::PUT, "/api/blogs/not-an-id", None, Some(json!({ "likes": 1 })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(
                Method::PUT,
                "/api/blogs/00000000-0000-4000-8000-000000000000",
                None,
                Some(json!({ "likes": 1 })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.send(Method::PUT, &target, None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send(Method::PUT, &target, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send(Method::PUT, &target, None, Some(json!({ "likes": -3 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    #[tokio::test]
    async fn test_owner_deletes_blog() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;
        let doomed = id_of(&created[0]);

        let (status, body) = app
            .send(Method::DELETE, &format!("/api/blogs/{}", doomed), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let blogs = app.blogs().await;
        assert_eq!(blogs.len(), initial_blogs().len() - 1);
        assert!(blogs.iter().all(|b| id_of(b) != doomed));

        let users = app.users().await;
        let owned = users[0]["blogs"].as_array().unwrap();
        assert!(owned.iter().all(|b| id_of(b) != doomed));
        assert_eq!(owned.len(), initial_blogs().len() - 1);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let app = TestApp::new();
        let owner_token = app.user_token("root", "salainen").await;
        let other_token = app.user_token("mluukkai", "sekret").await;
        let created = app.seed(&owner_token).await;
        let target = format!("/api/blogs/{}", id_of(&created[0]));

        let (status, body) = app.send(Method::DELETE, &target, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "token missing or invalid");

        let (status, body) = app.send(Method::DELETE, &target, Some(&other_token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "user is not the author of the blog");

        assert_eq!(app.blogs().await.len(), initial_blogs().len());
    }

    #[tokio::test]
    async fn test_delete_missing_or_malformed() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;

        let (status, _) = app
            .send(Method::DELETE, "/api/blogs/00000000-0000-4000-8000-000000000000", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.send(Method::DELETE, "/api/blogs/xyz", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformatted id");
    }

    // =========================================================================
    // STATISTICS
    // =========================================================================

    #[tokio::test]
    async fn test_stats_of_empty_catalog() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/blogs/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "totalLikes": 0,
                "mostBlogs": { "author": "", "blogs": 0 },
                "mostLikes": { "author": "", "likes": 0 }
            })
        );
    }

    #[tokio::test]
    async fn test_stats_over_seeded_catalog() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        app.seed(&token).await;

        let (status, body) = app.get("/api/blogs/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "totalLikes": 36,
                "mostBlogs": { "author": "Robert C. Martin", "blogs": 3 },
                "mostLikes": { "author": "Edsger W. Dijkstra", "likes": 17 }
            })
        );
    }

    #[tokio::test]
    async fn test_stats_follow_updates() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        let created = app.seed(&token).await;

        // Michael Chan: 7 -> 40 overtakes Dijkstra's 17.
        app.send(
            Method::PUT,
            &format!("/api/blogs/{}", id_of(&created[0])),
            None,
            Some(json!({ "likes": 40 })),
        )
        .await;

        let (_, body) = app.get("/api/blogs/stats").await;
        assert_eq!(body["mostLikes"], json!({ "author": "Michael Chan", "likes": 40 }));
        assert_eq!(body["totalLikes"], 69);
    }

    #[tokio::test]
    async fn test_stats_match_list_helper() {
        let app = TestApp::new();
        let token = app.user_token("root", "salainen").await;
        app.seed(&token).await;

        let records: Vec<list_helper::BlogRecord> = app
            .blogs()
            .await
            .into_iter()
            .map(|b| serde_json::from_value(b).unwrap())
            .collect();

        let (_, body) = app.get("/api/blogs/stats").await;
        let expected = serde_json::to_value(list_helper::summarize(&records)).unwrap();
        assert_eq!(body, expected);
    }

    // =========================================================================
    // MIDDLEWARE
    // =========================================================================

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], bloglist_api::VERSION);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = crate::integration::harness::test_config();
        config.http.max_body_bytes = 64;
        let app = TestApp::with_config(config);
        let token = app.user_token("root", "pwd").await;

        let blog = json!({ "title": "x".repeat(200), "url": "http://big.example.com" });
        let (status, _) = app.create_blog(&token, blog).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(app.blogs().await.is_empty());
    }
}
