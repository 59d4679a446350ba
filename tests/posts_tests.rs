// tests/posts_tests.rs

use devconnect::{config::Config, routes, state::AppState};

async fn spawn_app() -> String {
    let config = Config {
        mongodb_uri: String::new(),
        database_name: "devconnect_test".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
    };

    let state = AppState::in_memory(config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Registers a fresh user and returns a bearer token for it.
async fn register_and_login(client: &reqwest::Client, address: &str, name: &str) -> String {
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);

    client
        .post(format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    let login: serde_json::Value = client
        .post(format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    login["token"].as_str().expect("Token not found").to_string()
}

async fn create_post(
    client: &reqwest::Client,
    address: &str,
    token: &str,
) -> serde_json::Value {
    client
        .post(format!("{}/api/posts", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "text": "A post body with more than ten characters" }))
        .send()
        .await
        .expect("Failed to create post")
        .json()
        .await
        .expect("Failed to parse post json")
}

#[tokio::test]
async fn empty_post_list_is_not_found() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/api/posts", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["posts"], "There are no posts");
}

#[tokio::test]
async fn create_post_snapshots_author() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address, "Post author").await;

    // Act
    let post = create_post(&client, &address, &token).await;

    // Assert: author name comes from the authenticated user, not the body
    assert_eq!(post["name"], "Post author");
    assert_eq!(post["text"], "A post body with more than ten characters");
    assert!(post["user"].is_string());
    assert_eq!(post["likes"].as_array().unwrap().len(), 0);
    assert_eq!(post["comments"].as_array().unwrap().len(), 0);

    // And it is publicly readable by id
    let response = client
        .get(format!("{}/api/posts/{}", address, post["_id"].as_str().unwrap()))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn create_post_requires_auth_and_valid_text() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act / Assert: no token
    let response = client
        .post(format!("{}/api/posts", address))
        .json(&serde_json::json!({ "text": "A post body with more than ten characters" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 401);

    // Too-short text
    let token = register_and_login(&client, &address, "Post author").await;
    let response = client
        .post(format!("{}/api/posts", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "text": "short" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["errors"]["text"].is_string());
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/api/posts/000000000000000000000000", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["post"], "No post found");
}

#[tokio::test]
async fn like_toggles_on_and_off() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address, "Liker").await;
    let post = create_post(&client, &address, &token).await;
    let post_id = post["_id"].as_str().unwrap();

    // Act: first call likes
    let liked: serde_json::Value = client
        .post(format!("{}/api/posts/like/{}", address, post_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(liked["likes"].as_array().unwrap().len(), 1);

    // Second call unlikes
    let unliked: serde_json::Value = client
        .post(format!("{}/api/posts/like/{}", address, post_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(unliked["likes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn likes_from_different_users_accumulate() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let author = register_and_login(&client, &address, "Author").await;
    let other = register_and_login(&client, &address, "Other").await;
    let post = create_post(&client, &address, &author).await;
    let post_id = post["_id"].as_str().unwrap();

    // Act
    for token in [&author, &other] {
        client
            .post(format!("{}/api/posts/like/{}", address, post_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to execute request");
    }

    // Assert
    let body: serde_json::Value = client
        .get(format!("{}/api/posts/{}", address, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["likes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn only_the_author_can_delete_a_post() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let author = register_and_login(&client, &address, "Author").await;
    let other = register_and_login(&client, &address, "Other").await;
    let post = create_post(&client, &address, &author).await;
    let post_id = post["_id"].as_str().unwrap();

    // Act: non-author delete is forbidden
    let response = client
        .delete(format!("{}/api/posts/{}", address, post_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["notauthorized"], "User not authorized");

    // The post is still in storage
    let still_there = client
        .get(format!("{}/api/posts/{}", address, post_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(still_there.status().as_u16(), 200);

    // The author can delete it
    let response = client
        .delete(format!("{}/api/posts/{}", address, post_id))
        .header("Authorization", format!("Bearer {}", author))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 204);

    let gone = client
        .get(format!("{}/api/posts/{}", address, post_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn deleting_unknown_post_is_not_found_not_forbidden() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address, "Author").await;

    // Act
    let response = client
        .delete(format!("{}/api/posts/000000000000000000000000", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["post"], "No post found");
}

#[tokio::test]
async fn comments_append_and_only_their_author_removes_them() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let author = register_and_login(&client, &address, "Author").await;
    let commenter = register_and_login(&client, &address, "Commenter").await;
    let post = create_post(&client, &address, &author).await;
    let post_id = post["_id"].as_str().unwrap();

    // Act: another user comments
    let commented: serde_json::Value = client
        .post(format!("{}/api/posts/comment/{}", address, post_id))
        .header("Authorization", format!("Bearer {}", commenter))
        .json(&serde_json::json!({ "text": "A comment with more than ten characters" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let comments = commented["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["name"], "Commenter");
    let comment_id = comments[0]["_id"].as_str().unwrap();

    // The post author is not the comment author: forbidden
    let response = client
        .delete(format!(
            "{}/api/posts/comment/{}/{}",
            address, post_id, comment_id
        ))
        .header("Authorization", format!("Bearer {}", author))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 403);

    // The comment author removes it
    let response = client
        .delete(format!(
            "{}/api/posts/comment/{}/{}",
            address, post_id, comment_id
        ))
        .header("Authorization", format!("Bearer {}", commenter))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["comments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn deleting_unknown_comment_is_not_found() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address, "Author").await;
    let post = create_post(&client, &address, &token).await;
    let post_id = post["_id"].as_str().unwrap();

    // Act
    let response = client
        .delete(format!(
            "{}/api/posts/comment/{}/000000000000000000000000",
            address, post_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["comment"], "Comment not found");
}

#[tokio::test]
async fn posts_list_newest_first() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &address, "Author").await;

    let mut ids = Vec::new();
    for text in ["The first post body text", "The second post body text"] {
        let post: serde_json::Value = client
            .post(format!("{}/api/posts", address))
            .header("Authorization", format!("Bearer {}", token))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .expect("Failed to create post")
            .json()
            .await
            .unwrap();
        ids.push(post["_id"].as_str().unwrap().to_string());
    }

    // Act
    let posts: serde_json::Value = client
        .get(format!("{}/api/posts", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    // Assert: creation-descending
    let list = posts.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["_id"].as_str().unwrap(), ids[1]);
    assert_eq!(list[1]["_id"].as_str().unwrap(), ids[0]);
}
