use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use owltune::error::BackendError;
use owltune::model::{HttpBackend, NewPlaylist, PlaylistBackend};

fn client(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Some("abc123"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_playlists_with_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh-playlists"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "name": "Road trip", "tracks": { "total": 12 }, "public": true },
            { "id": "p2", "name": null, "owner": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let playlists = client(&server).fetch_playlists().await.unwrap();

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].title(), "Road trip");
    assert_eq!(playlists[0].track_total(), 12);
    assert_eq!(playlists[1].title(), "No Title");
    assert_eq!(playlists[1].owner_name(), "Unknown");
}

#[tokio::test]
async fn details_and_songs_pass_playlist_id_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-playlist-details"))
        .and(query_param("playlist_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "Road trip",
            "followers": { "total": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get-playlist-songs"))
        .and(query_param("playlist_id", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "track": { "name": "Song", "artists": [{ "name": "A" }], "duration_ms": 1000 } },
            { "track": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = client(&server);
    let detail = backend.fetch_playlist_details("p1").await.unwrap();
    let songs = backend.fetch_playlist_songs("p1").await.unwrap();

    assert_eq!(detail.follower_total(), 3);
    assert_eq!(songs.len(), 2);
    assert!(songs[1].track.is_none());
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-playlist-details"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Failed to retrieve playlist details" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_playlist_details("p1").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to retrieve playlist details");
}

#[tokio::test]
async fn bare_unauthorized_falls_back_to_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh-playlists"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).fetch_playlists().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/refresh-playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_playlists().await.unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[tokio::test]
async fn unfollow_sends_all_ids_in_one_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/unfollow-playlists"))
        .and(body_json(json!({ "playlistIds": ["a", "b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["a".to_string(), "b".to_string()];
    let response = client(&server).unfollow_playlists(&ids).await.unwrap();

    assert!(response.success);
    assert!(response.errors.is_empty());
}

#[tokio::test]
async fn partial_unfollow_on_400_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/unfollow-playlists"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [{ "playlist_id": "b", "error": "403 Client Error" }]
        })))
        .mount(&server)
        .await;

    let ids = vec!["a".to_string(), "b".to_string()];
    let response = client(&server).unfollow_playlists(&ids).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].playlist_id, "b");
}

#[tokio::test]
async fn unfollow_server_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/unfollow-playlists"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let ids = vec!["a".to_string()];
    let err = client(&server).unfollow_playlists(&ids).await.unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn create_posts_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-playlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "redirect": true,
            "redirect_url": "/playlists"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .create_playlist(&NewPlaylist {
            title: "Road trip".into(),
            description: "Summer".into(),
            songs: "Daft Punk - One More Time\nAir - Sexy Boy".into(),
            private: false,
        })
        .await
        .unwrap();

    assert!(response.redirect);
    assert_eq!(response.redirect_url.as_deref(), Some("/playlists"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(body.contains("name=\"title\""));
    assert!(body.contains("Road trip"));
    assert!(body.contains("Air - Sexy Boy"));
    assert!(!body.contains("name=\"private\""));
}

#[tokio::test]
async fn private_flag_is_sent_as_on() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-playlist"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Missing songs" })),
        )
        .mount(&server)
        .await;

    let response = client(&server)
        .create_playlist(&NewPlaylist {
            title: "Secret".into(),
            songs: "A - B".into(),
            private: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!response.redirect);
    assert_eq!(response.error.as_deref(), Some("Missing songs"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("name=\"private\""));
    assert!(body.contains("on"));
}

#[test]
fn rejects_unusable_base_urls() {
    let timeout = Duration::from_secs(1);
    assert!(matches!(
        HttpBackend::new("", None, timeout),
        Err(BackendError::InvalidUrl(_))
    ));
    assert!(matches!(
        HttpBackend::new("ftp://example.com", None, timeout),
        Err(BackendError::InvalidUrl(_))
    ));

    let backend = HttpBackend::new("http://127.0.0.1:5000/", None, timeout).unwrap();
    assert_eq!(backend.base_url(), "http://127.0.0.1:5000");
}
