use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_reco_api::api::{create_router, AppState, SessionStore};
use movie_reco_api::error::{AppError, AppResult};
use movie_reco_api::models::{Genre, MovieCredits, MovieId, MovieInfo};
use movie_reco_api::services::{Catalog, MovieProvider};
use movie_reco_api::views::ImageUrls;

const DATASET: &str = r#"[
    [{"title_fr": "Intouchables", "id_recherche": 77338},
     [{"id_reco": 1}, {"id_reco": 2}, {"id_reco": 3}, {"id_reco": 4}, {"id_reco": 5}, {"id_reco": 6}, {"id_reco": 7}]],
    [{"title_fr": "La Haine", "id_recherche": 406}, []],
    [{"title_fr": "Amélie", "id_recherche": 194}, [{"id_reco": 13}, {"id_reco": 666}]]
]"#;

/// Serves canned TMDB data after `delay`; id 666 always fails
#[derive(Default)]
struct StubProvider {
    delay: Duration,
}

#[async_trait::async_trait]
impl MovieProvider for StubProvider {
    async fn fetch_info(&self, id: MovieId) -> AppResult<MovieInfo> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if id == 666 {
            return Err(AppError::ExternalApi("status 404".to_string()));
        }
        Ok(MovieInfo {
            id,
            title: Some(format!("Film {}", id)),
            poster_path: Some(format!("/p{}.jpg", id)),
            backdrop_path: Some(format!("/b{}.jpg", id)),
            runtime: Some(100),
            vote_average: Some(7.5),
            genres: vec![Genre {
                id: 18,
                name: "Drame".to_string(),
            }],
            release_date: Some("2011-11-02".to_string()),
            overview: Some("Résumé".to_string()),
        })
    }

    async fn fetch_credits(&self, id: MovieId) -> AppResult<MovieCredits> {
        if id == 666 {
            return Err(AppError::ExternalApi("status 404".to_string()));
        }
        Ok(MovieCredits {
            directors: vec!["Réalisateur".to_string()],
            actors: vec!["Acteur A".to_string(), "Acteur B".to_string()],
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn test_state(provider: StubProvider) -> AppState {
    AppState::new(
        Catalog::from_json(DATASET).unwrap(),
        Arc::new(provider),
        ImageUrls::new("https://image.tmdb.org/t/p"),
    )
}

fn create_test_server() -> TestServer {
    TestServer::new(create_router(test_state(StubProvider::default()))).unwrap()
}

fn create_slow_test_server(delay: Duration) -> TestServer {
    TestServer::new(create_router(test_state(StubProvider { delay }))).unwrap()
}

async fn create_session(server: &TestServer) -> String {
    let response = server.post("/api/v1/sessions").await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["session_id"].as_str().unwrap().to_string()
}

async fn act(server: &TestServer, session: &str, title: &str, action: Value) -> Value {
    let response = server
        .post(&format!("/api/v1/sessions/{}/actions", session))
        .json(&json!({ "title": title, "action": action }))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_selector_titles_sorted() {
    let server = create_test_server();

    let response = server.get("/api/v1/titles").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["titles"], json!(["Amélie", "Intouchables", "La Haine"]));
    assert_eq!(body["prompt"], "🔍 Quel film avez-vous aimé ?");
}

#[tokio::test]
async fn test_title_suggestions() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "HAI")
        .await;
    response.assert_status_ok();
    let titles: Vec<String> = response.json();
    assert_eq!(titles, vec!["La Haine"]);
}

#[tokio::test]
async fn test_page_for_known_title() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "intouchables")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();

    assert_eq!(page["searched"]["banner"]["title"], "Film 77338");
    assert_eq!(
        page["searched"]["banner"]["backdrop"]["src"],
        "https://image.tmdb.org/t/p/w1280/b77338.jpg"
    );
    assert!(page["searched"]["details"].is_null());

    let rows = page["recommendations"]["rows"].as_array().unwrap();
    assert_eq!(page["recommendations"]["kind"], "grid");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].as_array().unwrap().len(), 5);
    assert_eq!(rows[1].as_array().unwrap().len(), 2);
    assert_eq!(rows[0][0]["title"], "Film 1");
    assert_eq!(rows[1][1]["title"], "Film 7");
}

#[tokio::test]
async fn test_page_for_unknown_title_is_empty() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "Inception")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();

    assert!(page["searched"].is_null());
    assert!(page["recommendations"].is_null());
    assert_eq!(page["warnings"], json!([]));
}

#[tokio::test]
async fn test_page_without_recommendations() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "La Haine")
        .await;
    let page: Value = response.json();

    assert_eq!(page["recommendations"]["kind"], "empty");
    assert_eq!(
        page["recommendations"]["notice"],
        "Aucune recommandation trouvée."
    );
}

#[tokio::test]
async fn test_failed_fetch_shows_warning() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "Amélie")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();

    assert_eq!(page["warnings"].as_array().unwrap().len(), 2);
    let cards = page["recommendations"]["rows"][0].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1]["title"], "Titre inconnu");
    assert_eq!(cards[1]["poster"]["kind"], "fallback");
}

#[tokio::test]
async fn test_toggle_searched_details_round_trip() {
    let server = create_test_server();
    let session = create_session(&server).await;
    let toggle = json!({ "type": "toggle_searched_details" });

    let page = act(&server, &session, "Intouchables", toggle.clone()).await;
    let details = &page["searched"]["details"];
    assert_eq!(details["fields"][2]["value"], "Drame");
    assert_eq!(details["fields"][3]["value"], "02/11/2011");
    assert_eq!(details["fields"][5]["value"], "Acteur A, Acteur B");

    let page = act(&server, &session, "Intouchables", toggle).await;
    assert!(page["searched"]["details"].is_null());
    assert_eq!(page["state"]["searched_details_visible"], false);
}

#[tokio::test]
async fn test_select_and_collapse_recommendation() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let page = act(
        &server,
        &session,
        "Intouchables",
        json!({ "type": "show_recommendation", "index": 2 }),
    )
    .await;
    assert_eq!(page["recommendations"]["selected"]["index"], 2);
    assert_eq!(page["recommendations"]["selected"]["panel"]["title"], "Film 3");

    // The selection survives a plain reload of the same title
    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "Intouchables")
        .await;
    let page: Value = response.json();
    assert_eq!(page["state"]["selected_recommendation"], 2);

    let page = act(&server, &session, "Intouchables", json!({ "type": "collapse" })).await;
    assert!(page["recommendations"]["selected"].is_null());
    assert_eq!(page["recommendations"]["rows"][0].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_switching_title_resets_state() {
    let server = create_test_server();
    let session = create_session(&server).await;

    act(
        &server,
        &session,
        "Intouchables",
        json!({ "type": "toggle_searched_details" }),
    )
    .await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "Amélie")
        .await;
    let page: Value = response.json();
    assert_eq!(page["state"]["searched_details_visible"], false);
    assert!(page["searched"]["details"].is_null());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let server = create_test_server();
    let first = create_session(&server).await;
    let second = create_session(&server).await;

    act(
        &server,
        &first,
        "Intouchables",
        json!({ "type": "toggle_searched_details" }),
    )
    .await;

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", second))
        .add_query_param("title", "Intouchables")
        .await;
    let page: Value = response.json();
    assert_eq!(page["state"]["searched_details_visible"], false);
}

#[tokio::test]
async fn test_out_of_range_selection_rejected() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .post(&format!("/api/v1/sessions/{}/actions", session))
        .json(&json!({
            "title": "Intouchables",
            "action": { "type": "show_recommendation", "index": 7 }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/sessions/00000000-0000-4000-8000-000000000000/page")
        .add_query_param("title", "Intouchables")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_delete_session() {
    let server = create_test_server();
    let session = create_session(&server).await;

    let response = server
        .delete(&format!("/api/v1/sessions/{}", session))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server
        .delete(&format!("/api/v1/sessions/{}", session))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_actions_both_applied() {
    let server = create_slow_test_server(Duration::from_millis(50));
    let session = create_session(&server).await;
    let url = format!("/api/v1/sessions/{}/actions", session);

    let (toggle, select) = tokio::join!(
        async {
            server
                .post(&url)
                .json(&json!({
                    "title": "Intouchables",
                    "action": { "type": "toggle_searched_details" }
                }))
                .await
        },
        async {
            server
                .post(&url)
                .json(&json!({
                    "title": "Intouchables",
                    "action": { "type": "show_recommendation", "index": 1 }
                }))
                .await
        }
    );
    toggle.assert_status_ok();
    select.assert_status_ok();

    let response = server
        .get(&format!("/api/v1/sessions/{}/page", session))
        .add_query_param("title", "Intouchables")
        .await;
    let page: Value = response.json();
    assert_eq!(page["state"]["searched_details_visible"], true);
    assert_eq!(page["state"]["selected_recommendation"], 1);
}

#[tokio::test]
async fn test_session_deleted_during_render_stays_deleted() {
    let server = create_slow_test_server(Duration::from_millis(200));
    let session = create_session(&server).await;

    let (page, deleted) = tokio::join!(
        async {
            server
                .get(&format!("/api/v1/sessions/{}/page", session))
                .add_query_param("title", "Intouchables")
                .await
        },
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            server
                .delete(&format!("/api/v1/sessions/{}", session))
                .await
        }
    );
    deleted.assert_status(StatusCode::NO_CONTENT);
    page.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/v1/sessions/{}", session))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_cap_drops_least_recently_seen() {
    let state = test_state(StubProvider::default())
        .with_sessions(SessionStore::new(Duration::from_secs(3600), 2));
    let server = TestServer::new(create_router(state)).unwrap();

    let first = create_session(&server).await;
    let second = create_session(&server).await;

    // Touch the first session so the second becomes the oldest
    act(
        &server,
        &first,
        "La Haine",
        json!({ "type": "toggle_searched_details" }),
    )
    .await;
    let third = create_session(&server).await;

    for (session, status) in [
        (&first, StatusCode::OK),
        (&second, StatusCode::NOT_FOUND),
        (&third, StatusCode::OK),
    ] {
        let response = server
            .get(&format!("/api/v1/sessions/{}/page", session))
            .add_query_param("title", "La Haine")
            .await;
        response.assert_status(status);
    }
}
