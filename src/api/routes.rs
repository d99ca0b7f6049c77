use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    actions::append_action,
    assessments::{evaluate, get_assessments, record_assessment},
    matches::{create_match, delete_match, get_match, get_match_actions, list_matches, update_match},
    players::{
        create_player, delete_player, get_player, get_player_actions, get_player_matches, list_players,
        update_player,
    },
    ratings::{get_match_rating, get_season_rating, get_weights},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route(
            "/api/players/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/api/players/:id/actions", get(get_player_actions))
        .route("/api/players/:id/matches", get(get_player_matches))
        .route(
            "/api/players/:id/assessments",
            get(get_assessments).post(record_assessment),
        )
        .route("/api/matches", get(list_matches).post(create_match))
        .route(
            "/api/matches/:id",
            get(get_match).put(update_match).delete(delete_match),
        )
        .route("/api/matches/:id/actions", get(get_match_actions))
        .route("/api/actions", post(append_action))
        .route("/api/ratings/:player_id/match/:match_id", get(get_match_rating))
        .route("/api/ratings/:player_id/season", get(get_season_rating))
        .route("/api/weights", get(get_weights))
        .route("/api/assessments/evaluate", post(evaluate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::settings::AppConfig;
    use crate::store::EventStore;

    fn app() -> Router {
        let state = Arc::new(AppState {
            store: EventStore::in_memory().unwrap(),
            config: AppConfig::default(),
        });
        create_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn seed(app: &Router) -> (i64, i64) {
        let (status, player) = send(
            app,
            "POST",
            "/api/players",
            Some(json!({"name": "Kai Moreno", "position": "striker"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, fixture) = send(
            app,
            "POST",
            "/api/matches",
            Some(json!({"date": "2024-09-14", "opponent": "Harbour FC", "venue": "home", "result": "W 2-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (player["id"].as_i64().unwrap(), fixture["id"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn logged_actions_drive_the_match_rating() {
        let app = app();
        let (player, fixture) = seed(&app).await;

        for kind in ["goal", "tackle"] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/actions",
                Some(json!({"matchId": fixture, "playerId": player, "kind": kind})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let uri = format!("/api/ratings/{}/match/{}", player, fixture);
        let (status, rating) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(format!("{:.2}", rating["mpr"].as_f64().unwrap()), "6.67");
        assert_eq!(rating["actions"].as_array().unwrap().len(), 2);
        assert_eq!(rating["breakdown"]["byKind"][0]["kind"], "goal");
    }

    #[tokio::test]
    async fn season_rating_covers_the_requested_season() {
        let app = app();
        let (player, fixture) = seed(&app).await;
        send(
            &app,
            "POST",
            "/api/actions",
            Some(json!({"matchId": fixture, "playerId": player, "kind": "assist", "outcome": 0.75})),
        )
        .await;

        let uri = format!("/api/ratings/{}/season?season=2024/25&roleTransfer=6", player);
        let (status, season) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(season["season"], "2024/25");
        assert_eq!(season["matches"].as_array().unwrap().len(), 1);
        assert_eq!(season["csr"].as_f64().unwrap(), 5.0);
        assert_eq!(season["profile"]["roleTransfer"].as_f64().unwrap(), 6.0);

        let uri = format!("/api/ratings/{}/season?season=2023/24", player);
        let (_, empty) = send(&app, "GET", &uri, None).await;
        assert_eq!(empty["csr"].as_f64().unwrap(), 5.0);
        assert!(empty["profile"].is_null());
    }

    #[tokio::test]
    async fn integrity_failures_map_to_client_errors() {
        let app = app();
        let (player, fixture) = seed(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/actions",
            Some(json!({"matchId": fixture + 1, "playerId": player, "kind": "goal"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("unknown match"));

        let (status, _) = send(&app, "GET", &format!("/api/players/{}", player + 1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/players",
            Some(json!({"name": "  ", "position": "winger"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/matches?season=someday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn referenced_player_cannot_be_deleted() {
        let app = app();
        let (player, fixture) = seed(&app).await;
        send(
            &app,
            "POST",
            "/api/actions",
            Some(json!({"matchId": fixture, "playerId": player, "kind": "save"})),
        )
        .await;

        let (status, _) = send(&app, "DELETE", &format!("/api/players/{}", player), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, actions) =
            send(&app, "GET", &format!("/api/players/{}/actions", player), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(actions.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn players_can_be_edited_and_filtered() {
        let app = app();
        let (player, _) = seed(&app).await;

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/players/{}", player),
            Some(json!({"position": "winger"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["position"], "winger");
        assert_eq!(updated["name"], "Kai Moreno");

        let (_, wingers) = send(&app, "GET", "/api/players?position=winger", None).await;
        assert_eq!(wingers.as_array().unwrap().len(), 1);
        let (_, strikers) = send(&app, "GET", "/api/players?position=striker", None).await;
        assert!(strikers.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn weights_are_published() {
        let (status, table) = send(&app(), "GET", "/api/weights", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(table[0], json!({"kind": "goal", "weight": 3.0}));
    }

    #[tokio::test]
    async fn assessment_evaluation_derives_aggregates() {
        let point = |grade: f64| {
            json!({"phase": "final_third", "dq": grade, "eq": grade, "cd": grade, "ta": grade, "lop": grade})
        };
        let (status, body) = send(
            &app(),
            "POST",
            "/api/assessments/evaluate",
            Some(json!({
                "role": "central_mid",
                "decisionPoints": [point(8.0), point(6.0), point(7.0)],
                "ec": 80.0,
                "tii": 50.0,
                "ibi": 30.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cavs"], json!([8.0, 6.0, 7.0]));
        assert_eq!(body["aggregates"]["aqc"].as_f64().unwrap(), 7.0);
        // 0.30*70 + 0.15*66.67 + 0.30*80 + 0.20*50 + 0.05*30
        let weighted = body["scores"]["roleWeighted"].as_f64().unwrap();
        assert!((weighted - 66.5).abs() < 1e-9);

        let (status, _) = send(
            &app(),
            "POST",
            "/api/assessments/evaluate",
            Some(json!({"role": "winger", "decisionPoints": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests_with_json_errors() {
        let app = app();
        let (player, fixture) = seed(&app).await;

        for body in [
            json!({"matchId": fixture, "playerId": player, "kind": "dribble"}),
            json!({"matchId": fixture, "playerId": player, "kind": "goal", "minute": -3}),
            json!({"matchId": "first", "playerId": player, "kind": "goal"}),
        ] {
            let (status, error) = send(&app, "POST", "/api/actions", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(error["error"].is_string());
        }

        let (status, error) = send(&app, "GET", "/api/players?position=sweeper", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());

        let (status, error) = send(&app, "GET", "/api/players/seven", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());

        // only a reference to a missing record is unprocessable
        let (status, _) = send(
            &app,
            "POST",
            "/api/actions",
            Some(json!({"matchId": fixture + 9, "playerId": player, "kind": "goal"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn team_sheet_labels_are_accepted() {
        let app = app();
        let (status, player) = send(
            &app,
            "POST",
            "/api/players",
            Some(json!({"name": "Rui Costa", "position": "CF / Striker"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(player["position"], "striker");

        let (status, fixture) = send(
            &app,
            "POST",
            "/api/matches",
            Some(json!({"date": "2024-10-05", "opponent": "Rovers", "venue": "Home", "result": "D 1-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(fixture["venue"], "home");

        let (_, found) = send(&app, "GET", "/api/players?position=CF%20%2F%20Striker", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn name_filter_matches_wildcards_literally() {
        let app = app();
        seed(&app).await;

        let (status, found) = send(&app, "GET", "/api/players?filter=%25", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(found.as_array().unwrap().is_empty());

        let (_, found) = send(&app, "GET", "/api/players?filter=moreno", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn saved_assessments_build_a_history() {
        let app = app();
        let (player, fixture) = seed(&app).await;
        let uri = format!("/api/players/{}/assessments", player);

        let (status, saved) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"role": "CM / 8", "matchId": fixture, "aqc": 7.0, "his": 40, "ec": 80, "tii": 50, "ibi": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["matchId"].as_i64().unwrap(), fixture);
        assert_eq!(saved["role"], "central_mid");
        assert!((saved["scores"]["roleWeighted"].as_f64().unwrap() - 62.5).abs() < 1e-9);
        assert!((saved["rating"].as_f64().unwrap() - 6.25).abs() < 1e-9);

        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(json!({"role": "central_mid", "aqc": 9.0, "his": 40, "ec": 80, "tii": 50, "ibi": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, history) = send(&app, "GET", &format!("{}?roleTransfer=8", uri), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["assessments"].as_array().unwrap().len(), 2);
        assert!(history["season"].is_null());
        assert_eq!(history["summary"]["matches"].as_u64().unwrap(), 2);
        assert!((history["summary"]["peak"].as_f64().unwrap() - 6.85).abs() < 1e-9);
        assert!((history["summary"]["low"].as_f64().unwrap() - 6.25).abs() < 1e-9);

        // the linked match can no longer be deleted
        let (status, _) = send(&app, "DELETE", &format!("/api/matches/{}", fixture), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn assessment_writes_are_checked() {
        let app = app();
        let (player, fixture) = seed(&app).await;
        let body = |extra: Value| {
            let mut body = json!({"role": "winger", "aqc": 6.0, "his": 30, "ec": 70});
            if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
                body.extend(extra.clone());
            }
            body
        };

        let uri = format!("/api/players/{}/assessments", player);
        let (status, _) = send(&app, "POST", &uri, Some(body(json!({"matchId": fixture + 5})))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, error) = send(&app, "POST", &uri, Some(body(json!({"om": 3.0})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().contains("om"));

        let (status, _) = send(&app, "POST", &uri, Some(body(json!({"role": "GK"})))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = format!("/api/players/{}/assessments", player + 10);
        let (status, _) = send(&app, "POST", &missing, Some(body(json!({})))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "GET", &missing, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
