use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use kanban_core::MissingTargetPolicy;
use kanban_domain::{Board, Card, Document, List, ListRef, NewCard};
use kanban_persistence::{JsonFileStore, PersistenceStore};
use kanban_server::{board_script_file, build_router, AppState, BOARD_SCRIPT};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    dir: TempDir,
    store: Arc<JsonFileStore>,
}

impl TestApp {
    /// Board 1 with list 10 holding card 5 and an empty list 20; board 2
    /// with list 30 holding card 17.
    async fn new() -> Self {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("data.json")));

        let mut todo = List::new(10, "Todo");
        todo.cards.push(Card::new(
            5,
            NewCard {
                start_date: Some("2024-02-01".into()),
                end_date: Some("2024-02-10".into()),
                ..NewCard::titled("Existing")
            },
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        ));
        let mut side = List::new(30, "Side");
        side.cards.push(Card::new(
            17,
            NewCard::titled("Far away"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        ));
        let document = Document::new(vec![
            Board::new(1, "Main")
                .with_list(todo)
                .with_list(List::new(20, "Done")),
            Board::new(2, "Other").with_list(side),
        ]);
        store.save(&document).await.unwrap();

        std::fs::create_dir_all(dir.path().join("public")).unwrap();
        std::fs::write(dir.path().join("public/styles.css"), "body { margin: 0 }").unwrap();

        Self { dir, store }
    }

    fn router_with(&self, state: AppState) -> Router {
        build_router(Arc::new(state), self.dir.path().join("public"))
    }

    fn router(&self) -> Router {
        self.router_with(AppState::new(self.store.clone()))
    }

    fn data_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    fn raw(&self) -> Vec<u8> {
        std::fs::read(self.data_path()).unwrap()
    }

    async fn document(&self) -> Document {
        self.store.load().await.unwrap()
    }
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirects_to_dashboard(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
}

fn card_ids(document: &Document, at: ListRef) -> Vec<i64> {
    document
        .list(at)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.id)
        .collect()
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn test_static_pages_render() {
        let app = TestApp::new().await;
        for (uri, marker) in [("/", "KanbanPro"), ("/register", "Register"), ("/login", "Log in")] {
            let response = app.router().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(body_text(response.into_body()).await.contains(marker));
        }
    }

    #[tokio::test]
    async fn test_dashboard_renders_document() {
        let app = TestApp::new().await;
        let response = app.router().oneshot(get("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response.into_body()).await;
        assert!(html.contains("Existing"));
        assert!(html.contains("Far away"));
        assert!(html.contains(r#"data-card-id="5" data-board-id="1" data-list-id="10""#));
    }

    #[tokio::test]
    async fn test_dashboard_with_missing_store_is_500() {
        let app = TestApp::new().await;
        std::fs::remove_file(app.data_path()).unwrap();

        let response = app.router().oneshot(get("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_static_files_served_from_public_dir() {
        let app = TestApp::new().await;

        let response = app.router().oneshot(get("/styles.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response.into_body()).await, "body { margin: 0 }");

        let response = app.router().oneshot(get("/nope.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_script_resolves_under_public_dir() {
        let app = TestApp::new().await;
        let public_dir = app.dir.path().join("public");

        let response = app.router().oneshot(get(BOARD_SCRIPT)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bundle = board_script_file(&public_dir);
        std::fs::create_dir_all(bundle.parent().unwrap()).unwrap();
        std::fs::write(&bundle, "export default function init() {}").unwrap();

        let html = body_text(
            app.router()
                .oneshot(get("/dashboard"))
                .await
                .unwrap()
                .into_body(),
        )
        .await;
        assert!(html.contains(&format!("import init from '{}'", BOARD_SCRIPT)));

        let response = app.router().oneshot(get(BOARD_SCRIPT)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_text(response.into_body()).await,
            "export default function init() {}"
        );
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn test_create_appends_with_next_global_id() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(form(
                "/nueva-tarjeta",
                "boardId=1&listId=20&title=++Ship+it++&description=&autor=+Ana+&prioridad=High",
            ))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);

        let document = app.document().await;
        let card = document.list(ListRef::new(1, 20)).unwrap().cards.last().unwrap();
        assert_eq!(card.id, 18);
        assert_eq!(card.title, "Ship it");
        assert_eq!(card.author, "Ana");
        assert_eq!(card.priority, "High");
        assert_eq!(card.tag, "TASK");
        assert_eq!(card.status, "Backlog");
        assert_eq!(card.created_on.len(), "2024-01-01".len());
    }

    #[tokio::test]
    async fn test_create_on_missing_board_redirects_and_changes_nothing() {
        let app = TestApp::new().await;
        let before = app.document().await;

        let response = app
            .router()
            .oneshot(form("/nueva-tarjeta", "boardId=99&listId=10&title=Lost"))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);
        assert_eq!(app.document().await, before);
    }

    #[tokio::test]
    async fn test_create_with_unreadable_list_id_is_silent() {
        let app = TestApp::new().await;
        let before = app.document().await;

        let response = app
            .router()
            .oneshot(form("/nueva-tarjeta", "boardId=1&listId=abc&title=Lost"))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);
        assert_eq!(app.document().await, before);
    }

    #[tokio::test]
    async fn test_create_without_title_is_400() {
        let app = TestApp::new().await;
        let before = app.raw();

        let response = app
            .router()
            .oneshot(form("/nueva-tarjeta", "boardId=1&listId=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.raw(), before);
    }

    #[tokio::test]
    async fn test_create_after_largest_possible_id_is_400() {
        let app = TestApp::new().await;
        let mut document = app.document().await;
        document.list_mut(ListRef::new(1, 10)).unwrap().cards[0].id = i64::MAX;
        app.store.save(&document).await.unwrap();
        let before = app.raw();

        let response = app
            .router()
            .oneshot(form("/nueva-tarjeta", "boardId=1&listId=10&title=Next"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(app.raw(), before);
    }

    #[tokio::test]
    async fn test_reported_policy_answers_404_without_saving() {
        let app = TestApp::new().await;
        let before = app.raw();
        let router = app.router_with(
            AppState::new(app.store.clone()).with_missing_target(MissingTargetPolicy::Reported),
        );

        let response = router
            .oneshot(form("/nueva-tarjeta", "boardId=99&listId=10&title=Lost"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(app.raw(), before);
    }

    #[tokio::test]
    async fn test_serialized_writes_keep_every_card() {
        let app = TestApp::new().await;
        let router = app.router_with(AppState::new(app.store.clone()).serialize_writes(true));

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let request = form("/nueva-tarjeta", &format!("boardId=1&listId=20&title=Card+{i}"));
                tokio::spawn(router.clone().oneshot(request))
            })
            .collect();
        for handle in handles {
            assert_redirects_to_dashboard(&handle.await.unwrap().unwrap());
        }

        assert_eq!(
            card_ids(&app.document().await, ListRef::new(1, 20)),
            vec![18, 19, 20, 21, 22]
        );
    }
}

mod edit {
    use super::*;

    #[tokio::test]
    async fn test_edit_overwrites_fields() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(form(
                "/editar-tarjeta",
                "cardId=5&boardId=1&listId=10&title=Renamed&tag=&estado=Done&responsable=Luis",
            ))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);

        let document = app.document().await;
        let card = document.list(ListRef::new(1, 10)).unwrap().card(5).unwrap();
        assert_eq!(card.title, "Renamed");
        assert_eq!(card.tag, "TASK", "blank tag keeps the current value");
        assert_eq!(card.status, "Done");
        assert_eq!(card.assignee, "Luis");
        assert_eq!(card.description, "");
    }

    #[tokio::test]
    async fn test_empty_date_clears_and_absent_date_keeps() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(form(
                "/editar-tarjeta",
                "cardId=5&boardId=1&listId=10&title=Existing&fecha_inicio=",
            ))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);

        let document = app.document().await;
        let card = document.list(ListRef::new(1, 10)).unwrap().card(5).unwrap();
        assert_eq!(card.start_date, "");
        assert_eq!(card.end_date, "2024-02-10");
    }

    #[tokio::test]
    async fn test_edit_scoped_by_list_is_silent_no_op() {
        let app = TestApp::new().await;
        let before = app.document().await;

        let response = app
            .router()
            .oneshot(form(
                "/editar-tarjeta",
                "cardId=5&boardId=1&listId=20&title=Wrong+list",
            ))
            .await
            .unwrap();
        assert_redirects_to_dashboard(&response);
        assert_eq!(app.document().await, before);
    }
}

mod move_card {
    use super::*;

    fn move_body(card: Value, from: (Value, Value), to: (Value, Value)) -> Value {
        json!({
            "cardId": card,
            "fromBoardId": from.0,
            "fromListId": from.1,
            "toBoardId": to.0,
            "toListId": to.1,
        })
    }

    #[tokio::test]
    async fn test_move_then_reload_shows_new_arrangement() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(json_post(
                "/mover-tarjeta",
                move_body(json!(5), (json!(1), json!(10)), (json!(1), json!(20))),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response.into_body()).await, json!({ "ok": true }));

        let document = app.document().await;
        assert!(card_ids(&document, ListRef::new(1, 10)).is_empty());
        assert_eq!(card_ids(&document, ListRef::new(1, 20)), vec![5]);
        assert_eq!(document.card_count(), 2);

        let html = body_text(
            app.router()
                .oneshot(get("/dashboard"))
                .await
                .unwrap()
                .into_body(),
        )
        .await;
        assert!(html.contains(r#"data-card-id="5" data-board-id="1" data-list-id="20""#));
    }

    #[tokio::test]
    async fn test_move_accepts_dataset_strings_across_boards() {
        let app = TestApp::new().await;
        let response = app
            .router()
            .oneshot(json_post(
                "/mover-tarjeta",
                move_body(json!("17"), (json!("2"), json!("30")), (json!("1"), json!("10"))),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let document = app.document().await;
        assert_eq!(card_ids(&document, ListRef::new(1, 10)), vec![5, 17]);
        assert!(card_ids(&document, ListRef::new(2, 30)).is_empty());
    }

    #[tokio::test]
    async fn test_move_failures_are_reported_and_not_saved() {
        let app = TestApp::new().await;
        let before = app.raw();

        let cases = [
            (
                move_body(json!(5), (json!(9), json!(10)), (json!(1), json!(20))),
                "Board not found",
            ),
            (
                move_body(json!(5), (json!(1), json!(10)), (json!(1), json!(99))),
                "List not found",
            ),
            (
                move_body(json!(17), (json!(1), json!(10)), (json!(1), json!(20))),
                "Card not found",
            ),
            (
                move_body(json!("x"), (json!(1), json!(10)), (json!(1), json!(20))),
                "Card not found",
            ),
        ];

        for (body, error) in cases {
            let response = app
                .router()
                .oneshot(json_post("/mover-tarjeta", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response.into_body()).await,
                json!({ "ok": false, "error": error })
            );
        }
        assert_eq!(app.raw(), before);
    }

    #[tokio::test]
    async fn test_same_list_move_goes_to_end() {
        let app = TestApp::new().await;
        app.router()
            .oneshot(form("/nueva-tarjeta", "boardId=1&listId=10&title=Second"))
            .await
            .unwrap();

        let response = app
            .router()
            .oneshot(json_post(
                "/mover-tarjeta",
                move_body(json!(5), (json!(1), json!(10)), (json!(1), json!(10))),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            card_ids(&app.document().await, ListRef::new(1, 10)),
            vec![18, 5]
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let app = TestApp::new().await;
        let request = Request::builder()
            .method("POST")
            .uri("/mover-tarjeta")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["ok"], false);
    }
}

