//! Shared fixtures for integration tests
//!
//! An in-process school API on a random local port, plus a presenter that
//! answers prompts from a script and records everything it was shown.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use school_client::presenter::{
    ConfirmationPrompt, FailureDetails, Presenter, ResultReport, ResultResponse, UserDecision,
};
use school_client::{ApiClient, ClientConfig};

/// Requests received by the mock API, as "METHOD /path"
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

#[derive(Clone)]
struct MockState {
    log: RequestLog,
    students: Arc<Mutex<HashMap<i64, Value>>>,
}

pub struct MockApi {
    pub addr: SocketAddr,
    pub log: RequestLog,
}

impl MockApi {
    /// Start the mock API. Deletion answers depend on the student id:
    /// 1 → 200, 9 → 204, 2 → 400 with a message, 6 → 500, 7 → 418, anything else → 404.
    pub async fn start() -> Self {
        let log = RequestLog::default();
        let mut students = HashMap::new();
        students.insert(1, json!({"id": 1, "name": "Ana Souza", "registration": "2024-001"}));
        students.insert(2, json!({"id": 2, "name": "Bruno Lima", "class_id": 3}));

        let state = MockState {
            log: log.clone(),
            students: Arc::new(Mutex::new(students)),
        };

        let app = Router::new()
            .route("/api/students", get(list_students).post(create_student))
            .route(
                "/api/students/:id",
                delete(delete_student).get(get_student).put(update_student),
            )
            .fallback(unmatched)
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind TCP listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock API failed");
        });

        Self { addr, log }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        client_for(&self.base_url())
    }
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig::from_values(Some(base_url), Some("5")).unwrap();
    ApiClient::new(&config).unwrap()
}

/// A local address nothing is listening on
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

async fn unmatched(method: Method, uri: Uri, State(state): State<MockState>) -> StatusCode {
    state.log.push(format!("{} {}", method, uri.path()));
    StatusCode::NOT_FOUND
}

async fn list_students(State(state): State<MockState>) -> Json<Vec<Value>> {
    state.log.push("GET /api/students".to_string());
    let students = state.students.lock().unwrap();
    let mut all: Vec<Value> = students.values().cloned().collect();
    all.sort_by_key(|v| v["id"].as_i64());
    Json(all)
}

async fn get_student(Path(id): Path<i64>, State(state): State<MockState>) -> Response {
    state.log.push(format!("GET /api/students/{}", id));
    match state.students.lock().unwrap().get(&id) {
        Some(student) => Json(student.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "not found"}))).into_response(),
    }
}

async fn create_student(State(state): State<MockState>, Json(mut body): Json<Value>) -> Response {
    state.log.push("POST /api/students".to_string());
    let mut students = state.students.lock().unwrap();
    let id = students.keys().max().copied().unwrap_or(0) + 1;
    body["id"] = json!(id);
    students.insert(id, body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_student(
    Path(id): Path<i64>,
    State(state): State<MockState>,
    Json(mut body): Json<Value>,
) -> Response {
    state.log.push(format!("PUT /api/students/{}", id));
    body["id"] = json!(id);
    state.students.lock().unwrap().insert(id, body.clone());
    Json(body).into_response()
}

async fn delete_student(Path(id): Path<i64>, State(state): State<MockState>) -> Response {
    state.log.push(format!("DELETE /api/students/{}", id));
    match id {
        1 => {
            state.students.lock().unwrap().remove(&id);
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        9 => StatusCode::NO_CONTENT.into_response(),
        2 => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "has dependent grades"})),
        )
            .into_response(),
        6 => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "update or delete violates foreign key constraint"})),
        )
            .into_response(),
        7 => (
            StatusCode::IM_A_TEAPOT,
            Json(json!({"error": "student is locked"})),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "not found"}))).into_response(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Prompt(ConfirmationPrompt),
    Result(ResultReport),
    Details(FailureDetails),
}

pub struct ScriptedPresenter {
    decision: UserDecision,
    response: ResultResponse,
    shown: Mutex<Vec<Shown>>,
}

impl ScriptedPresenter {
    pub fn new(decision: UserDecision, response: ResultResponse) -> Self {
        Self {
            decision,
            response,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn confirming() -> Self {
        Self::new(UserDecision::Confirm, ResultResponse::Acknowledged)
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    pub fn last_result(&self) -> Option<ResultReport> {
        self.shown().into_iter().rev().find_map(|s| match s {
            Shown::Result(r) => Some(r),
            _ => None,
        })
    }

    pub fn details(&self) -> Option<FailureDetails> {
        self.shown().into_iter().find_map(|s| match s {
            Shown::Details(d) => Some(d),
            _ => None,
        })
    }
}

#[async_trait]
impl Presenter for ScriptedPresenter {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> UserDecision {
        self.shown.lock().unwrap().push(Shown::Prompt(prompt.clone()));
        self.decision
    }

    async fn show_result(&self, report: &ResultReport) -> ResultResponse {
        self.shown.lock().unwrap().push(Shown::Result(report.clone()));
        self.response
    }

    async fn show_details(&self, details: &FailureDetails) {
        self.shown.lock().unwrap().push(Shown::Details(details.clone()));
    }
}
