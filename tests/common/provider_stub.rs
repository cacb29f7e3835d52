use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};

#[derive(Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: Value,
}

impl StubResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: json!({ "message": "stubbed failure" }),
        }
    }
}

/// In-process stand-in for the Football Data API. Responses are keyed by
/// competition id and can be swapped between sync runs.
pub struct ProviderStub {
    pub base_url: String,
    responses: Arc<Mutex<HashMap<i64, StubResponse>>>,
}

impl ProviderStub {
    pub fn set(&self, competition_id: i64, response: StubResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(competition_id, response);
    }
}

pub async fn spawn_provider_stub(initial: HashMap<i64, StubResponse>) -> ProviderStub {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let responses = Arc::new(Mutex::new(initial));
    let data = web::Data::from(responses.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/competitions/{id}/matches", web::get().to(serve_matches))
    })
    .listen(listener)
    .expect("Failed to start provider stub")
    .run();
    let _ = tokio::spawn(server);

    ProviderStub {
        base_url: format!("http://127.0.0.1:{}", port),
        responses,
    }
}

async fn serve_matches(
    path: web::Path<i64>,
    data: web::Data<Mutex<HashMap<i64, StubResponse>>>,
) -> HttpResponse {
    let stub = data.lock().unwrap().get(&path.into_inner()).cloned();
    match stub {
        Some(stub) => {
            HttpResponse::build(StatusCode::from_u16(stub.status).unwrap()).json(&stub.body)
        }
        // Competitions without fixtures respond with an empty window
        None => HttpResponse::Ok().json(json!({ "matches": [] })),
    }
}

pub fn arsenal_chelsea_raw() -> Value {
    json!({
        "id": 123456,
        "utcDate": "2024-01-15T15:30:00Z",
        "status": "FINISHED",
        "homeTeam": {"id": 674, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS"},
        "awayTeam": {"id": 3929, "name": "Chelsea FC", "shortName": "Chelsea", "tla": "CHE"},
        "score": {
            "winner": "HOME_TEAM",
            "duration": "REGULAR",
            "fullTime": {"home": 2, "away": 1},
            "halfTime": {"home": 1, "away": 0}
        },
        "competition": {"id": 2021, "name": "Premier League", "code": "PL"}
    })
}

pub fn merseyside_derby_raw() -> Value {
    json!({
        "id": 654321,
        "utcDate": "2024-01-16T20:00:00Z",
        "status": "FINISHED",
        "homeTeam": {"id": 64, "name": "Liverpool FC", "shortName": "Liverpool", "tla": "LIV"},
        "awayTeam": {"id": 62, "name": "Everton FC", "shortName": "Everton", "tla": "EVE"},
        "score": {
            "winner": "DRAW",
            "duration": "REGULAR",
            "fullTime": {"home": 1, "away": 1},
            "halfTime": {"home": 0, "away": 0}
        },
        "competition": {"id": 2021, "name": "Premier League", "code": "PL"}
    })
}
