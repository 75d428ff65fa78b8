#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::routing::RouterIntoService;
use frota_server::routes::create_routes;
use frota_server::services::auth::AuthService;
use frota_server::state::AppState;
use frota_server::store::credentials::CredentialStore;
use frota_server::store::vehicles::VehicleStore;
use frota_server::utils::auth::hash_password;
use tempfile::TempDir;

pub const USERNAME: &str = "user3";
pub const PASSWORD: &str = "password3";
pub const SECRET: &str = "integration-secret";

/// A router over a seeded store, with one user in a throwaway credentials file.
/// Keep `dir` alive for as long as the app is used.
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(VehicleStore::seeded())
    }

    pub fn with_store(vehicles: VehicleStore) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let credentials = CredentialStore::new(dir.path().join("credentials.txt"));
        credentials
            .append(USERNAME, &hash_password(PASSWORD).expect("hash"))
            .expect("seed user");

        let auth = AuthService::new(credentials, SECRET, chrono::Duration::minutes(30));
        let state = AppState::new(vehicles, auth);
        Self { dir, state }
    }

    pub fn service(&self) -> RouterIntoService<Body, ()> {
        create_routes(self.state.clone()).into_service()
    }

    pub fn token(&self) -> String {
        self.state.auth.issue_token(USERNAME).expect("token")
    }
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    let mut request = json_request(method, uri, body);
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {token}").parse().expect("header"),
    );
    request
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}
