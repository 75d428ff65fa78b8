use anyhow::{Context, Result, anyhow};
use frota_server::models::user::TokenResponse;
use frota_server::models::vehicle::Vehicle;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Thin HTTP client for the vehicle API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let request = self
            .http
            .post(self.url(&["token"])?)
            .json(&json!({ "username": username, "password": password }));

        let response: TokenResponse = self.send(request).await?;
        Ok(response.access_token)
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let request = self.authed(self.http.get(self.url(&["veiculos"])?))?;
        self.send(request).await
    }

    pub async fn get(&self, nome: &str) -> Result<Vehicle> {
        let request = self.authed(self.http.get(self.url(&["veiculos", nome])?))?;
        self.send(request).await
    }

    /// `status` goes over the wire as typed; the server decides if it's valid.
    pub async fn create(&self, nome: &str, modelo: &str, status: &str) -> Result<Vehicle> {
        let request = self.authed(
            self.http
                .post(self.url(&["veiculos"])?)
                .json(&json!({ "nome": nome, "modelo": modelo, "status": status })),
        )?;
        self.send(request).await
    }

    pub async fn set_status(&self, nome: &str, status: &str) -> Result<Vehicle> {
        let request = self.authed(
            self.http
                .put(self.url(&["veiculos", nome])?)
                .json(&json!({ "status": status })),
        )?;
        self.send(request).await
    }

    pub async fn delete(&self, nome: &str) -> Result<Vehicle> {
        let request = self.authed(self.http.delete(self.url(&["veiculos", nome])?))?;
        self.send(request).await
    }

    /// Joins path segments onto the base URL, percent-encoding each one, so a
    /// vehicle called "Fiat 147" or "a/b" still hits `/veiculos/{nome}`.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL cannot have a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authed(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("Not logged in. Run `frota login` first."))?;
        Ok(request.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.context("Could not reach the API")?;
        let status = response.status();
        let text = response.text().await?;
        log::debug!("API responded {}: {}", status, text);

        if !status.is_success() {
            return Err(anyhow!("Request failed ({}): {}", status, error_detail(&text)));
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Server returned unexpected JSON: {}", text))
    }
}

/// Pulls the human-readable message out of an error body.
///
/// Most errors are `{"detail": "..."}`. Anything else (proxies, HTML error
/// pages) is shown raw.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match json.get("detail").and_then(|d| d.as_str()) {
            Some(detail) => detail.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
