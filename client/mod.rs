use crate::*;

mod state;
pub use state::*;

/// Remote endpoint of the RPC boundary: typed JSON calls over HTTP.
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    /// Maps the server's status codes back into the shared [`Error`]:
    /// 404 becomes `NotFound` with the id the call named, 422 `Validation`.
    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        id: Option<i64>,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Error::NotFound(id),
            (StatusCode::UNPROCESSABLE_ENTITY, _) => Error::Validation(error_message(&body)),
            _ => Error::Rpc(format!("{status}: {body}")),
        })
    }
}

#[async_trait]
impl TodoRpc for RpcClient {
    async fn get_todos(&self) -> Result<Vec<Todo>> {
        let response = self.http.get(self.url("/todos")).send().await?;
        self.decode(response, None).await
    }

    async fn create_todo(&self, input: CreateTodo) -> Result<Todo> {
        let response = self
            .http
            .post(self.url("/todos"))
            .json(&input)
            .send()
            .await?;
        self.decode(response, None).await
    }

    async fn update_todo(&self, id: i64, patch: UpdateTodo) -> Result<Todo> {
        let response = self
            .http
            .patch(self.url(&format!("/todos/{id}")))
            .json(&patch)
            .send()
            .await?;
        self.decode(response, Some(id)).await
    }

    async fn toggle_todo(&self, id: i64) -> Result<Todo> {
        let response = self
            .http
            .post(self.url(&format!("/todos/{id}/toggle")))
            .send()
            .await?;
        self.decode(response, Some(id)).await
    }

    async fn delete_todo(&self, id: i64) -> Result<DeleteResult> {
        let response = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await?;
        self.decode(response, Some(id)).await
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}
