//! HTTP client for the hosted backend.
//!
//! Each entity exposes conventional CRUD calls: fetch-all-by-owner,
//! insert-one, partial update-by-id, delete-by-id, plus blob upload for
//! receipts. Reads retry a bounded number of times; writes are dispatched
//! exactly once (the backend has no idempotency tokens).

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use api_types::{
    category::{CategoryListResponse, CategoryNew, CategoryView},
    entry::{EntryListResponse, EntryNew, EntryUpdate, EntryView},
    event::{EventListResponse, EventNew, EventUpdate, EventView},
    receipt::ReceiptUploaded,
};

use crate::error::{AppError, Result};

const READ_RETRIES: u32 = 2;

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    /// GET with bounded retry. Only transport and 5xx failures retry; client
    /// errors return immediately.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let endpoint = self.endpoint(path)?;
        let mut attempt = 0u32;
        loop {
            let res = self
                .http
                .get(endpoint.clone())
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(ClientError::Transport);

            let outcome = match res {
                Ok(res) => decode(res).await,
                Err(err) => Err(err),
            };

            match outcome {
                Err(ClientError::Transport(_)) | Err(ClientError::Server(_))
                    if attempt < READ_RETRIES =>
                {
                    attempt += 1;
                    tracing::debug!(path, attempt, "retrying read after failure");
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                }
                outcome => return outcome,
            }
        }
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }

    async fn patch_json<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .patch(endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode_empty(res).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .delete(endpoint)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode_empty(res).await
    }

    pub async fn events_list(&self, sort_by_status: bool) -> ClientResult<Vec<EventView>> {
        let order = if sort_by_status {
            "status.desc"
        } else {
            "created_at.desc"
        };
        let res: EventListResponse = self.get_json(&format!("events?order={order}")).await?;
        Ok(res.events)
    }

    pub async fn event_get(&self, id: Uuid) -> ClientResult<EventView> {
        self.get_json(&format!("events/{id}")).await
    }

    pub async fn event_insert(&self, payload: &EventNew) -> ClientResult<EventView> {
        self.post_json("events", payload).await
    }

    pub async fn event_update(&self, id: Uuid, payload: &EventUpdate) -> ClientResult<()> {
        self.patch_json(&format!("events/{id}"), payload).await
    }

    pub async fn event_delete(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("events/{id}")).await
    }

    pub async fn categories_list(&self, event_id: Uuid) -> ClientResult<Vec<CategoryView>> {
        let res: CategoryListResponse = self
            .get_json(&format!("events/{event_id}/categories"))
            .await?;
        Ok(res.categories)
    }

    pub async fn category_insert(&self, payload: &CategoryNew) -> ClientResult<CategoryView> {
        self.post_json("categories", payload).await
    }

    pub async fn category_delete(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("categories/{id}")).await
    }

    /// The full entry set for one event; newest first by entry date.
    pub async fn entries_list(&self, event_id: Uuid) -> ClientResult<Vec<EntryView>> {
        let res: EntryListResponse = self
            .get_json(&format!("events/{event_id}/entries?order=entry_date.desc"))
            .await?;
        Ok(res.entries)
    }

    pub async fn entry_insert(&self, payload: &EntryNew) -> ClientResult<EntryView> {
        self.post_json("entries", payload).await
    }

    pub async fn entry_update(&self, id: Uuid, payload: &EntryUpdate) -> ClientResult<()> {
        self.patch_json(&format!("entries/{id}"), payload).await
    }

    pub async fn entry_delete(&self, id: Uuid) -> ClientResult<()> {
        self.delete(&format!("entries/{id}")).await
    }

    /// Uploads receipt bytes to blob storage under a caller-chosen path and
    /// returns the public URL.
    pub async fn upload_receipt(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<ReceiptUploaded> {
        let endpoint = self.endpoint(&format!("storage/receipts/{object_path}"))?;
        let res = self
            .http
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> ClientResult<T> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }
    Err(error_from_response(res).await)
}

async fn decode_empty(res: reqwest::Response) -> ClientResult<()> {
    if res.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(res).await)
}

async fn error_from_response(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::CONFLICT => ClientError::Conflict(body),
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

/// User-facing message for a failed call; the raw error goes to the log.
pub fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Not authorized. Check the API key.".to_string()
        }
        ClientError::NotFound => "Not found. It may have been deleted.".to_string(),
        ClientError::Conflict(message) => format!("Conflict: {message}"),
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Backend unreachable: {err}"),
    }
}
