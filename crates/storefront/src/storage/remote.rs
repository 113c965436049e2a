//! Client for the realtime database that mirrors the catalog.
//!
//! The database speaks the Firebase REST dialect:
//!
//! ```text
//! GET   {root}/{collection}.json[?auth=token]   read the list (array, object, or null)
//! PUT   {root}/{collection}.json[?auth=token]   replace the list
//! PATCH {root}/.json[?auth=token]               {collection: list}, recreates the collection
//! ```

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tomtech_core::Product;
use tomtech_core::catalog::ProductRecord;

use crate::config::RemoteConfig;

/// Errors from the realtime database.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The collection does not exist (HTTP 404 on write).
    #[error("remote collection not found")]
    NotFound,

    /// Transport failure, including timeouts.
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status other than 404.
    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not a list of product records.
    #[error("remote payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// Could not build a request URL.
    #[error("invalid remote url: {0}")]
    Url(#[from] url::ParseError),
}

/// HTTP client bound to one collection of one database.
#[derive(Debug, Clone)]
pub struct RealtimeDatabase {
    client: Client,
    root: Url,
    collection: String,
    auth_token: Option<SecretString>,
}

impl RealtimeDatabase {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tomtech-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            root: config.database_url.clone(),
            collection: config.collection.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// The collection this client reads and writes.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Read the raw product records.
    ///
    /// Array payloads are taken in order (null holes skipped), object
    /// payloads contribute their values, and `null` is an empty list.
    /// Records are returned undecoded so they can be merged with the
    /// defaults first.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::Http`] on network failure or timeout.
    /// - [`RemoteError::Status`] on a non-2xx response.
    /// - [`RemoteError::Decode`] if the body is not a list of JSON objects.
    pub async fn fetch(&self) -> Result<Vec<ProductRecord>, RemoteError> {
        let url = self.endpoint(&format!("{}.json", self.collection))?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let records = decode_records(serde_json::from_str(&body)?)?;
        tracing::debug!(
            collection = %self.collection,
            count = records.len(),
            "fetched remote catalog"
        );
        Ok(records)
    }

    /// Replace the product list.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::NotFound`] if the database answers 404.
    /// - [`RemoteError::Status`] on any other non-2xx response.
    /// - [`RemoteError::Http`] on network failure or timeout.
    pub async fn replace(&self, products: &[Product]) -> Result<(), RemoteError> {
        let url = self.endpoint(&format!("{}.json", self.collection))?;
        let response = self.client.put(url).json(products).send().await?;
        Self::check_write(response).await
    }

    /// Create the collection at the database root with `products` as its
    /// contents.
    ///
    /// # Errors
    ///
    /// Same as [`RealtimeDatabase::replace`].
    pub async fn recreate(&self, products: &[Product]) -> Result<(), RemoteError> {
        let url = self.endpoint(".json")?;
        let mut payload = serde_json::Map::new();
        payload.insert(self.collection.clone(), serde_json::to_value(products)?);
        let response = self
            .client
            .patch(url)
            .json(&Value::Object(payload))
            .send()
            .await?;
        Self::check_write(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        let mut url = self.root.join(path)?;
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret());
        }
        Ok(url)
    }

    async fn check_write(response: reqwest::Response) -> Result<(), RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn decode_records(payload: Value) -> Result<Vec<ProductRecord>, serde_json::Error> {
    let records: Vec<Value> = match payload {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, record)| record).collect(),
        other => vec![other],
    };

    records
        .into_iter()
        .filter(|record| !record.is_null())
        .map(serde_json::from_value)
        .collect()
}
