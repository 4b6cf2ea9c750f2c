//! REST client for the Supabase table API (PostgREST).
//!
//! Wraps the handful of PostgREST calls the storefront needs (filtered
//! selects, upserts, deletes) using [`reqwest`].

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Path under the project URL where PostgREST is mounted.
const REST_PATH: &str = "/rest/v1";

/// `Prefer` header for upserts that return the stored rows.
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

/// `Prefer` header for writes that return nothing.
const PREFER_MINIMAL: &str = "return=minimal";

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Anon or service-role key sent as `apikey` and bearer token.
    pub api_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Errors from the PostgREST layer.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// PostgREST returned a non-2xx status code.
    #[error("Supabase API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the JSON shape we asked for.
    #[error("Failed to decode Supabase response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single `column=op.value` PostgREST filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    expr: String,
}

impl Filter {
    /// `column = value`.
    pub fn eq(column: impl Into<String>, value: impl AsRef<str>) -> Self {
        Self {
            column: column.into(),
            expr: format!("eq.{}", value.as_ref()),
        }
    }

    fn as_pair(&self) -> (&str, &str) {
        (&self.column, &self.expr)
    }
}

/// HTTP client for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    /// Create a client with its own connection pool.
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    /// `GET /rest/v1/{table}?select=*&...filters`, optionally ordered.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&str>,
    ) -> Result<Vec<T>, SupabaseError> {
        let mut query: Vec<(&str, &str)> = vec![("select", "*")];
        query.extend(filters.iter().map(Filter::as_pair));
        if let Some(order) = order {
            query.push(("order", order));
        }

        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /rest/v1/{table}` with merge-duplicates, returning stored rows.
    ///
    /// `rows` may be a single object or an array; PostgREST answers with an
    /// array either way.
    pub async fn upsert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        rows: &B,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", PREFER_UPSERT)
            .json(rows)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `DELETE /rest/v1/{table}?...filters`.
    ///
    /// Matching zero rows is a success.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), SupabaseError> {
        let query: Vec<(&str, &str)> = filters.iter().map(Filter::as_pair).collect();

        let response = self
            .authorized(self.client.delete(self.table_url(table)))
            .header("Prefer", PREFER_MINIMAL)
            .query(&query)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn table_url(&self, table: &str) -> String {
        format!("{}{REST_PATH}/{table}", self.config.url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SupabaseError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SupabaseError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Supabase request rejected");
            return Err(SupabaseError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// Reads the body as bytes first so a shape mismatch surfaces as
    /// [`SupabaseError::Decode`] rather than a transport error.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SupabaseError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), SupabaseError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
