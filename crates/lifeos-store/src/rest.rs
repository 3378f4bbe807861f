use crate::{DataStore, Error, Query, Result, StoreConfig};
use async_trait::async_trait;
use lifeos_core::Row;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

/// PostgREST-style data API reached over HTTPS under `/rest/v1/<table>`.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .header("prefer", "return=representation")
    }

    async fn read_rows(response: Response) -> Result<Vec<Row>> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Store {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(row) => Ok(row),
                    other => Err(Error::Other(anyhow::anyhow!(
                        "store returned a non-object row: {}",
                        other
                    ))),
                })
                .collect(),
            Value::Object(row) => Ok(vec![row]),
            other => Err(Error::Other(anyhow::anyhow!(
                "unexpected store response: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn insert(&self, table: &str, row: &Row) -> Result<Vec<Row>> {
        tracing::debug!("POST {} ({} columns)", table, row.len());

        let response = self.request(Method::POST, table).json(row).send().await?;
        Self::read_rows(response).await
    }

    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>> {
        let params = query.to_params();
        tracing::debug!("GET {} {:?}", table, params);

        let response = self.request(Method::GET, table).query(&params).send().await?;
        Self::read_rows(response).await
    }
}
