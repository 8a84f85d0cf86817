use crate::errors::StoreError;
use crate::store::{Query, RemoteStore, Row, Table};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::debug;

/// Client for a PostgREST-style table API (`/rest/v1/<table>`).
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, StoreError> {
        let mut base_url = Url::parse(base_url).map_err(|err| StoreError::InvalidUrl(err.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            headers.insert(HeaderName::from_static("apikey"), HeaderValue::from_str(key)?);
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, table: Table) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!("rest/v1/{}", table.as_str()))
            .map_err(|err| StoreError::InvalidUrl(err.to_string()))
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
        let endpoint = self.endpoint(table)?;
        debug!(%table, ?query, "select");
        let response = self
            .http
            .get(endpoint)
            .query(&select_pairs(query))
            .send()
            .await?;
        let bytes = check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn insert(&self, table: Table, record: Row) -> Result<(), StoreError> {
        let endpoint = self.endpoint(table)?;
        debug!(%table, "insert");
        let response = self
            .http
            .post(endpoint)
            .header("prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update(&self, table: Table, fields: Row, id: i64) -> Result<(), StoreError> {
        let endpoint = self.endpoint(table)?;
        debug!(%table, id, "update");
        let response = self
            .http
            .patch(endpoint)
            .query(&id_pairs(id))
            .header("prefer", "return=minimal")
            .json(&fields)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, id: i64) -> Result<(), StoreError> {
        let endpoint = self.endpoint(table)?;
        debug!(%table, id, "delete");
        let response = self.http.delete(endpoint).query(&id_pairs(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message: rejection_message(&body),
    })
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<RestErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.trim().to_string())
}

fn select_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = vec![("select".to_string(), "*".to_string())];
    for filter in &query.filters {
        pairs.push((filter.column.clone(), format!("eq.{}", filter.value)));
    }
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    pairs
}

fn id_pairs(id: i64) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}
