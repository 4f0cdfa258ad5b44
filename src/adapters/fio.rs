use crate::adapters::{build_client, check_status, join_segments, parse_base_url};
use crate::domain::model::{ExchangeQuote, Flight, Material, Ship};
use crate::domain::ports::FioSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FIO_BASE_URL: &str = "https://rest.fnar.net";

/// HTTP client for the FIO REST API.
#[derive(Debug, Clone)]
pub struct FioClient {
    client: Client,
    base_url: Url,
}

impl FioClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url("fio.base_url", base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        api_key: Option<&str>,
    ) -> Result<T> {
        let url = join_segments(&self.base_url, segments);
        tracing::debug!("📡 GET {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = api_key {
            // FIO expects the bare key, no scheme prefix
            request = request.header(AUTHORIZATION, key);
        }

        let response = check_status(request.send().await?)?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl FioSource for FioClient {
    async fn all_materials(&self) -> Result<Vec<Material>> {
        self.get_json(&["material", "allmaterials"], None).await
    }

    async fn materials_in_category(&self, category: &str) -> Result<Vec<Material>> {
        self.get_json(&["material", "category", category], None).await
    }

    async fn all_exchanges(&self) -> Result<Vec<ExchangeQuote>> {
        self.get_json(&["exchange", "all"], None).await
    }

    async fn ships(&self, username: &str, api_key: Option<&str>) -> Result<Vec<Ship>> {
        self.get_json(&["ship", "ships", username], api_key).await
    }

    async fn flights(&self, username: &str, api_key: Option<&str>) -> Result<Vec<Flight>> {
        self.get_json(&["ship", "flights", username], api_key).await
    }
}
