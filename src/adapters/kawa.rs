use crate::adapters::{build_client, check_status, parse_base_url};
use crate::domain::model::{KawaPage, KawaPrice};
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_KAWA_ENDPOINT: &str =
    "https://kawapi.dizzy.zone/api/collections/kawa_pricing/records";
pub const DEFAULT_PER_PAGE: u32 = 400;

/// Client for the paginated KAWA pricing collection.
#[derive(Debug, Clone)]
pub struct KawaClient {
    client: Client,
    endpoint: Url,
}

impl KawaClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: parse_base_url("kawa.endpoint", endpoint)?,
        })
    }

    pub async fn fetch_page(&self, page: u32, per_page: u32) -> Result<KawaPage> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("perPage", &per_page.to_string());

        tracing::debug!("📡 Fetching page {}", page);
        let response = check_status(self.client.get(url).send().await?)?;
        let body: KawaPage = response.json().await?;
        tracing::debug!("📥 Fetched {} items", body.items.len());
        Ok(body)
    }

    /// Walks pages from 1 until `page >= totalPages`, concatenating items in order.
    pub async fn fetch_all_pages(&self, per_page: u32) -> Result<Vec<KawaPrice>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let body = self.fetch_page(page, per_page).await?;
            items.extend(body.items);

            if page >= body.total_pages {
                tracing::debug!("Reached the last page ({})", page);
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}
