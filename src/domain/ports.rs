use crate::domain::model::{ExchangeQuote, Flight, KawaPrice, Material, PriceSheet, Ship};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read access to the FIO REST API.
///
/// Every call is a single GET; a non-2xx answer surfaces as
/// [`PrunError::UpstreamStatus`](crate::utils::error::PrunError::UpstreamStatus).
#[async_trait]
pub trait FioSource: Send + Sync {
    async fn all_materials(&self) -> Result<Vec<Material>>;
    async fn materials_in_category(&self, category: &str) -> Result<Vec<Material>>;
    async fn all_exchanges(&self) -> Result<Vec<ExchangeQuote>>;
    async fn ships(&self, username: &str, api_key: Option<&str>) -> Result<Vec<Ship>>;
    async fn flights(&self, username: &str, api_key: Option<&str>) -> Result<Vec<Flight>>;
}

/// Maps a dashboard user to the FIO API key they saved.
pub trait ApiKeyStore: Send + Sync {
    fn api_key_for(&self, user: &str) -> Option<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<KawaPrice>>;
    async fn transform(&self, data: Vec<KawaPrice>) -> Result<PriceSheet>;
    async fn load(&self, sheet: PriceSheet) -> Result<String>;
}
