//! KAWA price export: page through the pricing collection, keep one
//! planet's entries and write them out as a ticker/price sheet.

use crate::adapters::KawaClient;
use crate::domain::model::{KawaPrice, PriceSheet};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{PrunError, Result};
use std::path::Path;

pub const DEFAULT_PLANET: &str = "Proxion";
pub const CSV_FILENAME: &str = "kawa_prices.csv";
pub const JSON_FILENAME: &str = "kawa_prices.json";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub planet: String,
    pub per_page: u32,
    pub output_path: String,
}

pub struct KawaPipeline<S: Storage> {
    client: KawaClient,
    storage: S,
    options: ExportOptions,
}

impl<S: Storage> KawaPipeline<S> {
    pub fn new(client: KawaClient, storage: S, options: ExportOptions) -> Self {
        Self {
            client,
            storage,
            options,
        }
    }
}

/// Entries whose planet equals `planet` exactly, in input order.
pub fn filter_planet(prices: Vec<KawaPrice>, planet: &str) -> Vec<KawaPrice> {
    prices.into_iter().filter(|p| p.planet == planet).collect()
}

pub fn to_csv(prices: &[KawaPrice]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["ticker", "price"])?;
    for price in prices {
        writer.write_record([price.ticker.as_str(), price.price.to_string().as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PrunError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| PrunError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for KawaPipeline<S> {
    async fn extract(&self) -> Result<Vec<KawaPrice>> {
        self.client.fetch_all_pages(self.options.per_page).await
    }

    async fn transform(&self, data: Vec<KawaPrice>) -> Result<PriceSheet> {
        let total = data.len();
        let prices = filter_planet(data, &self.options.planet);
        tracing::debug!(
            "🔍 {} of {} entries are on {}",
            prices.len(),
            total,
            self.options.planet
        );

        if prices.is_empty() {
            tracing::warn!("⚠️ No prices found for planet {}", self.options.planet);
        }

        Ok(PriceSheet {
            csv_output: to_csv(&prices)?,
            json_output: serde_json::to_string_pretty(&prices)?,
            prices,
        })
    }

    async fn load(&self, sheet: PriceSheet) -> Result<String> {
        self.storage
            .write_file(CSV_FILENAME, sheet.csv_output.as_bytes())
            .await?;
        self.storage
            .write_file(JSON_FILENAME, sheet.json_output.as_bytes())
            .await?;

        let csv_path = Path::new(&self.options.output_path).join(CSV_FILENAME);
        Ok(csv_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(ticker: &str, price: f64, planet: &str) -> KawaPrice {
        KawaPrice {
            ticker: ticker.to_string(),
            price,
            planet: planet.to_string(),
        }
    }

    #[test]
    fn test_filter_planet_is_exact_and_ordered() {
        let kept = filter_planet(
            vec![
                price("H2O", 30.0, "Proxion"),
                price("RAT", 95.0, "proxion"),
                price("DW", 60.0, "Proxion"),
            ],
            "Proxion",
        );
        let tickers: Vec<&str> = kept.iter().map(|p| p.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["H2O", "DW"]);
    }

    #[test]
    fn test_to_csv_has_header_and_rows() {
        let csv = to_csv(&[price("H2O", 30.5, "Proxion"), price("DW", 60.0, "Proxion")]).unwrap();
        assert_eq!(csv, "ticker,price\nH2O,30.5\nDW,60\n");
    }
}
