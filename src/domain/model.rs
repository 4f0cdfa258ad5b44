use serde::{Deserialize, Serialize};

/// A commodity record from `/material/*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Material {
    #[serde(rename = "MaterialID")]
    pub material_id: String,
    pub category_name: String,
    #[serde(rename = "CategoryID")]
    pub category_id: String,
    pub name: String,
    pub ticker: String,
    pub weight: f64,
    pub volume: f64,
    #[serde(default)]
    pub user_name_submitted: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Bid/ask figures for one material on one commodity exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExchangeQuote {
    pub material_ticker: String,
    pub exchange_code: String,
    #[serde(rename = "MMBuy", default)]
    pub mm_buy: Option<f64>,
    #[serde(rename = "MMSell", default)]
    pub mm_sell: Option<f64>,
    #[serde(default)]
    pub price_average: f64,
    #[serde(default)]
    pub ask_count: Option<i64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub supply: i64,
    #[serde(default)]
    pub bid_count: Option<i64>,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub demand: i64,
}

/// Material as displayed: names header-cased, joined with its quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRow {
    pub material: Material,
    pub exchange: Vec<ExchangeQuote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipRepairMaterial {
    pub ship_repair_material_id: String,
    pub material_name: String,
    pub material_id: String,
    pub material_ticker: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipAddressLine {
    pub line_type: String,
    pub line_id: String,
    pub natural_id: Option<String>,
    pub line_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ship {
    #[serde(default)]
    pub repair_materials: Vec<ShipRepairMaterial>,
    #[serde(default)]
    pub address_lines: Vec<ShipAddressLine>,
    pub ship_id: String,
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub stl_fuel_store_id: String,
    #[serde(default)]
    pub ftl_fuel_store_id: String,
    pub registration: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub commissioning_time_epoch_ms: i64,
    #[serde(default)]
    pub blueprint_natural_id: String,
    #[serde(default)]
    pub flight_id: Option<String>,
    #[serde(default)]
    pub acceleration: f64,
    #[serde(default)]
    pub thrust: f64,
    #[serde(default)]
    pub mass: f64,
    #[serde(default)]
    pub operating_empty_mass: f64,
    #[serde(default)]
    pub reactor_power: f64,
    #[serde(default)]
    pub emitter_power: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub condition: f64,
    #[serde(default)]
    pub last_repair_epoch_ms: Option<i64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub stl_fuel_flow_rate: f64,
    #[serde(default)]
    pub user_name_submitted: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightLine {
    #[serde(rename = "Type")]
    pub line_type: String,
    pub line_id: String,
    #[serde(default)]
    pub line_natural_id: Option<String>,
    #[serde(default)]
    pub line_name: Option<String>,
}

/// One timed leg of a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlightSegment {
    #[serde(default)]
    pub origin_lines: Vec<FlightLine>,
    #[serde(default)]
    pub destination_lines: Vec<FlightLine>,
    #[serde(rename = "Type")]
    pub segment_type: String,
    pub departure_time_epoch_ms: i64,
    pub arrival_time_epoch_ms: i64,
    #[serde(default)]
    pub stl_distance: Option<f64>,
    #[serde(default)]
    pub stl_fuel_consumption: Option<f64>,
    #[serde(default)]
    pub ftl_distance: Option<f64>,
    #[serde(default)]
    pub ftl_fuel_consumption: Option<f64>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Flight {
    #[serde(default)]
    pub segments: Vec<FlightSegment>,
    pub flight_id: String,
    pub ship_id: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub departure_time_epoch_ms: i64,
    pub arrival_time_epoch_ms: i64,
    #[serde(default)]
    pub current_segment_index: i64,
    #[serde(default)]
    pub stl_distance: f64,
    #[serde(default)]
    pub ftl_distance: f64,
    #[serde(default)]
    pub is_aborted: bool,
    #[serde(default)]
    pub username_submitted: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Ships and in-flight movements for one FIO user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fleet {
    pub ships: Vec<Ship>,
    pub flights: Vec<Flight>,
}

/// A community price entry from the KAWA pricing collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KawaPrice {
    pub ticker: String,
    pub price: f64,
    #[serde(default)]
    pub planet: String,
}

/// One page of a paginated record listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KawaPage {
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_items: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub items: Vec<KawaPrice>,
}

/// Filtered prices plus their serialized forms, ready to be written out.
#[derive(Debug, Clone)]
pub struct PriceSheet {
    pub prices: Vec<KawaPrice>,
    pub csv_output: String,
    pub json_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_nullable_fields() {
        let quote: ExchangeQuote = serde_json::from_value(serde_json::json!({
            "MaterialTicker": "RAT",
            "ExchangeCode": "NC1",
            "MMBuy": null,
            "MMSell": 120.0,
            "PriceAverage": 98.5,
            "AskCount": null,
            "Ask": null,
            "Supply": 1200,
            "BidCount": 40,
            "Bid": 95.0,
            "Demand": 800
        }))
        .unwrap();

        assert_eq!(quote.mm_buy, None);
        assert_eq!(quote.mm_sell, Some(120.0));
        assert_eq!(quote.ask, None);
        assert_eq!(quote.bid_count, Some(40));
    }

    #[test]
    fn test_flight_segment_type_field() {
        let segment: FlightSegment = serde_json::from_value(serde_json::json!({
            "OriginLines": [{"Type": "SYSTEM", "LineId": "x1", "LineNaturalId": "UV-351", "LineName": "Benten"}],
            "DestinationLines": [],
            "Type": "TAKE_OFF",
            "DepartureTimeEpochMs": 1000,
            "ArrivalTimeEpochMs": 2000,
            "StlDistance": null,
            "StlFuelConsumption": null,
            "FtlDistance": null,
            "FtlFuelConsumption": null,
            "Origin": "Benten (UV-351c)",
            "Destination": "Benten Orbit"
        }))
        .unwrap();

        assert_eq!(segment.segment_type, "TAKE_OFF");
        assert_eq!(segment.origin_lines[0].line_type, "SYSTEM");
        assert_eq!(segment.stl_distance, None);
    }

    #[test]
    fn test_kawa_page_ignores_extra_fields() {
        let page: KawaPage = serde_json::from_value(serde_json::json!({
            "page": 1,
            "perPage": 400,
            "totalItems": 1,
            "totalPages": 1,
            "items": [{"id": "abc", "ticker": "H2O", "price": 30.5, "planet": "Proxion", "updated": "x"}]
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].ticker, "H2O");
    }
}
