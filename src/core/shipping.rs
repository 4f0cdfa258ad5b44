use crate::domain::model::{Fleet, FlightSegment, Ship};
use crate::domain::ports::{ApiKeyStore, FioSource};
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads a user's ships and flights, authenticating with the viewer's key.
#[derive(Clone)]
pub struct ShippingService {
    source: Arc<dyn FioSource>,
    keys: Arc<dyn ApiKeyStore>,
    default_api_key: Option<String>,
}

impl ShippingService {
    pub fn new(
        source: Arc<dyn FioSource>,
        keys: Arc<dyn ApiKeyStore>,
        default_api_key: Option<String>,
    ) -> Self {
        Self {
            source,
            keys,
            default_api_key: default_api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// The viewer's saved key, falling back to the server-wide key.
    pub fn resolve_api_key(&self, viewer: Option<&str>) -> Option<String> {
        viewer
            .and_then(|user| self.keys.api_key_for(user))
            .or_else(|| self.default_api_key.clone())
    }

    /// Ships, then flights. The first non-2xx answer aborts with its status.
    pub async fn load_fleet(&self, username: &str, viewer: Option<&str>) -> Result<Fleet> {
        let api_key = self.resolve_api_key(viewer);
        tracing::debug!(
            "🚀 Loading fleet of {} (viewer: {:?}, key: {})",
            username,
            viewer,
            if api_key.is_some() { "yes" } else { "none" }
        );

        let ships = self.source.ships(username, api_key.as_deref()).await?;
        let flights = self.source.flights(username, api_key.as_deref()).await?;

        tracing::info!(
            "🚀 {}: {} ships, {} flights",
            username,
            ships.len(),
            flights.len()
        );
        Ok(Fleet { ships, flights })
    }
}

pub fn ship_status(ship: &Ship) -> &'static str {
    match ship.flight_id.as_deref() {
        Some(id) if !id.is_empty() => "In Flight",
        _ => "Stationary",
    }
}

/// Percentage of the trip elapsed at `now_ms`, clamped to 0..=100.
pub fn flight_progress(departure_ms: i64, arrival_ms: i64, now_ms: i64) -> f64 {
    if arrival_ms <= departure_ms {
        return if now_ms >= arrival_ms { 100.0 } else { 0.0 };
    }
    // upstream epochs may be extreme, subtract in f64
    let elapsed = now_ms as f64 - departure_ms as f64;
    let total = arrival_ms as f64 - departure_ms as f64;
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}

pub fn segment_is_active(segment: &FlightSegment, now_ms: i64) -> bool {
    now_ms >= segment.departure_time_epoch_ms && now_ms <= segment.arrival_time_epoch_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticKeyStore;
    use crate::domain::model::{ExchangeQuote, Flight, Material};
    use crate::utils::error::PrunError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FleetSource {
        seen_keys: Mutex<Vec<Option<String>>>,
        ships_status: Option<u16>,
    }

    #[async_trait]
    impl FioSource for FleetSource {
        async fn all_materials(&self) -> Result<Vec<Material>> {
            Ok(Vec::new())
        }

        async fn materials_in_category(&self, _category: &str) -> Result<Vec<Material>> {
            Ok(Vec::new())
        }

        async fn all_exchanges(&self) -> Result<Vec<ExchangeQuote>> {
            Ok(Vec::new())
        }

        async fn ships(&self, username: &str, api_key: Option<&str>) -> Result<Vec<Ship>> {
            self.seen_keys.lock().unwrap().push(api_key.map(str::to_string));
            if let Some(status) = self.ships_status {
                return Err(PrunError::upstream(status, format!("/ship/ships/{}", username)));
            }
            Ok(Vec::new())
        }

        async fn flights(&self, _username: &str, api_key: Option<&str>) -> Result<Vec<Flight>> {
            self.seen_keys.lock().unwrap().push(api_key.map(str::to_string));
            Ok(Vec::new())
        }
    }

    fn keys() -> Arc<StaticKeyStore> {
        Arc::new(StaticKeyStore::new(HashMap::from([(
            "alice".to_string(),
            "alice-key".to_string(),
        )])))
    }

    fn segment(departure: i64, arrival: i64) -> FlightSegment {
        FlightSegment {
            origin_lines: Vec::new(),
            destination_lines: Vec::new(),
            segment_type: "TRANSIT".to_string(),
            departure_time_epoch_ms: departure,
            arrival_time_epoch_ms: arrival,
            stl_distance: None,
            stl_fuel_consumption: None,
            ftl_distance: None,
            ftl_fuel_consumption: None,
            origin: "A".to_string(),
            destination: "B".to_string(),
        }
    }

    #[test]
    fn test_flight_progress_interpolates_and_clamps() {
        assert_eq!(flight_progress(1_000, 3_000, 2_000), 50.0);
        assert_eq!(flight_progress(1_000, 3_000, 500), 0.0);
        assert_eq!(flight_progress(1_000, 3_000, 9_000), 100.0);
        assert_eq!(flight_progress(1_000, 1_000, 999), 0.0);
        assert_eq!(flight_progress(1_000, 1_000, 1_000), 100.0);
    }

    #[test]
    fn test_flight_progress_extreme_epochs_do_not_overflow() {
        assert_eq!(flight_progress(i64::MIN, 1_000, 2_000), 100.0);
        assert_eq!(flight_progress(0, i64::MAX, i64::MIN), 0.0);
        let halfway = flight_progress(i64::MIN, i64::MAX, 0);
        assert!((halfway - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_active_bounds_are_inclusive() {
        let leg = segment(100, 200);
        assert!(segment_is_active(&leg, 100));
        assert!(segment_is_active(&leg, 200));
        assert!(!segment_is_active(&leg, 201));
        assert!(!segment_is_active(&leg, 99));
    }

    #[tokio::test]
    async fn test_viewer_key_wins_over_default() {
        let source = Arc::new(FleetSource::default());
        let service = ShippingService::new(source.clone(), keys(), Some("server-key".to_string()));

        service.load_fleet("bob", Some("alice")).await.unwrap();
        service.load_fleet("bob", Some("mallory")).await.unwrap();

        let seen = source.seen_keys.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                Some("alice-key".to_string()),
                Some("alice-key".to_string()),
                Some("server-key".to_string()),
                Some("server-key".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_key_sends_no_authorization() {
        let source = Arc::new(FleetSource::default());
        let service = ShippingService::new(source.clone(), keys(), Some("  ".to_string()));

        service.load_fleet("bob", None).await.unwrap();

        assert_eq!(*source.seen_keys.lock().unwrap(), vec![None, None]);
    }

    #[tokio::test]
    async fn test_ships_failure_skips_flights() {
        let source = Arc::new(FleetSource {
            ships_status: Some(401),
            ..Default::default()
        });
        let service = ShippingService::new(source.clone(), keys(), None);

        let err = service.load_fleet("bob", None).await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(401));
        assert_eq!(source.seen_keys.lock().unwrap().len(), 1);
    }
}
