use crate::core::table::{CellValue, Column, TableRow};
use crate::core::text::{category_from_slug, to_header_case};
use crate::domain::model::{ExchangeQuote, Material, MaterialRow};
use crate::domain::ports::FioSource;
use crate::utils::error::Result;
use std::sync::Arc;

/// Material category display names, in button order.
pub const CATEGORIES: [&str; 32] = [
    "Agricultural Products",
    "Alloys",
    "Chemicals",
    "Construction Materials",
    "Construction Parts",
    "Construction Prefabs",
    "Consumables Basic",
    "Consumables Luxury",
    "Drones",
    "Electronic Devices",
    "Electronic Parts",
    "Electronic Pieces",
    "Electronic Systems",
    "Elements",
    "Energy Systems",
    "Fuels",
    "Gases",
    "Liquids",
    "Medical Equipment",
    "Metals",
    "Minerals",
    "Plastics",
    "Ship Engines",
    "Ship Kits",
    "Ship Parts",
    "Ship Shields",
    "Software Components",
    "Software Systems",
    "Software Tools",
    "Textiles",
    "Unit Prefabs",
    "Utility",
];

pub const MATERIAL_COLUMNS: [Column; 2] = [
    Column::data("CategoryName", "Category"),
    Column::data("Name", "Material"),
];

pub const EXCHANGE_COLUMNS: [Column; 4] = [
    Column::data("CategoryName", "Category"),
    Column::data("Ticker", "Ticker"),
    Column::data("Name", "Material"),
    Column::display("exchange", "Exchange"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    /// Path form: `all` or a `+`-joined category name.
    pub fn from_path_segment(segment: &str) -> Self {
        let name = category_from_slug(segment.trim());
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(name)
        }
    }

    /// Query form: a missing or blank `category` means all.
    pub fn from_query(category: Option<&str>) -> Self {
        match category.map(str::trim) {
            Some(name) if !name.is_empty() => CategoryFilter::Named(name.to_string()),
            _ => CategoryFilter::All,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, display_name: &str) -> bool {
        match self {
            CategoryFilter::All => false,
            CategoryFilter::Named(name) => name.eq_ignore_ascii_case(display_name),
        }
    }
}

impl TableRow for MaterialRow {
    fn cell(&self, column: &str) -> CellValue {
        let material = &self.material;
        match column {
            "CategoryName" => CellValue::Text(material.category_name.clone()),
            "Name" => CellValue::Text(material.name.clone()),
            "Ticker" => CellValue::Text(material.ticker.clone()),
            "Weight" => CellValue::Number(material.weight),
            "Volume" => CellValue::Number(material.volume),
            _ => CellValue::Empty,
        }
    }
}

/// Loads the material catalogue and exchange board from FIO.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn FioSource>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn FioSource>) -> Self {
        Self { source }
    }

    async fn fetch_materials(&self, filter: &CategoryFilter) -> Result<Vec<Material>> {
        match filter {
            CategoryFilter::All => self.source.all_materials().await,
            CategoryFilter::Named(name) => self.source.materials_in_category(name).await,
        }
    }

    /// Header-cased materials without exchange data.
    pub async fn load_materials(&self, filter: &CategoryFilter) -> Result<Vec<MaterialRow>> {
        let materials = self.fetch_materials(filter).await?;
        tracing::debug!("📦 Loaded {} materials ({:?})", materials.len(), filter);

        Ok(materials
            .into_iter()
            .map(|material| MaterialRow {
                material: display_material(material),
                exchange: Vec::new(),
            })
            .collect())
    }

    /// Materials first, then the full exchange board, joined on ticker.
    pub async fn load_materials_with_exchange(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<MaterialRow>> {
        let materials = self.fetch_materials(filter).await?;
        let quotes = self.source.all_exchanges().await?;
        tracing::debug!(
            "📦 Loaded {} materials and {} quotes ({:?})",
            materials.len(),
            quotes.len(),
            filter
        );

        Ok(join_quotes(materials, &quotes))
    }
}

pub fn join_quotes(materials: Vec<Material>, quotes: &[ExchangeQuote]) -> Vec<MaterialRow> {
    materials
        .into_iter()
        .map(|material| {
            let exchange = quotes
                .iter()
                .filter(|q| q.material_ticker == material.ticker)
                .cloned()
                .collect();
            MaterialRow {
                material: display_material(material),
                exchange,
            }
        })
        .collect()
}

fn display_material(mut material: Material) -> Material {
    material.category_name = to_header_case(&material.category_name);
    material.name = to_header_case(&material.name);
    material
}
