use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

// Expected column headers
const NAME_COL: &str = "name";
const PORTION_COL: &str = "portion";
const KCAL_COL: &str = "kcal";
const PROTEIN_COL: &str = "protein_g";
const HYDRATION_COL: &str = "hydration_ml";

const EMBEDDED_CATALOG: &str = include_str!("../../data/food_catalog.csv");

/// Nutrition facts for one reference portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub portion: String,
    pub kcal: f64,
    pub protein_g: f64,
    pub hydration_ml: f64,
}

fn parse_amount(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    items: Vec<FoodItem>,
}

impl FoodCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> AppResult<Self> {
        Self::from_reader(EMBEDDED_CATALOG.as_bytes())
    }

    pub fn from_path(csv_path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(csv_path)?;
        Self::from_reader(file)
    }

    /// Reads a catalog CSV. Rows with an empty name are skipped; unparseable
    /// amounts count as zero.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| AppError::Catalog(format!("Column '{}' not found", name)))
        };
        let name_idx = column(NAME_COL)?;
        let portion_idx = column(PORTION_COL)?;
        let kcal_idx = column(KCAL_COL)?;
        let protein_idx = column(PROTEIN_COL)?;
        let hydration_idx = column(HYDRATION_COL)?;

        let mut items = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result?;
            let name = record.get(name_idx).unwrap_or_default().to_string();
            if name.is_empty() {
                debug!(row = row_index, "Skipping catalog row without a name");
                continue;
            }

            let amount = |idx: usize| {
                let raw = record.get(idx).unwrap_or_default();
                parse_amount(raw).unwrap_or_else(|| {
                    warn!(food = %name, value = %raw, "Invalid amount in catalog, using 0");
                    0.0
                })
            };
            items.push(FoodItem {
                portion: record.get(portion_idx).unwrap_or_default().to_string(),
                kcal: amount(kcal_idx),
                protein_g: amount(protein_idx),
                hydration_ml: amount(hydration_idx),
                name,
            });
        }

        if items.is_empty() {
            return Err(AppError::Catalog("No food items loaded".to_string()));
        }
        debug!(items = items.len(), "Loaded food catalog");
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    /// Exact, case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&FoodItem> {
        let name = name.trim();
        self.items.iter().find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Items whose name contains `query`, case-insensitively. An empty query
    /// matches nothing.
    pub fn search(&self, query: &str) -> Vec<&FoodItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .collect()
    }
}
