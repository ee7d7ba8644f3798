use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::catalog::FoodItem;
use crate::errors::{AppError, AppResult};
use crate::rounding::round_to_decimals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Food,
    Water,
}

/// One logged item. Nutrition values are totals for the logged portions,
/// computed when the entry is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub timestamp: NaiveDateTime,
    pub kind: EntryKind,
    pub name: String,
    pub portions: f64,
    pub kcal: f64,
    pub protein_g: f64,
    pub hydration_ml: f64,
}

fn positive(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::invalid_input(format!("{} must be positive, got {}", field, value)))
    }
}

fn non_negative(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::invalid_input(format!("{} cannot be negative, got {}", field, value)))
    }
}

impl DiaryEntry {
    /// Scales a catalog item by the number of portions eaten.
    pub fn from_catalog(item: &FoodItem, portions: f64, timestamp: NaiveDateTime) -> AppResult<Self> {
        let portions = positive("portions", portions)?;
        Ok(Self {
            timestamp,
            kind: EntryKind::Food,
            name: item.name.clone(),
            portions,
            kcal: round_to_decimals(item.kcal * portions, 1),
            protein_g: round_to_decimals(item.protein_g * portions, 1),
            hydration_ml: round_to_decimals(item.hydration_ml * portions, 1),
        })
    }

    /// Food that is not in the catalog. Values are per portion, as given by
    /// the user.
    pub fn freeform_food(
        name: &str,
        kcal: f64,
        protein_g: f64,
        hydration_ml: f64,
        portions: f64,
        timestamp: NaiveDateTime,
    ) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("food name cannot be empty"));
        }
        let portions = positive("portions", portions)?;
        Ok(Self {
            timestamp,
            kind: EntryKind::Food,
            name: name.to_string(),
            portions,
            kcal: round_to_decimals(non_negative("kcal", kcal)? * portions, 1),
            protein_g: round_to_decimals(non_negative("protein_g", protein_g)? * portions, 1),
            hydration_ml: round_to_decimals(non_negative("hydration_ml", hydration_ml)? * portions, 1),
        })
    }

    pub fn water(ml: f64, timestamp: NaiveDateTime) -> AppResult<Self> {
        Ok(Self {
            timestamp,
            kind: EntryKind::Water,
            name: "Water".to_string(),
            portions: 1.0,
            kcal: 0.0,
            protein_g: 0.0,
            hydration_ml: positive("water ml", ml)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_food(&self) -> bool {
        self.kind == EntryKind::Food
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn egg() -> FoodItem {
        FoodItem {
            name: "Egg".into(),
            portion: "1 large".into(),
            kcal: 78.0,
            protein_g: 6.3,
            hydration_ml: 37.0,
        }
    }

    #[test]
    fn test_from_catalog_scales_portions() -> AppResult<()> {
        let entry = DiaryEntry::from_catalog(&egg(), 2.0, noon())?;
        assert_eq!(entry.kind, EntryKind::Food);
        assert_eq!(entry.kcal, 156.0);
        assert_eq!(entry.protein_g, 12.6);
        assert_eq!(entry.hydration_ml, 74.0);
        assert_eq!(DiaryEntry::from_catalog(&egg(), 0.5, noon())?.kcal, 39.0);
        assert_eq!(entry.date(), noon().date());
        Ok(())
    }

    #[test]
    fn test_from_catalog_rejects_bad_portions() {
        assert!(DiaryEntry::from_catalog(&egg(), 0.0, noon()).is_err());
        assert!(DiaryEntry::from_catalog(&egg(), -1.0, noon()).is_err());
        assert!(DiaryEntry::from_catalog(&egg(), f64::NAN, noon()).is_err());
    }

    #[test]
    fn test_freeform_food() -> AppResult<()> {
        let entry = DiaryEntry::freeform_food("  Grandma's stew ", 450.0, 30.0, 200.0, 1.0, noon())?;
        assert_eq!(entry.name, "Grandma's stew");
        assert!(entry.is_food());
        assert!(DiaryEntry::freeform_food("", 1.0, 1.0, 1.0, 1.0, noon()).is_err());
        assert!(DiaryEntry::freeform_food("x", -1.0, 1.0, 1.0, 1.0, noon()).is_err());
        assert!(DiaryEntry::freeform_food("x", 1.0, 1.0, 1.0, 0.0, noon()).is_err());
        Ok(())
    }

    #[test]
    fn test_freeform_food_keeps_portions() -> AppResult<()> {
        let entry = DiaryEntry::freeform_food("Empanada", 300.0, 10.0, 40.0, 3.0, noon())?;
        assert_eq!(entry.portions, 3.0);
        assert_eq!(entry.kcal, 900.0);
        assert_eq!(entry.protein_g, 30.0);
        assert_eq!(entry.hydration_ml, 120.0);
        Ok(())
    }

    #[test]
    fn test_water_entry() -> AppResult<()> {
        let entry = DiaryEntry::water(250.0, noon())?;
        assert_eq!(entry.kind, EntryKind::Water);
        assert_eq!(entry.kcal, 0.0);
        assert_eq!(entry.hydration_ml, 250.0);
        assert!(DiaryEntry::water(0.0, noon()).is_err());
        Ok(())
    }
}
