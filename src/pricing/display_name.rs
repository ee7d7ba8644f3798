//! Per-country product naming.
//!
//! Some markets sell the same canonical product under another name. This is
//! presentation only: price tables are always keyed by the canonical
//! [`Product`], so call this after all pricing is done.

use super::country::{Country, Product};
use crate::profile::{Symptom, SymptomFlags};

/// Name to show for `product` in `country`, given the active symptom flags.
pub fn display_name(product: Product, country: Country, flags: &SymptomFlags) -> &'static str {
    match (country, product) {
        (Country::Canada, Product::GoldenBeverage) => "Collagen Beauty Drink",
        (Country::Canada, Product::Nrg) => "LiftOff",
        (Country::Canada, Product::BetaHeart) => "Fibra Activa",

        (Country::SpainPeninsula | Country::SpainCanaries | Country::Italy, Product::Nrg) => {
            "High Protein Iced Coffee"
        }
        (Country::SpainPeninsula | Country::SpainCanaries | Country::Italy, Product::BeverageMix) => {
            "PPP"
        }
        (Country::SpainPeninsula | Country::SpainCanaries, Product::GoldenBeverage) => {
            "Collagen Booster"
        }
        (Country::Italy, Product::GoldenBeverage) => "Herbalifeline",

        // The joint-pain remedy is renamed only when that condition was reported.
        (Country::Chile | Country::UnitedStates, Product::GoldenBeverage)
            if flags.is_set(Symptom::JointPain) =>
        {
            "Collagen Drink"
        }

        (Country::Mexico, Product::GoldenBeverage) => "Collagen Beauty Drink",

        _ => product.canonical_name(),
    }
}
