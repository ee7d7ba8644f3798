//! Maps the conditions reported at step 3 to "Batido + X" bundles.

use serde::{Deserialize, Serialize};

use crate::pricing::bundle::{custom_discount_pct, price_bundle, PricedBundle};
use crate::pricing::{display_name, Country, CountryProfile, Product};
use crate::profile::{Symptom, SymptomFlags};

/// Hemorrhoids keep a fixed title whatever the local name of the aloe.
const HEMORRHOIDS_TITLE: &str = "Batido + Aloe";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedBundle {
    pub symptom: Symptom,
    pub title: String,
    pub items: [Product; 2],
}

/// Product paired with the shake for each condition.
pub fn remedy_for(symptom: Symptom) -> Product {
    match symptom {
        Symptom::Constipation => Product::ActiveFiber,
        Symptom::HighCholesterol => Product::Herbalifeline,
        Symptom::LowEnergy => Product::HerbalTea,
        Symptom::MusclePain => Product::BeverageMix,
        Symptom::Gastritis => Product::AloeConcentrate,
        Symptom::Hemorrhoids => Product::AloeConcentrate,
        Symptom::Hypertension => Product::ActiveFiber,
        Symptom::JointPain => Product::GoldenBeverage,
        Symptom::EatingAnxiety => Product::Pdm,
        Symptom::Migraines => Product::Nrg,
        Symptom::DiabetesFamilyHistory => Product::ActiveFiber,
    }
}

/// One bundle per active flag, in priority order. Bundles are not
/// deduplicated: two flags sharing a remedy produce two entries.
pub fn recommend_bundles(flags: &SymptomFlags, country: Country) -> Vec<RecommendedBundle> {
    flags
        .iter()
        .map(|symptom| {
            let remedy = remedy_for(symptom);
            let title = match symptom {
                Symptom::Hemorrhoids => HEMORRHOIDS_TITLE.to_string(),
                _ => format!(
                    "{} + {}",
                    Product::Batido.canonical_name(),
                    display_name(remedy, country, flags)
                ),
            };
            RecommendedBundle {
                symptom,
                title,
                items: [Product::Batido, remedy],
            }
        })
        .collect()
}

/// Prices each recommendation with the build-your-own tiers; bundles the
/// country cannot sell are dropped.
pub fn price_recommendations(
    bundles: &[RecommendedBundle],
    profile: &CountryProfile,
) -> Vec<PricedBundle> {
    bundles
        .iter()
        .filter_map(|bundle| {
            let discount = custom_discount_pct(bundle.items.len() as u32);
            price_bundle(&bundle.title, &bundle.items, discount, profile)
        })
        .collect()
}

/// Short advisory line for one condition, with local product names.
pub fn recommendation_note(symptom: Symptom, country: Country, flags: &SymptomFlags) -> String {
    let name = |product: Product| display_name(product, country, flags);
    match symptom {
        Symptom::Constipation => format!(
            "For constipation and healthy digestion, the apple-flavoured {} helps keep you regular.",
            name(Product::ActiveFiber)
        ),
        Symptom::HighCholesterol => format!(
            "To improve your cholesterol levels we rely on {}, omega 3 concentrate capsules.",
            Product::Herbalifeline.canonical_name()
        ),
        Symptom::LowEnergy => format!(
            "The thermogenic {} raises your energy and burns a few extra calories a day. \
             Combine it with {} for body and mind.",
            name(Product::HerbalTea),
            name(Product::Nrg)
        ),
        Symptom::MusclePain => format!(
            "Muscle pain calls for good protein intake; {} adds 9 to 18 g a day depending on your needs.",
            name(Product::Pdm)
        ),
        Symptom::Gastritis => format!(
            "For gastritis and reflux, {} soothes the digestive tract and improves nutrient absorption.",
            name(Product::AloeConcentrate)
        ),
        Symptom::Hemorrhoids => format!(
            "For hemorrhoids, gastritis and reflux, {} soothes the digestive tract and improves nutrient absorption.",
            name(Product::AloeConcentrate)
        ),
        Symptom::Hypertension => format!(
            "For hypertension I recommend {}, a high-fiber drink that helps control the lipid profile.",
            name(Product::ActiveFiber)
        ),
        Symptom::JointPain => format!(
            "For joint pain there is {}, ideal for keeping cartilage healthy.",
            name(Product::GoldenBeverage)
        ),
        Symptom::EatingAnxiety => format!(
            "Eating anxiety is a sign of low daily protein. {} and {} add 15 to 18 g a day and help control cravings.",
            name(Product::Pdm),
            name(Product::BeverageMix)
        ),
        Symptom::Migraines => format!(
            "For headaches and migraines, {} has the right dose of natural caffeine and keeps you focused.",
            name(Product::Nrg)
        ),
        Symptom::DiabetesFamilyHistory => format!(
            "With a family history of diabetes we recommend {}, a high-fiber drink that lowers the glycemic index of your meals.",
            name(Product::ActiveFiber)
        ),
    }
}

/// Notes for every active flag, in priority order.
pub fn recommendation_notes(flags: &SymptomFlags, country: Country) -> Vec<String> {
    flags
        .iter()
        .map(|symptom| recommendation_note(symptom, country, flags))
        .collect()
}
