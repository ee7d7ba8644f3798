//! Bundle pricing.
//!
//! A bundle's real price is the sum of its canonical prices plus the
//! country's flat surcharge (if any). The "regular" price shown struck
//! through is derived from the real price by inverting the discount, so
//! `regular * (1 - discount/100)` lands back on the real price. The surcharge
//! is always added before that inversion, for plan cards and custom bundles
//! alike.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::country::{CountryProfile, Product};
use super::display_name::display_name;
use crate::errors::{AppError, AppResult};
use crate::profile::SymptomFlags;
use crate::rounding::{round_to_decimals, round_to_int};

/// This plan is exempt from the per-bundle surcharge.
pub const SURCHARGE_EXEMPT_TITLE: &str = "Batido + Chupapanza";

pub const MAX_CUSTOM_QUANTITY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedBundle {
    pub title: String,
    pub items: Vec<Product>,
    pub discount_pct: u8,
    /// What the customer pays.
    pub real_price: i64,
    /// Pre-discount price shown struck through; equals `real_price` when there
    /// is no discount.
    pub regular_price: i64,
    pub surcharge: f64,
    /// Items with no entry in the price table; excluded from the sum.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Product>,
}

impl PricedBundle {
    pub fn has_discount(&self) -> bool {
        self.discount_pct > 0
    }

    /// "Batido + Té de Hierbas" with each item localized for the country.
    pub fn items_label(&self, profile: &CountryProfile, flags: &SymptomFlags) -> String {
        self.items
            .iter()
            .map(|item| display_name(*item, profile.country, flags))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Text rendering of the price block, e.g. `~~S/200~~ S/190 (-5%)`.
    pub fn price_line(&self, profile: &CountryProfile) -> String {
        if self.has_discount() {
            format!(
                "~~{}~~ {} (-{}%)",
                profile.format(self.regular_price as f64),
                profile.format(self.real_price as f64),
                self.discount_pct
            )
        } else {
            profile.format(self.real_price as f64)
        }
    }

    /// Inline warning listing products whose price is not configured.
    pub fn missing_warning(&self) -> Option<String> {
        if self.missing.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.missing.iter().map(|p| p.canonical_name()).collect();
        Some(format!("Price not configured: {}", names.join(", ")))
    }
}

/// Sums canonical prices, collecting the products the table does not know.
pub fn sum_prices(items: &[Product], profile: &CountryProfile) -> (f64, Vec<Product>) {
    let mut total = 0.0;
    let mut missing = Vec::new();
    for item in items {
        match profile.price(*item) {
            Some(price) => total += price,
            None => missing.push(*item),
        }
    }
    (total, missing)
}

/// `round(real / (1 - discount/100))`, or `real` when there is no discount.
pub fn regular_price(real_price: i64, discount_pct: u8) -> i64 {
    if discount_pct == 0 || discount_pct >= 100 {
        return real_price;
    }
    round_to_int(real_price as f64 / (1.0 - f64::from(discount_pct) / 100.0))
}

/// Prices a named bundle for the given country.
///
/// Returns `None` when the country does not sell one of the items, so the
/// caller can skip the card entirely.
pub fn price_bundle(
    title: &str,
    items: &[Product],
    discount_pct: u8,
    profile: &CountryProfile,
) -> Option<PricedBundle> {
    if let Some(unavailable) = items.iter().find(|item| !profile.is_available(**item)) {
        debug!(bundle = %title, product = %unavailable, country = %profile.code, "Bundle skipped, product not sold here");
        return None;
    }

    let (total, missing) = sum_prices(items, profile);
    if !missing.is_empty() {
        warn!(bundle = %title, missing = ?missing, "Bundle has products without a price");
    }

    let surcharge = match profile.bundle_surcharge {
        Some(amount) if title.trim() != SURCHARGE_EXEMPT_TITLE => amount,
        _ => 0.0,
    };

    let real_price = round_to_int(total + surcharge);
    Some(PricedBundle {
        title: title.to_string(),
        items: items.to_vec(),
        discount_pct,
        real_price,
        regular_price: regular_price(real_price, discount_pct),
        surcharge,
        missing,
    })
}

/// One of the fixed programs offered on the plan screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOption {
    pub title: &'static str,
    pub items: &'static [Product],
    pub discount_pct: u8,
}

pub const PLAN_OPTIONS: [PlanOption; 3] = [
    PlanOption {
        title: "Batido",
        items: &[Product::Batido],
        discount_pct: 5,
    },
    PlanOption {
        title: "Batido + Te",
        items: &[Product::Batido, Product::HerbalTea],
        discount_pct: 10,
    },
    PlanOption {
        title: SURCHARGE_EXEMPT_TITLE,
        items: &[
            Product::Batido,
            Product::HerbalTea,
            Product::ActiveFiber,
            Product::AloeConcentrate,
        ],
        discount_pct: 10,
    },
];

/// Prices every fixed plan the country can sell, in display order.
pub fn price_plan_options(profile: &CountryProfile) -> Vec<PricedBundle> {
    PLAN_OPTIONS
        .iter()
        .filter_map(|plan| price_bundle(plan.title, plan.items, plan.discount_pct, profile))
        .collect()
}

/// "Per day" cost hint shown under the 5% single-shake plan.
///
/// Some markets use a fixed marketing figure, others divide the real price by
/// the number of servings (22 in Europe, 30 in the US). Canada never shows it.
pub fn daily_cost_note(bundle: &PricedBundle, profile: &CountryProfile) -> Option<String> {
    let is_single_shake = bundle.title.trim().eq_ignore_ascii_case("batido")
        || bundle.title.trim().eq_ignore_ascii_case("batido nutricional");
    if !is_single_shake || bundle.discount_pct != 5 || profile.bundle_surcharge.is_some() {
        return None;
    }

    let per_day = match profile.code {
        "PE" => "S/7.9".to_string(),
        "CL" => "$1.744".to_string(),
        "CO" => "$6.693".to_string(),
        "ES-PEN" | "ES-CAN" | "IT" => {
            format!("€{:.2}", round_to_decimals(bundle.real_price as f64 / 22.0, 2))
        }
        "US" => format!("${:.2}", round_to_decimals(bundle.real_price as f64 / 30.0, 2)),
        _ => return None,
    };
    Some(format!("({} per day)", per_day))
}

/// Discount tier for a build-your-own program: nothing for an empty cart,
/// 5% for a single item, 10% from two items up.
pub fn custom_discount_pct(total_items: u32) -> u8 {
    match total_items {
        0 => 0,
        1 => 5,
        _ => 10,
    }
}

/// Build-your-own program: a quantity (0-10) per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBundle {
    quantities: BTreeMap<Product, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBundleQuote {
    pub total_items: u32,
    pub base_total: f64,
    pub surcharge: f64,
    pub discount_pct: u8,
    pub real_price: i64,
    pub regular_price: i64,
}

impl CustomBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(&mut self, product: Product, quantity: u32) -> AppResult<()> {
        if quantity > MAX_CUSTOM_QUANTITY {
            return Err(AppError::QuantityOutOfRange {
                product: product.canonical_name().to_string(),
                quantity,
                max: MAX_CUSTOM_QUANTITY,
            });
        }
        if quantity == 0 {
            self.quantities.remove(&product);
        } else {
            self.quantities.insert(product, quantity);
        }
        Ok(())
    }

    pub fn quantity(&self, product: Product) -> u32 {
        self.quantities.get(&product).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.quantities.values().sum()
    }

    /// Prices the cart. Products the country does not sell, or that have no
    /// price, contribute nothing.
    pub fn quote(&self, profile: &CountryProfile) -> CustomBundleQuote {
        let mut total_items = 0;
        let mut base_total = 0.0;
        for (product, quantity) in &self.quantities {
            if !profile.is_available(*product) {
                warn!(product = %product, country = %profile.code, "Ignoring product not sold in this country");
                continue;
            }
            total_items += quantity;
            base_total += f64::from(*quantity) * profile.price(*product).unwrap_or(0.0);
        }

        let discount_pct = custom_discount_pct(total_items);
        let surcharge = match profile.bundle_surcharge {
            Some(amount) if total_items > 0 => amount,
            _ => 0.0,
        };
        let real_price = round_to_int(base_total + surcharge);

        CustomBundleQuote {
            total_items,
            base_total,
            surcharge,
            discount_pct,
            real_price,
            regular_price: regular_price(real_price, discount_pct),
        }
    }

    /// Converts the cart into a selectable bundle (items repeated by quantity).
    pub fn to_priced_bundle(&self, title: &str, profile: &CountryProfile) -> PricedBundle {
        let quote = self.quote(profile);
        let items = self
            .quantities
            .iter()
            .filter(|(product, _)| profile.is_available(**product))
            .flat_map(|(product, quantity)| std::iter::repeat(*product).take(*quantity as usize))
            .collect();
        PricedBundle {
            title: title.to_string(),
            items,
            discount_pct: quote.discount_pct,
            real_price: quote.real_price,
            regular_price: quote.regular_price,
            surcharge: quote.surcharge,
            missing: Vec::new(),
        }
    }
}
