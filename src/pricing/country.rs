//! Country registry: currency, thousands separator and the product price list
//! for every market the evaluation is offered in.
//!
//! Prices are stored in each country's own currency units and are already the
//! final retail amounts; there is no exchange-rate conversion anywhere.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::errors::AppError;

/// Canonical product keys. The canonical name is what price tables are keyed
/// by; what the user sees may differ per country (see `display_name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Batido")]
    Batido,
    #[serde(rename = "Té de Hierbas")]
    HerbalTea,
    #[serde(rename = "Aloe Concentrado")]
    AloeConcentrate,
    #[serde(rename = "Beverage Mix")]
    BeverageMix,
    #[serde(rename = "Beta Heart")]
    BetaHeart,
    #[serde(rename = "Fibra Activa")]
    ActiveFiber,
    #[serde(rename = "Golden Beverage")]
    GoldenBeverage,
    #[serde(rename = "NRG")]
    Nrg,
    #[serde(rename = "Herbalifeline")]
    Herbalifeline,
    #[serde(rename = "PDM")]
    Pdm,
}

impl Product {
    pub const ALL: [Product; 10] = [
        Product::Batido,
        Product::HerbalTea,
        Product::AloeConcentrate,
        Product::BeverageMix,
        Product::BetaHeart,
        Product::ActiveFiber,
        Product::GoldenBeverage,
        Product::Nrg,
        Product::Herbalifeline,
        Product::Pdm,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Product::Batido => "Batido",
            Product::HerbalTea => "Té de Hierbas",
            Product::AloeConcentrate => "Aloe Concentrado",
            Product::BeverageMix => "Beverage Mix",
            Product::BetaHeart => "Beta Heart",
            Product::ActiveFiber => "Fibra Activa",
            Product::GoldenBeverage => "Golden Beverage",
            Product::Nrg => "NRG",
            Product::Herbalifeline => "Herbalifeline",
            Product::Pdm => "PDM",
        }
    }

    /// Case-insensitive lookup by canonical name.
    pub fn from_canonical_name(name: &str) -> Option<Product> {
        let wanted = name.trim().to_lowercase();
        Product::ALL
            .into_iter()
            .find(|p| p.canonical_name().to_lowercase() == wanted)
    }
}

impl FromStr for Product {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::from_canonical_name(s).ok_or_else(|| AppError::UnknownProduct(s.to_string()))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    #[default]
    Peru,
    Chile,
    Colombia,
    SpainPeninsula,
    SpainCanaries,
    Italy,
    Argentina,
    UnitedStates,
    Canada,
    Mexico,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryProfile {
    pub country: Country,
    /// Name as shown in the country picker; also the lookup key.
    pub name: &'static str,
    pub code: &'static str,
    pub currency_symbol: &'static str,
    pub thousands_separator: char,
    /// Flat amount added to every bundle price, if the market has one.
    pub bundle_surcharge: Option<f64>,
    prices: &'static [(Product, f64)],
    available_products: &'static [Product],
}

impl CountryProfile {
    pub fn price(&self, product: Product) -> Option<f64> {
        self.prices
            .iter()
            .find(|(p, _)| *p == product)
            .map(|(_, price)| *price)
    }

    pub fn is_available(&self, product: Product) -> bool {
        self.available_products.contains(&product)
    }

    /// Available products in catalog order.
    pub fn available_products(&self) -> impl Iterator<Item = Product> + '_ {
        Product::ALL.into_iter().filter(|p| self.is_available(*p))
    }

    pub fn format(&self, value: f64) -> String {
        super::currency::format_currency(value, self.currency_symbol, self.thousands_separator)
    }
}

const ALL_PRODUCTS: &[Product] = &Product::ALL;

const US_PRODUCTS: &[Product] = &[
    Product::Batido,
    Product::HerbalTea,
    Product::AloeConcentrate,
    Product::BeverageMix,
    Product::ActiveFiber,
    Product::GoldenBeverage,
    Product::Nrg,
    Product::Herbalifeline,
    Product::Pdm,
];

use Product::*;

static COUNTRIES: [CountryProfile; 10] = [
    CountryProfile {
        country: Country::Peru,
        name: "Perú",
        code: "PE",
        currency_symbol: "S/",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 184.0),
            (HerbalTea, 145.0),
            (AloeConcentrate, 180.0),
            (BeverageMix, 159.0),
            (BetaHeart, 231.0),
            (ActiveFiber, 168.0),
            (GoldenBeverage, 154.0),
            (Nrg, 112.0),
            (Herbalifeline, 180.0),
            (Pdm, 234.0),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::Chile,
        name: "Chile",
        code: "CL",
        currency_symbol: "$",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 40377.0),
            (BetaHeart, 48452.0),
            (Pdm, 51678.0),
            (BeverageMix, 34943.0),
            (HerbalTea, 32300.0),
            (AloeConcentrate, 42858.0),
            (ActiveFiber, 39503.0),
            (Herbalifeline, 44964.0),
            (Nrg, 25655.0),
            (GoldenBeverage, 44423.0),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::Colombia,
        name: "Colombia",
        code: "CO",
        currency_symbol: "$",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 155000.0),
            (HerbalTea, 119000.0),
            (AloeConcentrate, 157000.0),
            (BeverageMix, 132000.0),
            (BetaHeart, 176000.0),
            (ActiveFiber, 128000.0),
            (GoldenBeverage, 137000.0),
            (Nrg, 92000.0),
            (Herbalifeline, 162000.0),
            (Pdm, 194000.0),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::SpainPeninsula,
        name: "España (Península)",
        code: "ES-PEN",
        currency_symbol: "€",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 62.59),
            (HerbalTea, 40.71),
            (AloeConcentrate, 54.92),
            (BeverageMix, 51.72),
            (BetaHeart, 56.83),
            (ActiveFiber, 39.98),
            (GoldenBeverage, 82.77),
            (Nrg, 71.91),
            (Herbalifeline, 43.48),
            (Pdm, 72.14),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::SpainCanaries,
        name: "España (Canarias)",
        code: "ES-CAN",
        currency_symbol: "€",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 64.75),
            (HerbalTea, 46.38),
            (AloeConcentrate, 57.28),
            (BeverageMix, 55.17),
            (BetaHeart, 60.15),
            (ActiveFiber, 42.75),
            (GoldenBeverage, 84.38),
            (Nrg, 73.82),
            (Herbalifeline, 46.16),
            (Pdm, 72.14),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::Italy,
        name: "Italia",
        code: "IT",
        currency_symbol: "€",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 61.60),
            (HerbalTea, 41.11),
            (AloeConcentrate, 54.56),
            (BeverageMix, 48.41),
            (BetaHeart, 54.33),
            (ActiveFiber, 43.34),
            (GoldenBeverage, 40.84),
            (Nrg, 69.87),
            (Herbalifeline, 40.54),
            (Pdm, 72.69),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::Argentina,
        name: "Argentina",
        code: "AR",
        currency_symbol: "$",
        thousands_separator: '.',
        bundle_surcharge: None,
        prices: &[
            (Batido, 80.124),
            (HerbalTea, 60.756),
            (AloeConcentrate, 81.199),
            (BeverageMix, 83.412),
            (BetaHeart, 114.722),
            (ActiveFiber, 80.303),
            (GoldenBeverage, 68.287),
            (Nrg, 49.293),
            (Herbalifeline, 90.878),
            (Pdm, 133.342),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::UnitedStates,
        name: "Estados Unidos",
        code: "US",
        currency_symbol: "$",
        thousands_separator: ',',
        bundle_surcharge: None,
        prices: &[
            (Batido, 72.24),
            (HerbalTea, 46.28),
            (AloeConcentrate, 56.50),
            (BeverageMix, 47.88),
            (ActiveFiber, 52.30),
            (GoldenBeverage, 82.25),
            (Nrg, 38.71),
            (Herbalifeline, 57.94),
            (Pdm, 87.05),
        ],
        available_products: US_PRODUCTS,
    },
    CountryProfile {
        country: Country::Canada,
        name: "Canada",
        code: "CA",
        currency_symbol: "$",
        thousands_separator: ',',
        bundle_surcharge: Some(15.0),
        prices: &[
            (Batido, 71.20),
            (HerbalTea, 43.60),
            (AloeConcentrate, 54.25),
            (BeverageMix, 45.05),
            (BetaHeart, 49.90),
            (ActiveFiber, 49.90),
            (GoldenBeverage, 85.20),
            (Nrg, 34.80),
            (Herbalifeline, 55.90),
            (Pdm, 87.50),
        ],
        available_products: ALL_PRODUCTS,
    },
    CountryProfile {
        country: Country::Mexico,
        name: "Mexico",
        code: "MX",
        currency_symbol: "$",
        thousands_separator: ',',
        bundle_surcharge: None,
        prices: &[
            (Batido, 893.0),
            (HerbalTea, 487.0),
            (AloeConcentrate, 642.0),
            (BeverageMix, 228.0),
            (BetaHeart, 1350.0),
            (ActiveFiber, 736.0),
            (GoldenBeverage, 1271.0),
            (Nrg, 396.0),
            (Herbalifeline, 887.0),
            (Pdm, 1220.0),
        ],
        available_products: ALL_PRODUCTS,
    },
];

impl Country {
    pub const ALL: [Country; 10] = [
        Country::Peru,
        Country::Chile,
        Country::Colombia,
        Country::SpainPeninsula,
        Country::SpainCanaries,
        Country::Italy,
        Country::Argentina,
        Country::UnitedStates,
        Country::Canada,
        Country::Mexico,
    ];

    pub fn profile(&self) -> &'static CountryProfile {
        // COUNTRIES is declared in the same order as the enum.
        &COUNTRIES[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.profile().name
    }

    pub fn code(&self) -> &'static str {
        self.profile().code
    }

    /// Exact match on the picker name.
    pub fn from_name(name: &str) -> Option<Country> {
        Country::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn from_code(code: &str) -> Option<Country> {
        Country::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Resolves a picker name, falling back to `default` for anything unknown.
    pub fn from_name_or(name: &str, default: Country) -> Country {
        Country::from_name(name).unwrap_or_else(|| {
            warn!(country = %name, fallback = %default.name(), "Unknown country, using default");
            default
        })
    }
}

impl FromStr for Country {
    type Err = AppError;

    /// Accepts either the picker name or the country code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::from_name(s)
            .or_else(|| Country::from_code(s))
            .ok_or_else(|| AppError::UnknownCountryCode(s.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Country {
    /// Unknown names deserialize to the default country instead of failing.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw
            .parse()
            .unwrap_or_else(|_| Country::from_name_or(&raw, Country::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_matches_enum() {
        for country in Country::ALL {
            assert_eq!(country.profile().country, country);
        }
    }

    #[test]
    fn test_every_country_prices_its_available_products() {
        for country in Country::ALL {
            let profile = country.profile();
            for product in profile.available_products() {
                assert!(
                    profile.price(product).is_some(),
                    "{} has no price for {}",
                    profile.name,
                    product
                );
            }
        }
    }

    #[test]
    fn test_united_states_omits_beta_heart() {
        let us = Country::UnitedStates.profile();
        assert!(!us.is_available(Product::BetaHeart));
        assert_eq!(us.price(Product::BetaHeart), None);
        assert_eq!(us.available_products().count(), 9);
        assert_eq!(Country::Peru.profile().available_products().count(), 10);
    }

    #[test]
    fn test_lookup_by_name_and_code() {
        assert_eq!(Country::from_name("Canada"), Some(Country::Canada));
        assert_eq!(Country::from_name("canada"), None);
        assert_eq!(Country::from_code("es-can"), Some(Country::SpainCanaries));
        assert_eq!("MX".parse::<Country>().unwrap(), Country::Mexico);
        assert_eq!("España (Península)".parse::<Country>().unwrap(), Country::SpainPeninsula);
        assert!("Atlantis".parse::<Country>().is_err());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(Country::from_name_or("Atlantis", Country::Peru), Country::Peru);
        assert_eq!(Country::from_name_or("Chile", Country::Peru), Country::Chile);
    }

    #[test]
    fn test_only_canada_has_surcharge() {
        for country in Country::ALL {
            let expected = if country == Country::Canada { Some(15.0) } else { None };
            assert_eq!(country.profile().bundle_surcharge, expected);
        }
    }

    #[test]
    fn test_country_serde_uses_picker_name() {
        let json = serde_json::to_string(&Country::SpainPeninsula).unwrap();
        assert_eq!(json, "\"España (Península)\"");
        let back: Country = serde_json::from_str("\"Estados Unidos\"").unwrap();
        assert_eq!(back, Country::UnitedStates);
        let fallback: Country = serde_json::from_str("\"Narnia\"").unwrap();
        assert_eq!(fallback, Country::Peru);
    }

    #[test]
    fn test_product_names_round_trip() {
        assert_eq!("té de hierbas".parse::<Product>().unwrap(), Product::HerbalTea);
        assert_eq!(
            serde_json::to_string(&Product::ActiveFiber).unwrap(),
            "\"Fibra Activa\""
        );
        assert!(matches!("Kombucha".parse::<Product>(), Err(AppError::UnknownProduct(_))));
    }
}
