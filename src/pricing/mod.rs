pub mod bundle;
pub mod country;
pub mod currency;
pub mod display_name;

pub use bundle::{
    price_bundle, price_plan_options, CustomBundle, CustomBundleQuote, PlanOption, PricedBundle,
    PLAN_OPTIONS,
};
pub use country::{Country, CountryProfile, Product};
pub use currency::format_currency;
pub use display_name::display_name;
