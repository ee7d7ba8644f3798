pub mod assessment;
pub mod cli;
pub mod config;
pub mod diary;
pub mod errors;
pub mod export;
pub mod logging;
pub mod pricing;
pub mod profile;
pub mod promo;
pub mod recommendation;
pub mod rounding;
pub mod session;
