use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wellness evaluation and meal diary", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported countries with their currency format
    Countries,

    /// Create an empty evaluation session file
    New {
        #[arg(short, long)]
        session: PathBuf,
        /// User name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Country name or code (defaults to WELLNESS_DEFAULT_COUNTRY)
        #[arg(short, long)]
        country: Option<String>,
    },

    /// Show body composition metrics and daily requirements
    Assess {
        #[arg(short, long)]
        session: PathBuf,
    },

    /// Show priced plans and symptom bundles
    Plans {
        #[arg(short, long)]
        session: PathBuf,
        /// Store the plan with this title as the chosen one
        #[arg(long)]
        select: Option<String>,
    },

    /// Price a build-your-own program
    Custom {
        #[arg(short, long)]
        session: PathBuf,
        /// PRODUCT=QTY, repeatable (quantity 0-10)
        #[arg(short, long = "item", value_name = "PRODUCT=QTY")]
        items: Vec<String>,
        /// Store the custom program as the chosen plan
        #[arg(long)]
        select: bool,
    },

    /// Write the evaluation workbook
    Export {
        #[arg(short, long)]
        session: PathBuf,
        /// Output directory (defaults to WELLNESS_EXPORT_DIR)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Meal diary operations
    Diary {
        /// Diary store (defaults to WELLNESS_DIARY_STORE)
        #[arg(long, global = true)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        action: DiaryCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommand {
    /// Log food, from the catalog or with explicit values
    Add {
        /// Catalog item name, or a free-form name when --kcal is given
        food: String,
        #[arg(short, long, default_value_t = 1.0)]
        portions: f64,
        /// kcal per portion; logs a free-form entry
        #[arg(long)]
        kcal: Option<f64>,
        /// Protein (g) per portion for free-form entries
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        hydration: f64,
    },
    /// Log water in ml
    Water { ml: f64 },
    /// Show today's entries and progress
    Show,
    /// Set daily targets from an evaluation session
    Targets {
        #[arg(short, long)]
        session: PathBuf,
    },
    /// Write today's diary workbook
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Search the food catalog
    Search { query: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Splits `PRODUCT=QTY`.
pub fn parse_item(raw: &str) -> Option<(&str, &str)> {
    let (product, quantity) = raw.split_once('=')?;
    let product = product.trim();
    let quantity = quantity.trim();
    if product.is_empty() || quantity.is_empty() {
        return None;
    }
    Some((product, quantity))
}
