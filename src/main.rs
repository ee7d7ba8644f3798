use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use wellness_eval::assessment::{bmi_narrative, body_fat_sentence};
use wellness_eval::cli::{parse_args, parse_item, Command, DiaryCommand};
use wellness_eval::config::AppConfig;
use wellness_eval::diary::{DailyTargets, DiaryEntry, DiaryState, DiaryStore, FoodCatalog};
use wellness_eval::export::{diary_workbook, evaluation_workbook, CsvBundleWriter, WorkbookWriter};
use wellness_eval::logging::init_logging;
use wellness_eval::pricing::bundle::daily_cost_note;
use wellness_eval::pricing::{format_currency, Country, Product};
use wellness_eval::recommendation::recommendation_notes;
use wellness_eval::session::{step_title, Session};

const CUSTOM_PROGRAM_TITLE: &str = "Custom program";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

async fn load_session(path: &Path, config: &AppConfig) -> Result<Session> {
    Session::load_with_default(path, config.default_country)
        .await
        .with_context(|| format!("Failed to load session '{}'", path.display()))
}

async fn save_session(session: &Session, path: &Path) -> Result<()> {
    session
        .save(path)
        .await
        .with_context(|| format!("Failed to save session '{}'", path.display()))
}

fn list_countries() {
    println!("{:<24} {:<7} {:<4} Sample", "Country", "Code", "Sym");
    for country in Country::ALL {
        let profile = country.profile();
        println!(
            "{:<24} {:<7} {:<4} {}",
            profile.name,
            profile.code,
            profile.currency_symbol,
            format_currency(1_234_567.0, profile.currency_symbol, profile.thousands_separator)
        );
    }
}

async fn new_session(path: &Path, name: &str, country: Option<&str>, config: &AppConfig) -> Result<()> {
    if fs::try_exists(path).await.unwrap_or(false) {
        bail!("Session file '{}' already exists", path.display());
    }
    let country = match country {
        Some(raw) => raw.parse::<Country>()?,
        None => config.default_country,
    };
    let mut session = Session::new(country);
    session.profile.name = name.trim().to_string();
    save_session(&session, path).await?;
    println!("Created session for {} ({}) at {}", session.profile.country, session.profile.country.code(), path.display());
    Ok(())
}

async fn assess(path: &Path, config: &AppConfig) -> Result<()> {
    let session = load_session(path, config).await?;
    let req = session.requirements(today());
    let profile = &session.profile;

    println!("Step {}: {}", session.step, step_title(session.step));
    println!("\n{}", bmi_narrative(req.bmi));
    println!("Classification: {}", req.bmi_tier.description());
    println!(
        "\n{}",
        body_fat_sentence(profile.gender, req.calendar_age, req.body_fat_range, profile.body_fat_pct)
    );
    println!("\nHydration: {} ml/day", req.hydration_ml);
    println!(
        "Protein: {} g/day (about {} g of chicken breast or {} eggs)",
        req.protein_g, req.protein_equivalents.chicken_breast_g, req.protein_equivalents.eggs
    );
    println!("Resting metabolism: {} kcal/day", req.bmr);
    println!("Calorie target: {} kcal/day", req.calorie_target);
    Ok(())
}

async fn plans(path: &Path, select: Option<&str>, config: &AppConfig) -> Result<()> {
    let mut session = load_session(path, config).await?;
    let profile = session.country_profile();
    let promo = session.promo(Utc::now());

    println!("{} ({})", profile.name, promo.render(Utc::now()));
    for offer in session.priced_offers() {
        println!("\n{}", offer.title);
        println!("  {}", offer.items_label(profile, &session.symptoms));
        println!("  {}", offer.price_line(profile));
        if let Some(note) = daily_cost_note(&offer, profile) {
            println!("  {}", note);
        }
        if let Some(warning) = offer.missing_warning() {
            println!("  {}", warning);
        }
    }

    let notes = recommendation_notes(&session.symptoms, session.profile.country);
    if !notes.is_empty() {
        println!("\nBased on what you shared:");
        for note in notes {
            println!("- {}", note);
        }
    }

    if let Some(title) = select {
        let chosen = session.select_plan_by_title(title)?;
        println!("\nSelected: {} for {}", chosen.title, profile.format(chosen.real_price as f64));
    }
    if let Some(chosen) = &session.chosen_plan {
        println!("\nCurrent selection: {} ({}% off)", chosen.title, chosen.discount_pct);
    }
    save_session(&session, path).await
}

async fn custom(path: &Path, items: &[String], select: bool, config: &AppConfig) -> Result<()> {
    let mut session = load_session(path, config).await?;
    let profile = session.country_profile();

    for raw in items {
        let (name, quantity) = parse_item(raw)
            .with_context(|| format!("Expected PRODUCT=QTY, got '{}'", raw))?;
        let product: Product = name.parse()?;
        let quantity: u32 = quantity
            .parse()
            .with_context(|| format!("Invalid quantity '{}' for {}", quantity, name))?;
        session.custom_bundle.set_quantity(product, quantity)?;
    }

    for product in profile.available_products() {
        let quantity = session.custom_bundle.quantity(product);
        if quantity > 0 {
            let unit = profile.price(product).unwrap_or(0.0);
            println!("{:<28} {:>3} x {}", product.canonical_name(), quantity, profile.format(unit));
        }
    }
    let quote = session.custom_bundle.quote(profile);
    println!("Items: {}", quote.total_items);
    if quote.surcharge > 0.0 {
        println!("Surcharge: {}", profile.format(quote.surcharge));
    }
    if quote.discount_pct > 0 {
        println!(
            "Total: ~~{}~~ {} (-{}%)",
            profile.format(quote.regular_price as f64),
            profile.format(quote.real_price as f64),
            quote.discount_pct
        );
    } else {
        println!("Total: {}", profile.format(quote.real_price as f64));
    }

    if select {
        if quote.total_items == 0 {
            bail!("Cannot select an empty custom program");
        }
        let bundle = session.custom_bundle.to_priced_bundle(CUSTOM_PROGRAM_TITLE, profile);
        session.select_plan(bundle);
        println!("Custom program selected");
    }
    save_session(&session, path).await
}

async fn export_evaluation(path: &Path, out: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let session = load_session(path, config).await?;
    let workbook = evaluation_workbook(&session, today());
    let out_dir = out.unwrap_or_else(|| config.export_dir.clone());
    let written = CsvBundleWriter
        .write(&workbook, &out_dir)
        .with_context(|| format!("Failed to export to '{}'", out_dir.display()))?;
    println!("Evaluation exported to {}", written.display());
    Ok(())
}

fn print_day(state: &DiaryState, date: NaiveDate) {
    let entries = state.entries_for(date);
    if entries.is_empty() {
        println!("No entries for {}", date);
    }
    for entry in &entries {
        println!(
            "{}  {:<28} x{:<4} {:>7.1} kcal {:>6.1} g protein {:>7.1} ml",
            entry.timestamp.format("%H:%M"),
            entry.name,
            entry.portions,
            entry.kcal,
            entry.protein_g,
            entry.hydration_ml
        );
    }

    let totals = state.totals_for(date);
    let targets = state.data.targets;
    let progress = targets.evaluate(&totals);
    println!("\nCalories:  {:.0} / {:.0} kcal ({})", totals.kcal, targets.kcal, progress.kcal.label());
    println!("Protein:   {:.1} / {:.0} g ({})", totals.protein_g, targets.protein_g, progress.protein_g.label());
    println!(
        "Hydration: {:.0} / {:.0} ml ({})",
        totals.hydration_ml,
        targets.hydration_ml,
        progress.hydration_ml.label()
    );
}

async fn diary(store: Option<PathBuf>, action: DiaryCommand, config: &AppConfig) -> Result<()> {
    let catalog = FoodCatalog::embedded().context("Failed to load the food catalog")?;

    if let DiaryCommand::Search { query } = &action {
        let hits = catalog.search(query);
        if hits.is_empty() {
            println!("No foods match '{}'", query);
        }
        for item in hits {
            println!(
                "{:<28} {:<24} {:>5} kcal {:>5.1} g protein {:>4} ml",
                item.name, item.portion, item.kcal, item.protein_g, item.hydration_ml
            );
        }
        return Ok(());
    }

    let store = DiaryStore::new(store.unwrap_or_else(|| config.diary_store.clone()));
    let today = today();
    let mut state = store
        .load(today, config.rollover)
        .await
        .with_context(|| format!("Failed to load diary '{}'", store.path().display()))?;

    match action {
        DiaryCommand::Add { food, portions, kcal, protein, hydration } => {
            let entry = match kcal {
                Some(kcal) => {
                    DiaryEntry::freeform_food(&food, kcal, protein, hydration, portions, now_local())?
                }
                None => {
                    let Some(item) = catalog.find(&food) else {
                        let suggestions: Vec<&str> =
                            catalog.search(&food).into_iter().take(5).map(|i| i.name.as_str()).collect();
                        bail!(
                            "'{}' is not in the catalog (similar: {}); pass --kcal to log it anyway",
                            food,
                            if suggestions.is_empty() { "none".to_string() } else { suggestions.join(", ") }
                        );
                    };
                    DiaryEntry::from_catalog(item, portions, now_local())?
                }
            };
            println!("Logged {} ({:.0} kcal)", entry.name, entry.kcal);
            state.add(entry);
        }
        DiaryCommand::Water { ml } => {
            state.add(DiaryEntry::water(ml, now_local())?);
            println!("Logged {} ml of water", ml);
        }
        DiaryCommand::Show => print_day(&state, today),
        DiaryCommand::Targets { session } => {
            let session = load_session(&session, config).await?;
            let targets = DailyTargets::from_requirements(&session.requirements(today));
            println!(
                "Targets set: {:.0} kcal, {:.0} g protein, {:.0} ml water",
                targets.kcal, targets.protein_g, targets.hydration_ml
            );
            state.data.targets = targets;
        }
        DiaryCommand::Export { out } => {
            let out_dir = out.unwrap_or_else(|| config.export_dir.clone());
            let written = CsvBundleWriter.write(&diary_workbook(&state, today), &out_dir)?;
            println!("Diary exported to {}", written.display());
        }
        DiaryCommand::Search { .. } => {}
    }

    store
        .save(&state)
        .await
        .with_context(|| format!("Failed to save diary '{}'", store.path().display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    init_logging(&config.log_level, config.log_format)?;
    info!(?config, "Configuration loaded");

    let cli_args = parse_args();
    match cli_args.command {
        Command::Countries => list_countries(),
        Command::New { session, name, country } => {
            new_session(&session, &name, country.as_deref(), &config).await?
        }
        Command::Assess { session } => assess(&session, &config).await?,
        Command::Plans { session, select } => plans(&session, select.as_deref(), &config).await?,
        Command::Custom { session, items, select } => custom(&session, &items, select, &config).await?,
        Command::Export { session, out } => export_evaluation(&session, out, &config).await?,
        Command::Diary { store, action } => diary(store, action, &config).await?,
    }

    Ok(())
}
