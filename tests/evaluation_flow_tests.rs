use chrono::NaiveDate;
use wellness_eval::assessment::{basal_metabolic_rate, classify_bmi, compute_bmi, hydration_target_ml, BmiTier};
use wellness_eval::config::AppConfig;
use wellness_eval::export::{evaluation_workbook, CsvBundleWriter, WorkbookWriter};
use wellness_eval::pricing::bundle::regular_price;
use wellness_eval::pricing::{format_currency, Country, Product};
use wellness_eval::profile::{Gender, Goal, Referral, Symptom};
use wellness_eval::rounding::round_to_int;
use wellness_eval::session::Session;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn filled_session(country: Country) -> Session {
    let mut session = Session::new(country);
    session.profile.name = "Ana".to_string();
    session.profile.gender = Gender::Female;
    session.profile.birth_date = "1990-03-02".to_string();
    session.profile.weight_kg = 68.0;
    session.profile.height_cm = 162.0;
    session.profile.body_fat_pct = 31.0;
    session.profile.goals.insert(Goal::LoseWeight);
    session.profile.goals.insert(Goal::Energy);
    session.symptoms.set(Symptom::LowEnergy, true);
    session.symptoms.set(Symptom::JointPain, true);
    session
}

#[test]
fn test_reference_values() {
    assert_eq!(basal_metabolic_rate(Gender::Male, 70.0, 175.0, 30), 1649);
    assert_eq!(hydration_target_ml(70.0), 2500);
    assert_eq!(classify_bmi(18.6), BmiTier::Normal);
    assert_ne!(classify_bmi(18.5), BmiTier::Normal);
    assert_eq!(format_currency(1234567.0, "$", ','), "$1,234,567");
}

#[test]
fn test_canada_surcharge_before_discount() {
    let canada = Country::Canada.profile();
    let surcharge = canada.bundle_surcharge.unwrap_or(0.0);
    let real = round_to_int(100.0 + surcharge);
    assert_eq!(real, 115);
    assert_eq!(regular_price(real, 10), 128);
}

#[test]
fn test_full_evaluation_flow() -> anyhow::Result<()> {
    let mut session = filled_session(Country::Chile);

    let req = session.requirements(today());
    assert_eq!(req.age, 34);
    assert_eq!(req.bmi, compute_bmi(68.0, 162.0));
    assert_eq!(req.body_fat_range, (21.0, 32.9));
    // 680 + 1012.5 - 170 - 161 = 1361.5, ties to even
    assert_eq!(req.bmr, 1362);
    assert_eq!(req.calorie_target, 1200);

    let offers = session.priced_offers();
    let titles: Vec<&str> = offers.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Batido", "Batido + Te", "Batido + Chupapanza", "Batido + Té de Hierbas", "Batido + Collagen Drink"]
    );
    let collagen = &offers[4];
    assert_eq!(collagen.items, vec![Product::Batido, Product::GoldenBeverage]);
    for offer in &offers {
        let back = round_to_int(offer.regular_price as f64 * (1.0 - f64::from(offer.discount_pct) / 100.0));
        assert!((back - offer.real_price).abs() <= 1);
    }

    session.select_plan_by_title("Batido + Chupapanza")?;
    session.add_referral(Referral {
        name: "Carla".into(),
        phone: "+56 9 1234 5678".into(),
        district: "Providencia".into(),
        relationship: "Sister".into(),
    });

    let workbook = evaluation_workbook(&session, today());
    assert_eq!(workbook.stem, "Evaluation_CL_Ana");
    assert_eq!(
        workbook.sheet_names(),
        vec!["Profile", "Lifestyle", "Goals", "Composition", "Conditions", "Referrals", "Selection"]
    );

    let dir = tempfile::tempdir()?;
    let written = CsvBundleWriter.write(&workbook, dir.path())?;
    let selection = std::fs::read_to_string(written.join("07_Selection.csv"))?;
    assert!(selection.starts_with("Detail,Value\n"));
    assert!(selection.contains("Chosen program,Batido + Chupapanza"));
    assert!(selection.contains("Currency,$"));
    Ok(())
}

#[test]
fn test_unnamed_user_export_name() {
    let session = Session::new(Country::Mexico);
    let workbook = evaluation_workbook(&session, today());
    assert_eq!(workbook.stem, "Evaluation_MX_usuario");
    assert_eq!(workbook.sheets.len(), 5);
}

#[tokio::test]
async fn test_session_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let mut session = filled_session(Country::Canada);
    session.go_to(6);
    session.custom_bundle.set_quantity(Product::Nrg, 2)?;
    session.save(&path).await?;

    let mut loaded = Session::load(&path).await?;
    assert_eq!(loaded, session);
    assert_eq!(loaded.custom_bundle.quote(loaded.country_profile()).surcharge, 15.0);

    loaded.select_plan_by_title("Batido")?;
    loaded.save(&path).await?;
    let reloaded = Session::load(&path).await?;
    assert_eq!(reloaded.chosen_plan.map(|p| p.title), Some("Batido".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_unknown_country_falls_back_to_default() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    tokio::fs::write(&path, r#"{"profile": {"name": "Leo", "country": "Narnia"}}"#).await?;

    let session = Session::load(&path).await?;
    assert_eq!(session.profile.country, Country::Peru);
    assert_eq!(session.country_profile().currency_symbol, "S/");
    Ok(())
}

#[tokio::test]
async fn test_unknown_country_uses_configured_default() -> anyhow::Result<()> {
    let config = AppConfig::from_lookup(|key| {
        (key == "WELLNESS_DEFAULT_COUNTRY").then(|| "CA".to_string())
    });
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");
    tokio::fs::write(&path, r#"{"profile": {"name": "Leo", "country": "Narnia"}}"#).await?;

    let session = Session::load_with_default(&path, config.default_country).await?;
    assert_eq!(session.profile.country, Country::Canada);
    assert_eq!(session.country_profile().code, "CA");
    Ok(())
}
