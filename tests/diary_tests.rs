use chrono::NaiveDate;
use wellness_eval::diary::{
    daily_totals, DailyTargets, DailyTotals, DiaryEntry, DiaryStore, FoodCatalog, ProgressStatus,
    RolloverPolicy,
};
use wellness_eval::export::{diary_workbook, CsvBundleWriter, WorkbookWriter};
use wellness_eval::pricing::Country;
use wellness_eval::profile::Gender;
use wellness_eval::session::Session;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[test]
fn test_empty_day_totals_are_zero() {
    assert_eq!(daily_totals(Vec::<&DiaryEntry>::new()), DailyTotals::default());
}

#[tokio::test]
async fn test_logging_a_day_against_session_targets() -> anyhow::Result<()> {
    let catalog = FoodCatalog::embedded()?;
    let dir = tempfile::tempdir()?;
    let store = DiaryStore::new(dir.path().join("diary.json"));

    let mut session = Session::new(Country::Peru);
    session.profile.gender = Gender::Male;
    session.profile.weight_kg = 70.0;
    session.profile.height_cm = 175.0;
    session.profile.birth_date = "1994-01-10".into();

    let mut state = store.load(day(15), RolloverPolicy::Archive).await?;
    state.data.targets = DailyTargets::from_requirements(&session.requirements(day(15)));
    assert_eq!(state.data.targets.hydration_ml, 2500.0);
    assert_eq!(state.data.targets.protein_g, 112.0);

    let breakfast = day(15).and_hms_opt(8, 0, 0).unwrap();
    let lunch = day(15).and_hms_opt(13, 0, 0).unwrap();
    state.add(DiaryEntry::from_catalog(catalog.find("Scrambled eggs").unwrap(), 1.0, breakfast)?);
    state.add(DiaryEntry::from_catalog(catalog.find("chicken breast").unwrap(), 2.0, lunch)?);
    state.add(DiaryEntry::water(2000.0, lunch)?);
    store.save(&state).await?;

    let state = store.load(day(15), RolloverPolicy::Archive).await?;
    let totals = state.totals_for(day(15));
    assert_eq!(totals.kcal, 182.0 + 330.0);
    assert!((totals.protein_g - 74.2).abs() < 1e-9);
    assert_eq!(totals.hydration_ml, 86.0 + 130.0 + 2000.0);

    let progress = state.data.targets.evaluate(&totals);
    assert_eq!(progress.kcal, ProgressStatus::Passed);
    assert_eq!(progress.protein_g, ProgressStatus::Failed);
    assert_eq!(progress.hydration_ml, ProgressStatus::Failed);

    let workbook = diary_workbook(&state, day(15));
    let written = CsvBundleWriter.write(&workbook, dir.path())?;
    let diary_csv = std::fs::read_to_string(written.join("01_Diary.csv"))?;
    assert_eq!(diary_csv.lines().count(), 4);
    assert!(written.join("02_Summary.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_rollover_policies_on_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = DiaryStore::new(dir.path().join("diary.json"));

    let mut state = store.load(day(15), RolloverPolicy::Discard).await?;
    state.add(DiaryEntry::water(500.0, day(15).and_hms_opt(9, 0, 0).unwrap())?);
    store.save(&state).await?;

    let archived = store.load(day(16), RolloverPolicy::Archive).await?;
    assert_eq!(archived.current_day, day(16));
    assert_eq!(archived.totals_for(day(15)).hydration_ml, 500.0);

    let discarded = store.load(day(16), RolloverPolicy::Discard).await?;
    assert_eq!(discarded.current_day, day(16));
    assert_eq!(discarded.totals_for(day(15)), DailyTotals::default());

    let raw: serde_json::Value = serde_json::from_str(&tokio::fs::read_to_string(store.path()).await?)?;
    assert!(raw.get("diary_data").is_some());
    assert_eq!(raw["last_reset_date"], "2024-06-15");
    Ok(())
}
