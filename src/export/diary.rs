use chrono::NaiveDate;

use super::{Sheet, Workbook};
use crate::diary::{DiaryState, EntryKind};

fn format_amount(value: f64) -> String {
    format!("{:.1}", value)
}

/// Diary (one row per entry) and Summary (totals against targets) for `date`.
pub fn diary_workbook(state: &DiaryState, date: NaiveDate) -> Workbook {
    let mut diary = Sheet::new(
        "Diary",
        &["Date", "Time", "Type", "Item", "Portions", "kcal", "Protein (g)", "Hydration (ml)"],
    );
    for entry in state.entries_for(date) {
        let kind = match entry.kind {
            EntryKind::Food => "food",
            EntryKind::Water => "water",
        };
        diary.push(vec![
            entry.timestamp.format("%Y-%m-%d").to_string(),
            entry.timestamp.format("%H:%M").to_string(),
            kind.to_string(),
            entry.name.clone(),
            entry.portions.to_string(),
            format_amount(entry.kcal),
            format_amount(entry.protein_g),
            format_amount(entry.hydration_ml),
        ]);
    }

    let totals = state.totals_for(date);
    let targets = state.data.targets;
    let progress = targets.evaluate(&totals);

    let mut summary = Sheet::new("Summary", &["Metric", "Value"]);
    summary.pair("Date", date);
    summary.pair("Calories (kcal)", format_amount(totals.kcal));
    summary.pair("Calorie target (kcal)", format_amount(targets.kcal));
    summary.pair("Calories status", progress.kcal.label());
    summary.pair("Protein (g)", format_amount(totals.protein_g));
    summary.pair("Protein target (g)", format_amount(targets.protein_g));
    summary.pair("Protein status", progress.protein_g.label());
    summary.pair("Hydration (ml)", format_amount(totals.hydration_ml));
    summary.pair("Hydration target (ml)", format_amount(targets.hydration_ml));
    summary.pair("Hydration status", progress.hydration_ml.label());

    Workbook {
        stem: format!("Diary_{}", date.format("%Y-%m-%d")),
        sheets: vec![diary, summary],
    }
}
