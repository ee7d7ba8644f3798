use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::DiaryEntry;
use crate::assessment::Requirements;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub kcal: f64,
    pub protein_g: f64,
    pub hydration_ml: f64,
}

/// Sums a day's entries. Calories and protein only come from food; water
/// and food both count towards hydration.
pub fn daily_totals<'a>(entries: impl IntoIterator<Item = &'a DiaryEntry>) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for entry in entries {
        macro_rules! add {
            ($field:ident) => {
                totals.$field += entry.$field;
            };
        }
        if entry.is_food() {
            add!(kcal);
            add!(protein_g);
        }
        add!(hydration_ml);
    }
    totals
}

/// Totals for entries whose timestamp falls on `date`.
pub fn totals_for_date(entries: &[DiaryEntry], date: NaiveDate) -> DailyTotals {
    daily_totals(entries.iter().filter(|entry| entry.date() == date))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressRule {
    /// Calories: staying at or under the target passes.
    LowerIsBetter,
    /// Protein and hydration: reaching the target passes.
    HigherIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    Passed,
    Failed,
    /// No usable target.
    Indeterminate,
}

impl ProgressStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Passed => "on track",
            ProgressStatus::Failed => "off track",
            ProgressStatus::Indeterminate => "no target",
        }
    }
}

pub fn progress_status(consumed: f64, target: f64, rule: ProgressRule) -> ProgressStatus {
    if !(target > 0.0) {
        return ProgressStatus::Indeterminate;
    }
    let passed = match rule {
        ProgressRule::LowerIsBetter => consumed <= target,
        ProgressRule::HigherIsBetter => consumed >= target,
    };
    if passed {
        ProgressStatus::Passed
    } else {
        ProgressStatus::Failed
    }
}

/// Daily goals the diary is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub kcal: f64,
    pub protein_g: f64,
    pub hydration_ml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub kcal: ProgressStatus,
    pub protein_g: ProgressStatus,
    pub hydration_ml: ProgressStatus,
}

impl DailyTargets {
    pub fn from_requirements(requirements: &Requirements) -> Self {
        Self {
            kcal: requirements.calorie_target as f64,
            protein_g: f64::from(requirements.protein_g),
            hydration_ml: f64::from(requirements.hydration_ml),
        }
    }

    pub fn evaluate(&self, totals: &DailyTotals) -> DailyProgress {
        DailyProgress {
            kcal: progress_status(totals.kcal, self.kcal, ProgressRule::LowerIsBetter),
            protein_g: progress_status(totals.protein_g, self.protein_g, ProgressRule::HigherIsBetter),
            hydration_ml: progress_status(
                totals.hydration_ml,
                self.hydration_ml,
                ProgressRule::HigherIsBetter,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_entries() -> Vec<DiaryEntry> {
        vec![
            DiaryEntry::freeform_food("Oatmeal", 158.0, 5.9, 196.0, 1.0, at(15, 8)).unwrap(),
            DiaryEntry::water(500.0, at(15, 10)).unwrap(),
            DiaryEntry::freeform_food("Chicken", 165.0, 31.0, 65.0, 1.0, at(15, 13)).unwrap(),
            DiaryEntry::freeform_food("Pizza", 285.0, 12.2, 47.0, 1.0, at(14, 21)).unwrap(),
            DiaryEntry::water(250.0, at(14, 22)).unwrap(),
        ]
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(daily_totals(&[]), DailyTotals::default());
        let totals = totals_for_date(&[], NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(totals, DailyTotals { kcal: 0.0, protein_g: 0.0, hydration_ml: 0.0 });
    }

    #[test]
    fn test_water_only_counts_towards_hydration() {
        let entries = vec![DiaryEntry::water(750.0, at(15, 9)).unwrap()];
        let totals = daily_totals(&entries);
        assert_eq!(totals.kcal, 0.0);
        assert_eq!(totals.protein_g, 0.0);
        assert_eq!(totals.hydration_ml, 750.0);
    }

    #[test]
    fn test_totals_for_date_excludes_other_days() {
        let entries = sample_entries();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let totals = totals_for_date(&entries, day);
        assert_eq!(totals.kcal, 323.0);
        assert!((totals.protein_g - 36.9).abs() < 1e-9);
        assert_eq!(totals.hydration_ml, 761.0);

        let previous = totals_for_date(&entries, day.pred_opt().unwrap());
        assert_eq!(previous.kcal, 285.0);
        assert_eq!(previous.hydration_ml, 297.0);
    }

    #[test]
    fn test_totals_are_idempotent() {
        let entries = sample_entries();
        assert_eq!(daily_totals(&entries), daily_totals(&entries));
    }

    #[test]
    fn test_progress_status_rules() {
        assert_eq!(progress_status(1500.0, 1800.0, ProgressRule::LowerIsBetter), ProgressStatus::Passed);
        assert_eq!(progress_status(1800.0, 1800.0, ProgressRule::LowerIsBetter), ProgressStatus::Passed);
        assert_eq!(progress_status(1900.0, 1800.0, ProgressRule::LowerIsBetter), ProgressStatus::Failed);
        assert_eq!(progress_status(100.0, 112.0, ProgressRule::HigherIsBetter), ProgressStatus::Failed);
        assert_eq!(progress_status(112.0, 112.0, ProgressRule::HigherIsBetter), ProgressStatus::Passed);
        assert_eq!(progress_status(50.0, 0.0, ProgressRule::HigherIsBetter), ProgressStatus::Indeterminate);
        assert_eq!(progress_status(50.0, -10.0, ProgressRule::LowerIsBetter), ProgressStatus::Indeterminate);
    }

    #[test]
    fn test_targets_evaluate() {
        let targets = DailyTargets { kcal: 1400.0, protein_g: 30.0, hydration_ml: 2500.0 };
        let entries = sample_entries();
        let totals = totals_for_date(&entries, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let progress = targets.evaluate(&totals);
        assert_eq!(progress.kcal, ProgressStatus::Passed);
        assert_eq!(progress.protein_g, ProgressStatus::Passed);
        assert_eq!(progress.hydration_ml, ProgressStatus::Failed);
    }
}
