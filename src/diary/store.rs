//! Diary persistence.
//!
//! The store is a single JSON document with two keys: `diary_data` (targets,
//! the current day's entries and the per-day archive) and `last_reset_date`
//! (the day the current entries belong to). It is read in full on load and
//! rewritten in full after every change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use super::entry::DiaryEntry;
use super::totals::{daily_totals, DailyTargets, DailyTotals};
use crate::errors::{AppError, AppResult};

/// What happens to earlier entries when the calendar day changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloverPolicy {
    Discard,
    #[default]
    Archive,
}

impl FromStr for RolloverPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(RolloverPolicy::Discard),
            "archive" => Ok(RolloverPolicy::Archive),
            other => Err(AppError::invalid_input(format!(
                "Unknown rollover policy '{}' (expected discard or archive)",
                other
            ))),
        }
    }
}

impl fmt::Display for RolloverPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloverPolicy::Discard => f.write_str("discard"),
            RolloverPolicy::Archive => f.write_str("archive"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiaryData {
    pub targets: DailyTargets,
    pub entries: Vec<DiaryEntry>,
    pub archive: BTreeMap<NaiveDate, Vec<DiaryEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryState {
    #[serde(rename = "diary_data", default)]
    pub data: DiaryData,
    #[serde(rename = "last_reset_date")]
    pub current_day: NaiveDate,
}

impl DiaryState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            data: DiaryData::default(),
            current_day: today,
        }
    }

    /// Starts a new day if `today` differs from the stored day. Returns
    /// whether a rollover happened.
    pub fn roll_over(&mut self, today: NaiveDate, policy: RolloverPolicy) -> bool {
        if today == self.current_day {
            return false;
        }
        let previous = std::mem::take(&mut self.data.entries);
        let count = previous.len();
        match policy {
            RolloverPolicy::Discard => {}
            RolloverPolicy::Archive => {
                // Keyed by each entry's own date, which is normally the stored day.
                for entry in previous {
                    self.data.archive.entry(entry.date()).or_default().push(entry);
                }
            }
        }
        info!(from = %self.current_day, to = %today, entries = count, policy = %policy, "Diary day rolled over");
        self.current_day = today;
        true
    }

    pub fn add(&mut self, entry: DiaryEntry) {
        debug!(name = %entry.name, kind = ?entry.kind, "Diary entry added");
        self.data.entries.push(entry);
    }

    /// Entries logged on `date`, from the current day or the archive.
    pub fn entries_for(&self, date: NaiveDate) -> Vec<&DiaryEntry> {
        let current = self.data.entries.iter().filter(|e| e.date() == date);
        let archived = self.data.archive.get(&date).into_iter().flatten();
        archived.chain(current).collect()
    }

    pub fn totals_for(&self, date: NaiveDate) -> DailyTotals {
        daily_totals(self.entries_for(date))
    }

    pub fn archived_days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.data.archive.keys()
    }
}

/// JSON file holding a [`DiaryState`].
#[derive(Debug, Clone)]
pub struct DiaryStore {
    path: PathBuf,
}

impl DiaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the state and applies the day rollover. A missing file gives a
    /// fresh diary for `today`.
    pub async fn load(&self, today: NaiveDate, policy: RolloverPolicy) -> AppResult<DiaryState> {
        let mut state = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str::<DiaryState>(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No diary store yet, starting empty");
                DiaryState::new(today)
            }
            Err(e) => return Err(e.into()),
        };
        state.roll_over(today, policy);
        Ok(state)
    }

    pub async fn save(&self, state: &DiaryState) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), entries = state.data.entries.len(), "Diary saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary::entry::EntryKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn water_on(d: u32, ml: f64) -> DiaryEntry {
        DiaryEntry::water(ml, day(d).and_hms_opt(9, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_same_day_does_not_roll_over() {
        let mut state = DiaryState::new(day(15));
        state.add(water_on(15, 250.0));
        assert!(!state.roll_over(day(15), RolloverPolicy::Discard));
        assert_eq!(state.data.entries.len(), 1);
    }

    #[test]
    fn test_discard_drops_previous_entries() {
        let mut state = DiaryState::new(day(15));
        state.add(water_on(15, 250.0));
        assert!(state.roll_over(day(16), RolloverPolicy::Discard));
        assert!(state.data.entries.is_empty());
        assert!(state.data.archive.is_empty());
        assert_eq!(state.current_day, day(16));
    }

    #[test]
    fn test_archive_keeps_previous_entries_by_date() {
        let mut state = DiaryState::new(day(15));
        state.add(water_on(15, 250.0));
        state.add(water_on(15, 500.0));
        assert!(state.roll_over(day(16), RolloverPolicy::Archive));
        assert!(state.data.entries.is_empty());
        assert_eq!(state.archived_days().collect::<Vec<_>>(), vec![&day(15)]);
        assert_eq!(state.totals_for(day(15)).hydration_ml, 750.0);

        state.add(water_on(16, 100.0));
        assert_eq!(state.totals_for(day(16)).hydration_ml, 100.0);
        assert_eq!(state.entries_for(day(16))[0].kind, EntryKind::Water);
    }

    #[test]
    fn test_rollover_policy_parse() {
        assert_eq!("Discard".parse::<RolloverPolicy>().unwrap(), RolloverPolicy::Discard);
        assert_eq!("archive".parse::<RolloverPolicy>().unwrap(), RolloverPolicy::Archive);
        assert!("keep".parse::<RolloverPolicy>().is_err());
    }

    #[test]
    fn test_document_has_two_keys() -> anyhow::Result<()> {
        let mut state = DiaryState::new(day(15));
        state.add(water_on(15, 250.0));
        let value = serde_json::to_value(&state)?;
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["diary_data", "last_reset_date"]);
        assert_eq!(value["last_reset_date"], "2024-06-15");
        Ok(())
    }

    #[tokio::test]
    async fn test_store_round_trip_and_rollover() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DiaryStore::new(dir.path().join("nested").join("diary.json"));

        let mut state = store.load(day(15), RolloverPolicy::Archive).await?;
        assert!(state.data.entries.is_empty());
        state.add(water_on(15, 300.0));
        store.save(&state).await?;

        let same_day = store.load(day(15), RolloverPolicy::Archive).await?;
        assert_eq!(same_day, state);

        let next_day = store.load(day(16), RolloverPolicy::Archive).await?;
        assert!(next_day.data.entries.is_empty());
        assert_eq!(next_day.totals_for(day(15)).hydration_ml, 300.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_store_rejects_corrupt_file() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        std::fs::write(file.path(), "not json")?;
        let store = DiaryStore::new(file.path());
        let result = store.load(day(15), RolloverPolicy::Archive).await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
        Ok(())
    }
}
