use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};
use crate::pricing::country::Country;
use crate::rounding::round_to_decimals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    #[serde(alias = "HOMBRE", alias = "hombre")]
    Male,
    #[serde(alias = "MUJER", alias = "mujer")]
    Female,
}

impl Gender {
    /// Form input is free text in a few languages; anything that is not
    /// recognisably female is treated as male, like the questionnaire default.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.starts_with("muj") || normalized.starts_with("fem") || normalized == "f" {
            Ok(Gender::Female)
        } else if normalized.starts_with("hom") || normalized.starts_with("mal") || normalized == "m" {
            Ok(Gender::Male)
        } else {
            Err(AppError::invalid_input(format!("Unrecognised gender '{}'", s)))
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical and wellness goals picked at step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Tone,
    MuscleGain,
    Energy,
    Performance,
    Health,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::LoseWeight,
        Goal::Tone,
        Goal::MuscleGain,
        Goal::Energy,
        Goal::Performance,
        Goal::Health,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::Tone => "Tone / reduce fat",
            Goal::MuscleGain => "Increase muscle mass",
            Goal::Energy => "Increase energy",
            Goal::Performance => "Improve physical performance",
            Goal::Health => "Improve health",
        }
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "lose_weight" => Ok(Goal::LoseWeight),
            "tone" => Ok(Goal::Tone),
            "muscle_gain" => Ok(Goal::MuscleGain),
            "energy" => Ok(Goal::Energy),
            "performance" => Ok(Goal::Performance),
            "health" => Ok(Goal::Health),
            _ => Err(AppError::invalid_input(format!("Unknown goal '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goals(BTreeSet<Goal>);

impl Goals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, goal: Goal) {
        self.0.insert(goal);
    }

    pub fn contains(&self, goal: Goal) -> bool {
        self.0.contains(&goal)
    }

    /// Muscle gain or performance: the goals that raise the protein multiplier.
    pub fn is_strength_oriented(&self) -> bool {
        self.contains(Goal::MuscleGain) || self.contains(Goal::Performance)
    }

    pub fn has_muscle_gain(&self) -> bool {
        self.contains(Goal::MuscleGain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.0.iter()
    }
}

impl FromIterator<Goal> for Goals {
    fn from_iter<T: IntoIterator<Item = Goal>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Self-reported conditions from step 3. Declaration order is the priority
/// order used by the recommendation mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Constipation,
    HighCholesterol,
    LowEnergy,
    MusclePain,
    Gastritis,
    Hemorrhoids,
    Hypertension,
    JointPain,
    EatingAnxiety,
    Migraines,
    DiabetesFamilyHistory,
}

impl Symptom {
    pub const ALL: [Symptom; 11] = [
        Symptom::Constipation,
        Symptom::HighCholesterol,
        Symptom::LowEnergy,
        Symptom::MusclePain,
        Symptom::Gastritis,
        Symptom::Hemorrhoids,
        Symptom::Hypertension,
        Symptom::JointPain,
        Symptom::EatingAnxiety,
        Symptom::Migraines,
        Symptom::DiabetesFamilyHistory,
    ];

    /// Stable snake_case key, same as the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            Symptom::Constipation => "constipation",
            Symptom::HighCholesterol => "high_cholesterol",
            Symptom::LowEnergy => "low_energy",
            Symptom::MusclePain => "muscle_pain",
            Symptom::Gastritis => "gastritis",
            Symptom::Hemorrhoids => "hemorrhoids",
            Symptom::Hypertension => "hypertension",
            Symptom::JointPain => "joint_pain",
            Symptom::EatingAnxiety => "eating_anxiety",
            Symptom::Migraines => "migraines",
            Symptom::DiabetesFamilyHistory => "diabetes_family_history",
        }
    }

    /// Question text as asked on the conditions screen.
    pub fn question(&self) -> &'static str {
        match self {
            Symptom::Constipation => "Constipation?",
            Symptom::HighCholesterol => "High cholesterol?",
            Symptom::LowEnergy => "Low energy?",
            Symptom::MusclePain => "Muscle pain?",
            Symptom::Gastritis => "Gastritis?",
            Symptom::Hemorrhoids => "Hemorrhoids?",
            Symptom::Hypertension => "Hypertension?",
            Symptom::JointPain => "Joint pain?",
            Symptom::EatingAnxiety => "Eating anxiety?",
            Symptom::Migraines => "Headaches / migraines?",
            Symptom::DiabetesFamilyHistory => "Diabetes (family history)",
        }
    }
}

impl FromStr for Symptom {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.key() == key)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown symptom '{}'", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomFlags(BTreeSet<Symptom>);

impl SymptomFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, symptom: Symptom, active: bool) {
        if active {
            self.0.insert(symptom);
        } else {
            self.0.remove(&symptom);
        }
    }

    pub fn is_set(&self, symptom: Symptom) -> bool {
        self.0.contains(&symptom)
    }

    pub fn any(&self) -> bool {
        !self.0.is_empty()
    }

    /// Active flags in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Symptom> for SymptomFlags {
    fn from_iter<T: IntoIterator<Item = Symptom>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    /// Raw birth date as entered (ISO `YYYY-MM-DD`). Parsed lazily so a bad
    /// value never blocks the flow.
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default = "default_height_cm")]
    pub height_cm: f64,
    #[serde(default = "default_body_fat_pct")]
    pub body_fat_pct: f64,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub country: Country,
}

fn default_height_cm() -> f64 {
    170.0
}

fn default_body_fat_pct() -> f64 {
    20.0
}

// Input ranges accepted by the composition form.
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 250.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (0.0, 400.0);
pub const BODY_FAT_RANGE_PCT: (f64, f64) = (8.0, 45.0);

impl UserProfile {
    pub fn new(name: impl Into<String>, country: Country) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            city: String::new(),
            birth_date: String::new(),
            gender: Gender::default(),
            weight_kg: 0.0,
            height_cm: default_height_cm(),
            body_fat_pct: default_body_fat_pct(),
            goals: Goals::new(),
            country,
        }
    }

    /// Checks the anthropometric fields against the form ranges.
    pub fn validate(&self) -> AppResult<()> {
        check_range("height_cm", self.height_cm, HEIGHT_RANGE_CM)?;
        check_range("weight_kg", self.weight_kg, WEIGHT_RANGE_KG)?;
        check_range("body_fat_pct", self.body_fat_pct, BODY_FAT_RANGE_PCT)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> AppResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(AppError::invalid_input(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

/// Free-text answers from the nutrition and lifestyle questions (steps 1 and 3).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifestyleAnswers {
    pub sleep_schedule: String,
    pub breakfast_time: String,
    pub usual_breakfast: String,
    pub snacks: String,
    pub fruit_veg_portions: String,
    pub night_eating: String,
    pub main_food_challenge: String,
    pub water_8_glasses: String,
    pub alcohol_per_month: String,
    pub lowest_energy_time: String,
    pub activity_3x_week: String,
    pub previous_attempts: String,
    pub main_difficulty: String,
    pub self_care_priority: String,
    pub values_budget_optimization: String,
}

/// Open-ended goal questions from step 3.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GoalDetails {
    pub other_goals: String,
    pub target_size: String,
    pub body_parts: String,
    pub wardrobe_goal: String,
    pub benefit: String,
    pub upcoming_events: String,
    pub commitment: String,
}

/// Food spending reported at step 3, in the session's currency.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Budget {
    pub daily_food: f64,
    pub daily_snacks: f64,
    pub weekly_drinks: f64,
    pub weekly_delivery: f64,
}

impl Budget {
    /// Average daily spend: daily items plus weekly items spread over seven days.
    pub fn daily_average(&self) -> f64 {
        let total = non_negative(self.daily_food)
            + non_negative(self.daily_snacks)
            + non_negative(self.weekly_drinks) / 7.0
            + non_negative(self.weekly_delivery) / 7.0;
        round_to_decimals(total, 2)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Referral {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub relationship: String,
}

/// Service rating derived from how many people the user refers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRating {
    Terrible,
    Disliked,
    LikedALittle,
    Liked,
    LikedALot,
    Loved,
}

impl ServiceRating {
    pub fn from_referral_count(count: usize) -> Self {
        match count {
            0 => ServiceRating::Terrible,
            1 => ServiceRating::Disliked,
            2 => ServiceRating::LikedALittle,
            3 => ServiceRating::Liked,
            4 => ServiceRating::LikedALot,
            _ => ServiceRating::Loved,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceRating::Terrible => "TERRIBLE",
            ServiceRating::Disliked => "DIDN'T LIKE IT",
            ServiceRating::LikedALittle => "LIKED IT A LITTLE",
            ServiceRating::Liked => "LIKED IT",
            ServiceRating::LikedALot => "LIKED IT A LOT",
            ServiceRating::Loved => "LOVED IT",
        }
    }
}
