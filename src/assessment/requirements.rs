//! Daily requirement targets derived from the user profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::anthropometric::{
    age_from_birth_date, body_fat_reference_range, classify_bmi, classify_bmi_standard,
    compute_bmi, BmiCategory, BmiTier,
};
use crate::profile::{Gender, Goals, UserProfile};
use crate::rounding::{round_to_int, round_to_u32};

pub const ASSESSMENT_AGE_RANGE: (u32, u32) = (16, 79);
pub const DEFAULT_ASSESSMENT_AGE: u32 = 30;

/// Deficit plans never go below this.
pub const MIN_CALORIE_TARGET: i64 = 1200;
const CALORIE_ADJUSTMENT: i64 = 250;

// Protein content used to translate a gram target into familiar foods.
const CHICKEN_PROTEIN_PER_100G: f64 = 22.5;
const EGG_PROTEIN_G: f64 = 5.5;

/// 250 ml per 7 kg of body weight.
pub fn hydration_target_ml(weight_kg: f64) -> u32 {
    if !(weight_kg > 0.0) {
        return 0;
    }
    round_to_u32(weight_kg / 7.0 * 250.0)
}

/// Grams of protein per kilogram for the gender and goal combination.
pub fn protein_multiplier(gender: Gender, goals: &Goals) -> f64 {
    match (gender, goals.is_strength_oriented()) {
        (Gender::Male, true) => 2.0,
        (Gender::Male, false) => 1.6,
        (Gender::Female, true) => 1.8,
        (Gender::Female, false) => 1.4,
    }
}

pub fn protein_target_g(gender: Gender, goals: &Goals, weight_kg: f64) -> u32 {
    if !(weight_kg > 0.0) {
        return 0;
    }
    round_to_u32(weight_kg * protein_multiplier(gender, goals))
}

/// Mifflin-St Jeor: `10w + 6.25h - 5a`, plus 5 for men and minus 161 for women.
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> i64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    round_to_int(base + offset)
}

/// Surplus for muscle gain, deficit (floored) for everything else.
pub fn calorie_target(bmr: i64, has_muscle_gain_goal: bool) -> i64 {
    if has_muscle_gain_goal {
        bmr + CALORIE_ADJUSTMENT
    } else {
        (bmr - CALORIE_ADJUSTMENT).max(MIN_CALORIE_TARGET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinEquivalents {
    pub chicken_breast_g: u32,
    pub eggs: u32,
}

pub fn protein_equivalents(protein_g: u32) -> ProteinEquivalents {
    let grams = f64::from(protein_g);
    ProteinEquivalents {
        chicken_breast_g: round_to_u32(grams / CHICKEN_PROTEIN_PER_100G * 100.0),
        eggs: round_to_u32(grams / EGG_PROTEIN_G),
    }
}

/// Age used for the metabolic formulas: the calendar age clamped to the
/// reference bands, or a default when the birth date is unusable.
pub fn assessment_age(birth_date: &str, today: NaiveDate) -> u32 {
    let (min, max) = ASSESSMENT_AGE_RANGE;
    age_from_birth_date(birth_date, today)
        .map(|age| age.clamp(min, max))
        .unwrap_or(DEFAULT_ASSESSMENT_AGE)
}

/// Everything the results screen shows for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Age fed to the metabolic formulas (clamped, defaulted).
    pub age: u32,
    /// Calendar age from the birth date, when it parses.
    pub calendar_age: Option<u32>,
    pub bmi: f64,
    pub bmi_tier: BmiTier,
    pub bmi_category: BmiCategory,
    pub body_fat_range: (f64, f64),
    pub hydration_ml: u32,
    pub protein_g: u32,
    pub protein_equivalents: ProteinEquivalents,
    pub bmr: i64,
    pub calorie_target: i64,
}

impl Requirements {
    pub fn compute(profile: &UserProfile, today: NaiveDate) -> Self {
        let age = assessment_age(&profile.birth_date, today);
        let calendar_age = age_from_birth_date(&profile.birth_date, today);
        let bmi = compute_bmi(profile.weight_kg, profile.height_cm);
        let protein_g = protein_target_g(profile.gender, &profile.goals, profile.weight_kg);
        let bmr = basal_metabolic_rate(profile.gender, profile.weight_kg, profile.height_cm, age);

        let requirements = Self {
            age,
            calendar_age,
            bmi,
            bmi_tier: classify_bmi(bmi),
            bmi_category: classify_bmi_standard(bmi),
            body_fat_range: body_fat_reference_range(profile.gender, calendar_age),
            hydration_ml: hydration_target_ml(profile.weight_kg),
            protein_g,
            protein_equivalents: protein_equivalents(protein_g),
            bmr,
            calorie_target: calorie_target(bmr, profile.goals.has_muscle_gain()),
        };
        debug!(?requirements, "Computed requirements");
        requirements
    }
}
