//! Body composition: BMI and its classification, body-fat reference ranges,
//! age from a birth date.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::profile::Gender;
use crate::rounding::round_to_decimals;

const KG_PER_POUND: f64 = 0.45359237;

/// `weight / height_m²`, rounded to one decimal. Zero when either input is
/// missing or non-positive.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if !(weight_kg > 0.0 && height_cm > 0.0) {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round_to_decimals(weight_kg / (height_m * height_m), 1)
}

pub fn pounds_to_kg(pounds: f64) -> f64 {
    if !(pounds > 0.0) {
        return 0.0;
    }
    round_to_decimals(pounds * KG_PER_POUND, 2)
}

/// Coarse BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObeseI,
    ObeseII,
    ObeseIII,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "UNDERWEIGHT",
            BmiCategory::Normal => "NORMAL WEIGHT",
            BmiCategory::Overweight => "OVERWEIGHT",
            BmiCategory::ObeseI => "OBESITY I",
            BmiCategory::ObeseII => "OBESITY II",
            BmiCategory::ObeseIII => "OBESITY III",
        }
    }

    /// Conditions the composition screen associates with the category.
    /// Empty for normal weight.
    pub fn symptoms(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "fatigue, fragility, low muscle mass",
            BmiCategory::Normal => "",
            BmiCategory::Overweight => {
                "digestive diseases, leg circulation problems, varicose veins"
            }
            BmiCategory::ObeseI => "sleep apnea, hypertension, insulin resistance",
            BmiCategory::ObeseII => "joint pain, fatty liver, cardiovascular risk",
            BmiCategory::ObeseIII => {
                "high cardiovascular risk, type 2 diabetes, respiratory problems"
            }
        }
    }
}

/// Fine-grained tiers used by the narrative classification, which splits
/// underweight into three thinness levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiTier {
    ThinnessIII,
    ThinnessII,
    ThinnessI,
    Normal,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

impl BmiTier {
    pub fn category(&self) -> BmiCategory {
        match self {
            BmiTier::ThinnessIII | BmiTier::ThinnessII | BmiTier::ThinnessI => {
                BmiCategory::Underweight
            }
            BmiTier::Normal => BmiCategory::Normal,
            BmiTier::Overweight => BmiCategory::Overweight,
            BmiTier::ObesityI => BmiCategory::ObeseI,
            BmiTier::ObesityII => BmiCategory::ObeseII,
            BmiTier::ObesityIII => BmiCategory::ObeseIII,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiTier::ThinnessIII => "Thinness III",
            BmiTier::ThinnessII => "Thinness II",
            BmiTier::ThinnessI => "Thinness I",
            BmiTier::Normal => "NORMAL WEIGHT",
            BmiTier::Overweight => "Overweight",
            BmiTier::ObesityI => "Obesity I",
            BmiTier::ObesityII => "Obesity II",
            BmiTier::ObesityIII => "Obesity III",
        }
    }

    pub fn symptoms(&self) -> &'static str {
        match self {
            BmiTier::ThinnessIII => "Prostration, asthenia, adynamia, degenerative diseases.",
            BmiTier::ThinnessII => "Anorexia, bulimia, osteoporosis, loss of muscle mass.",
            BmiTier::ThinnessI => {
                "Digestive disorders, weakness, chronic fatigue, anxiety, hormonal dysfunction."
            }
            BmiTier::Normal => {
                "Normal state, good energy level, vitality and good physical condition."
            }
            BmiTier::Overweight => {
                "Fatigue, digestive diseases, leg circulation problems, varicose veins."
            }
            BmiTier::ObesityI => "Diabetes, hypertension, cardiovascular disease, joint problems.",
            BmiTier::ObesityII => {
                "Cancer, angina pectoris, thrombophlebitis, arteriosclerosis, embolisms."
            }
            BmiTier::ObesityIII => {
                "Shortness of breath, apnea, drowsiness, pulmonary thrombosis, ulcers."
            }
        }
    }

    /// `"Thinness I: Digestive disorders, ..."`
    pub fn description(&self) -> String {
        format!("{}: {}", self.label(), self.symptoms())
    }
}

/// Narrative classification. Works on the one-decimal BMI; 18.5 is still
/// thinness and normal weight starts at 18.6.
pub fn classify_bmi(bmi: f64) -> BmiTier {
    let bmi = round_to_decimals(bmi, 1);
    if bmi < 5.0 {
        BmiTier::ThinnessIII
    } else if bmi < 10.0 {
        BmiTier::ThinnessII
    } else if bmi <= 18.5 {
        BmiTier::ThinnessI
    } else if bmi < 25.0 {
        BmiTier::Normal
    } else if bmi < 30.0 {
        BmiTier::Overweight
    } else if bmi < 35.0 {
        BmiTier::ObesityI
    } else if bmi < 40.0 {
        BmiTier::ObesityII
    } else {
        BmiTier::ObesityIII
    }
}

/// Composition-screen classification: 18.5 already counts as normal weight.
pub fn classify_bmi_standard(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObeseI
    } else if bmi < 40.0 {
        BmiCategory::ObeseII
    } else {
        BmiCategory::ObeseIII
    }
}

/// Results paragraph for the BMI.
pub fn bmi_narrative(bmi: f64) -> String {
    const REFERENCE: &str = "For reference, the ideal BMI is 18.6 to 24.9.";
    if classify_bmi(bmi) == BmiTier::Normal {
        format!(
            "Your BMI (Body Mass Index) is the ratio between your weight and your height. \
             Yours is {:.1}, which indicates NORMAL WEIGHT, meaning you should have good physical \
             condition, vitality and a good energy level. Do you feel that way? {}",
            bmi, REFERENCE
        )
    } else {
        let category = classify_bmi_standard(bmi);
        let symptoms = match category.symptoms() {
            "" => "—",
            text => text,
        };
        format!(
            "Your BMI (Body Mass Index) is the ratio between your weight and your height. \
             Yours is {:.1}, which indicates {} and you are prone to {}. {}",
            bmi,
            category.label(),
            symptoms,
            REFERENCE
        )
    }
}

// (min_age, max_age, min_pct, max_pct)
const FEMALE_BODY_FAT_BANDS: [(u32, u32, f64, f64); 3] = [
    (16, 39, 21.0, 32.9),
    (40, 59, 23.0, 33.9),
    (60, 79, 24.0, 35.9),
];

const MALE_BODY_FAT_BANDS: [(u32, u32, f64, f64); 3] = [
    (16, 39, 8.0, 19.9),
    (40, 59, 11.0, 21.9),
    (60, 79, 13.0, 24.9),
];

/// Healthy body-fat percentage range for a gender and age. Ages outside
/// 16-79, or unknown ages, get the youngest band.
pub fn body_fat_reference_range(gender: Gender, age: Option<u32>) -> (f64, f64) {
    let bands = match gender {
        Gender::Female => &FEMALE_BODY_FAT_BANDS,
        Gender::Male => &MALE_BODY_FAT_BANDS,
    };
    let (_, _, fallback_min, fallback_max) = bands[0];
    age.and_then(|age| {
        bands
            .iter()
            .find(|(lo, hi, _, _)| (*lo..=*hi).contains(&age))
            .map(|(_, _, min, max)| (*min, *max))
    })
    .unwrap_or((fallback_min, fallback_max))
}

/// Comparison sentence between the reference range and the user's estimate.
pub fn body_fat_sentence(
    gender: Gender,
    age: Option<u32>,
    range: (f64, f64),
    body_fat_pct: f64,
) -> String {
    let noun = match gender {
        Gender::Female => "woman",
        Gender::Male => "man",
    };
    let aged = age.map(|age| format!(" aged {}", age)).unwrap_or_default();
    format!(
        "About your body fat: a {}{} like you has {:.1}% body fat in the best case and \
         {:.1}% in the worst case. You have {}%.",
        noun, aged, range.0, range.1, body_fat_pct
    )
}

fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// Whole years between `birth_date` and `today`, counting this year only
/// once the birthday has passed. `None` for empty, unparseable or future
/// dates.
pub fn age_from_birth_date(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_birth_date(birth_date)?;
    if born > today {
        return None;
    }
    let birthday_pending = (today.month(), today.day()) < (born.month(), born.day());
    let years = today.year() - born.year() - i32::from(birthday_pending);
    u32::try_from(years).ok()
}
