pub mod anthropometric;
pub mod requirements;

pub use anthropometric::{
    age_from_birth_date, bmi_narrative, body_fat_reference_range, body_fat_sentence,
    classify_bmi, classify_bmi_standard, compute_bmi, pounds_to_kg, BmiCategory, BmiTier,
};
pub use requirements::{
    assessment_age, basal_metabolic_rate, calorie_target, hydration_target_ml,
    protein_equivalents, protein_target_g, ProteinEquivalents, Requirements,
};
