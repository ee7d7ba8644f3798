//! The evaluation session: everything collected across the six steps,
//! passed explicitly to every computation and persisted as JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::assessment::Requirements;
use crate::errors::{AppError, AppResult};
use crate::pricing::{price_plan_options, Country, CountryProfile, CustomBundle, PricedBundle};
use crate::profile::{
    Budget, GoalDetails, LifestyleAnswers, Referral, ServiceRating, SymptomFlags, UserProfile,
};
use crate::promo::PromoCountdown;
use crate::recommendation::{price_recommendations, recommend_bundles, RecommendedBundle};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 6;

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Wellness profile",
        2 => "Body composition",
        3 => "Lifestyle",
        4 => "Assessment",
        5 => "About us",
        _ => "Personalized plan",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub step: u8,
    pub profile: UserProfile,
    pub lifestyle: LifestyleAnswers,
    pub goal_details: GoalDetails,
    pub budget: Budget,
    pub symptoms: SymptomFlags,
    pub referrals: Vec<Referral>,
    pub custom_bundle: CustomBundle,
    pub chosen_plan: Option<PricedBundle>,
    pub promo_deadline: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Country::default())
    }
}

impl Session {
    pub fn new(country: Country) -> Self {
        Self {
            step: FIRST_STEP,
            profile: UserProfile::new("", country),
            lifestyle: LifestyleAnswers::default(),
            goal_details: GoalDetails::default(),
            budget: Budget::default(),
            symptoms: SymptomFlags::new(),
            referrals: Vec::new(),
            custom_bundle: CustomBundle::new(),
            chosen_plan: None,
            promo_deadline: None,
        }
    }

    pub fn country_profile(&self) -> &'static CountryProfile {
        self.profile.country.profile()
    }

    pub fn next_step(&mut self) -> u8 {
        self.go_to(self.step.saturating_add(1))
    }

    pub fn prev_step(&mut self) -> u8 {
        self.go_to(self.step.saturating_sub(1))
    }

    /// Jumps to `step`, clamped to the valid range.
    pub fn go_to(&mut self, step: u8) -> u8 {
        self.step = step.clamp(FIRST_STEP, LAST_STEP);
        self.step
    }

    pub fn requirements(&self, today: NaiveDate) -> Requirements {
        Requirements::compute(&self.profile, today)
    }

    pub fn recommendations(&self) -> Vec<RecommendedBundle> {
        recommend_bundles(&self.symptoms, self.profile.country)
    }

    /// Fixed plan cards followed by the symptom bundles, all priced for the
    /// session's country.
    pub fn priced_offers(&self) -> Vec<PricedBundle> {
        let profile = self.country_profile();
        let mut offers = price_plan_options(profile);
        offers.extend(price_recommendations(&self.recommendations(), profile));
        offers
    }

    /// Stores the chosen bundle, replacing any earlier choice.
    pub fn select_plan(&mut self, bundle: PricedBundle) {
        if let Some(previous) = &self.chosen_plan {
            debug!(previous = %previous.title, "Replacing selected plan");
        }
        info!(plan = %bundle.title, price = bundle.real_price, discount = bundle.discount_pct, "Plan selected");
        self.chosen_plan = Some(bundle);
    }

    /// Selects an offer by title (case-insensitive).
    pub fn select_plan_by_title(&mut self, title: &str) -> AppResult<&PricedBundle> {
        let wanted = title.trim();
        let bundle = self
            .priced_offers()
            .into_iter()
            .find(|offer| offer.title.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::invalid_input(format!("No plan titled '{}'", wanted)))?;
        self.select_plan(bundle);
        self.chosen_plan
            .as_ref()
            .ok_or_else(|| AppError::invalid_input("plan selection was not stored"))
    }

    /// Adds a referral; entries without a name are ignored.
    pub fn add_referral(&mut self, referral: Referral) -> bool {
        if referral.name.trim().is_empty() {
            return false;
        }
        self.referrals.push(referral);
        true
    }

    pub fn service_rating(&self) -> ServiceRating {
        ServiceRating::from_referral_count(self.referrals.len())
    }

    /// Starts the promotion clock on first use and returns it.
    pub fn promo(&mut self, now: DateTime<Utc>) -> PromoCountdown {
        let deadline = *self
            .promo_deadline
            .get_or_insert_with(|| PromoCountdown::starting_at(now).deadline);
        PromoCountdown { deadline }
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        Self::from_json_with_default(json, Country::default())
    }

    /// Parses a session, resolving a missing or unknown profile country to
    /// `default_country`.
    pub fn from_json_with_default(json: &str, default_country: Country) -> AppResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(profile) = value.get_mut("profile").and_then(|p| p.as_object_mut()) {
            let resolved = match profile.get("country").and_then(|c| c.as_str()) {
                Some(raw) => raw
                    .parse()
                    .unwrap_or_else(|_| Country::from_name_or(raw, default_country)),
                None => default_country,
            };
            profile.insert("country".into(), resolved.name().into());
        }

        let mut session: Session = serde_json::from_value(value)?;
        session.step = session.step.clamp(FIRST_STEP, LAST_STEP);
        session.profile.validate()?;
        Ok(session)
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::load_with_default(path, Country::default()).await
    }

    pub async fn load_with_default(path: impl AsRef<Path>, default_country: Country) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let session = Self::from_json_with_default(&content, default_country)?;
        debug!(path = %path.display(), step = session.step, "Loaded session");
        Ok(session)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        tokio::fs::write(path, self.to_json()?).await?;
        debug!(path = %path.display(), "Saved session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Symptom;
    use chrono::TimeZone;

    #[test]
    fn test_step_navigation_is_clamped() {
        let mut session = Session::new(Country::Peru);
        assert_eq!(session.step, 1);
        assert_eq!(session.prev_step(), 1);
        for _ in 0..10 {
            session.next_step();
        }
        assert_eq!(session.step, 6);
        assert_eq!(session.go_to(0), 1);
        assert_eq!(session.go_to(42), 6);
        assert_eq!(step_title(session.step), "Personalized plan");
    }

    #[test]
    fn test_select_plan_replaces_previous() -> AppResult<()> {
        let mut session = Session::new(Country::Peru);
        session.select_plan_by_title("Batido")?;
        assert_eq!(session.chosen_plan.as_ref().map(|p| p.discount_pct), Some(5));

        session.select_plan_by_title("batido + te")?;
        let chosen = session.chosen_plan.as_ref().unwrap();
        assert_eq!(chosen.title, "Batido + Te");
        assert_eq!(chosen.discount_pct, 10);
        Ok(())
    }

    #[test]
    fn test_select_unknown_plan_keeps_selection() -> AppResult<()> {
        let mut session = Session::new(Country::Peru);
        session.select_plan_by_title("Batido")?;
        assert!(session.select_plan_by_title("Nope").is_err());
        assert_eq!(session.chosen_plan.as_ref().unwrap().title, "Batido");
        Ok(())
    }

    #[test]
    fn test_priced_offers_include_symptom_bundles() {
        let mut session = Session::new(Country::Peru);
        assert_eq!(session.priced_offers().len(), 3);
        session.symptoms.set(Symptom::Gastritis, true);
        let offers = session.priced_offers();
        assert_eq!(offers.len(), 4);
        assert_eq!(offers[3].title, "Batido + Aloe Concentrado");
    }

    #[test]
    fn test_add_referral_ignores_empty_names() {
        let mut session = Session::new(Country::Peru);
        assert!(!session.add_referral(Referral {
            name: "   ".into(),
            ..Default::default()
        }));
        assert!(session.add_referral(Referral {
            name: "Lucía".into(),
            phone: "999".into(),
            ..Default::default()
        }));
        assert_eq!(session.referrals.len(), 1);
        assert_eq!(session.service_rating(), ServiceRating::Disliked);
    }

    #[test]
    fn test_promo_deadline_is_set_once() {
        let mut session = Session::new(Country::Peru);
        let first = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 16, 10, 0, 0).unwrap();
        let promo = session.promo(first);
        assert_eq!(session.promo(later), promo);
        assert_eq!(promo.render(later), "Promotion valid for 24:00:00");
    }

    #[test]
    fn test_json_round_trip_and_validation() -> AppResult<()> {
        let mut session = Session::new(Country::Canada);
        session.profile.name = "Ana".into();
        session.profile.weight_kg = 62.5;
        session.symptoms.set(Symptom::JointPain, true);
        session.select_plan_by_title("Batido")?;

        let restored = Session::from_json(&session.to_json()?)?;
        assert_eq!(restored, session);

        let mut invalid = session.clone();
        invalid.profile.height_cm = 400.0;
        assert!(Session::from_json(&invalid.to_json()?).is_err());
        Ok(())
    }

    #[test]
    fn test_minimal_json_uses_defaults() -> AppResult<()> {
        let session = Session::from_json(r#"{"profile": {"name": "Leo", "country": "Chile"}}"#)?;
        assert_eq!(session.step, 1);
        assert_eq!(session.profile.country, Country::Chile);
        assert_eq!(session.profile.height_cm, 170.0);
        assert!(session.chosen_plan.is_none());
        Ok(())
    }

    #[test]
    fn test_unknown_country_uses_given_default() -> AppResult<()> {
        let json = r#"{"profile": {"name": "Leo", "country": "Narnia"}}"#;
        let session = Session::from_json_with_default(json, Country::Canada)?;
        assert_eq!(session.profile.country, Country::Canada);

        let without_country = Session::from_json_with_default(r#"{"profile": {"name": "Leo"}}"#, Country::Mexico)?;
        assert_eq!(without_country.profile.country, Country::Mexico);

        let known = Session::from_json_with_default(r#"{"profile": {"name": "Leo", "country": "CL"}}"#, Country::Canada)?;
        assert_eq!(known.profile.country, Country::Chile);
        Ok(())
    }
}
