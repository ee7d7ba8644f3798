use chrono::NaiveDate;

use super::{export_file_stem, yes_no, Sheet, Workbook};
use crate::profile::{Goal, Symptom};
use crate::session::Session;

fn profile_sheet(session: &Session) -> Sheet {
    let p = &session.profile;
    let mut sheet = Sheet::new("Profile", &["Question", "Answer"]);
    sheet.pair("What is your name?", &p.name);
    sheet.pair("What is your email?", &p.email);
    sheet.pair("What is your phone number?", &p.phone);
    sheet.pair("Which city do you live in?", &p.city);
    sheet.pair("What is your date of birth?", &p.birth_date);
    sheet.pair("What is your gender?", p.gender.label());
    sheet.pair("Selected country", p.country.name());
    sheet.pair("Height (cm)", p.height_cm);
    sheet.pair("Weight (kg)", p.weight_kg);
    sheet.pair("Estimated body fat (%)", p.body_fat_pct);
    sheet
}

fn lifestyle_sheet(session: &Session) -> Sheet {
    let l = &session.lifestyle;
    let mut sheet = Sheet::new("Lifestyle", &["Question", "Answer"]);
    let answers = [
        ("What time do you wake up and go to sleep?", &l.sleep_schedule),
        ("Do you have breakfast every day? At what time?", &l.breakfast_time),
        ("What do you usually have for breakfast?", &l.usual_breakfast),
        ("Do you eat between meals? What?", &l.snacks),
        ("How many portions of fruit and vegetables do you eat a day?", &l.fruit_veg_portions),
        ("Do you tend to overeat at night?", &l.night_eating),
        ("What is your biggest challenge with food?", &l.main_food_challenge),
        ("Do you drink at least 8 glasses of water a day?", &l.water_8_glasses),
        ("Do you drink alcohol? How many times a month?", &l.alcohol_per_month),
        ("At what time of day do you feel least energetic?", &l.lowest_energy_time),
        ("Do you exercise at least 3 times a week?", &l.activity_3x_week),
        ("Have you tried anything before to feel better? (Gym, Diet, App, Other)", &l.previous_attempts),
        ("What is hardest for you? (Consistency, Food, Motivation, Other)", &l.main_difficulty),
        ("Do you consider taking care of yourself a priority?", &l.self_care_priority),
        (
            "Is it worth optimizing your budget to prioritize food and drinks that support your goals?",
            &l.values_budget_optimization,
        ),
    ];
    for (question, answer) in answers {
        sheet.pair(question, answer);
    }
    sheet
}

fn goals_sheet(session: &Session) -> Sheet {
    let goals = &session.profile.goals;
    let details = &session.goal_details;
    let budget = &session.budget;
    let symbol = session.country_profile().currency_symbol;

    let mut sheet = Sheet::new("Goals", &["Question", "Answer"]);
    for goal in Goal::ALL {
        sheet.pair(goal.label(), yes_no(goals.contains(goal)));
    }
    sheet.pair("Other", &details.other_goals);
    sheet.pair("What size would you like to be?", &details.target_size);
    sheet.pair("Which parts of your body would you like to improve?", &details.body_parts);
    sheet.pair("What in your wardrobe can we use as a goal?", &details.wardrobe_goal);
    sheet.pair("How does reaching your goal benefit you?", &details.benefit);
    sheet.pair("What events do you have in the next 3 to 6 months?", &details.upcoming_events);
    sheet.pair("Commitment level (1-10)", &details.commitment);
    sheet.pair(format!("Daily food spending ({})", symbol), budget.daily_food);
    sheet.pair(format!("Daily desserts/snacks/sweets spending ({})", symbol), budget.daily_snacks);
    sheet.pair(format!("Weekly drinks spending ({})", symbol), budget.weekly_drinks);
    sheet.pair(format!("Weekly delivery/eating out spending ({})", symbol), budget.weekly_delivery);
    sheet.pair(format!("Average daily spending ({})", symbol), budget.daily_average());
    sheet
}

fn composition_sheet(session: &Session, today: NaiveDate) -> Sheet {
    let req = session.requirements(today);
    let mut sheet = Sheet::new("Composition", &["Metric", "Value"]);
    sheet.pair("BMI", format!("{:.1}", req.bmi));
    sheet.pair("BMI classification", req.bmi_category.label());
    sheet.pair("Hydration requirement (ml/day)", req.hydration_ml);
    sheet.pair("Protein requirement (g/day)", req.protein_g);
    sheet.pair("Resting metabolism (kcal/day)", req.bmr);
    sheet.pair("Calorie target (kcal/day)", req.calorie_target);
    sheet
}

fn conditions_sheet(session: &Session) -> Sheet {
    let mut sheet = Sheet::new("Conditions", &["Condition", "Yes/No"]);
    for symptom in Symptom::ALL {
        sheet.pair(symptom.question(), yes_no(session.symptoms.is_set(symptom)));
    }
    sheet
}

fn referrals_sheet(session: &Session) -> Option<Sheet> {
    if session.referrals.is_empty() {
        return None;
    }
    let mut sheet = Sheet::new("Referrals", &["Name", "Phone", "District", "Relationship"]);
    for r in &session.referrals {
        sheet.push(vec![
            r.name.clone(),
            r.phone.clone(),
            r.district.clone(),
            r.relationship.clone(),
        ]);
    }
    Some(sheet)
}

fn selection_sheet(session: &Session) -> Option<Sheet> {
    let plan = session.chosen_plan.as_ref()?;
    let items: Vec<&str> = plan.items.iter().map(|p| p.canonical_name()).collect();
    let mut sheet = Sheet::new("Selection", &["Detail", "Value"]);
    sheet.pair("Chosen program", &plan.title);
    sheet.pair("Items", items.join(" + "));
    sheet.pair("Regular price", plan.regular_price);
    sheet.pair("Discount (%)", plan.discount_pct);
    sheet.pair("Final price", plan.real_price);
    sheet.pair("Currency", session.country_profile().currency_symbol);
    Some(sheet)
}

/// Profile, Lifestyle, Goals, Composition and Conditions, then Referrals and
/// Selection when there is something to put in them.
pub fn evaluation_workbook(session: &Session, today: NaiveDate) -> Workbook {
    let mut sheets = vec![
        profile_sheet(session),
        lifestyle_sheet(session),
        goals_sheet(session),
        composition_sheet(session, today),
        conditions_sheet(session),
    ];
    sheets.extend(referrals_sheet(session));
    sheets.extend(selection_sheet(session));

    Workbook {
        stem: export_file_stem(session.profile.country.code(), &session.profile.name),
        sheets,
    }
}
