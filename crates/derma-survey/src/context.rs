//! Survey → analysis context derivation.

use derma_core::{SurveyContext, SurveyData, SunExposure};

/// Derive the auxiliary request fields the analysis service reads.
#[must_use]
pub fn build_context(survey: &SurveyData) -> SurveyContext {
    SurveyContext {
        username: survey.username.clone(),
        user_context: user_context(survey),
        safety_warnings: safety_warnings(survey),
        age_recommendations: age_recommendations(survey.basic_info.age),
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if !items.is_empty() {
        lines.push(format!("{label}: {}", items.join(", ")));
    }
}

/// Newline-separated description of the user.
#[must_use]
pub fn user_context(survey: &SurveyData) -> String {
    let medical = &survey.medical_history;
    let basic = &survey.basic_info;
    let skin = &survey.skin_info;

    let mut lines = vec![
        format!("User: {}", survey.username),
        format!("Age: {}", basic.age),
        format!("Skin Type: {}", skin.skin_type),
    ];
    push_list(&mut lines, "Allergies", &medical.allergies);
    push_list(&mut lines, "Chronic Conditions", &medical.chronic_conditions);
    push_list(&mut lines, "Current Medications", &medical.current_medications);

    if basic.is_pregnant {
        lines.push(
            "Currently pregnant or nursing - recommend pregnancy-safe ingredients only".into(),
        );
    }
    lines.push(if skin.has_used_skincare {
        "Has previous skincare experience".into()
    } else {
        "New to skincare - recommend gentle, beginner-friendly products".into()
    });

    push_list(&mut lines, "Previous adverse reactions", &medical.previous_reactions);
    lines.push(format!("Sun exposure level: {}", basic.sun_exposure));
    push_list(&mut lines, "Family history", &basic.genetic_conditions);
    push_list(&mut lines, "Previous cosmetic procedures", &skin.cosmetic_procedures);

    lines.join("\n")
}

#[must_use]
pub fn safety_warnings(survey: &SurveyData) -> Vec<String> {
    let medical = &survey.medical_history;
    let has = |items: &[String], needle: &str| items.iter().any(|item| item == needle);

    let mut warnings = Vec::new();
    if survey.basic_info.is_pregnant {
        warnings.push("Avoid retinoids, salicylic acid, and hydroquinone during pregnancy");
    }
    if has(&medical.allergies, "Fragrances") {
        warnings.push("Avoid fragranced products");
    }
    if has(&medical.chronic_conditions, "Eczema") {
        warnings.push("Use gentle, fragrance-free products to avoid eczema flare-ups");
    }
    if has(&medical.chronic_conditions, "Rosacea") {
        warnings.push("Avoid alcohol-based products and strong acids that may trigger rosacea");
    }
    if survey.basic_info.sun_exposure == SunExposure::Excessive {
        warnings.push("Daily broad-spectrum SPF 30+ is critical due to high sun exposure");
    }
    warnings.into_iter().map(String::from).collect()
}

#[must_use]
pub fn age_recommendations(age: u8) -> Vec<String> {
    let recommendations: [&str; 2] = match age {
        0..=24 => [
            "Focus on gentle cleansing and moisturizing",
            "Introduce sunscreen as a daily habit",
        ],
        25..=34 => [
            "Consider preventive anti-aging ingredients like vitamin C",
            "Maintain consistent sun protection",
        ],
        35..=49 => [
            "Incorporate retinoids for anti-aging benefits",
            "Focus on hydration and barrier repair",
        ],
        _ => [
            "Emphasize gentle but effective anti-aging treatments",
            "Prioritize hydration and skin barrier support",
        ],
    };
    recommendations.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use derma_core::{BasicInfo, MedicalHistory, SkinInfo, SkinType};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn survey() -> SurveyData {
        SurveyData {
            username: "ana".into(),
            medical_history: MedicalHistory::default(),
            skin_info: SkinInfo {
                has_used_skincare: true,
                skin_type: SkinType::Combination,
                ..Default::default()
            },
            basic_info: BasicInfo {
                age: 31,
                is_pregnant: false,
                sun_exposure: SunExposure::Moderate,
                family_history: Vec::new(),
                genetic_conditions: Vec::new(),
            },
            completed_at: chrono::Utc::now(),
            version: "1.0".into(),
        }
    }

    #[test]
    fn minimal_survey_omits_empty_lists() {
        assert_eq!(
            user_context(&survey()),
            "User: ana\nAge: 31\nSkin Type: combination\n\
             Has previous skincare experience\nSun exposure level: moderate"
        );
        assert!(safety_warnings(&survey()).is_empty());
    }

    #[test]
    fn full_survey_lists_every_section_in_order() {
        let mut survey = survey();
        survey.medical_history = MedicalHistory {
            allergies: vec!["Fragrances".into(), "Nuts".into()],
            chronic_conditions: vec!["Rosacea".into()],
            current_medications: vec!["Isotretinoin".into()],
            cosmetic_procedures: Vec::new(),
            previous_reactions: vec!["Redness".into()],
        };
        survey.skin_info.has_used_skincare = false;
        survey.skin_info.cosmetic_procedures = vec!["Chemical peel".into()];
        survey.basic_info.is_pregnant = true;
        survey.basic_info.sun_exposure = SunExposure::Excessive;
        survey.basic_info.genetic_conditions = vec!["Melanoma".into()];

        let context = build_context(&survey);
        assert_eq!(
            context.user_context.lines().collect::<Vec<_>>(),
            vec![
                "User: ana",
                "Age: 31",
                "Skin Type: combination",
                "Allergies: Fragrances, Nuts",
                "Chronic Conditions: Rosacea",
                "Current Medications: Isotretinoin",
                "Currently pregnant or nursing - recommend pregnancy-safe ingredients only",
                "New to skincare - recommend gentle, beginner-friendly products",
                "Previous adverse reactions: Redness",
                "Sun exposure level: excessive",
                "Family history: Melanoma",
                "Previous cosmetic procedures: Chemical peel",
            ]
        );
        assert_eq!(
            context.safety_warnings,
            vec![
                "Avoid retinoids, salicylic acid, and hydroquinone during pregnancy",
                "Avoid fragranced products",
                "Avoid alcohol-based products and strong acids that may trigger rosacea",
                "Daily broad-spectrum SPF 30+ is critical due to high sun exposure",
            ]
        );
        assert_eq!(context.username, "ana");
    }

    #[test]
    fn eczema_warning() {
        let mut survey = survey();
        survey.medical_history.chronic_conditions = vec!["Eczema".into()];
        assert_eq!(
            safety_warnings(&survey),
            vec!["Use gentle, fragrance-free products to avoid eczema flare-ups"]
        );
    }

    #[rstest]
    #[case(18, "Focus on gentle cleansing and moisturizing")]
    #[case(24, "Focus on gentle cleansing and moisturizing")]
    #[case(25, "Consider preventive anti-aging ingredients like vitamin C")]
    #[case(34, "Consider preventive anti-aging ingredients like vitamin C")]
    #[case(35, "Incorporate retinoids for anti-aging benefits")]
    #[case(49, "Incorporate retinoids for anti-aging benefits")]
    #[case(50, "Emphasize gentle but effective anti-aging treatments")]
    #[case(90, "Emphasize gentle but effective anti-aging treatments")]
    fn age_brackets(#[case] age: u8, #[case] first: &str) {
        let recommendations = age_recommendations(age);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0], first);
    }
}
