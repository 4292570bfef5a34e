//! Localized narrative sentences. Two-way selection: Arabic, or English for everything else.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// `"ar"` selects Arabic; any other code falls back to English.
    pub fn from_code(code: &str) -> Self {
        if code == "ar" {
            Language::Ar
        } else {
            Language::En
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

/// Base sentence plus, when `targeted`, the emphasis clause for agents in the target group.
pub fn render(agent: &str, impact: &str, language: Language, targeted: bool) -> String {
    let mut narrative = match language {
        Language::Ar => format!("{} يتأثر بتأثير {} بسبب السياسة المقدمة.", agent, impact),
        Language::En => format!(
            "{} experiences a {} impact due to the proposed policy.",
            agent, impact
        ),
    };
    if targeted {
        narrative.push_str(emphasis(language));
    }
    narrative
}

fn emphasis(language: Language) -> &'static str {
    match language {
        Language::Ar => " (أثر مكبر على هذه الفئة)",
        Language::En => " (heightened effect for this group)",
    }
}

/// Narrative for the synthetic result returned when a group filter matches nobody.
pub fn no_match(language: Language) -> &'static str {
    match language {
        Language::Ar => "لا توجد بيانات لوصف هذه الفئة.",
        Language::En => "No agents match the selected target group.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_sentence() {
        assert_eq!(
            render("Farmer", "significant", Language::En, false),
            "Farmer experiences a significant impact due to the proposed policy."
        );
    }

    #[test]
    fn arabic_sentence_with_emphasis() {
        assert_eq!(
            render("NGO", "small", Language::Ar, true),
            "NGO يتأثر بتأثير small بسبب السياسة المقدمة. (أثر مكبر على هذه الفئة)"
        );
    }

    #[test]
    fn english_emphasis_is_appended() {
        let text = render("Trader", "moderate", Language::En, true);
        assert!(text.ends_with("policy. (heightened effect for this group)"));
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code("AR"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
        assert_eq!(Language::from_code("ar"), Language::Ar);
    }
}
