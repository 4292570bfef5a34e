//! Checksum-seeded impact estimate. Placeholder formula that only drives demo output.

/// Qualitative impact level, ordered by severity 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Impact {
    NoChange,
    Small,
    Moderate,
    Significant,
    Transformative,
}

impl Impact {
    pub const ALL: [Impact; 5] = [
        Impact::NoChange,
        Impact::Small,
        Impact::Moderate,
        Impact::Significant,
        Impact::Transformative,
    ];

    /// Severity index is taken modulo 5.
    pub fn from_severity(severity: u8) -> Self {
        Self::ALL[usize::from(severity % 5)]
    }

    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Impact::NoChange => "no change",
            Impact::Small => "small",
            Impact::Moderate => "moderate",
            Impact::Significant => "significant",
            Impact::Transformative => "transformative",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sum of the UTF-16 code units of `policy_text` (what a browser's `charCodeAt` reports).
pub fn policy_seed(policy_text: &str) -> u64 {
    policy_text.encode_utf16().map(u64::from).sum()
}

/// `(seed mod 5 + agent_index * 7) mod 5`, always in `0..=4`.
pub fn severity(policy_text: &str, agent_index: usize) -> u8 {
    let base = policy_seed(policy_text) % 5;
    let offset = (agent_index % 5) as u64 * 7;
    ((base + offset) % 5) as u8
}

pub fn estimate(policy_text: &str, agent_index: usize) -> Impact {
    Impact::from_severity(severity(policy_text, agent_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_example() {
        assert_eq!(policy_seed("tax"), 333);
        assert_eq!(severity("tax", 0), 3);
        assert_eq!(estimate("tax", 0).label(), "significant");
        assert_eq!(severity("tax", 1), 0);
        assert_eq!(estimate("tax", 1).label(), "no change");
    }

    #[test]
    fn severity_stays_in_range_and_is_stable() {
        let long = "x".repeat(500);
        let texts = ["a", "Raise fuel subsidies", "دعم المزارعين", "🌾 quota", long.as_str()];
        for text in texts {
            for i in 0..40 {
                let s = severity(text, i);
                assert!(s <= 4);
                assert_eq!(s, severity(text, i));
            }
        }
    }

    #[test]
    fn large_indices_match_the_unreduced_formula() {
        let base = policy_seed("water") % 5;
        for i in [5usize, 12, 99, 1_000] {
            assert_eq!(u64::from(severity("water", i)), (base + i as u64 * 7) % 5);
        }
    }

    #[test]
    fn astral_characters_count_both_surrogates() {
        // U+1F33E encodes as 0xD83C 0xDF3E
        assert_eq!(policy_seed("🌾"), 0xD83C + 0xDF3E);
    }

    #[test]
    fn labels_follow_severity_order() {
        let labels: Vec<&str> = Impact::ALL.iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            vec!["no change", "small", "moderate", "significant", "transformative"]
        );
        for (idx, impact) in Impact::ALL.iter().enumerate() {
            assert_eq!(usize::from(impact.severity()), idx);
        }
    }
}
