// Fixed option lists for the select-valued fields.
//
// These are read-only collaborators of the wizard: the presentation layer
// cycles through them, the record stores the chosen label verbatim.

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

pub const MARITAL_STATUSES: &[&str] = &["Single", "Married", "Other"];

pub const LANGUAGES: &[&str] = &[
    "English",
    "Hindi",
    "Spanish",
    "French",
    "Mandarin",
    "Arabic",
    "Other",
];

/// One nationality is deliberately not offered by the selector.
pub const EXCLUDED_NATIONALITY: &str = "Indian";

const NATIONALITIES: &[&str] = &[
    "American",
    "British",
    "Canadian",
    "Australian",
    "German",
    "French",
    "Brazilian",
    "Chinese",
    "Japanese",
    "Russian",
    "South African",
    "Mexican",
    "Indian",
];

/// The nationality values offered to the applicant.
pub fn nationality_options() -> Vec<&'static str> {
    NATIONALITIES
        .iter()
        .copied()
        .filter(|n| *n != EXCLUDED_NATIONALITY)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nationality_options_exclude_the_fixed_name() {
        let options = nationality_options();
        assert!(!options.contains(&EXCLUDED_NATIONALITY));
        assert!(options.contains(&"Canadian"));
        assert_eq!(options.len(), NATIONALITIES.len() - 1);
    }

    #[test]
    fn option_lists_are_non_empty_and_distinct() {
        for list in [GENDERS, MARITAL_STATUSES, LANGUAGES] {
            assert!(!list.is_empty());
            let mut seen = std::collections::HashSet::new();
            for item in list {
                assert!(seen.insert(item), "duplicate option: {}", item);
            }
        }
    }
}
