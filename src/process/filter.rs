use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-phrase, case-insensitive "first year" / "1st year".
static FIRST_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(first year|1st year)\b").unwrap());

pub fn is_first_year(label: &str) -> bool {
    FIRST_YEAR.is_match(label)
}

/// Expand the short sex codes; other values pass through untouched.
pub fn normalize_sex(sex: &str) -> &str {
    match sex {
        "M" => "Male",
        "F" => "Female",
        "Both" => "Both sexes",
        other => other,
    }
}

/// Which side of the summary a row feeds, decided by its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Count,
    Percent,
}

impl UnitKind {
    /// `number` is matched without trimming; `%`/`percentage` after trimming.
    pub fn classify(unit: &str) -> Option<Self> {
        if unit.to_lowercase() == "number" {
            return Some(UnitKind::Count);
        }
        match unit.trim().to_lowercase().as_str() {
            "%" | "percentage" => Some(UnitKind::Percent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_first_year_phrases() {
        assert!(is_first_year("Entrants to First Year of Junior Cycle"));
        assert!(is_first_year("1st Year info"));
        assert!(is_first_year("FIRST YEAR"));
        assert!(!is_first_year("FIRST"));
        assert!(!is_first_year("Firstyear students"));
        assert!(!is_first_year("Second Year"));
        assert!(!is_first_year("worst first years"));
    }

    #[test]
    fn normalizes_sex_codes_exactly() {
        assert_eq!(normalize_sex("M"), "Male");
        assert_eq!(normalize_sex("F"), "Female");
        assert_eq!(normalize_sex("Both"), "Both sexes");
        assert_eq!(normalize_sex("Both sexes"), "Both sexes");
        assert_eq!(normalize_sex("m"), "m");
        assert_eq!(normalize_sex(" M"), " M");
    }

    #[test]
    fn classifies_units() {
        assert_eq!(UnitKind::classify("Number"), Some(UnitKind::Count));
        assert_eq!(UnitKind::classify("NUMBER"), Some(UnitKind::Count));
        assert_eq!(UnitKind::classify(" Number "), None);
        assert_eq!(UnitKind::classify("%"), Some(UnitKind::Percent));
        assert_eq!(UnitKind::classify(" Percentage "), Some(UnitKind::Percent));
        assert_eq!(UnitKind::classify("Euro"), None);
    }
}
