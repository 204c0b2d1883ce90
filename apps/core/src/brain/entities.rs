//! Entity extraction: drone model, surface, phone and email.
//!
//! Model and surface detection are ordered cascades; the first entry that
//! matches wins and later entries are not consulted.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::DroneModel;

/// Model codes by priority. Matched by containment on normalized text.
const MODEL_CODES: &[(&str, DroneModel)] = &[
    ("t25", DroneModel::T25P),
    ("t50", DroneModel::T50),
    ("t70", DroneModel::T70P),
    ("t100", DroneModel::T100),
    ("mavic", DroneModel::Mavic3M),
];

/// Numeric aliases ("el 50", "modelo 70"). Weaker evidence: only consulted
/// when no model code matched, and only after a noun or article so that
/// bare numbers keep meaning hectares.
static MODEL_ALIASES: LazyLock<Vec<(Regex, DroneModel)>> = LazyLock::new(|| {
    [
        ("25", DroneModel::T25P),
        ("50", DroneModel::T50),
        ("70", DroneModel::T70P),
        ("100", DroneModel::T100),
    ]
    .into_iter()
    .map(|(number, model)| {
        let pattern = format!(r"\b(?:modelo|drone|dron|el|del)\s+{}\b", number);
        (
            Regex::new(&pattern).expect("Invalid regex: model alias"),
            model,
        )
    })
    .collect()
});

/// A named surface pattern. Capture group 1 holds the hectares.
struct SurfacePattern {
    name: &'static str,
    regex: Regex,
}

static SURFACE_PATTERNS: LazyLock<Vec<SurfacePattern>> = LazyLock::new(|| {
    vec![
        SurfacePattern {
            name: "hectare_unit",
            regex: Regex::new(r"\b(\d{1,6})\s*(?:ha|has|hectareas?)\b")
                .expect("Invalid regex: hectare unit"),
        },
        SurfacePattern {
            name: "surface_phrase",
            regex: Regex::new(r"\b(?:superficie|campo)\D{0,25}?\b(\d{1,6})\b")
                .expect("Invalid regex: surface phrase"),
        },
        SurfacePattern {
            name: "work_phrase",
            regex: Regex::new(
                r"\b(?:tengo|trabajo|cultivo|siembro)\s+(?:unas?\s+|como\s+|mas\s+de\s+)?(\d{1,6})\b",
            )
            .expect("Invalid regex: work phrase"),
        },
        SurfacePattern {
            name: "bare_number",
            regex: Regex::new(r"^\s*(\d{1,6})\s*$").expect("Invalid regex: bare number"),
        },
    ]
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d[\d\s\-()]{8,18}\d").expect("Invalid regex: phone")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").expect("Invalid regex: email")
});

/// Digit count a separator run needs to count as a phone number.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;

/// Detect the product model in normalized text.
pub fn detect_model(normalized: &str) -> Option<DroneModel> {
    MODEL_CODES
        .iter()
        .find(|(code, _)| normalized.contains(code))
        .map(|(_, model)| *model)
        .or_else(|| {
            MODEL_ALIASES
                .iter()
                .find(|(regex, _)| regex.is_match(normalized))
                .map(|(_, model)| *model)
        })
}

/// Detect the surface in hectares, returning the value and the pattern name.
pub fn detect_surface(normalized: &str) -> Option<(u32, &'static str)> {
    SURFACE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(normalized)?;
        let value = caps.get(1)?.as_str().parse::<u32>().ok()?;
        Some((value, pattern.name))
    })
}

/// Extract phone digits from the raw message.
pub fn detect_phone(raw: &str) -> Option<String> {
    PHONE_PATTERN.find_iter(raw).find_map(|m| {
        let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
        PHONE_DIGITS.contains(&digits.len()).then_some(digits)
    })
}

/// Extract the first email address from the raw message, lowercased.
pub fn detect_email(raw: &str) -> Option<String> {
    EMAIL_PATTERN.find(raw).map(|m| m.as_str().to_lowercase())
}
