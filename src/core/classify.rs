//! Category detection for analyzer findings.
//!
//! The upstream analyzer phrases its verdicts freely, so the buckets are
//! resolved with case-folded substring containment rather than exact matches.
//! Both the aggregate chart and the per-item badges go through
//! [`classify`], which keeps the two views consistent.

use std::borrow::Cow;

use super::models::{
    Analysis,
    Finding,
    ResultRecord,
};

/// Markers that flag a quality rating as low ("baja" covers Spanish output).
pub const LOW_QUALITY_MARKERS: &[&str] = &["low", "baja"];

/// Sentinel meaning "no bias detected". Distinct from an absent field.
pub const NO_BIAS_MARKER: &str = "none";

/// Longest bias text shown on a list badge.
pub const BIAS_LABEL_CHARS: usize = 20;

/// Per-record verdicts. A record whose analysis is missing is `Unknown` on
/// every axis and never counts toward any bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub usable: Verdict,
    pub biased: Verdict,
    pub low_quality: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Verdict {
    pub fn is_yes(self) -> bool {
        self == Verdict::Yes
    }

    fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(true) => Verdict::Yes,
            Some(false) => Verdict::No,
            None => Verdict::Unknown,
        }
    }
}

pub fn classify(record: &ResultRecord) -> Classification {
    match &record.analysis {
        Some(analysis) => classify_analysis(analysis),
        None => Classification::default(),
    }
}

pub fn classify_analysis(analysis: &Analysis) -> Classification {
    Classification {
        usable: Verdict::from_option(analysis.usable_for_training),
        biased: Verdict::from_option(analysis.biases.as_ref().map(bias_detected)),
        low_quality: Verdict::from_option(analysis.data_quality.as_ref().map(is_low_quality)),
    }
}

pub fn is_low_quality(rating: &Finding) -> bool {
    let folded = rating.as_text().to_lowercase();
    LOW_QUALITY_MARKERS.iter().any(|marker| folded.contains(marker))
}

pub fn bias_detected(biases: &Finding) -> bool {
    match biases {
        Finding::Text(text) => {
            let folded = text.trim().to_lowercase();
            !folded.is_empty() && !folded.contains(NO_BIAS_MARKER)
        }
        Finding::Structured(value) => structured_bias_detected(value),
    }
}

/// Short badge text for a bias finding: the leading characters of free text,
/// or a generic label for structured findings.
pub fn bias_label(biases: &Finding) -> Cow<'_, str> {
    match biases {
        Finding::Text(text) => shorten(text.trim(), BIAS_LABEL_CHARS),
        Finding::Structured(serde_json::Value::String(text)) => {
            shorten(text.trim(), BIAS_LABEL_CHARS)
        }
        Finding::Structured(_) => Cow::Borrowed("Detected"),
    }
}

/// Cuts `text` to at most `limit` characters, marking the cut with an ellipsis.
pub fn shorten(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

fn structured_bias_detected(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => bias_detected(&Finding::Text(text.clone())),
        Value::Object(map) => match map.get("detected") {
            Some(Value::Bool(flag)) => *flag,
            _ => true,
        },
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn analysis(quality: Option<&str>, biases: Option<Finding>, usable: Option<bool>) -> Analysis {
        Analysis {
            data_quality: quality.map(Finding::text),
            biases,
            usable_for_training: usable,
            ..Default::default()
        }
    }

    #[test]
    fn low_quality_matches_case_insensitive_substrings() {
        assert!(is_low_quality(&Finding::text("Low quality")));
        assert!(is_low_quality(&Finding::text("Calidad BAJA")));
        assert!(is_low_quality(&Finding::text("very low")));
        assert!(!is_low_quality(&Finding::text("High")));
        assert!(!is_low_quality(&Finding::text("Media")));
    }

    #[test]
    fn none_sentinel_is_not_a_bias() {
        assert!(!bias_detected(&Finding::text("None")));
        assert!(!bias_detected(&Finding::text("none detected")));
        assert!(!bias_detected(&Finding::text("   ")));
        assert!(bias_detected(&Finding::text("Gender skew")));
    }

    #[test]
    fn structured_biases_follow_detected_flag() {
        let detected = Finding::Structured(json!({"detected": true, "types": ["age"]}));
        let clean = Finding::Structured(json!({"detected": false, "types": []}));
        let opaque = Finding::Structured(json!({"types": ["selection"]}));

        assert!(bias_detected(&detected));
        assert!(!bias_detected(&clean));
        assert!(bias_detected(&opaque));
    }

    #[test]
    fn bias_label_shortens_text_and_names_structured_findings() {
        assert_eq!(bias_label(&Finding::text("Gender skew")), "Gender skew");
        assert_eq!(
            bias_label(&Finding::text("Geographic over-representation of urban areas")),
            "Geographic over-repr…"
        );
        assert_eq!(bias_label(&Finding::text("Sesgo de género en población")), "Sesgo de género en p…");
        assert_eq!(bias_label(&Finding::Structured(json!({"detected": true}))), "Detected");
    }

    #[test]
    fn missing_analysis_is_unknown_everywhere() {
        let record = ResultRecord::new("c.csv", None);
        let verdicts = classify(&record);
        assert_eq!(verdicts, Classification::default());
        assert_eq!(verdicts.usable, Verdict::Unknown);
    }

    #[test]
    fn partial_analysis_only_decides_present_fields() {
        let verdicts = classify_analysis(&analysis(Some("baja"), None, Some(false)));
        assert_eq!(verdicts.low_quality, Verdict::Yes);
        assert_eq!(verdicts.biased, Verdict::Unknown);
        assert_eq!(verdicts.usable, Verdict::No);
    }
}
