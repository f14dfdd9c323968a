//! Verdict Pipeline
//!
//! Assembles the classifier input from reputation signals and URL signals,
//! asks the classifier for a label, and derives advisory warnings from the
//! URL signals. Warnings never change the classifier's verdict.

use crate::error::VerdictError;
use crate::features::UrlSignals;
use crate::machine_learning::{Classifier, Label, ModelFeatureVector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Warn when more special characters than this appear in the URL.
pub const SPECIAL_CHAR_WARNING_THRESHOLD: usize = 10;

pub const MAX_PAGE_RANK: u8 = 10;
pub const MAX_WEB_TRAFFIC: u8 = 100;

/// Site reputation signals supplied by the caller, not derived from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationSignals {
    pub google_indexed: bool,
    pub page_rank: u8,
    pub web_traffic: u8,
    pub hyperlink_count: u64,
}

impl ReputationSignals {
    /// Build reputation signals, rejecting values outside their documented
    /// ranges (`google_indexed` in {0,1}, page rank 0-10, traffic 0-100).
    pub fn new(
        google_indexed: u8,
        page_rank: u8,
        web_traffic: u8,
        hyperlink_count: u64,
    ) -> Result<Self, VerdictError> {
        let google_indexed = match google_indexed {
            0 => false,
            1 => true,
            other => {
                return Err(VerdictError::InvalidReputation(format!(
                    "google index must be 0 or 1, got {}",
                    other
                )))
            }
        };
        if page_rank > MAX_PAGE_RANK {
            return Err(VerdictError::InvalidReputation(format!(
                "page rank must be 0-{}, got {}",
                MAX_PAGE_RANK, page_rank
            )));
        }
        if web_traffic > MAX_WEB_TRAFFIC {
            return Err(VerdictError::InvalidReputation(format!(
                "web traffic must be 0-{}, got {}",
                MAX_WEB_TRAFFIC, web_traffic
            )));
        }

        Ok(Self {
            google_indexed,
            page_rank,
            web_traffic,
            hyperlink_count,
        })
    }
}

/// Advisory hint derived from URL signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningFlag {
    IpHost,
    SuspiciousTld,
    ExcessiveSpecialChars,
    NoHttps,
}

impl WarningFlag {
    pub fn message(&self) -> &'static str {
        match self {
            WarningFlag::IpHost => "URL contains an IP address instead of a domain name",
            WarningFlag::SuspiciousTld => "Unusual top-level domain detected",
            WarningFlag::ExcessiveSpecialChars => "High number of special characters detected",
            WarningFlag::NoHttps => "Website does not use HTTPS",
        }
    }
}

impl fmt::Display for WarningFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Legitimate,
    Phishing,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Legitimate => "This website appears to be legitimate",
            Verdict::Phishing => "This website shows characteristics of a phishing site",
        }
    }
}

impl From<Label> for Verdict {
    fn from(label: Label) -> Self {
        match label {
            Label::Legitimate => Verdict::Legitimate,
            Label::Phishing => Verdict::Phishing,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Legitimate => write!(f, "Legitimate"),
            Verdict::Phishing => write!(f, "Phishing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    pub warnings: Vec<WarningFlag>,
    pub features: ModelFeatureVector,
}

impl VerdictResult {
    /// Factors the model weighs, for callers that explain a verdict.
    pub const ANALYSIS_FACTORS: [&'static str; 4] = [
        "URL structure and characteristics",
        "Web presence (Google Index and Page Rank)",
        "Traffic patterns",
        "Link structure",
    ];
}

/// Build the classifier input. The URL length comes from the analyzed URL
/// when there is one, else from the caller's fallback.
pub fn assemble_features(
    reputation: &ReputationSignals,
    url_signals: Option<&UrlSignals>,
    fallback_url_length: Option<u64>,
) -> Result<ModelFeatureVector, VerdictError> {
    let url_length = url_signals
        .map(|signals| signals.length as u64)
        .or(fallback_url_length)
        .ok_or(VerdictError::MissingInput("a URL length is required for classification"))?;

    Ok(ModelFeatureVector {
        google_indexed: u8::from(reputation.google_indexed),
        page_rank: reputation.page_rank,
        web_traffic: reputation.web_traffic,
        hyperlink_count: reputation.hyperlink_count,
        url_length,
    })
}

/// Warnings in fixed order: IP host, TLD, special characters, HTTPS.
pub fn derive_warnings(signals: &UrlSignals) -> Vec<WarningFlag> {
    let mut warnings = Vec::new();

    if signals.has_ip_host {
        warnings.push(WarningFlag::IpHost);
    }
    if signals.suspicious_tld {
        warnings.push(WarningFlag::SuspiciousTld);
    }
    if signals.special_char_count > SPECIAL_CHAR_WARNING_THRESHOLD {
        warnings.push(WarningFlag::ExcessiveSpecialChars);
    }
    // fires for plain http:// too
    if !signals.has_https {
        warnings.push(WarningFlag::NoHttps);
    }

    warnings
}

/// Turns signals into a verdict using one shared, read-only classifier.
#[derive(Clone)]
pub struct VerdictPipeline {
    classifier: Arc<dyn Classifier>,
}

impl VerdictPipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn evaluate(
        &self,
        reputation: &ReputationSignals,
        url_signals: Option<&UrlSignals>,
        fallback_url_length: Option<u64>,
    ) -> Result<VerdictResult, VerdictError> {
        let features = assemble_features(reputation, url_signals, fallback_url_length)?;
        log::debug!("Feature vector: {:?}", features.to_array());

        let label = self.classifier.predict(&features)?;
        let verdict = Verdict::from(label);
        let warnings = url_signals.map(derive_warnings).unwrap_or_default();

        log::debug!(
            "{} predicted {} with {} warning(s)",
            self.classifier.name(),
            verdict,
            warnings.len()
        );

        Ok(VerdictResult {
            verdict,
            warnings,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use std::sync::Mutex;

    /// Records every vector it sees and answers with a fixed label.
    struct RecordingClassifier {
        label: Label,
        seen: Mutex<Vec<ModelFeatureVector>>,
    }

    impl RecordingClassifier {
        fn new(label: Label) -> Arc<Self> {
            Arc::new(Self {
                label,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, features: &ModelFeatureVector) -> Result<Label, ClassifierError> {
            self.seen.lock().unwrap().push(*features);
            Ok(self.label)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn predict(&self, _features: &ModelFeatureVector) -> Result<Label, ClassifierError> {
            Err(ClassifierError::Shape("broken".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn clean_signals() -> UrlSignals {
        UrlSignals {
            length: 19,
            dot_count: 1,
            hyphen_count: 0,
            has_https: true,
            has_http: false,
            has_ip_host: false,
            digit_ratio: 0.0,
            suspicious_tld: false,
            special_char_count: 3,
        }
    }

    fn reputation() -> ReputationSignals {
        ReputationSignals::new(1, 8, 90, 50).unwrap()
    }

    #[test]
    fn test_clean_url_has_no_warnings() {
        let classifier = RecordingClassifier::new(Label::Legitimate);
        let pipeline = VerdictPipeline::new(classifier.clone());

        let result = pipeline
            .evaluate(&reputation(), Some(&clean_signals()), None)
            .unwrap();

        assert_eq!(result.verdict, Verdict::Legitimate);
        assert!(result.warnings.is_empty());
        assert_eq!(result.features.to_array(), [1.0, 8.0, 90.0, 50.0, 19.0]);
        assert_eq!(classifier.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_special_char_threshold_is_strict() {
        let mut signals = clean_signals();

        signals.special_char_count = 10;
        assert!(!derive_warnings(&signals).contains(&WarningFlag::ExcessiveSpecialChars));

        signals.special_char_count = 11;
        assert!(derive_warnings(&signals).contains(&WarningFlag::ExcessiveSpecialChars));
    }

    #[test]
    fn test_all_warnings_in_order() {
        let signals = UrlSignals {
            has_https: false,
            has_http: true,
            has_ip_host: true,
            suspicious_tld: true,
            special_char_count: 20,
            ..clean_signals()
        };

        assert_eq!(
            derive_warnings(&signals),
            vec![
                WarningFlag::IpHost,
                WarningFlag::SuspiciousTld,
                WarningFlag::ExcessiveSpecialChars,
                WarningFlag::NoHttps,
            ]
        );
    }

    #[test]
    fn test_no_https_fires_without_any_scheme() {
        let signals = UrlSignals {
            has_https: false,
            has_http: false,
            ..clean_signals()
        };

        assert_eq!(derive_warnings(&signals), vec![WarningFlag::NoHttps]);
    }

    #[test]
    fn test_warnings_do_not_change_verdict() {
        let pipeline = VerdictPipeline::new(RecordingClassifier::new(Label::Legitimate));
        let signals = UrlSignals {
            has_https: false,
            has_ip_host: true,
            suspicious_tld: true,
            ..clean_signals()
        };

        let result = pipeline.evaluate(&reputation(), Some(&signals), None).unwrap();
        assert_eq!(result.verdict, Verdict::Legitimate);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_url_length_resolution() {
        let classifier = RecordingClassifier::new(Label::Phishing);
        let pipeline = VerdictPipeline::new(classifier.clone());

        // analyzed URL wins over the fallback
        pipeline
            .evaluate(&reputation(), Some(&clean_signals()), Some(300))
            .unwrap();
        let result = pipeline.evaluate(&reputation(), None, Some(42)).unwrap();

        assert_eq!(result.verdict, Verdict::Phishing);
        assert!(result.warnings.is_empty());

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen[0].url_length, 19);
        assert_eq!(seen[1].url_length, 42);
    }

    #[test]
    fn test_missing_url_length() {
        let classifier = RecordingClassifier::new(Label::Legitimate);
        let pipeline = VerdictPipeline::new(classifier.clone());

        let err = pipeline.evaluate(&reputation(), None, None).unwrap_err();
        assert!(matches!(err, VerdictError::MissingInput(_)));
        assert!(classifier.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let pipeline = VerdictPipeline::new(Arc::new(BrokenClassifier));

        let err = pipeline
            .evaluate(&reputation(), Some(&clean_signals()), None)
            .unwrap_err();
        assert!(matches!(
            err,
            VerdictError::Classifier(ClassifierError::Shape(_))
        ));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let pipeline = VerdictPipeline::new(RecordingClassifier::new(Label::Phishing));
        let signals = UrlSignals {
            has_https: false,
            ..clean_signals()
        };

        let first = pipeline.evaluate(&reputation(), Some(&signals), None).unwrap();
        let second = pipeline.evaluate(&reputation(), Some(&signals), None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reputation_bounds() {
        assert!(ReputationSignals::new(0, 0, 0, 0).is_ok());
        assert!(ReputationSignals::new(1, 10, 100, 1_000).is_ok());
        assert!(matches!(
            ReputationSignals::new(2, 5, 50, 0),
            Err(VerdictError::InvalidReputation(_))
        ));
        assert!(matches!(
            ReputationSignals::new(1, 11, 50, 0),
            Err(VerdictError::InvalidReputation(_))
        ));
        assert!(matches!(
            ReputationSignals::new(1, 5, 101, 0),
            Err(VerdictError::InvalidReputation(_))
        ));
    }
}
