pub mod decision_tree;

pub use decision_tree::DecisionTreeModel;

use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the classifier input, in the order the model expects.
pub const FEATURE_NAMES: [&str; 5] = [
    "google_index",
    "page_rank",
    "web_traffic",
    "nb_hyperlinks",
    "length_url",
];

/// The five model inputs, in classifier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFeatureVector {
    pub google_indexed: u8,
    pub page_rank: u8,
    pub web_traffic: u8,
    pub hyperlink_count: u64,
    pub url_length: u64,
}

impl ModelFeatureVector {
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.google_indexed as f64,
            self.page_rank as f64,
            self.web_traffic as f64,
            self.hyperlink_count as f64,
            self.url_length as f64,
        ]
    }
}

/// Classifier output. `0` is legitimate, `1` is phishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl TryFrom<i64> for Label {
    type Error = ClassifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Legitimate),
            1 => Ok(Label::Phishing),
            other => Err(ClassifierError::Label(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legitimate => write!(f, "0"),
            Label::Phishing => write!(f, "1"),
        }
    }
}

/// A pre-trained, read-only model. Implementations must be deterministic and
/// must not mutate state while predicting, so one handle can be shared by any
/// number of concurrent evaluations.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &ModelFeatureVector) -> Result<Label, ClassifierError>;
    fn name(&self) -> &str;
}
