pub mod components;
pub mod config;
pub mod error;
pub mod features;
pub mod machine_learning;

pub use components::{ReputationSignals, Verdict, VerdictPipeline, VerdictResult, WarningFlag};
pub use config::Config;
pub use error::{ClassifierError, ExtractionError, VerdictError};
pub use features::{UrlLexicalAnalyzer, UrlSignals};
pub use machine_learning::{Classifier, DecisionTreeModel, Label, ModelFeatureVector};
