//! Decision components that sit between feature extraction and the caller.

pub mod decision_engine;

pub use decision_engine::{
    assemble_features, derive_warnings, ReputationSignals, Verdict, VerdictPipeline,
    VerdictResult, WarningFlag, SPECIAL_CHAR_WARNING_THRESHOLD,
};
