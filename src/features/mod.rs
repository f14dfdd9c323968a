//! URL lexical features.
//!
//! Everything here is a pure function of the URL text. The only lookup is the
//! public suffix check in [`tld_risk`], which runs against a compiled-in list.

pub mod tld_risk;
pub mod url_lexical;

pub use tld_risk::{TldRisk, TldRiskAnalyzer, ALLOWED_TLDS};
pub use url_lexical::{UrlLexicalAnalyzer, UrlSignals, SPECIAL_CHARS};
