//! Binary decision tree artifact.
//!
//! The artifact is JSON: the expected column names plus a flat node array
//! rooted at index 0. A split sends a sample left when
//! `sample[feature] <= threshold`, the convention of common tree trainers.
//!
//! ```json
//! {
//!   "feature_names": ["google_index", "page_rank", "web_traffic", "nb_hyperlinks", "length_url"],
//!   "nodes": [
//!     {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
//!     {"label": 1},
//!     {"label": 0}
//!   ]
//! }
//! ```

use super::{Classifier, Label, ModelFeatureVector, FEATURE_NAMES};
use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeArtifact {
    feature_names: Vec<String>,
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    name: String,
    nodes: Vec<TreeNode>,
    max_depth: usize,
}

impl DecisionTreeModel {
    pub fn load_from_file<P: AsRef<Path>>(path: P, max_depth: usize) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let model = Self::from_json(&content, max_depth)?.with_name(path.display().to_string());
        log::info!(
            "Loaded decision tree model from {} ({} nodes)",
            path.display(),
            model.nodes.len()
        );
        Ok(model)
    }

    pub fn from_json(content: &str, max_depth: usize) -> Result<Self, ClassifierError> {
        let artifact: TreeArtifact = serde_json::from_str(content)?;
        Self::from_nodes(&artifact.feature_names, artifact.nodes, max_depth)
    }

    /// Build a model from parsed parts, checking that it fits the five-column
    /// input and that every child index points inside the node array.
    pub fn from_nodes<S: AsRef<str>>(
        feature_names: &[S],
        nodes: Vec<TreeNode>,
        max_depth: usize,
    ) -> Result<Self, ClassifierError> {
        let names: Vec<&str> = feature_names.iter().map(|s| s.as_ref()).collect();
        if names != FEATURE_NAMES {
            return Err(ClassifierError::Shape(format!(
                "expected columns {:?}, artifact has {:?}",
                FEATURE_NAMES, names
            )));
        }
        if nodes.is_empty() {
            return Err(ClassifierError::Shape("tree has no nodes".to_string()));
        }

        for (index, node) in nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= FEATURE_NAMES.len() {
                    return Err(ClassifierError::Shape(format!(
                        "node {} splits on unknown feature {}",
                        index, feature
                    )));
                }
                if *left >= nodes.len() || *right >= nodes.len() {
                    return Err(ClassifierError::Shape(format!(
                        "node {} points outside the tree ({} nodes)",
                        index,
                        nodes.len()
                    )));
                }
            }
        }

        Ok(Self {
            name: "decision_tree".to_string(),
            nodes,
            max_depth,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Classifier for DecisionTreeModel {
    fn predict(&self, features: &ModelFeatureVector) -> Result<Label, ClassifierError> {
        let sample = features.to_array();
        let mut index = 0;

        // Depth bound also catches cycles in a hand-edited artifact
        for _ in 0..=self.max_depth {
            match &self.nodes[index] {
                TreeNode::Leaf { label } => return Label::try_from(*label),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }

        Err(ClassifierError::Shape(format!(
            "no leaf reached within depth {}",
            self.max_depth
        )))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
