//! Random forest artifact
//!
//! The artifact is a JSON export of a fitted random forest. Each tree is
//! stored as parallel node arrays: node `i` is a leaf when
//! `children_left[i] == -1`, otherwise the row goes left when
//! `row[feature[i]] <= threshold[i]`. `value[i]` is the class-1 probability
//! at the node. The forest probability is the mean over trees.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::Predictor;
use crate::model::{fields, FeatureRow, FIELD_COUNT};

/// Artifact layout version understood by this loader
pub const FORMAT_VERSION: u32 = 1;

const NO_CHILD: i64 = -1;

/// On-disk representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// Input columns in training order
    pub columns: Vec<String>,
    /// Vocabulary of every categorical column, in encoding order
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    pub trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_arrays(arrays: &TreeArrays) -> Result<Self> {
        let len = arrays.children_left.len();
        if len == 0 {
            bail!("tree has no nodes");
        }
        if arrays.children_right.len() != len
            || arrays.feature.len() != len
            || arrays.threshold.len() != len
            || arrays.value.len() != len
        {
            bail!("node arrays have different lengths");
        }

        // Every node but the root has exactly one parent
        let mut seen = vec![false; len];
        seen[0] = true;
        let mut child = |index: usize, raw: i64| -> Result<usize> {
            let c = usize::try_from(raw)
                .ok()
                .filter(|&c| c > index && c < len)
                .ok_or_else(|| anyhow!("node {} has invalid child {}", index, raw))?;
            if std::mem::replace(&mut seen[c], true) {
                bail!("node {} is reached from more than one parent", c);
            }
            Ok(c)
        };

        let mut nodes = Vec::with_capacity(len);
        for i in 0..len {
            let (left, right) = (arrays.children_left[i], arrays.children_right[i]);
            let node = match (left == NO_CHILD, right == NO_CHILD) {
                (true, true) => {
                    let value = arrays.value[i];
                    if !(0.0..=1.0).contains(&value) {
                        bail!("leaf {} has probability {} outside [0, 1]", i, value);
                    }
                    Node::Leaf { value }
                }
                (false, false) => {
                    let feature = usize::try_from(arrays.feature[i])
                        .ok()
                        .filter(|&f| f < FIELD_COUNT)
                        .ok_or_else(|| {
                            anyhow!("node {} splits on unknown column {}", i, arrays.feature[i])
                        })?;
                    let threshold = arrays.threshold[i];
                    if !threshold.is_finite() {
                        bail!("node {} has a non-finite threshold", i);
                    }
                    Node::Split {
                        feature,
                        threshold,
                        left: child(i, left)?,
                        right: child(i, right)?,
                    }
                }
                _ => bail!("node {} has exactly one child", i),
            };
            nodes.push(node);
        }

        if let Some(orphan) = seen.iter().position(|&reached| !reached) {
            bail!("node {} is unreachable from the root", orphan);
        }

        Ok(Self { nodes })
    }

    fn evaluate(&self, row: &FeatureRow) -> Result<f64> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row
                        .get(*feature)
                        .ok_or_else(|| anyhow!("row has no column {}", feature))?;
                    index = if x <= *threshold { *left } else { *right };
                }
                None => bail!("node {} out of range", index),
            }
        }
    }

    fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(Node::Split { left, right, .. }) = self.nodes.get(index) {
                stack.push((*left, depth + 1));
                stack.push((*right, depth + 1));
            }
        }
        max_depth
    }
}

/// Shape of a loaded forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub columns: Vec<String>,
    pub trees: usize,
    pub nodes: usize,
    pub max_depth: usize,
}

/// Validated, immutable random forest classifier
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Validate an artifact against the record schema and build the forest
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self> {
        if artifact.format_version != FORMAT_VERSION {
            bail!(
                "unsupported artifact format version {}, expected {}",
                artifact.format_version,
                FORMAT_VERSION
            );
        }

        check_columns(&artifact.columns)?;
        check_categories(&artifact.categories)?;

        if artifact.trees.is_empty() {
            bail!("artifact contains no trees");
        }

        let trees = artifact
            .trees
            .iter()
            .enumerate()
            .map(|(i, arrays)| {
                DecisionTree::from_arrays(arrays).with_context(|| format!("invalid tree {}", i))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| "random-forest".to_string()),
            trees,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: ForestArtifact =
            serde_json::from_str(content).context("Failed to parse model artifact")?;
        Self::from_artifact(artifact)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid model artifact {}", path.display()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            name: self.name.clone(),
            columns: fields::column_names().map(str::to_string).collect(),
            trees: self.trees.len(),
            nodes: self.trees.iter().map(|t| t.nodes.len()).sum(),
            max_depth: self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0),
        }
    }
}

impl Predictor for RandomForest {
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64> {
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(row)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

fn check_columns(columns: &[String]) -> Result<()> {
    let expected: Vec<&str> = fields::column_names().collect();
    let actual: Vec<&str> = columns.iter().map(String::as_str).collect();
    if actual != expected {
        bail!(
            "artifact columns do not match the customer record\n  expected: {:?}\n  found:    {:?}",
            expected,
            actual
        );
    }
    Ok(())
}

fn check_categories(categories: &BTreeMap<String, Vec<String>>) -> Result<()> {
    for name in categories.keys() {
        if !fields::vocabularies().any(|(column, _)| column == name) {
            bail!("artifact declares a vocabulary for non-categorical column {}", name);
        }
    }

    for (column, expected) in fields::vocabularies() {
        let actual = categories
            .get(column)
            .ok_or_else(|| anyhow!("artifact has no vocabulary for {}", column))?;
        if actual.iter().map(String::as_str).ne(expected.iter().copied()) {
            bail!(
                "vocabulary mismatch for {}: expected {:?}, found {:?}",
                column,
                expected,
                actual
            );
        }
    }
    Ok(())
}
