use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::PredictError;

pub const SIGNAL_MIN: f32 = 0.0;
pub const SIGNAL_MAX: f32 = 100.0;

/// Sentinel in the child/feature arrays marking a leaf node.
pub const LEAF: i64 = -1;

/// One regression tree in flat-array form. Node 0 is the root; children
/// always come after their parent, so a walk from the root terminates.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub value: Vec<f64>,
}

#[derive(Deserialize)]
struct ForestJson {
    n_features: usize,
    trees: Vec<Tree>,
}

/// Ensemble regression model: the prediction is the mean of the per-tree
/// outputs, clamped to [0,100]. Read-only at serving time.
pub struct Forest {
    trees: Vec<Tree>,
    n_features: usize,
}

impl Forest {
    pub fn load(path: &str) -> Result<Self> {
        let txt = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read model at {}", path))?;
        Self::from_json(&txt)
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let parsed: ForestJson =
            serde_json::from_str(txt).with_context(|| "failed to parse model json")?;
        Self::new(parsed.trees, parsed.n_features)
    }

    pub fn new(trees: Vec<Tree>, n_features: usize) -> Result<Self> {
        if trees.is_empty() {
            bail!("model has no trees");
        }
        if n_features == 0 {
            bail!("model declares zero features");
        }
        for (i, tree) in trees.iter().enumerate() {
            validate_tree(tree, n_features).with_context(|| format!("tree {} is malformed", i))?;
        }

        let forest = Self { trees, n_features };

        // Probe with a dummy forward — a broken artifact must fail here,
        // not mid-request.
        let probe = forest.predict(&vec![0.0; n_features])?;
        if !probe.is_finite() {
            bail!("dummy forward produced a non-finite value: {}", probe);
        }

        Ok(forest)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean of the per-tree votes for `x`, clamped to [0,100]. Deterministic:
    /// the trees and their splits are fixed.
    pub fn predict(&self, x: &[f32]) -> Result<f32, PredictError> {
        if x.len() != self.n_features {
            return Err(PredictError::FeatureLengthMismatch {
                got: x.len(),
                expected: self.n_features,
            });
        }

        let sum: f64 = self.trees.iter().map(|t| eval_tree(t, x)).sum();
        let mean = sum / self.trees.len() as f64;

        Ok((mean as f32).clamp(SIGNAL_MIN, SIGNAL_MAX))
    }
}

fn eval_tree(tree: &Tree, x: &[f32]) -> f64 {
    let mut node = 0usize;
    loop {
        let left = tree.children_left[node];
        if left == LEAF {
            return tree.value[node];
        }
        // Indices were bounds-checked at load time.
        let feat = tree.feature[node] as usize;
        node = if (x[feat] as f64) <= tree.threshold[node] {
            left as usize
        } else {
            tree.children_right[node] as usize
        };
    }
}

fn validate_tree(tree: &Tree, n_features: usize) -> Result<()> {
    let n = tree.feature.len();
    if n == 0 {
        bail!("empty node arrays");
    }
    if tree.threshold.len() != n
        || tree.children_left.len() != n
        || tree.children_right.len() != n
        || tree.value.len() != n
    {
        bail!("node arrays disagree on length");
    }

    for i in 0..n {
        let (left, right) = (tree.children_left[i], tree.children_right[i]);
        if left == LEAF && right == LEAF {
            if tree.feature[i] != LEAF {
                bail!("leaf node {} carries a split feature", i);
            }
            continue;
        }
        if left == LEAF || right == LEAF {
            bail!("node {} has only one child", i);
        }
        if left <= i as i64 || right <= i as i64 || left as usize >= n || right as usize >= n {
            bail!("node {} child index out of bounds", i);
        }
        let feat = tree.feature[i];
        if feat < 0 || feat as usize >= n_features {
            bail!("node {} splits on feature {} but model has {}", i, feat, n_features);
        }
    }

    Ok(())
}
