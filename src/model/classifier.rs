use crate::Error;
use crate::Measure;
use crate::Probability;
use crate::Result;
use crate::FEATURES;
use serde::Deserialize;
use serde::Serialize;

/// Fixed-order input to every classifier: sst, sss, depth.
pub type Vector = [Measure; 3];

/// A node of a binary decision tree, stored flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: Measure,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: Probability,
    },
}

/// Decision tree whose root is `nodes[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn probability(&self, x: &Vector) -> Probability {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                Node::Leaf { leaf } => return leaf,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = match x[feature] <= threshold {
                        true => left,
                        false => right,
                    }
                }
            }
        }
    }
    /// Indices in range, leaves are probabilities, and every path ends.
    /// Children must sit after their parent, which rules out cycles.
    fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::Internal("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Leaf { leaf } if !(0. ..=1.).contains(&leaf) => {
                    return Err(Error::Internal(format!("leaf {} outside [0,1]: {}", i, leaf)));
                }
                Node::Split { feature, .. } if feature >= FEATURES.len() => {
                    return Err(Error::Internal(format!("node {} splits on feature {}", i, feature)));
                }
                Node::Split { threshold, .. } if threshold.is_nan() => {
                    return Err(Error::Internal(format!("node {} has NaN threshold", i)));
                }
                Node::Split { left, right, .. }
                    if left <= i || right <= i || left >= self.nodes.len() || right >= self.nodes.len() =>
                {
                    return Err(Error::Internal(format!("node {} has bad children", i)));
                }
                _ => continue,
            }
        }
        Ok(())
    }
}

/// Artifact layout as stored on disk, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Scorer {
    /// Averaged decision trees.
    Forest {
        features: Vec<String>,
        trees: Vec<Tree>,
    },
    /// Logistic regression.
    Logistic {
        features: Vec<String>,
        weights: Vector,
        intercept: Measure,
    },
}

impl Scorer {
    fn features(&self) -> &[String] {
        match self {
            Self::Forest { features, .. } => features,
            Self::Logistic { features, .. } => features,
        }
    }
    fn validate(&self) -> Result<()> {
        if self.features() != FEATURES {
            return Err(Error::Internal(format!(
                "model features {:?} do not match {:?}",
                self.features(),
                FEATURES
            )));
        }
        match self {
            Self::Forest { trees, .. } if trees.is_empty() => {
                Err(Error::Internal("forest has no trees".into()))
            }
            Self::Forest { trees, .. } => trees.iter().try_for_each(Tree::validate),
            Self::Logistic {
                weights, intercept, ..
            } => match weights.iter().chain(std::iter::once(intercept)).all(|w| w.is_finite()) {
                true => Ok(()),
                false => Err(Error::Internal("logistic weights must be finite".into())),
            },
        }
    }
}

/// Binary probabilistic classifier loaded from a JSON artifact.
///
/// Artifacts declare the feature order they were trained with, and a
/// model is refused unless that order is exactly sst, sss, depth.
/// The only way to build one is through validation, so scoring never
/// meets an empty or cyclic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Scorer", into = "Scorer")]
pub struct Classifier(Scorer);

impl Classifier {
    /// Positive-class probability for one feature vector.
    pub fn probability(&self, x: &Vector) -> Probability {
        let p = match &self.0 {
            Scorer::Forest { trees, .. } => {
                trees.iter().map(|t| t.probability(x)).sum::<Probability>() / trees.len() as Probability
            }
            Scorer::Logistic {
                weights, intercept, ..
            } => {
                let z = weights.iter().zip(x).map(|(w, x)| w * x).sum::<Measure>() + intercept;
                1. / (1. + (-z).exp())
            }
        };
        match p.is_nan() {
            true => 0.5,
            false => p.clamp(0., 1.),
        }
    }
    pub fn features(&self) -> &[String] {
        self.0.features()
    }
    pub fn kind(&self) -> &'static str {
        match self.0 {
            Scorer::Forest { .. } => "forest",
            Scorer::Logistic { .. } => "logistic",
        }
    }
}

impl TryFrom<Scorer> for Classifier {
    type Error = Error;
    fn try_from(scorer: Scorer) -> Result<Self> {
        scorer.validate().map(|_| Self(scorer))
    }
}

impl From<Classifier> for Scorer {
    fn from(model: Classifier) -> Self {
        model.0
    }
}

impl TryFrom<&[u8]> for Classifier {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice::<Self>(bytes)?)
    }
}
