//! Prerequisite expression tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean admission requirement over course codes
///
/// A course without requirements has no tree at all (`Option::None`), which is
/// distinct from an empty `And` or `Or` node.
///
/// Serialized as an internally tagged object:
/// `{"type":"LEAF","courseCode":"MAT 1500"}`, `{"type":"AND","children":[...]}`,
/// `{"type":"OR","children":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum PrerequisiteNode {
    /// A single required course
    Leaf {
        /// Code of the required course
        #[serde(rename = "courseCode")]
        course_code: String,
    },
    /// Every child must be satisfied
    And {
        /// Sub-requirements
        #[serde(default)]
        children: Vec<PrerequisiteNode>,
    },
    /// At least one child must be satisfied
    Or {
        /// Alternatives
        #[serde(default)]
        children: Vec<PrerequisiteNode>,
    },
}

impl PrerequisiteNode {
    /// Leaf requiring a single course
    #[must_use]
    pub fn leaf(course_code: impl Into<String>) -> Self {
        Self::Leaf {
            course_code: course_code.into(),
        }
    }

    /// Conjunction of the given children
    #[must_use]
    pub const fn all(children: Vec<Self>) -> Self {
        Self::And { children }
    }

    /// Disjunction of the given children
    #[must_use]
    pub const fn any(children: Vec<Self>) -> Self {
        Self::Or { children }
    }

    /// Build a tree from a flat prerequisite list
    ///
    /// # Returns
    /// `None` for an empty list, a single leaf for one entry, and an `And` of
    /// leaves otherwise.
    #[must_use]
    pub fn from_flat(prerequisites: &[String]) -> Option<Self> {
        match prerequisites {
            [] => None,
            [only] => Some(Self::leaf(only.clone())),
            many => Some(Self::all(many.iter().cloned().map(Self::leaf).collect())),
        }
    }

    /// Every course code referenced by a leaf, first occurrence order, no duplicates
    #[must_use]
    pub fn course_codes(&self) -> Vec<&str> {
        let mut codes = Vec::new();
        self.collect_codes(&mut codes);
        codes
    }

    fn collect_codes<'a>(&'a self, codes: &mut Vec<&'a str>) {
        match self {
            Self::Leaf { course_code } => {
                if !codes.contains(&course_code.as_str()) {
                    codes.push(course_code);
                }
            }
            Self::And { children } | Self::Or { children } => {
                for child in children {
                    child.collect_codes(codes);
                }
            }
        }
    }
}

impl fmt::Display for PrerequisiteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, joiner) = match self {
            Self::Leaf { course_code } => return write!(f, "{course_code}"),
            Self::And { children } => (children, " and "),
            Self::Or { children } => (children, " or "),
        };

        for (idx, child) in children.iter().enumerate() {
            if idx > 0 {
                f.write_str(joiner)?;
            }
            if matches!(child, Self::Leaf { .. }) {
                write!(f, "{child}")?;
            } else {
                write!(f, "({child})")?;
            }
        }
        Ok(())
    }
}
