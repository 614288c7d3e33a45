//! Boolean evaluation of prerequisite trees

use crate::core::models::PrerequisiteNode;
use std::collections::HashSet;

/// Evaluate a prerequisite tree against a set of completed course codes
///
/// An absent tree is always satisfied. An empty `And` is satisfied and an
/// empty `Or` is not.
#[must_use]
pub fn is_satisfied(node: Option<&PrerequisiteNode>, completed: &HashSet<String>) -> bool {
    node.map_or(true, |node| evaluate(node, completed, None))
}

/// Evaluate the prerequisite tree of `owner`
///
/// Same as [`is_satisfied`], except that a leaf naming `owner` itself is a
/// cyclic requirement and evaluates to `false`. A tree only names courses and
/// is never expanded through other courses' trees, so self-reference is the
/// only cycle it can contain.
#[must_use]
pub fn is_satisfied_for(
    owner: &str,
    node: Option<&PrerequisiteNode>,
    completed: &HashSet<String>,
) -> bool {
    node.map_or(true, |node| evaluate(node, completed, Some(owner)))
}

fn evaluate(node: &PrerequisiteNode, completed: &HashSet<String>, owner: Option<&str>) -> bool {
    match node {
        PrerequisiteNode::Leaf { course_code } => {
            if owner == Some(course_code.as_str()) {
                crate::debug!("Cyclic prerequisite on {course_code}, treating as unsatisfied");
                return false;
            }
            completed.contains(course_code)
        }
        PrerequisiteNode::And { children } => {
            children.iter().all(|child| evaluate(child, completed, owner))
        }
        PrerequisiteNode::Or { children } => {
            children.iter().any(|child| evaluate(child, completed, owner))
        }
    }
}
