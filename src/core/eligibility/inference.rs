//! One-hop completion inference
//!
//! Marking a course complete also marks its prerequisite complete when that
//! course has exactly one direct prerequisite. Only the explicitly completed
//! set is consulted, so inference never chains.

use crate::core::catalog::CourseSource;
use crate::core::error::FetchError;
use rayon::prelude::*;
use std::collections::HashSet;

/// Expand an explicitly completed set with the sole direct prerequisite of each member
///
/// Lookups run concurrently. A failed lookup contributes nothing and is logged.
///
/// # Arguments
/// * `explicit` - Course codes the student marked complete
/// * `direct_prereqs_of` - Direct prerequisite lookup
///
/// # Returns
/// `explicit` plus every inferred prerequisite
pub fn infer_completed<F>(explicit: &HashSet<String>, direct_prereqs_of: F) -> HashSet<String>
where
    F: Fn(&str) -> Result<Vec<String>, FetchError> + Sync,
{
    let inferred: Vec<String> = explicit
        .par_iter()
        .filter_map(|code| match direct_prereqs_of(code) {
            Ok(mut prereqs) if prereqs.len() == 1 => prereqs.pop(),
            Ok(_) => None,
            Err(e) => {
                crate::warn!("Skipping inference for {code}: {e}");
                None
            }
        })
        .collect();

    let mut implied = explicit.clone();
    for code in inferred {
        if implied.insert(code.clone()) {
            crate::verbose!("Inferred {code} as completed");
        }
    }
    implied
}

/// [`infer_completed`] using a [`CourseSource`] for the prerequisite lookups
#[must_use]
pub fn infer_completed_from<S: CourseSource + ?Sized>(
    source: &S,
    explicit: &HashSet<String>,
) -> HashSet<String> {
    infer_completed(explicit, |code| source.direct_prerequisites(code))
}
