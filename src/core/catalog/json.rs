//! JSON catalog loader
//!
//! ```json
//! {
//!   "name": "Villanova Computing Sciences",
//!   "courses": [
//!     {"courseCode": "CSC 1051", "courseName": "Algorithms I", "credits": 4},
//!     {"courseCode": "CSC 1052", "courseName": "Algorithms II", "credits": 4,
//!      "prerequisites": ["CSC 1051"],
//!      "prerequisiteTree": {"type": "LEAF", "courseCode": "CSC 1051"}}
//!   ]
//! }
//! ```
//!
//! When `prerequisites` is missing it is derived from the leaves of
//! `prerequisiteTree`. When the tree is missing, empty or `null` it is built
//! from `prerequisites` as an AND of every entry, the same as CSV catalogs.

use super::Catalog;
use crate::core::error::CatalogError;
use crate::core::models::{Course, PrerequisiteNode};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    name: String,
    courses: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    #[serde(flatten)]
    course: Course,
    #[serde(default)]
    prerequisites: Option<Vec<String>>,
    #[serde(default)]
    prerequisite_tree: Value,
}

/// Interpret a raw tree value; `null` and `{}` mean "no requirements"
///
/// # Errors
/// Returns [`CatalogError::Json`] if a non-empty value is not a valid tree
pub fn parse_tree(value: Value) -> Result<Option<PrerequisiteNode>, CatalogError> {
    match &value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Parse a catalog from JSON text
///
/// # Errors
/// Returns [`CatalogError`] on malformed JSON or duplicate course codes
pub fn parse_catalog_json(content: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(content)?;
    let mut catalog = Catalog::new(file.name);

    for entry in file.courses {
        let code = entry.course.course_code.clone();
        let tree = parse_tree(entry.prerequisite_tree)?;

        let prerequisites = entry.prerequisites.unwrap_or_else(|| {
            tree.as_ref()
                .map(|t| t.course_codes().into_iter().map(String::from).collect())
                .unwrap_or_default()
        });

        if !catalog.add_course(entry.course) {
            return Err(CatalogError::DuplicateCourse(code));
        }
        for prereq in &prerequisites {
            catalog.add_prerequisite(&code, prereq.clone());
        }
        if let Some(tree) = tree.or_else(|| PrerequisiteNode::from_flat(&prerequisites)) {
            catalog.set_prerequisite_tree(&code, tree);
        }
    }

    if let Err(dangling) = catalog.validate_references() {
        for message in dangling {
            crate::debug!("{message}");
        }
    }

    Ok(catalog)
}

/// Load a catalog from a JSON file
///
/// # Errors
/// Returns [`CatalogError`] if the file cannot be read or parsed
pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog_json(&content)
}
