//! CSV parser for curriculum catalog data
//!
//! Reads the curriculum CSV layout: optional `key,value` metadata lines, a
//! `Courses` marker line, a header row, then one row per course. Each course's
//! `Prerequisites` column is a `;`-separated list of course IDs (or codes) and
//! becomes both the direct prerequisite list and an AND tree.

use super::Catalog;
use crate::core::error::CatalogError;
use crate::core::models::{Course, PrerequisiteNode};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Catalog-level metadata read from the lines before the `Courses` marker
#[derive(Debug, Clone, Default)]
pub struct CurriculumMetadata {
    /// Curriculum name
    pub name: String,
    /// Institution name
    pub institution: String,
}

impl CurriculumMetadata {
    /// Name for the resulting catalog, preferring the institution
    #[must_use]
    pub fn catalog_name(&self) -> String {
        if self.institution.is_empty() {
            self.name.clone()
        } else {
            self.institution.clone()
        }
    }
}

/// One parsed course row before ID mapping
struct CourseRow {
    id: Option<String>,
    course: Course,
    prerequisites: Vec<String>,
}

/// Parse a curriculum CSV file into a catalog
///
/// # Errors
/// Returns [`CatalogError`] if the file cannot be read or lacks a course section
pub fn parse_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    parse_catalog_str(&content)
}

/// Parse curriculum CSV text into a catalog
///
/// # Errors
/// Returns [`CatalogError::Format`] if there is no `Courses` section or header,
/// or [`CatalogError::DuplicateCourse`] if two rows share a course code
pub fn parse_catalog_str(content: &str) -> Result<Catalog, CatalogError> {
    let lines: Vec<&str> = content.lines().collect();

    let courses_start = lines
        .iter()
        .position(|line| {
            parse_csv_line(line)
                .first()
                .is_some_and(|f| f.eq_ignore_ascii_case("courses"))
        })
        .ok_or_else(|| CatalogError::Format("No 'Courses' section found in CSV".to_string()))?;

    let metadata = parse_metadata(&lines[..courses_start]);

    let headers = lines
        .get(courses_start + 1)
        .map(|line| parse_csv_line(line))
        .ok_or_else(|| CatalogError::Format("No course header found".to_string()))?;

    // First pass: courses and the ID -> code mapping
    let mut rows = Vec::new();
    let mut id_to_code: HashMap<String, String> = HashMap::new();

    for (offset, line) in lines.iter().enumerate().skip(courses_start + 2) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_csv_line(line);
        match parse_course_row(&fields, &headers) {
            Some(row) => {
                if let Some(id) = &row.id {
                    id_to_code.insert(id.clone(), row.course.course_code.clone());
                }
                rows.push(row);
            }
            None => crate::warn!("Skipping malformed course row on line {}", offset + 1),
        }
    }

    // Second pass: resolve prerequisite references
    let mut catalog = Catalog::new(metadata.catalog_name());
    for row in rows {
        let code = row.course.course_code.clone();
        if !catalog.add_course(row.course) {
            return Err(CatalogError::DuplicateCourse(code));
        }

        let prerequisites: Vec<String> = row
            .prerequisites
            .iter()
            .map(|p| {
                id_to_code
                    .get(p)
                    .cloned()
                    .unwrap_or_else(|| normalize_course_code(p))
            })
            .filter(|p| !p.is_empty())
            .collect();

        for prereq in &prerequisites {
            catalog.add_prerequisite(&code, prereq.clone());
        }
        if let Some(tree) = PrerequisiteNode::from_flat(catalog.prerequisites_of(&code)) {
            catalog.set_prerequisite_tree(&code, tree);
        }
    }

    Ok(catalog)
}

/// Read `key,value` metadata lines
fn parse_metadata(lines: &[&str]) -> CurriculumMetadata {
    let mut metadata = CurriculumMetadata::default();

    for line in lines {
        let fields = parse_csv_line(line);
        let (Some(key), Some(value)) = (fields.first(), fields.get(1)) else {
            continue;
        };

        match key.to_lowercase().as_str() {
            "curriculum" => metadata.name.clone_from(value),
            "institution" => metadata.institution.clone_from(value),
            _ => {}
        }
    }

    metadata
}

/// Split a CSV line into trimmed fields, honoring double-quoted fields
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Get a field value by header name
fn get_field<'a>(fields: &'a [String], header_name: &str, headers: &[String]) -> Option<&'a str> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(header_name))
        .and_then(|idx| fields.get(idx))
        .map(String::as_str)
}

/// Build a course from one row; `None` if prefix or number is missing
fn parse_course_row(fields: &[String], headers: &[String]) -> Option<CourseRow> {
    let prefix = get_field(fields, "Prefix", headers).unwrap_or_default();
    let number = get_field(fields, "Number", headers).unwrap_or_default();
    if prefix.is_empty() || number.is_empty() {
        return None;
    }

    let name = get_field(fields, "Course Name", headers).unwrap_or_default();
    let credits = get_field(fields, "Credit Hours", headers)
        .and_then(|c| c.parse::<f32>().ok())
        .unwrap_or(0.0);

    let mut course = Course::new(format!("{prefix} {number}"), name.to_string(), credits);
    if let Some(description) = get_field(fields, "Description", headers) {
        if !description.is_empty() {
            course.set_description(description.to_string());
        }
    }

    let prerequisites: Vec<String> = get_field(fields, "Prerequisites", headers)
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    if !prerequisites.is_empty() {
        course.set_prerequisite_logic(prerequisites.join(" and "));
    }

    let id = get_field(fields, "Course ID", headers)
        .filter(|id| !id.is_empty())
        .map(String::from);

    Some(CourseRow {
        id,
        course,
        prerequisites,
    })
}

/// Normalize a course reference to `PREFIX NUMBER`
/// Handles "CS 1800", "CS1800", "CS 1800 (or coreq)"
fn normalize_course_code(input: &str) -> String {
    let cleaned = input.split('(').next().unwrap_or(input).trim();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();

    match parts.as_slice() {
        [] => String::new(),
        [prefix, number, ..] => format!("{prefix} {number}"),
        [single] => {
            let split = single
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(single.len());
            if split == 0 || split == single.len() {
                (*single).to_string()
            } else {
                format!("{} {}", &single[..split], &single[split..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CourseSource;

    const SAMPLE: &str = "\
Curriculum,Computer Science BS
Institution,Villanova University
Courses
Course ID,Course Name,Prefix,Number,Prerequisites,Corequisites,Strict-Corequisites,Credit Hours
1,Algorithms I,CSC,1051,,,,4
2,Algorithms II,CSC,1052,1,,,4
3,\"Calculus I, Honors\",MAT,1500,,,,4
4,Platform Computing,CSC,2053,2;MAT 1500,,,3
5,Broken Row,,,,,,3
";

    #[test]
    fn test_normalize_course_code() {
        assert_eq!(normalize_course_code("CS 1800"), "CS 1800");
        assert_eq!(normalize_course_code("CS1800"), "CS 1800");
        assert_eq!(normalize_course_code("CS 1800 (or coreq)"), "CS 1800");
        assert_eq!(normalize_course_code("  PHYS  1151  "), "PHYS 1151");
        assert_eq!(normalize_course_code("ELECTIVE"), "ELECTIVE");
    }

    #[test]
    fn test_parse_csv_line_quotes() {
        let fields = parse_csv_line("3,\"Calculus I, Honors\",MAT,1500");
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], "Calculus I, Honors");
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog_str(SAMPLE).unwrap();
        assert_eq!(catalog.name, "Villanova University");
        assert_eq!(catalog.course_count(), 4);
        assert_eq!(
            catalog.get_course("MAT 1500").unwrap().course_name,
            "Calculus I, Honors"
        );
    }

    #[test]
    fn test_prerequisites_become_and_tree() {
        let catalog = parse_catalog_str(SAMPLE).unwrap();

        assert_eq!(
            catalog.prerequisite_tree("CSC 1052").unwrap(),
            Some(PrerequisiteNode::leaf("CSC 1051"))
        );
        assert_eq!(
            catalog.prerequisite_tree("CSC 2053").unwrap(),
            Some(PrerequisiteNode::all(vec![
                PrerequisiteNode::leaf("CSC 1052"),
                PrerequisiteNode::leaf("MAT 1500"),
            ]))
        );
        assert!(catalog.prerequisite_tree("CSC 1051").unwrap().is_none());
    }

    #[test]
    fn test_missing_courses_section() {
        let result = parse_catalog_str("Curriculum,Test\nInstitution,Test U\n");
        assert!(matches!(result, Err(CatalogError::Format(_))));
    }
}
