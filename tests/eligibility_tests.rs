//! Integration tests for catalog loading and eligibility

use nu_planner::core::catalog::{load_catalog, Catalog, CourseSource};
use nu_planner::core::eligibility::{
    eligible_courses, infer_completed_from, is_satisfied, RequestSequencer,
};
use nu_planner::core::error::FetchError;
use nu_planner::core::models::{Course, PrerequisiteNode};
use std::collections::{HashMap, HashSet};
use std::fs;
use tempfile::TempDir;

const CATALOG_JSON: &str = r#"{
    "name": "Computing Sciences",
    "courses": [
        {"courseCode": "MAT 1500", "courseName": "Calculus I", "credits": 4},
        {"courseCode": "CSC 1051", "courseName": "Algorithms and Data Structures I", "credits": 4},
        {"courseCode": "CSC 1052", "courseName": "Algorithms and Data Structures II", "credits": 4,
         "prerequisiteTree": {"type": "LEAF", "courseCode": "CSC 1051"}},
        {"courseCode": "CSC 1300", "courseName": "Discrete Structures", "credits": 3},
        {"courseCode": "CSC 2400", "courseName": "Computer Systems I", "credits": 3,
         "prerequisiteTree": {"type": "AND", "children": [
            {"type": "LEAF", "courseCode": "CSC 1052"},
            {"type": "OR", "children": [
                {"type": "LEAF", "courseCode": "CSC 1300"},
                {"type": "LEAF", "courseCode": "MAT 1500"}
            ]}
         ]}},
        {"courseCode": "CSC 4700", "courseName": "Capstone", "credits": 3,
         "prerequisites": ["CSC 2400"],
         "prerequisiteTree": {"type": "LEAF", "courseCode": "CSC 2400"}}
    ]
}"#;

fn write_catalog(dir: &TempDir) -> Catalog {
    let path = dir.path().join("catalog.json");
    fs::write(&path, CATALOG_JSON).expect("write catalog");
    load_catalog(&path).expect("load catalog")
}

fn codes(courses: &[Course]) -> Vec<String> {
    let mut codes: Vec<String> = courses.iter().map(|c| c.course_code.clone()).collect();
    codes.sort();
    codes
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_nothing_completed_lists_courses_without_prerequisites() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let eligible = eligible_courses(&catalog, &HashSet::new());
    assert_eq!(codes(&eligible), vec!["CSC 1051", "CSC 1300", "MAT 1500"]);
}

#[test]
fn test_completed_courses_are_never_eligible() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let eligible = eligible_courses(&catalog, &set(&["CSC 1051", "MAT 1500"]));
    assert_eq!(codes(&eligible), vec!["CSC 1052", "CSC 1300"]);
}

#[test]
fn test_completing_a_course_implies_its_single_prerequisite() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let implied = infer_completed_from(&catalog, &set(&["CSC 1052"]));
    assert_eq!(implied, set(&["CSC 1051", "CSC 1052"]));

    // CSC 1051 is implied, so it is not listed again
    let eligible = eligible_courses(&catalog, &set(&["CSC 1052"]));
    assert_eq!(codes(&eligible), vec!["CSC 1300", "MAT 1500"]);
}

#[test]
fn test_inference_does_not_chain() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let implied = infer_completed_from(&catalog, &set(&["CSC 4700"]));
    assert!(implied.contains("CSC 2400"));
    assert!(
        !implied.contains("CSC 1052"),
        "Only explicitly completed courses drive inference"
    );
}

#[test]
fn test_or_branch_unlocks_course() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = write_catalog(&dir);

    let eligible = eligible_courses(&catalog, &set(&["CSC 1052", "MAT 1500"]));
    assert!(codes(&eligible).contains(&"CSC 2400".to_string()));
}

#[test]
fn test_self_referencing_requirement_is_unsatisfied() {
    let mut catalog = Catalog::new("Cycles".to_string());
    catalog.add_course(Course::new("A 100".to_string(), "A".to_string(), 3.0));
    catalog.add_course(Course::new("B 100".to_string(), "B".to_string(), 3.0));
    catalog.set_prerequisite_tree(
        "A 100",
        PrerequisiteNode::any(vec![
            PrerequisiteNode::leaf("A 100"),
            PrerequisiteNode::leaf("B 100"),
        ]),
    );

    assert!(eligible_courses(&catalog, &HashSet::new())
        .iter()
        .all(|c| c.course_code != "A 100"));

    let eligible = eligible_courses(&catalog, &set(&["B 100"]));
    assert_eq!(codes(&eligible), vec!["A 100"]);
}

#[test]
fn test_empty_groups() {
    let done = HashSet::new();
    assert!(is_satisfied(Some(&PrerequisiteNode::all(vec![])), &done));
    assert!(!is_satisfied(Some(&PrerequisiteNode::any(vec![])), &done));
    assert!(is_satisfied(None, &done));
}

#[test]
fn test_json_flat_prerequisites_gate_eligibility() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("flat.json");
    fs::write(
        &path,
        r#"{"courses": [
            {"courseCode": "CSC 1051", "courseName": "Algorithms I", "credits": 4},
            {"courseCode": "MAT 1500", "courseName": "Calculus I", "credits": 4},
            {"courseCode": "CSC 2400", "courseName": "Computer Systems I", "credits": 3,
             "prerequisites": ["CSC 1051", "MAT 1500"]}
        ]}"#,
    )
    .expect("write catalog");
    let catalog = load_catalog(&path).expect("load catalog");

    let eligible = eligible_courses(&catalog, &HashSet::new());
    assert_eq!(codes(&eligible), vec!["CSC 1051", "MAT 1500"]);

    let eligible = eligible_courses(&catalog, &set(&["CSC 1051", "MAT 1500"]));
    assert_eq!(codes(&eligible), vec!["CSC 2400"]);
}

#[test]
fn test_csv_catalog_supports_eligibility() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("curriculum.csv");
    fs::write(
        &path,
        "Curriculum,Computer Science BS\n\
         Institution,Example University\n\
         Courses\n\
         Course ID,Course Name,Prefix,Number,Prerequisites,Corequisites,Strict-Corequisites,Credit Hours\n\
         1,Intro Programming,CS,1800,,,,4\n\
         2,Fundamentals II,CS,2500,1,,,4\n\
         3,Algorithms,CS,3000,1;2,,,4\n",
    )
    .expect("write csv");

    let catalog = load_catalog(&path).expect("load csv");
    assert_eq!(catalog.course_count(), 3);

    let eligible = eligible_courses(&catalog, &set(&["CS 1800"]));
    assert_eq!(codes(&eligible), vec!["CS 2500"]);

    let eligible = eligible_courses(&catalog, &set(&["CS 1800", "CS 2500"]));
    assert_eq!(codes(&eligible), vec!["CS 3000"]);
}

/// Source whose per-course lookups fail for selected codes
struct FlakySource {
    catalog: Catalog,
    broken: HashSet<String>,
    catalog_down: bool,
}

impl CourseSource for FlakySource {
    fn all_courses(&self) -> Result<Vec<Course>, FetchError> {
        if self.catalog_down {
            return Err(FetchError::Unavailable("catalog offline".to_string()));
        }
        self.catalog.all_courses()
    }

    fn direct_prerequisites(&self, course_code: &str) -> Result<Vec<String>, FetchError> {
        if self.broken.contains(course_code) {
            return Err(FetchError::Unavailable(course_code.to_string()));
        }
        self.catalog.direct_prerequisites(course_code)
    }

    fn prerequisite_tree(
        &self,
        course_code: &str,
    ) -> Result<Option<PrerequisiteNode>, FetchError> {
        if self.broken.contains(course_code) {
            return Err(FetchError::Unavailable(course_code.to_string()));
        }
        self.catalog.prerequisite_tree(course_code)
    }

    fn prerequisite_relationships(&self) -> Result<HashMap<String, Vec<String>>, FetchError> {
        self.catalog.prerequisite_relationships()
    }
}

#[test]
fn test_failed_tree_lookup_counts_as_eligible() {
    let dir = TempDir::new().expect("temp dir");
    let source = FlakySource {
        catalog: write_catalog(&dir),
        broken: set(&["CSC 4700"]),
        catalog_down: false,
    };

    let eligible = eligible_courses(&source, &HashSet::new());
    assert!(codes(&eligible).contains(&"CSC 4700".to_string()));
}

#[test]
fn test_failed_inference_lookup_is_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let source = FlakySource {
        catalog: write_catalog(&dir),
        broken: set(&["CSC 1052"]),
        catalog_down: false,
    };

    let implied = infer_completed_from(&source, &set(&["CSC 1052", "CSC 4700"]));
    assert_eq!(implied, set(&["CSC 1052", "CSC 4700", "CSC 2400"]));
}

#[test]
fn test_catalog_failure_yields_no_courses() {
    let dir = TempDir::new().expect("temp dir");
    let source = FlakySource {
        catalog: write_catalog(&dir),
        broken: HashSet::new(),
        catalog_down: true,
    };

    assert!(eligible_courses(&source, &HashSet::new()).is_empty());
}

#[test]
fn test_stale_results_are_discarded() {
    let sequencer = RequestSequencer::new();
    let first = sequencer.begin();
    let second = sequencer.begin();

    assert!(!sequencer.is_latest(first));
    assert!(sequencer.try_apply(second));
    assert!(!sequencer.try_apply(first), "Older result must not overwrite newer");
}
