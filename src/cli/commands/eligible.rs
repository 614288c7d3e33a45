//! Eligible command handler

use super::load_configured_catalog;
use nu_planner::config::Config;
use nu_planner::core::catalog::CatalogFilter;
use nu_planner::core::eligibility::{eligible_given_implied, infer_completed_from};
use nu_planner::info;
use std::collections::HashSet;

/// List courses the student may take next.
///
/// # Arguments
/// * `completed` - Course codes marked complete
/// * `show_implied` - Also print the completed set after inference
/// * `department` / `search` - Optional listing filters
/// * `config` - Configuration naming the catalog file
///
/// # Errors
/// Returns a printable message if the catalog cannot be loaded
pub fn run(
    completed: &[String],
    show_implied: bool,
    department: Option<&str>,
    search: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let catalog = load_configured_catalog(config)?;
    info!("Catalog loaded: {} courses", catalog.course_count());

    let explicit: HashSet<String> = completed.iter().map(|c| c.trim().to_string()).collect();
    for code in &explicit {
        if catalog.get_course(code).is_none() {
            eprintln!("✗ Unknown course code: {code}");
        }
    }

    let implied = infer_completed_from(&catalog, &explicit);
    if show_implied {
        let mut codes: Vec<&String> = implied.iter().collect();
        codes.sort();
        println!("\n=== Completed (including inferred) ===\n");
        for code in codes {
            let marker = if explicit.contains(code) { "" } else { " (inferred)" };
            println!("  {code}{marker}");
        }
    }

    let eligible = eligible_given_implied(&catalog, &implied);
    let filter = CatalogFilter {
        department: department.unwrap_or_default().to_string(),
        search: search.unwrap_or_default().to_string(),
        ..CatalogFilter::default()
    };
    let listed = filter.apply(&eligible);

    println!("\n=== Eligible Courses ({}) ===\n", listed.len());
    for course in listed {
        println!(
            "  {:<10} {:<45} {:>4} cr",
            course.course_code, course.course_name, course.credits
        );
        if let Some(logic) = &course.prerequisite_logic {
            println!("  {:<10} requires: {logic}", "");
        }
    }

    Ok(())
}
