//! Plan command handler

use super::load_configured_catalog;
use crate::args::PlanSubcommand;
use chrono::Datelike;
use nu_planner::config::Config;
use nu_planner::core::models::TermDate;
use nu_planner::core::planner::{
    classify_load, default_setup_dates, suggest_graduation, validate_placement, validate_plan,
    CreditLoad, JsonFileStorage, PlanStore,
};
use nu_planner::{info, warn};
use std::path::PathBuf;

/// Dispatch plan subcommands against the configured plan file.
///
/// # Errors
/// Returns a printable `✗` message when the action cannot be carried out
pub fn run(subcommand: PlanSubcommand, config: &Config, verbose: bool) -> Result<(), String> {
    let mut store = open_store(config)?;

    match subcommand {
        PlanSubcommand::Setup { start, grad } => handle_setup(&mut store, start, grad),
        PlanSubcommand::Show => {
            require_setup(&store)?;
            print_plan(&store, verbose);
            Ok(())
        }
        PlanSubcommand::AddSemester => {
            let semester = store.add_semester().map_err(|e| format!("✗ {e}"))?;
            println!("✓ Added {} {}", semester.season, semester.year);
            Ok(())
        }
        PlanSubcommand::RemoveSemester { semester } => {
            require_setup(&store)?;
            if store.remove_semester(&semester) {
                println!("✓ Removed semester {semester}");
                Ok(())
            } else {
                Err(format!("✗ Unknown semester: {semester}"))
            }
        }
        PlanSubcommand::Place { code, semester } => handle_place(&mut store, config, &code, &semester),
        PlanSubcommand::Remove { instance, semester } => {
            if store.remove_course(&instance, &semester) {
                println!("✓ Removed {instance} from {semester}");
                Ok(())
            } else {
                Err(format!("✗ No placement {instance} in {semester}"))
            }
        }
        PlanSubcommand::Move {
            instance,
            from,
            to,
            index,
        } => {
            if store.move_course(&instance, &from, &to, index.unwrap_or(usize::MAX)) {
                println!("✓ Moved {instance} from {from} to {to}");
                Ok(())
            } else {
                Err(format!("✗ Could not move {instance} from {from} to {to}"))
            }
        }
        PlanSubcommand::Check => handle_check(&store, config),
    }
}

type FileStore = PlanStore<JsonFileStorage>;

fn open_store(config: &Config) -> Result<FileStore, String> {
    if config.paths.plan_file.is_empty() {
        return Err("✗ No plan file configured. Pass --plan-file or set `plan_file`.".to_string());
    }

    let path = PathBuf::from(&config.paths.plan_file);
    info!("Opening plan: {}", path.display());

    let mut store = PlanStore::open(JsonFileStorage::new(path));
    if config.planner.min_credits > 0.0 && config.planner.max_credits > 0.0 {
        store = store.with_credit_bounds(config.planner.min_credits, config.planner.max_credits);
    }
    if config.planner.graduation_credits > 0.0 {
        store = store.with_graduation_credits(config.planner.graduation_credits);
    }
    Ok(store)
}

fn require_setup(store: &FileStore) -> Result<(), String> {
    if store.is_initialized() {
        Ok(())
    } else {
        Err("✗ Plan has not been set up. Run `nuplanner plan setup` first.".to_string())
    }
}

fn handle_setup(
    store: &mut FileStore,
    start: Option<TermDate>,
    grad: Option<TermDate>,
) -> Result<(), String> {
    let (start, grad) = match (start, grad) {
        (Some(start), Some(grad)) => (start, grad),
        (Some(start), None) => (start, suggest_graduation(start)),
        (None, Some(_)) => return Err("✗ --grad requires --start".to_string()),
        (None, None) => default_setup_dates(chrono::Local::now().year()),
    };

    if store.is_initialized() {
        warn!("Replacing existing plan semesters");
    }
    store.set_setup_dates(start, grad);

    println!(
        "✓ Plan set up from {} to {} ({} semesters)",
        start.term(),
        grad.term(),
        store.semesters().len()
    );
    Ok(())
}

fn handle_place(
    store: &mut FileStore,
    config: &Config,
    code: &str,
    semester: &str,
) -> Result<(), String> {
    let catalog = load_configured_catalog(config)?;
    let course = catalog
        .get_course(code)
        .ok_or_else(|| format!("✗ Unknown course code: {code}"))?;

    let instance_id = store
        .place_course(course, semester)
        .map_err(|e| format!("✗ {e}"))?;
    println!("✓ Placed {code} in {semester} ({instance_id})");

    let validation = validate_placement(code, semester, store.semesters(), &catalog);
    if !validation.is_valid {
        println!(
            "  ! Prerequisites not placed earlier: {}",
            validation.missing.join(", ")
        );
    }
    Ok(())
}

fn handle_check(store: &FileStore, config: &Config) -> Result<(), String> {
    require_setup(store)?;
    let catalog = load_configured_catalog(config)?;

    let mut problems = 0;
    for semester in store.semesters() {
        let load = classify_load(semester);
        if load != CreditLoad::Normal {
            problems += 1;
            println!(
                "✗ {} {} is {load}: {} credits (expected {}-{})",
                semester.season,
                semester.year,
                semester.total_credits(),
                semester.min_credits,
                semester.max_credits
            );
        }
    }

    for issue in validate_plan(store.semesters(), &catalog) {
        problems += 1;
        println!(
            "✗ {} in {} is missing prerequisites: {}",
            issue.course_code,
            issue.semester_id,
            issue.missing.join(", ")
        );
    }

    if problems == 0 {
        println!("✓ Plan has no ordering or credit-load problems");
    }
    Ok(())
}

fn print_plan(store: &FileStore, verbose: bool) {
    let plan = store.plan();
    if let Some(setup) = plan.setup_dates {
        println!(
            "\n=== Degree Plan: {} to {} ===",
            setup.start_date.term(),
            setup.grad_date.term()
        );
    }

    for semester in &plan.semesters {
        let load = classify_load(semester);
        let marker = match load {
            CreditLoad::Normal => String::new(),
            other => format!(" [{other}]"),
        };
        println!(
            "\n{} {} ({}) - {} credits{marker}",
            semester.season,
            semester.year,
            semester.id,
            semester.total_credits()
        );
        if verbose {
            println!(
                "  load: {load} (bounds {}-{})",
                semester.min_credits, semester.max_credits
            );
        }
        for placed in &semester.courses {
            println!(
                "  {:<10} {:>4} cr  {}",
                placed.course_code,
                placed.credit_hours(),
                placed.instance_id
            );
        }
    }

    let progress = store.progress();
    println!(
        "\nProgress: {}/{} credits ({:.0}%), {} remaining",
        progress.total_credits,
        progress.graduation_credits,
        progress.fraction() * 100.0,
        progress.remaining()
    );
}
