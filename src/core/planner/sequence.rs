//! Term sequence generation

use crate::core::models::{Season, Semester, Term, TermDate};
use chrono::Datelike;

/// Number of regular terms between the start term and the suggested graduation term
pub const TERMS_TO_GRADUATION: usize = 7;

/// Generate the semesters from `start` through `grad`
///
/// A Summer start is moved to Fall of the same year. Regular terms (Spring and
/// Fall) are emitted while they strictly precede the graduation term, then the
/// graduation term itself is appended, which is the only way a Summer semester
/// enters the sequence.
///
/// # Arguments
/// * `start` - First month of study
/// * `grad` - Graduation month
///
/// # Returns
/// Semesters in chronological order, never empty
#[must_use]
pub fn generate_semesters(start: TermDate, grad: TermDate) -> Vec<Semester> {
    let grad_term = grad.term();
    let mut current = normalize_start(start.term());
    let mut semesters = Vec::new();

    while current < grad_term {
        semesters.push(Semester::new(current));
        current = current.next_regular();
    }
    semesters.push(Semester::new(grad_term));

    semesters
}

/// Four-year default plan starting in Fall of the current calendar year
#[must_use]
pub fn generate_default_semesters() -> Vec<Semester> {
    generate_default_semesters_for_year(chrono::Local::now().year())
}

/// Four-year default plan from Fall `year` through Spring `year + 4`
#[must_use]
pub fn generate_default_semesters_for_year(year: i32) -> Vec<Semester> {
    let (start, grad) = default_setup_dates(year);
    generate_semesters(start, grad)
}

/// Default setup dates for a student starting in Fall `year`
#[must_use]
pub const fn default_setup_dates(year: i32) -> (TermDate, TermDate) {
    (
        TermDate::new(Season::Fall.representative_month(), year),
        TermDate::new(Season::Spring.representative_month(), year + 4),
    )
}

/// Suggest a graduation date seven regular terms after `start`
///
/// # Returns
/// May of the resulting year for a Spring graduation, August for Fall
#[must_use]
pub fn suggest_graduation(start: TermDate) -> TermDate {
    let mut term = normalize_start(start.term());
    for _ in 0..TERMS_TO_GRADUATION {
        term = term.next_regular();
    }
    TermDate::new(term.season.representative_month(), term.year)
}

const fn normalize_start(term: Term) -> Term {
    match term.season {
        Season::Summer => Term::new(Season::Fall, term.year),
        _ => term,
    }
}
