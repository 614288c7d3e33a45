//! Semester, term, and placed-course models

use super::Course;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default minimum credit load for a semester
pub const DEFAULT_MIN_CREDITS: f32 = 12.0;

/// Default maximum credit load for a semester
pub const DEFAULT_MAX_CREDITS: f32 = 18.0;

/// Credit hours assumed for a placed course that does not carry its own value
pub const DEFAULT_CREDIT_HOURS: f32 = 3.0;

/// Academic season. Variant order is the within-year rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// January through May
    Spring,
    /// June and July
    Summer,
    /// August through December
    Fall,
}

impl Season {
    /// Classify a calendar month (1-12) into a season
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            1..=5 => Self::Spring,
            6..=7 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Representative month used when a season has to be turned back into a date
    #[must_use]
    pub const fn representative_month(self) -> u32 {
        match self {
            Self::Spring => 5,
            Self::Summer => 6,
            Self::Fall => 8,
        }
    }

    /// Lowercase name used in semester ids
    #[must_use]
    pub const fn as_id_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

/// A `(season, year)` pair, ordered chronologically
///
/// Field order matters: the derived `Ord` compares `year` first, then season rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    /// Calendar year
    pub year: i32,
    /// Season within the year
    pub season: Season,
}

impl Term {
    /// Create a term
    #[must_use]
    pub const fn new(season: Season, year: i32) -> Self {
        Self { year, season }
    }

    /// Semester id for this term (e.g., `fall-2024`)
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}", self.season.as_id_str(), self.year)
    }

    /// The next regular (non-Summer) term
    ///
    /// Spring is followed by Fall of the same year, Fall by Spring of the next
    /// year. A Summer term is followed by Fall of the same year.
    #[must_use]
    pub const fn next_regular(self) -> Self {
        match self.season {
            Season::Spring | Season::Summer => Self::new(Season::Fall, self.year),
            Season::Fall => Self::new(Season::Spring, self.year + 1),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Years accepted when parsing a [`TermDate`]
pub const TERM_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Calendar month and year used for plan setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDate {
    /// Calendar month (1-12)
    pub month: u32,
    /// Calendar year
    pub year: i32,
}

impl TermDate {
    /// Create a term date
    #[must_use]
    pub const fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// Season this month falls in
    #[must_use]
    pub const fn season(&self) -> Season {
        Season::from_month(self.month)
    }

    /// The term this date falls in
    #[must_use]
    pub const fn term(&self) -> Term {
        Term::new(self.season(), self.year)
    }
}

impl FromStr for TermDate {
    type Err = String;

    /// Parse `M/YYYY` (e.g., `8/2024`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, year) = s
            .split_once('/')
            .ok_or_else(|| format!("Expected MONTH/YEAR, got '{s}'"))?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid month in '{s}'"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Month must be between 1 and 12, got {month}"));
        }
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid year in '{s}'"))?;
        if !TERM_YEARS.contains(&year) {
            return Err(format!(
                "Year must be between {} and {}, got {year}",
                TERM_YEARS.start(),
                TERM_YEARS.end()
            ));
        }
        Ok(Self::new(month, year))
    }
}

/// One placement of a course in a semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCourse {
    /// Unique per placement, never reused
    pub instance_id: String,
    /// Code of the placed course
    pub course_code: String,
    /// Credit hours for this placement, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_hours: Option<f32>,
}

impl PlacedCourse {
    /// Create a placement of `course` with a freshly generated instance id
    #[must_use]
    pub fn for_course(course: &Course) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            course_code: course.course_code.clone(),
            credit_hours: (course.credits > 0.0).then_some(course.credits),
        }
    }

    /// Credit hours, falling back to [`DEFAULT_CREDIT_HOURS`]
    #[must_use]
    pub fn credit_hours(&self) -> f32 {
        self.credit_hours.unwrap_or(DEFAULT_CREDIT_HOURS)
    }
}

/// A dated bucket of placed courses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Derived from season and year (e.g., `spring-2025`)
    pub id: String,
    /// Season of this semester
    pub season: Season,
    /// Calendar year
    pub year: i32,
    /// Placed courses in display order
    #[serde(default)]
    pub courses: Vec<PlacedCourse>,
    /// Lower bound of a normal credit load
    pub min_credits: f32,
    /// Upper bound of a normal credit load
    pub max_credits: f32,
}

impl Semester {
    /// Create an empty semester for `term` with the default credit bounds
    #[must_use]
    pub fn new(term: Term) -> Self {
        Self {
            id: term.id(),
            season: term.season,
            year: term.year,
            courses: Vec::new(),
            min_credits: DEFAULT_MIN_CREDITS,
            max_credits: DEFAULT_MAX_CREDITS,
        }
    }

    /// The `(season, year)` of this semester
    #[must_use]
    pub const fn term(&self) -> Term {
        Term::new(self.season, self.year)
    }

    /// Sum of credit hours across placed courses
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.courses.iter().map(PlacedCourse::credit_hours).sum()
    }

    /// Position of a placement in this semester
    #[must_use]
    pub fn position_of(&self, instance_id: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.instance_id == instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_month() {
        for month in 1..=5 {
            assert_eq!(Season::from_month(month), Season::Spring);
        }
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(7), Season::Summer);
        for month in 8..=12 {
            assert_eq!(Season::from_month(month), Season::Fall);
        }
    }

    #[test]
    fn test_term_ordering() {
        let spring = Term::new(Season::Spring, 2025);
        let summer = Term::new(Season::Summer, 2025);
        let fall = Term::new(Season::Fall, 2024);

        assert!(fall < spring);
        assert!(spring < summer);
        assert!(summer < Term::new(Season::Fall, 2025));
    }

    #[test]
    fn test_next_regular_skips_summer() {
        assert_eq!(
            Term::new(Season::Spring, 2025).next_regular(),
            Term::new(Season::Fall, 2025)
        );
        assert_eq!(
            Term::new(Season::Fall, 2025).next_regular(),
            Term::new(Season::Spring, 2026)
        );
        assert_eq!(
            Term::new(Season::Summer, 2025).next_regular(),
            Term::new(Season::Fall, 2025)
        );
    }

    #[test]
    fn test_term_id() {
        assert_eq!(Term::new(Season::Fall, 2024).id(), "fall-2024");
        assert_eq!(Term::new(Season::Summer, 2026).to_string(), "Summer 2026");
    }

    #[test]
    fn test_term_date_parse() {
        assert_eq!("8/2024".parse::<TermDate>(), Ok(TermDate::new(8, 2024)));
        assert!("13/2024".parse::<TermDate>().is_err());
        assert!("2024".parse::<TermDate>().is_err());
        assert_eq!(
            TermDate::new(6, 2025).term(),
            Term::new(Season::Summer, 2025)
        );
    }

    #[test]
    fn test_term_date_rejects_out_of_range_years() {
        assert!("8/2147483647".parse::<TermDate>().is_err());
        assert!("8/1899".parse::<TermDate>().is_err());
        assert!("8/10000".parse::<TermDate>().is_err());
        assert_eq!("5/9999".parse::<TermDate>(), Ok(TermDate::new(5, 9999)));
    }

    #[test]
    fn test_placed_course_credits() {
        let course = Course::new("MAT 1500".to_string(), "Calculus I".to_string(), 4.0);
        let placed = PlacedCourse::for_course(&course);
        assert!((placed.credit_hours() - 4.0).abs() < f32::EPSILON);

        let uncredited = Course::new("CSC 1000".to_string(), "Seminar".to_string(), 0.0);
        let placed = PlacedCourse::for_course(&uncredited);
        assert!(placed.credit_hours.is_none());
        assert!((placed.credit_hours() - DEFAULT_CREDIT_HOURS).abs() < f32::EPSILON);
    }

    #[test]
    fn test_instance_ids_unique() {
        let course = Course::new("MAT 1500".to_string(), "Calculus I".to_string(), 4.0);
        let first = PlacedCourse::for_course(&course);
        let second = PlacedCourse::for_course(&course);
        assert_ne!(first.instance_id, second.instance_id);
    }

    #[test]
    fn test_semester_defaults() {
        let semester = Semester::new(Term::new(Season::Spring, 2025));
        assert_eq!(semester.id, "spring-2025");
        assert!(semester.courses.is_empty());
        assert!((semester.min_credits - 12.0).abs() < f32::EPSILON);
        assert!((semester.max_credits - 18.0).abs() < f32::EPSILON);
        assert!(semester.total_credits().abs() < f32::EPSILON);
    }
}
