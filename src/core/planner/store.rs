//! Degree plan state machine
//!
//! `PlanStore` owns the live [`DegreePlan`], its undo/redo history and the
//! storage it is written through. Every structural mutation records the
//! pre-mutation semesters in history and then persists the plan.

use super::history::{HistoryManager, HISTORY_LIMIT};
use super::sequence::generate_semesters;
use super::storage::PlanStorage;
use crate::core::catalog::CatalogFilter;
use crate::core::error::PlanError;
use crate::core::models::semester::{DEFAULT_MAX_CREDITS, DEFAULT_MIN_CREDITS};
use crate::core::models::{
    Course, DegreePlan, PersistedPlan, PlacedCourse, Season, Semester, SetupDates, TermDate,
};
use std::collections::HashSet;

/// Credits required to graduate unless configured otherwise
pub const DEFAULT_GRADUATION_CREDITS: f32 = 120.0;

/// Credit progress toward graduation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanProgress {
    /// Credits across every placed course
    pub total_credits: f32,
    /// Credits required to graduate
    pub graduation_credits: f32,
    /// Number of placed courses
    pub course_count: usize,
}

impl PlanProgress {
    /// Share of the graduation target reached, capped at 1.0
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.graduation_credits <= 0.0 {
            return 1.0;
        }
        (self.total_credits / self.graduation_credits).min(1.0)
    }

    /// Credits still needed, never negative
    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.graduation_credits - self.total_credits).max(0.0)
    }
}

/// Owner of the live degree plan
#[derive(Debug)]
pub struct PlanStore<S: PlanStorage> {
    plan: DegreePlan,
    history: HistoryManager,
    storage: S,
    min_credits: f32,
    max_credits: f32,
    graduation_credits: f32,
}

impl<S: PlanStorage> PlanStore<S> {
    /// Open a store, restoring whatever `storage` holds
    ///
    /// Missing or malformed stored state yields an uninitialized plan.
    pub fn open(storage: S) -> Self {
        let plan = match storage.load() {
            Ok(Some(stored)) => DegreePlan::from(stored),
            Ok(None) => DegreePlan::default(),
            Err(e) => {
                crate::warn!("Discarding stored plan: {e}");
                DegreePlan::default()
            }
        };

        Self {
            plan,
            // one slot beyond the limit holds the live plan once undo starts
            history: HistoryManager::with_limit(HISTORY_LIMIT + 1),
            storage,
            min_credits: DEFAULT_MIN_CREDITS,
            max_credits: DEFAULT_MAX_CREDITS,
            graduation_credits: DEFAULT_GRADUATION_CREDITS,
        }
    }

    /// Use `min`/`max` as the credit bounds for semesters created from now on
    #[must_use]
    pub fn with_credit_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_credits = min;
        self.max_credits = max;
        self
    }

    /// Use `credits` as the graduation target for [`progress`](Self::progress)
    #[must_use]
    pub fn with_graduation_credits(mut self, credits: f32) -> Self {
        self.graduation_credits = credits;
        self
    }

    /// The live plan
    #[must_use]
    pub const fn plan(&self) -> &DegreePlan {
        &self.plan
    }

    /// Semesters in plan order
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.plan.semesters
    }

    /// Whether setup dates have been supplied
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.plan.is_initialized()
    }

    /// Undo/redo history
    #[must_use]
    pub const fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// The storage the plan is written through
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Set setup dates and regenerate every semester
    ///
    /// Existing placements and history are discarded.
    pub fn set_setup_dates(&mut self, start: TermDate, grad: TermDate) {
        let mut semesters = generate_semesters(start, grad);
        for semester in &mut semesters {
            self.apply_bounds(semester);
        }
        crate::info!(
            "Generated {} semesters from {} to {}",
            semesters.len(),
            start.term(),
            grad.term()
        );

        self.plan.semesters = semesters;
        self.plan.setup_dates = Some(SetupDates::new(start, grad));
        self.history.clear();
        self.persist();
    }

    /// Append the next regular term after the last semester
    ///
    /// An initialized plan with no semesters gets its start term back.
    ///
    /// # Errors
    /// Returns [`PlanError::NotInitialized`] if setup dates are missing
    pub fn add_semester(&mut self) -> Result<&Semester, PlanError> {
        let setup = self.plan.setup_dates.ok_or(PlanError::NotInitialized)?;

        let term = self.plan.semesters.last().map_or_else(
            || {
                let start = setup.start_date.term();
                if start.season == Season::Summer {
                    start.next_regular()
                } else {
                    start
                }
            },
            |last| last.term().next_regular(),
        );

        let mut semester = Semester::new(term);
        self.apply_bounds(&mut semester);

        self.record();
        self.plan.semesters.push(semester);
        self.persist();

        let index = self.plan.semesters.len() - 1;
        Ok(&self.plan.semesters[index])
    }

    /// Remove a semester and everything placed in it
    ///
    /// # Returns
    /// `false` (and no history entry) if no semester has that id
    pub fn remove_semester(&mut self, semester_id: &str) -> bool {
        let Some(index) = self.plan.semester_index(semester_id) else {
            return false;
        };

        self.record();
        self.plan.semesters.remove(index);
        self.persist();
        true
    }

    /// Place `course` at the end of a semester
    ///
    /// # Returns
    /// The new placement's instance id
    ///
    /// # Errors
    /// Returns [`PlanError::NotInitialized`] before setup, or
    /// [`PlanError::UnknownSemester`] if `semester_id` is not in the plan
    pub fn place_course(&mut self, course: &Course, semester_id: &str) -> Result<String, PlanError> {
        if !self.plan.is_initialized() {
            return Err(PlanError::NotInitialized);
        }
        let index = self
            .plan
            .semester_index(semester_id)
            .ok_or_else(|| PlanError::UnknownSemester(semester_id.to_string()))?;

        let placed = PlacedCourse::for_course(course);
        let instance_id = placed.instance_id.clone();

        self.record();
        self.plan.semesters[index].courses.push(placed);
        self.persist();

        Ok(instance_id)
    }

    /// Remove one placement
    ///
    /// # Returns
    /// `false` (and no history entry) if the placement is not in that semester
    pub fn remove_course(&mut self, instance_id: &str, semester_id: &str) -> bool {
        let Some(index) = self.plan.semester_index(semester_id) else {
            return false;
        };
        let Some(position) = self.plan.semesters[index].position_of(instance_id) else {
            return false;
        };

        self.record();
        self.plan.semesters[index].courses.remove(position);
        self.persist();
        true
    }

    /// Move a placement to `target_index` in another (or the same) semester
    ///
    /// Either the whole move happens or nothing does. `target_index` past the
    /// end of the destination appends.
    ///
    /// # Returns
    /// `false` if the placement or the destination cannot be found
    pub fn move_course(
        &mut self,
        instance_id: &str,
        from_semester_id: &str,
        to_semester_id: &str,
        target_index: usize,
    ) -> bool {
        let Some(from) = self.plan.semester_index(from_semester_id) else {
            return false;
        };
        let Some(position) = self.plan.semesters[from].position_of(instance_id) else {
            return false;
        };
        let Some(to) = self.plan.semester_index(to_semester_id) else {
            return false;
        };

        self.record();
        let placed = self.plan.semesters[from].courses.remove(position);
        let destination = &mut self.plan.semesters[to].courses;
        let index = target_index.min(destination.len());
        destination.insert(index, placed);
        self.persist();
        true
    }

    /// Total credits placed in a semester, 0 for an unknown id
    #[must_use]
    pub fn semester_credits(&self, semester_id: &str) -> f32 {
        self.plan
            .semester(semester_id)
            .map_or(0.0, Semester::total_credits)
    }

    /// Restore the previous semesters
    ///
    /// Up to [`HISTORY_LIMIT`] consecutive mutations can be undone.
    ///
    /// # Returns
    /// `true` if the plan changed
    pub fn undo(&mut self) -> bool {
        if self.history.is_at_tip() {
            // keep the live state reachable through redo
            self.history.push(&self.plan.semesters);
        }
        self.restore(HistoryManager::undo)
    }

    /// Re-apply an undone change
    ///
    /// # Returns
    /// `true` if the plan changed
    pub fn redo(&mut self) -> bool {
        self.restore(HistoryManager::redo)
    }

    /// Whether [`undo`](Self::undo) would change the plan
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
            || (self.history.is_at_tip()
                && self
                    .history
                    .current()
                    .is_some_and(|entry| entry.snapshot != self.plan.semesters))
    }

    /// Whether [`redo`](Self::redo) would change the plan
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the catalog filter (no history entry)
    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.plan.filter = filter;
        self.persist();
    }

    /// Replace only the search text of the filter (no history entry)
    pub fn set_search(&mut self, search: &str) {
        self.plan.filter.search = search.to_string();
        self.persist();
    }

    /// Codes of every placed course
    #[must_use]
    pub fn placed_course_codes(&self) -> HashSet<String> {
        self.plan.placed_course_codes()
    }

    /// Credit progress toward graduation
    #[must_use]
    pub fn progress(&self) -> PlanProgress {
        PlanProgress {
            total_credits: self.plan.total_credits(),
            graduation_credits: self.graduation_credits,
            course_count: self.plan.course_count(),
        }
    }

    fn restore(&mut self, step: fn(&mut HistoryManager) -> Option<Vec<Semester>>) -> bool {
        let Some(semesters) = step(&mut self.history) else {
            return false;
        };
        self.plan.semesters = semesters;
        self.persist();
        true
    }

    fn apply_bounds(&self, semester: &mut Semester) {
        semester.min_credits = self.min_credits;
        semester.max_credits = self.max_credits;
    }

    fn record(&mut self) {
        self.history.push(&self.plan.semesters);
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&PersistedPlan::from(&self.plan)) {
            crate::error!("Failed to save plan: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planner::storage::InMemoryStorage;

    fn course(code: &str, credits: f32) -> Course {
        Course::new(code.to_string(), code.to_string(), credits)
    }

    fn store() -> PlanStore<InMemoryStorage> {
        let mut store = PlanStore::open(InMemoryStorage::new());
        store.set_setup_dates(TermDate::new(8, 2024), TermDate::new(5, 2026));
        store
    }

    #[test]
    fn test_open_empty_is_uninitialized() {
        let store = PlanStore::open(InMemoryStorage::new());
        assert!(!store.is_initialized());
        assert!(store.semesters().is_empty());
    }

    #[test]
    fn test_open_malformed_is_uninitialized() {
        let store = PlanStore::open(InMemoryStorage::with_raw("{\"semesters\": 7"));
        assert!(!store.is_initialized());
        assert!(store.semesters().is_empty());
    }

    #[test]
    fn test_setup_generates_semesters() {
        let store = store();
        let ids: Vec<&str> = store.semesters().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["fall-2024", "spring-2025", "fall-2025", "spring-2026"]);
        assert!(store.storage().save_count() >= 1);
    }

    #[test]
    fn test_uninitialized_rejects_mutations() {
        let mut store = PlanStore::open(InMemoryStorage::new());
        assert_eq!(store.add_semester().unwrap_err(), PlanError::NotInitialized);
        assert_eq!(
            store.place_course(&course("CSC 1051", 4.0), "fall-2024"),
            Err(PlanError::NotInitialized)
        );
    }

    #[test]
    fn test_add_semester_skips_summer() {
        let mut store = store();
        assert_eq!(store.add_semester().unwrap().id, "fall-2026");
        assert_eq!(store.add_semester().unwrap().id, "spring-2027");
    }

    #[test]
    fn test_add_semester_after_removing_all() {
        let mut store = store();
        let ids: Vec<String> = store.semesters().iter().map(|s| s.id.clone()).collect();
        for id in ids {
            assert!(store.remove_semester(&id));
        }
        assert_eq!(store.add_semester().unwrap().id, "fall-2024");
    }

    #[test]
    fn test_place_and_credits() {
        let mut store = store();
        store.place_course(&course("CSC 1051", 4.0), "fall-2024").unwrap();
        store.place_course(&course("CSC 1000", 0.0), "fall-2024").unwrap();

        assert!((store.semester_credits("fall-2024") - 7.0).abs() < f32::EPSILON);
        assert!(store.semester_credits("nope").abs() < f32::EPSILON);
        assert_eq!(
            store.place_course(&course("CSC 1051", 4.0), "summer-2099"),
            Err(PlanError::UnknownSemester("summer-2099".to_string()))
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store();
        let writes = store.storage().save_count();
        assert!(!store.remove_course("missing", "fall-2024"));
        assert!(!store.remove_semester("summer-1999"));
        assert!(store.history().is_empty());
        assert_eq!(store.storage().save_count(), writes);
    }

    #[test]
    fn test_move_between_semesters() {
        let mut store = store();
        let a = store.place_course(&course("A 1", 3.0), "fall-2024").unwrap();
        let b = store.place_course(&course("B 1", 3.0), "spring-2025").unwrap();

        assert!(store.move_course(&a, "fall-2024", "spring-2025", 0));
        let spring = store.plan().semester("spring-2025").unwrap();
        assert_eq!(spring.courses[0].instance_id, a);
        assert_eq!(spring.courses[1].instance_id, b);
        assert!(store.plan().semester("fall-2024").unwrap().courses.is_empty());
    }

    #[test]
    fn test_move_clamps_index_and_reorders() {
        let mut store = store();
        let a = store.place_course(&course("A 1", 3.0), "fall-2024").unwrap();
        let b = store.place_course(&course("B 1", 3.0), "fall-2024").unwrap();

        assert!(store.move_course(&a, "fall-2024", "fall-2024", 99));
        let fall = store.plan().semester("fall-2024").unwrap();
        assert_eq!(fall.courses[0].instance_id, b);
        assert_eq!(fall.courses[1].instance_id, a);
    }

    #[test]
    fn test_move_to_unknown_destination_changes_nothing() {
        let mut store = store();
        let a = store.place_course(&course("A 1", 3.0), "fall-2024").unwrap();
        let before = store.plan().clone();
        let history_len = store.history().len();

        assert!(!store.move_course(&a, "fall-2024", "summer-2030", 0));
        assert!(!store.move_course("ghost", "fall-2024", "spring-2025", 0));
        assert_eq!(store.plan(), &before);
        assert_eq!(store.history().len(), history_len);
    }

    #[test]
    fn test_undo_redo_single_mutation() {
        let mut store = store();
        let before = store.semesters().to_vec();
        assert!(!store.can_undo());

        store.place_course(&course("CSC 1051", 4.0), "fall-2024").unwrap();
        let after = store.semesters().to_vec();
        assert!(store.can_undo());

        assert!(store.undo());
        assert_eq!(store.semesters(), before.as_slice());
        assert!(store.can_redo());

        assert!(store.redo());
        assert_eq!(store.semesters(), after.as_slice());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_mutation_after_undo_drops_redo() {
        let mut store = store();
        store.place_course(&course("A 1", 3.0), "fall-2024").unwrap();
        store.place_course(&course("B 1", 3.0), "fall-2024").unwrap();

        assert!(store.undo());
        store.place_course(&course("C 1", 3.0), "spring-2025").unwrap();
        assert!(!store.can_redo());

        assert!(store.undo());
        let codes = store.placed_course_codes();
        assert!(codes.contains("A 1"));
        assert!(!codes.contains("B 1"));
        assert!(!codes.contains("C 1"));
    }

    #[test]
    fn test_full_history_undoes_to_empty() {
        let mut store = store();
        for _ in 0..HISTORY_LIMIT {
            store
                .place_course(&course("GEN 1000", 1.0), "fall-2024")
                .unwrap();
        }

        let mut undone = 0;
        while store.undo() {
            undone += 1;
        }

        assert_eq!(undone, HISTORY_LIMIT);
        assert!(store.semesters()[0].courses.is_empty());
    }

    #[test]
    fn test_filter_changes_skip_history() {
        let mut store = store();
        store.set_filter(CatalogFilter {
            department: "CSC".to_string(),
            ..CatalogFilter::default()
        });
        store.set_search("algo");

        assert!(store.history().is_empty());
        assert_eq!(store.plan().filter.department, "CSC");
        assert_eq!(store.plan().filter.search, "algo");
    }

    #[test]
    fn test_progress() {
        let mut store = store().with_graduation_credits(10.0);
        store.place_course(&course("A 1", 4.0), "fall-2024").unwrap();
        assert!((store.progress().fraction() - 0.4).abs() < 1e-6);

        store.place_course(&course("B 1", 8.0), "spring-2025").unwrap();
        let progress = store.progress();
        assert!((progress.fraction() - 1.0).abs() < f32::EPSILON);
        assert!(progress.remaining().abs() < f32::EPSILON);
        assert_eq!(progress.course_count, 2);
    }

    #[test]
    fn test_credit_bounds_apply_to_new_semesters() {
        let mut store = PlanStore::open(InMemoryStorage::new()).with_credit_bounds(9.0, 15.0);
        store.set_setup_dates(TermDate::new(8, 2024), TermDate::new(5, 2025));
        assert!(store
            .semesters()
            .iter()
            .all(|s| (s.max_credits - 15.0).abs() < f32::EPSILON));
    }
}
