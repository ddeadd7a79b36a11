//! Statistics over active students and their enrolled records.

use registrar_core::errors::RegistrarResult;
use registrar_core::models::{EnrollmentFact, SlotCategory, StudentFact};
use registrar_core::traits::IRegistrarStorage;
use tracing::debug;

use crate::reports::{
    BatchStat, DashboardSnapshot, GenderCounts, SemesterDetail, SemesterStat, SlotBreakdown,
    SlotTotals,
};
use crate::rollup;

/// Read-only. Inactive students and records with `is_enrolled = false` are
/// filtered out by storage before any grouping happens.
pub struct StatisticsAggregator<'a> {
    storage: &'a dyn IRegistrarStorage,
}

impl<'a> StatisticsAggregator<'a> {
    pub fn new(storage: &'a dyn IRegistrarStorage) -> Self {
        Self { storage }
    }

    fn students(&self) -> RegistrarResult<Vec<StudentFact>> {
        self.storage.active_student_facts()
    }

    fn enrollments(&self, semester_number: Option<u32>) -> RegistrarResult<Vec<EnrollmentFact>> {
        self.storage.enrollment_facts(semester_number)
    }

    pub fn overall_counts(&self) -> RegistrarResult<GenderCounts> {
        Ok(rollup::overall(&self.students()?))
    }

    pub fn by_batch(&self) -> RegistrarResult<Vec<BatchStat>> {
        Ok(rollup::by_batch(&self.students()?))
    }

    pub fn by_semester(&self) -> RegistrarResult<Vec<SemesterStat>> {
        Ok(rollup::by_semester(&self.enrollments(None)?))
    }

    pub fn by_subject_slot(&self, slot: SlotCategory) -> RegistrarResult<SlotBreakdown> {
        Ok(rollup::slot_breakdown(&self.enrollments(None)?, slot))
    }

    pub fn slot_summary(&self) -> RegistrarResult<Vec<SlotTotals>> {
        Ok(rollup::slot_summary(&self.enrollments(None)?))
    }

    /// An unknown semester number yields an all-zero report.
    pub fn semester_detail(&self, semester_number: u32) -> RegistrarResult<SemesterDetail> {
        let facts = self.enrollments(Some(semester_number))?;
        debug!(semester_number, records = facts.len(), "semester detail");
        Ok(rollup::semester_detail(semester_number, &facts))
    }

    /// All dashboard reports from a single read of each fact set.
    pub fn dashboard(&self) -> RegistrarResult<DashboardSnapshot> {
        let students = self.students()?;
        let enrollments = self.enrollments(None)?;
        debug!(
            students = students.len(),
            enrollments = enrollments.len(),
            "building statistics dashboard"
        );

        Ok(DashboardSnapshot {
            overall: rollup::overall(&students),
            by_batch: rollup::by_batch(&students),
            by_semester: rollup::by_semester(&enrollments),
            slots: SlotCategory::ALL
                .into_iter()
                .map(|slot| rollup::slot_breakdown(&enrollments, slot))
                .collect(),
            slot_summary: rollup::slot_summary(&enrollments),
        })
    }
}
