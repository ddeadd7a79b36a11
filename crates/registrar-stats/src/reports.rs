//! Report rows. Each row serializes flat: its key columns followed by
//! `total`, `male` and `female`.

use registrar_core::models::{Gender, SlotCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub total: u64,
    pub male: u64,
    pub female: u64,
}

impl GenderCounts {
    pub fn record(&mut self, gender: Gender) {
        self.total += 1;
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    pub fn from_genders(genders: impl IntoIterator<Item = Gender>) -> Self {
        let mut counts = Self::default();
        for gender in genders {
            counts.record(gender);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStat {
    pub batch: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterStat {
    pub semester_number: u32,
    pub semester_name: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStat {
    pub subject_code: String,
    pub subject_name: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

/// Per-subject counts for one slot category. Only subjects with at least
/// one enrolled record appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBreakdown {
    pub slot: SlotCategory,
    pub display_name: String,
    pub subjects: Vec<SubjectStat>,
    pub total_enrollments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTotals {
    pub slot: SlotCategory,
    pub display_name: String,
    #[serde(flatten)]
    pub counts: GenderCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterDetail {
    pub semester_number: u32,
    pub overall: GenderCounts,
    pub major_subjects: Vec<SubjectStat>,
    pub minor_subjects: Vec<SubjectStat>,
}

/// Everything the statistics page shows, built from one read of storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub overall: GenderCounts,
    pub by_batch: Vec<BatchStat>,
    pub by_semester: Vec<SemesterStat>,
    /// One entry per slot category, in fixed category order.
    pub slots: Vec<SlotBreakdown>,
    pub slot_summary: Vec<SlotTotals>,
}
