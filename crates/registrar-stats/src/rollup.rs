//! Pure grouping over fact rows. The aggregator feeds these from storage;
//! tests feed them directly.

use std::collections::{BTreeMap, HashMap};

use registrar_core::models::{EnrollmentFact, SlotCategory, StudentFact, SubjectId, SubjectRef};

use crate::reports::{
    BatchStat, GenderCounts, SemesterDetail, SemesterStat, SlotBreakdown, SlotTotals, SubjectStat,
};

pub fn overall(students: &[StudentFact]) -> GenderCounts {
    GenderCounts::from_genders(students.iter().map(|s| s.gender))
}

/// Ascending by batch label.
pub fn by_batch(students: &[StudentFact]) -> Vec<BatchStat> {
    let mut groups: BTreeMap<&str, GenderCounts> = BTreeMap::new();
    for student in students {
        groups.entry(student.batch.as_str()).or_default().record(student.gender);
    }
    groups
        .into_iter()
        .map(|(batch, counts)| BatchStat {
            batch: batch.to_string(),
            counts,
        })
        .collect()
}

/// Ascending by semester number. Semesters without records are absent.
pub fn by_semester(enrollments: &[EnrollmentFact]) -> Vec<SemesterStat> {
    let mut groups: BTreeMap<u32, (&str, GenderCounts)> = BTreeMap::new();
    for fact in enrollments {
        groups
            .entry(fact.semester_number)
            .or_insert_with(|| (fact.semester_name.as_str(), GenderCounts::default()))
            .1
            .record(fact.gender);
    }
    groups
        .into_iter()
        .map(|(semester_number, (name, counts))| SemesterStat {
            semester_number,
            semester_name: name.to_string(),
            counts,
        })
        .collect()
}

/// Records with `slot` filled, grouped by subject, ascending by subject name.
pub fn subjects_in_slot(enrollments: &[EnrollmentFact], slot: SlotCategory) -> Vec<SubjectStat> {
    let mut groups: HashMap<SubjectId, (&SubjectRef, GenderCounts)> = HashMap::new();
    for fact in enrollments {
        if let Some(subject) = fact.slots.get(slot) {
            groups
                .entry(subject.id)
                .or_insert_with(|| (subject, GenderCounts::default()))
                .1
                .record(fact.gender);
        }
    }
    let mut rows: Vec<SubjectStat> = groups
        .into_values()
        .map(|(subject, counts)| SubjectStat {
            subject_code: subject.subject_code.clone(),
            subject_name: subject.subject_name.clone(),
            counts,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.subject_name
            .cmp(&b.subject_name)
            .then_with(|| a.subject_code.cmp(&b.subject_code))
    });
    rows
}

pub fn slot_breakdown(enrollments: &[EnrollmentFact], slot: SlotCategory) -> SlotBreakdown {
    let subjects = subjects_in_slot(enrollments, slot);
    let total_enrollments = subjects.iter().map(|s| s.counts.total).sum();
    SlotBreakdown {
        slot,
        display_name: slot.display_name().to_string(),
        subjects,
        total_enrollments,
    }
}

/// One row per slot category in fixed order, zero rows included.
pub fn slot_summary(enrollments: &[EnrollmentFact]) -> Vec<SlotTotals> {
    SlotCategory::ALL
        .into_iter()
        .map(|slot| SlotTotals {
            slot,
            display_name: slot.display_name().to_string(),
            counts: GenderCounts::from_genders(
                enrollments
                    .iter()
                    .filter(|fact| fact.slots.get(slot).is_some())
                    .map(|fact| fact.gender),
            ),
        })
        .collect()
}

/// Expects facts already restricted to `semester_number`.
pub fn semester_detail(semester_number: u32, enrollments: &[EnrollmentFact]) -> SemesterDetail {
    SemesterDetail {
        semester_number,
        overall: GenderCounts::from_genders(enrollments.iter().map(|f| f.gender)),
        major_subjects: subjects_in_slot(enrollments, SlotCategory::Major),
        minor_subjects: subjects_in_slot(enrollments, SlotCategory::Minor),
    }
}
