//! # registrar-stats
//!
//! Enrollment statistics. Every report is recomputed from storage on each
//! call; nothing is cached. Counts are per enrollment record, so a student
//! enrolled in two semesters counts twice in subject and slot reports.

pub mod aggregator;
pub mod reports;
pub mod rollup;

pub use aggregator::StatisticsAggregator;
pub use reports::{
    BatchStat, DashboardSnapshot, GenderCounts, SemesterDetail, SemesterStat, SlotBreakdown,
    SlotTotals, SubjectStat,
};
