//! Eligibility evaluation: Eligible or CoolingDown, from dates alone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per (student, certificate type) issuance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    CoolingDown {
        last_issue_date: NaiveDate,
        remaining_days: u32,
    },
}

impl Eligibility {
    /// Evaluate the cooldown rule.
    ///
    /// Eligible when nothing was issued before, or when at least
    /// `cooldown_days` whole days separate `last_issue_date` and `today`.
    /// Otherwise `remaining_days = cooldown_days - days_since`.
    /// A last issue date after `today` counts as zero days elapsed.
    pub fn evaluate(
        last_issue_date: Option<NaiveDate>,
        today: NaiveDate,
        cooldown_days: u32,
    ) -> Self {
        let Some(last) = last_issue_date else {
            return Self::Eligible;
        };
        let days_since = days_between(last, today);
        if days_since >= i64::from(cooldown_days) {
            Self::Eligible
        } else {
            Self::CoolingDown {
                last_issue_date: last,
                remaining_days: cooldown_days - days_since as u32,
            }
        }
    }

    pub fn can_issue(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    pub fn remaining_days(&self) -> u32 {
        match self {
            Self::Eligible => 0,
            Self::CoolingDown { remaining_days, .. } => *remaining_days,
        }
    }
}

/// Whole days from `from` to `to`, never negative.
fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}

/// Display-ready eligibility for one student and certificate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub can_issue: bool,
    pub last_issue_date: Option<NaiveDate>,
    pub days_since: Option<i64>,
    pub remaining_days: u32,
}

impl EligibilityReport {
    pub fn build(
        last_issue_date: Option<NaiveDate>,
        today: NaiveDate,
        cooldown_days: Option<u32>,
    ) -> Self {
        let eligibility = match cooldown_days {
            Some(days) => Eligibility::evaluate(last_issue_date, today, days),
            None => Eligibility::Eligible,
        };
        Self {
            can_issue: eligibility.can_issue(),
            last_issue_date,
            days_since: last_issue_date.map(|last| days_between(last, today)),
            remaining_days: eligibility.remaining_days(),
        }
    }
}
