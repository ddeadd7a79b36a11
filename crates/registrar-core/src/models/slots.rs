//! The eight subject-assignment buckets of an enrollment record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::CourseType;

/// One of the fixed subject slots on an enrollment record.
/// Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    #[serde(rename = "major_course")]
    Major,
    #[serde(rename = "minor_course")]
    Minor,
    Md1,
    Md2,
    Skill,
    Vac1,
    Vac2,
    Aec,
}

impl SlotCategory {
    pub const COUNT: usize = 8;

    pub const ALL: [SlotCategory; Self::COUNT] = [
        Self::Major,
        Self::Minor,
        Self::Md1,
        Self::Md2,
        Self::Skill,
        Self::Vac1,
        Self::Vac2,
        Self::Aec,
    ];

    /// Position in `ALL` and in every `SlotMap`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Storage key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Self::Major => "major_course",
            Self::Minor => "minor_course",
            Self::Md1 => "md1",
            Self::Md2 => "md2",
            Self::Skill => "skill",
            Self::Vac1 => "vac1",
            Self::Vac2 => "vac2",
            Self::Aec => "aec",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Major => "Major Courses",
            Self::Minor => "Minor Courses",
            Self::Md1 => "Multidisciplinary 1",
            Self::Md2 => "Multidisciplinary 2",
            Self::Skill => "Skill Enhancement",
            Self::Vac1 => "Value Added Course 1",
            Self::Vac2 => "Value Added Course 2",
            Self::Aec => "Ability Enhancement Course",
        }
    }

    /// The only course type this slot accepts.
    pub fn course_type(self) -> CourseType {
        match self {
            Self::Major => CourseType::Major,
            Self::Minor => CourseType::Minor,
            Self::Md1 => CourseType::Multidisciplinary1,
            Self::Md2 => CourseType::Multidisciplinary2,
            Self::Skill => CourseType::SkillEnhancement,
            Self::Vac1 => CourseType::ValueAdded1,
            Self::Vac2 => CourseType::ValueAdded2,
            Self::Aec => CourseType::AbilityEnhancement,
        }
    }

    pub fn accepts(self, course_type: CourseType) -> bool {
        self.course_type() == course_type
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SlotCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key() == s)
            .ok_or_else(|| format!("unknown slot category: {s}"))
    }
}

/// Fixed-size mapping from slot category to an optional value.
/// Each slot is independently nullable and independently settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotMap<T> {
    slots: [Option<T>; SlotCategory::COUNT],
}

impl<T> SlotMap<T> {
    pub fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, slot: SlotCategory) -> Option<&T> {
        self.slots[slot.index()].as_ref()
    }

    /// Replace the value in `slot`, returning the previous one.
    pub fn set(&mut self, slot: SlotCategory, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.slots[slot.index()], value)
    }

    /// Builder form of `set`.
    pub fn with(mut self, slot: SlotCategory, value: T) -> Self {
        self.slots[slot.index()] = Some(value);
        self
    }

    /// Only the filled slots, in reporting order.
    pub fn filled(&self) -> impl Iterator<Item = (SlotCategory, &T)> + '_ {
        SlotCategory::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|v| (slot, v)))
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> SlotMap<U> {
        SlotMap {
            slots: std::array::from_fn(|i| self.slots[i].as_ref().map(&mut f)),
        }
    }
}

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<(SlotCategory, T)> for SlotMap<T> {
    fn from_iter<I: IntoIterator<Item = (SlotCategory, T)>>(iter: I) -> Self {
        let mut map = Self::empty();
        for (slot, value) in iter {
            map.set(slot, Some(value));
        }
        map
    }
}
