//! Test fixture loader for registrar golden datasets, plus seeding helpers
//! shared by the integration tests of every crate.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use registrar_core::models::{
    AcademicSession, CourseType, Gender, NewEnrollment, NewSession, NewSubject, Semester,
    SlotCategory, Student, StudentDetails, Subject,
};
use registrar_core::traits::IRegistrarStorage;

/// This crate's directory, which holds `golden/`. Resolved at compile time so
/// fixtures load the same from every crate's tests.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

// ─── Students ───

/// Admission details with every identifier derived from `roll`.
pub fn sample_student(roll: &str, name: &str, gender: Gender, batch: &str) -> StudentDetails {
    StudentDetails {
        reg_form_no: format!("RF-{roll}"),
        u_registration_no: format!("UR-{roll}"),
        class_roll_no: roll.to_string(),
        course_name: "Bachelor of Arts".to_string(),
        batch: batch.to_string(),
        student_name: name.to_string(),
        parent_name: format!("Parent of {name}"),
        mother_name: format!("Mother of {name}"),
        gender,
        state: "Jammu and Kashmir".to_string(),
        district: "Ganderbal".to_string(),
        tehsil: Some("Kangan".to_string()),
        constituency: None,
        province: Some("Kashmir".to_string()),
        village: None,
        address: "Main Road".to_string(),
        community: "General".to_string(),
        mobile: "9000000000".to_string(),
        email_id: None,
        admission_date: date(2023, 7, 15),
    }
}

/// Create a student through storage.
///
/// # Panics
/// Panics if storage rejects the insert.
pub fn admit_student<S: IRegistrarStorage + ?Sized>(
    storage: &S,
    roll: &str,
    gender: Gender,
    batch: &str,
) -> Student {
    storage
        .create_student(&sample_student(roll, &format!("Student {roll}"), gender, batch))
        .unwrap_or_else(|e| panic!("failed to admit {roll}: {e}"))
}

// ─── Catalog ───

/// A small catalog: two sessions, semesters 1..=6, one subject per course type
/// plus a second major and minor.
pub struct SeededCatalog {
    /// 2023-24, flagged current.
    pub current_session: AcademicSession,
    /// 2022-23.
    pub previous_session: AcademicSession,
    pub semesters: Vec<Semester>,
    pub subjects: HashMap<String, Subject>,
}

impl SeededCatalog {
    /// # Panics
    /// Panics if `number` was not seeded.
    pub fn semester(&self, number: u32) -> &Semester {
        self.semesters
            .iter()
            .find(|s| s.semester_number == number)
            .unwrap_or_else(|| panic!("semester {number} not seeded"))
    }

    /// # Panics
    /// Panics if `code` was not seeded.
    pub fn subject(&self, code: &str) -> &Subject {
        self.subjects
            .get(code)
            .unwrap_or_else(|| panic!("subject {code} not seeded"))
    }
}

const SEMESTER_NAMES: [&str; 6] = ["1st", "2nd", "3rd", "4th", "5th", "6th"];

const CATALOG_SUBJECTS: [(&str, &str, CourseType); 10] = [
    ("ENG-MJ", "English Literature", CourseType::Major),
    ("HIS-MJ", "History", CourseType::Major),
    ("ECO-MN", "Economics", CourseType::Minor),
    ("POL-MN", "Political Science", CourseType::Minor),
    ("GEO-MD1", "Geography Basics", CourseType::Multidisciplinary1),
    ("PSY-MD2", "Introductory Psychology", CourseType::Multidisciplinary2),
    ("COM-SEC", "Computer Applications", CourseType::SkillEnhancement),
    ("ENV-VA1", "Environmental Studies", CourseType::ValueAdded1),
    ("YOG-VA2", "Yoga and Wellness", CourseType::ValueAdded2),
    ("URD-AEC", "Urdu Communication", CourseType::AbilityEnhancement),
];

/// # Panics
/// Panics if any catalog insert fails.
pub fn seed_catalog<S: IRegistrarStorage + ?Sized>(storage: &S) -> SeededCatalog {
    let previous_session = storage
        .create_session(&NewSession {
            session_code: "2022-23".to_string(),
            start_date: date(2022, 7, 1),
            end_date: date(2023, 6, 30),
            is_current: false,
        })
        .unwrap_or_else(|e| panic!("seed session: {e}"));
    let current_session = storage
        .create_session(&NewSession {
            session_code: "2023-24".to_string(),
            start_date: date(2023, 7, 1),
            end_date: date(2024, 6, 30),
            is_current: true,
        })
        .unwrap_or_else(|e| panic!("seed session: {e}"));

    let semesters = SEMESTER_NAMES
        .iter()
        .zip(1u32..)
        .map(|(name, number)| {
            storage
                .create_semester(number, name)
                .unwrap_or_else(|e| panic!("seed semester {number}: {e}"))
        })
        .collect();

    let subjects = CATALOG_SUBJECTS
        .iter()
        .map(|(code, name, course_type)| {
            let subject = storage
                .create_subject(&NewSubject {
                    subject_code: code.to_string(),
                    subject_name: name.to_string(),
                    course_type: *course_type,
                })
                .unwrap_or_else(|e| panic!("seed subject {code}: {e}"));
            (code.to_string(), subject)
        })
        .collect();

    SeededCatalog {
        current_session,
        previous_session,
        semesters,
        subjects,
    }
}

// ─── Golden statistics dataset ───

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsDataset {
    pub description: String,
    pub sessions: Vec<NewSession>,
    pub semesters: Vec<SemesterSeed>,
    pub subjects: Vec<NewSubject>,
    pub students: Vec<StudentSeed>,
    pub enrollments: Vec<EnrollmentSeed>,
    /// Expected report values, compared field by field in the stats tests.
    pub expected: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemesterSeed {
    pub number: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentSeed {
    pub roll: String,
    pub gender: Gender,
    pub batch: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentSeed {
    pub roll: String,
    pub session: String,
    pub semester: u32,
    #[serde(default = "default_true")]
    pub enrolled: bool,
    /// Slot key (e.g. `major_course`) to subject code.
    #[serde(default)]
    pub slots: BTreeMap<String, String>,
}

fn default_true() -> bool {
    true
}

pub fn load_statistics_dataset() -> StatisticsDataset {
    load_fixture("golden/statistics_dataset.json")
}

/// Write the dataset into storage. Inactive students are admitted first
/// and then deactivated, so their enrollments exist but must be ignored.
///
/// # Panics
/// Panics on any storage failure or dangling reference in the dataset.
pub fn seed_dataset<S: IRegistrarStorage + ?Sized>(storage: &S, dataset: &StatisticsDataset) {
    let sessions: HashMap<String, AcademicSession> = dataset
        .sessions
        .iter()
        .map(|s| {
            let created = storage
                .create_session(s)
                .unwrap_or_else(|e| panic!("seed session {}: {e}", s.session_code));
            (created.session_code.clone(), created)
        })
        .collect();

    let semesters: HashMap<u32, Semester> = dataset
        .semesters
        .iter()
        .map(|s| {
            let created = storage
                .create_semester(s.number, &s.name)
                .unwrap_or_else(|e| panic!("seed semester {}: {e}", s.number));
            (s.number, created)
        })
        .collect();

    let subjects: HashMap<String, Subject> = dataset
        .subjects
        .iter()
        .map(|s| {
            let created = storage
                .create_subject(s)
                .unwrap_or_else(|e| panic!("seed subject {}: {e}", s.subject_code));
            (s.subject_code.clone(), created)
        })
        .collect();

    let mut students = HashMap::new();
    for seed in &dataset.students {
        let student = admit_student(storage, &seed.roll, seed.gender, &seed.batch);
        students.insert(seed.roll.clone(), student);
    }

    for seed in &dataset.enrollments {
        let student = &students[&seed.roll];
        let session = &sessions[&seed.session];
        let semester = &semesters[&seed.semester];
        let mut enrollment =
            NewEnrollment::new(student.id, session.id, semester.id, session.start_date)
                .enrolled(seed.enrolled);
        for (slot_key, code) in &seed.slots {
            let slot: SlotCategory = slot_key
                .parse()
                .unwrap_or_else(|e| panic!("dataset slot {slot_key}: {e}"));
            enrollment = enrollment.with_slot(slot, subjects[code].id);
        }
        storage
            .insert_enrollment(&enrollment)
            .unwrap_or_else(|e| panic!("seed enrollment for {}: {e}", seed.roll));
    }

    for seed in dataset.students.iter().filter(|s| !s.active) {
        storage
            .set_student_active(students[&seed.roll].id, false)
            .unwrap_or_else(|e| panic!("deactivate {}: {e}", seed.roll));
    }
}
