//! v003: Enrollment ledger: enrollments + enrollment_slots.
//!
//! One slot row per filled slot. Deleting a subject removes its slot rows,
//! which reads back as an empty slot; the enrollment itself survives.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS enrollments (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id       INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    session_id       INTEGER NOT NULL REFERENCES academic_sessions(id) ON DELETE RESTRICT,
    semester_id      INTEGER NOT NULL REFERENCES semesters(id) ON DELETE RESTRICT,
    is_enrolled      INTEGER NOT NULL DEFAULT 1,
    enrollment_date  TEXT NOT NULL,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    UNIQUE (student_id, session_id, semester_id)
);

CREATE INDEX IF NOT EXISTS idx_enrollments_session_semester ON enrollments(session_id, semester_id);
CREATE INDEX IF NOT EXISTS idx_enrollments_student_session ON enrollments(student_id, session_id);
CREATE INDEX IF NOT EXISTS idx_enrollments_semester ON enrollments(semester_id);

CREATE TABLE IF NOT EXISTS enrollment_slots (
    enrollment_id  INTEGER NOT NULL REFERENCES enrollments(id) ON DELETE CASCADE,
    slot           TEXT NOT NULL CHECK (slot IN
        ('major_course', 'minor_course', 'md1', 'md2', 'skill', 'vac1', 'vac2', 'aec')),
    subject_id     INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
    PRIMARY KEY (enrollment_id, slot)
);

CREATE INDEX IF NOT EXISTS idx_enrollment_slots_subject ON enrollment_slots(subject_id);
CREATE INDEX IF NOT EXISTS idx_enrollment_slots_slot ON enrollment_slots(slot, subject_id);
";
