//! v002: students: three unique identifiers, profile, status, audit timestamps.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS students (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    reg_form_no        TEXT NOT NULL UNIQUE,
    u_registration_no  TEXT NOT NULL UNIQUE,
    class_roll_no      TEXT NOT NULL UNIQUE,
    course_name        TEXT NOT NULL,
    batch              TEXT NOT NULL,
    student_name       TEXT NOT NULL,
    parent_name        TEXT NOT NULL,
    mother_name        TEXT NOT NULL,
    gender             TEXT NOT NULL CHECK (gender IN ('M', 'F')),
    state              TEXT NOT NULL,
    district           TEXT NOT NULL,
    tehsil             TEXT,
    constituency       TEXT,
    province           TEXT,
    village            TEXT,
    address            TEXT NOT NULL,
    community          TEXT NOT NULL,
    mobile             TEXT NOT NULL,
    email_id           TEXT,
    is_active          INTEGER NOT NULL DEFAULT 1,
    admission_date     TEXT NOT NULL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_students_batch ON students(batch);
CREATE INDEX IF NOT EXISTS idx_students_active ON students(is_active);
CREATE INDEX IF NOT EXISTS idx_students_name ON students(student_name);
";
