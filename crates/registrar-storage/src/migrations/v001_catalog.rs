//! v001: Catalog tables: academic_sessions, semesters, subjects.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS academic_sessions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    session_code  TEXT NOT NULL UNIQUE,
    start_date    TEXT NOT NULL,
    end_date      TEXT NOT NULL,
    is_current    INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_sessions_start_date ON academic_sessions(start_date);
CREATE INDEX IF NOT EXISTS idx_sessions_current ON academic_sessions(is_current);

CREATE TABLE IF NOT EXISTS semesters (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    semester_number  INTEGER NOT NULL UNIQUE,
    semester_name    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subjects (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_code  TEXT NOT NULL UNIQUE,
    subject_name  TEXT NOT NULL,
    course_type   TEXT NOT NULL CHECK (course_type IN
        ('MAJOR', 'MINOR', 'MD1', 'MD2', 'SKILL', 'VAC1', 'VAC2', 'AEC'))
);

CREATE INDEX IF NOT EXISTS idx_subjects_type_name ON subjects(course_type, subject_name);
";
