//! v004: certificates: owned by the student, snapshot link to an enrollment.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS certificates (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id          INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    enrollment_id       INTEGER REFERENCES enrollments(id) ON DELETE SET NULL,
    certificate_type    TEXT NOT NULL CHECK (certificate_type IN
        ('bonafide', 'marks_sheet', 'degree', 'discharge_cum_character', 'character_not_passed')),
    certificate_number  TEXT UNIQUE,
    issue_date          TEXT NOT NULL,
    purpose             TEXT,
    remarks             TEXT,
    issued_by           TEXT,
    created_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_certificates_student_type_date
    ON certificates(student_id, certificate_type, issue_date DESC);
CREATE INDEX IF NOT EXISTS idx_certificates_issue_date ON certificates(issue_date);
CREATE INDEX IF NOT EXISTS idx_certificates_enrollment ON certificates(enrollment_id);
";
