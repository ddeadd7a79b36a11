//! Queries for the catalog: academic_sessions, semesters, subjects.

use registrar_core::errors::{RegistrarError, RegistrarResult, ValidationError};
use registrar_core::models::{
    AcademicSession, CourseType, NewSession, NewSubject, Semester, SemesterId, SessionId,
    Subject, SubjectId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{is_foreign_key_violation, parse_code, sql_err, to_u32, unique_violation_column};

/// Rewrite a constraint failure on a catalog insert or delete.
fn catalog_err(e: rusqlite::Error, entity: &str, key: &str) -> RegistrarError {
    if let Some(field) = unique_violation_column(&e) {
        return ValidationError::DuplicateIdentifier {
            field,
            value: key.to_string(),
        }
        .into();
    }
    if is_foreign_key_violation(&e) {
        return ValidationError::InUse {
            entity: entity.to_string(),
            key: key.to_string(),
        }
        .into();
    }
    sql_err(e)
}

// ─── Sessions ───

const SESSION_COLUMNS: &str = "id, session_code, start_date, end_date, is_current";

pub(crate) fn row_to_session(row: &Row<'_>, base: usize) -> rusqlite::Result<AcademicSession> {
    Ok(AcademicSession {
        id: row.get(base)?,
        session_code: row.get(base + 1)?,
        start_date: row.get(base + 2)?,
        end_date: row.get(base + 3)?,
        is_current: row.get(base + 4)?,
    })
}

pub fn insert_session(conn: &Connection, session: &NewSession) -> RegistrarResult<SessionId> {
    conn.execute(
        "INSERT INTO academic_sessions (session_code, start_date, end_date, is_current)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            session.session_code,
            session.start_date,
            session.end_date,
            session.is_current,
        ],
    )
    .map_err(|e| catalog_err(e, "session", &session.session_code))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_session(conn: &Connection, id: SessionId) -> RegistrarResult<Option<AcademicSession>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM academic_sessions WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![id], |row| row_to_session(row, 0))
        .optional()
        .map_err(sql_err)
}

pub fn get_session_by_code(
    conn: &Connection,
    code: &str,
) -> RegistrarResult<Option<AcademicSession>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM academic_sessions WHERE session_code = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![code], |row| row_to_session(row, 0))
        .optional()
        .map_err(sql_err)
}

/// Newest first by start date.
pub fn list_sessions(conn: &Connection) -> RegistrarResult<Vec<AcademicSession>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM academic_sessions ORDER BY start_date DESC, id DESC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| row_to_session(row, 0))
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

pub fn current_sessions(conn: &Connection) -> RegistrarResult<Vec<AcademicSession>> {
    let sql = format!(
        "SELECT {SESSION_COLUMNS} FROM academic_sessions
         WHERE is_current = 1 ORDER BY start_date DESC, id DESC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| row_to_session(row, 0))
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

pub fn set_session_current(
    conn: &Connection,
    id: SessionId,
    is_current: bool,
) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE academic_sessions SET is_current = ?2 WHERE id = ?1",
        params![id, is_current],
    )
    .map_err(sql_err)
}

/// Clear the flag on every session except `keep`.
pub fn clear_other_current(conn: &Connection, keep: SessionId) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE academic_sessions SET is_current = 0 WHERE id != ?1 AND is_current = 1",
        params![keep],
    )
    .map_err(sql_err)
}

/// Fails with `InUse` while any enrollment references the session.
pub fn delete_session(conn: &Connection, id: SessionId) -> RegistrarResult<usize> {
    conn.execute("DELETE FROM academic_sessions WHERE id = ?1", params![id])
        .map_err(|e| catalog_err(e, "session", &id.to_string()))
}

// ─── Semesters ───

pub(crate) fn row_to_semester(row: &Row<'_>, base: usize) -> rusqlite::Result<Semester> {
    Ok(Semester {
        id: row.get(base)?,
        semester_number: to_u32(base + 1, row.get(base + 1)?)?,
        semester_name: row.get(base + 2)?,
    })
}

pub fn insert_semester(conn: &Connection, number: u32, name: &str) -> RegistrarResult<SemesterId> {
    conn.execute(
        "INSERT INTO semesters (semester_number, semester_name) VALUES (?1, ?2)",
        params![number, name],
    )
    .map_err(|e| catalog_err(e, "semester", &number.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_semester(conn: &Connection, id: SemesterId) -> RegistrarResult<Option<Semester>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, semester_number, semester_name FROM semesters WHERE id = ?1")
        .map_err(sql_err)?;
    stmt.query_row(params![id], |row| row_to_semester(row, 0))
        .optional()
        .map_err(sql_err)
}

pub fn get_semester_by_number(
    conn: &Connection,
    number: u32,
) -> RegistrarResult<Option<Semester>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, semester_number, semester_name FROM semesters WHERE semester_number = ?1",
        )
        .map_err(sql_err)?;
    stmt.query_row(params![number], |row| row_to_semester(row, 0))
        .optional()
        .map_err(sql_err)
}

pub fn list_semesters(conn: &Connection) -> RegistrarResult<Vec<Semester>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, semester_number, semester_name FROM semesters ORDER BY semester_number",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| row_to_semester(row, 0))
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

/// Fails with `InUse` while any enrollment references the semester.
pub fn delete_semester(conn: &Connection, id: SemesterId) -> RegistrarResult<usize> {
    conn.execute("DELETE FROM semesters WHERE id = ?1", params![id])
        .map_err(|e| catalog_err(e, "semester", &id.to_string()))
}

// ─── Subjects ───

const SUBJECT_COLUMNS: &str = "id, subject_code, subject_name, course_type";

pub(crate) fn row_to_subject(row: &Row<'_>, base: usize) -> rusqlite::Result<Subject> {
    let course_type: String = row.get(base + 3)?;
    Ok(Subject {
        id: row.get(base)?,
        subject_code: row.get(base + 1)?,
        subject_name: row.get(base + 2)?,
        course_type: parse_code(base + 3, &course_type)?,
    })
}

pub fn insert_subject(conn: &Connection, subject: &NewSubject) -> RegistrarResult<SubjectId> {
    conn.execute(
        "INSERT INTO subjects (subject_code, subject_name, course_type) VALUES (?1, ?2, ?3)",
        params![
            subject.subject_code,
            subject.subject_name,
            subject.course_type.code(),
        ],
    )
    .map_err(|e| catalog_err(e, "subject", &subject.subject_code))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_subject(conn: &Connection, id: SubjectId) -> RegistrarResult<Option<Subject>> {
    let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![id], |row| row_to_subject(row, 0))
        .optional()
        .map_err(sql_err)
}

pub fn get_subject_by_code(conn: &Connection, code: &str) -> RegistrarResult<Option<Subject>> {
    let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE subject_code = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![code], |row| row_to_subject(row, 0))
        .optional()
        .map_err(sql_err)
}

/// Ordered by course type (declaration order), then name.
pub fn list_subjects(
    conn: &Connection,
    course_type: Option<CourseType>,
) -> RegistrarResult<Vec<Subject>> {
    let sql = format!(
        "SELECT {SUBJECT_COLUMNS} FROM subjects
         WHERE (?1 IS NULL OR course_type = ?1)
         ORDER BY subject_name, subject_code"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map(params![course_type.map(CourseType::code)], |row| {
            row_to_subject(row, 0)
        })
        .map_err(sql_err)?;
    let mut subjects = rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)?;
    // Stable sort keeps the name order inside each type.
    subjects.sort_by_key(|s| s.course_type);
    Ok(subjects)
}

/// Enrollment slots pointing at the subject are removed with it, which
/// leaves those slots empty.
pub fn delete_subject(conn: &Connection, id: SubjectId) -> RegistrarResult<usize> {
    conn.execute("DELETE FROM subjects WHERE id = ?1", params![id])
        .map_err(|e| catalog_err(e, "subject", &id.to_string()))
}
