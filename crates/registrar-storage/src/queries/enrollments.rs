//! Queries for the enrollment ledger: enrollments + enrollment_slots.

use chrono::{DateTime, Utc};
use registrar_core::errors::{RegistrarResult, ValidationError};
use registrar_core::models::{
    EnrollmentId, EnrollmentRecord, NewEnrollment, SemesterId, SessionId, SlotCategory, SlotMap,
    StudentId, Subject, SubjectId,
};
use rusqlite::{params, Connection, Params, Row};

use super::catalog::{row_to_semester, row_to_session, row_to_subject};
use super::util::{parse_code, sql_err, unique_violation_column};

const ENROLLMENT_SELECT: &str = "
    SELECT e.id, e.student_id, e.is_enrolled, e.enrollment_date, e.created_at, e.updated_at,
           ses.id, ses.session_code, ses.start_date, ses.end_date, ses.is_current,
           sem.id, sem.semester_number, sem.semester_name
    FROM enrollments e
    JOIN academic_sessions ses ON ses.id = e.session_id
    JOIN semesters sem ON sem.id = e.semester_id";

/// Latest first: session start date, then semester number, then id.
const ENROLLMENT_ORDER: &str =
    "ORDER BY ses.start_date DESC, sem.semester_number DESC, e.id DESC";

fn row_to_header(row: &Row<'_>) -> rusqlite::Result<EnrollmentRecord> {
    Ok(EnrollmentRecord {
        id: row.get(0)?,
        student_id: row.get(1)?,
        is_enrolled: row.get(2)?,
        enrollment_date: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        session: row_to_session(row, 6)?,
        semester: row_to_semester(row, 11)?,
        slots: SlotMap::empty(),
    })
}

fn load_slots(conn: &Connection, id: EnrollmentId) -> RegistrarResult<SlotMap<Subject>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT es.slot, sub.id, sub.subject_code, sub.subject_name, sub.course_type
             FROM enrollment_slots es
             JOIN subjects sub ON sub.id = es.subject_id
             WHERE es.enrollment_id = ?1",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![id], |row| {
            let slot: String = row.get(0)?;
            let slot: SlotCategory = parse_code(0, &slot)?;
            Ok((slot, row_to_subject(row, 1)?))
        })
        .map_err(sql_err)?;
    rows.collect::<Result<SlotMap<_>, _>>().map_err(sql_err)
}

fn load_where<P: Params>(
    conn: &Connection,
    filter: &str,
    params: P,
) -> RegistrarResult<Vec<EnrollmentRecord>> {
    let sql = format!("{ENROLLMENT_SELECT} {filter} {ENROLLMENT_ORDER}");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt.query_map(params, row_to_header).map_err(sql_err)?;
    let mut records = rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)?;
    for record in &mut records {
        record.slots = load_slots(conn, record.id)?;
    }
    Ok(records)
}

/// Insert the record and its filled slots. Call inside a transaction.
pub fn insert_enrollment(
    conn: &Connection,
    enrollment: &NewEnrollment,
    now: DateTime<Utc>,
) -> RegistrarResult<EnrollmentId> {
    conn.execute(
        "INSERT INTO enrollments (student_id, session_id, semester_id, is_enrolled,
             enrollment_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            enrollment.student_id,
            enrollment.session_id,
            enrollment.semester_id,
            enrollment.is_enrolled,
            enrollment.enrollment_date,
            now,
        ],
    )
    .map_err(|e| {
        if unique_violation_column(&e).is_some() {
            ValidationError::DuplicateEnrollment {
                student_id: enrollment.student_id,
                session_id: enrollment.session_id,
                semester_id: enrollment.semester_id,
            }
            .into()
        } else {
            sql_err(e)
        }
    })?;

    let id = conn.last_insert_rowid();
    for (slot, subject_id) in enrollment.slots.filled() {
        write_slot(conn, id, slot, Some(*subject_id))?;
    }
    Ok(id)
}

/// Set or clear one slot. Other slots are untouched.
pub fn write_slot(
    conn: &Connection,
    id: EnrollmentId,
    slot: SlotCategory,
    subject_id: Option<SubjectId>,
) -> RegistrarResult<()> {
    match subject_id {
        Some(subject_id) => conn.execute(
            "INSERT INTO enrollment_slots (enrollment_id, slot, subject_id) VALUES (?1, ?2, ?3)
             ON CONFLICT (enrollment_id, slot) DO UPDATE SET subject_id = excluded.subject_id",
            params![id, slot.key(), subject_id],
        ),
        None => conn.execute(
            "DELETE FROM enrollment_slots WHERE enrollment_id = ?1 AND slot = ?2",
            params![id, slot.key()],
        ),
    }
    .map_err(sql_err)?;
    Ok(())
}

/// Replace all eight slots at once. Call inside a transaction.
pub fn replace_slots(
    conn: &Connection,
    id: EnrollmentId,
    slots: &SlotMap<SubjectId>,
) -> RegistrarResult<()> {
    conn.execute(
        "DELETE FROM enrollment_slots WHERE enrollment_id = ?1",
        params![id],
    )
    .map_err(sql_err)?;
    for (slot, subject_id) in slots.filled() {
        write_slot(conn, id, slot, Some(*subject_id))?;
    }
    Ok(())
}

/// Bump `updated_at`. Returns rows touched (0 when the id is unknown).
pub fn touch(conn: &Connection, id: EnrollmentId, now: DateTime<Utc>) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE enrollments SET updated_at = ?2 WHERE id = ?1",
        params![id, now],
    )
    .map_err(sql_err)
}

pub fn set_enrolled(
    conn: &Connection,
    id: EnrollmentId,
    is_enrolled: bool,
    now: DateTime<Utc>,
) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE enrollments SET is_enrolled = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, is_enrolled, now],
    )
    .map_err(sql_err)
}

pub fn get_enrollment(
    conn: &Connection,
    id: EnrollmentId,
) -> RegistrarResult<Option<EnrollmentRecord>> {
    Ok(load_where(conn, "WHERE e.id = ?1", params![id])?
        .into_iter()
        .next())
}

pub fn find_enrollment(
    conn: &Connection,
    student_id: StudentId,
    session_id: SessionId,
    semester_id: SemesterId,
) -> RegistrarResult<Option<EnrollmentRecord>> {
    Ok(load_where(
        conn,
        "WHERE e.student_id = ?1 AND e.session_id = ?2 AND e.semester_id = ?3",
        params![student_id, session_id, semester_id],
    )?
    .into_iter()
    .next())
}

pub fn list_for_student(
    conn: &Connection,
    student_id: StudentId,
) -> RegistrarResult<Vec<EnrollmentRecord>> {
    load_where(conn, "WHERE e.student_id = ?1", params![student_id])
}

/// The student's most recent enrollment under the ledger ordering.
pub fn latest_for_student(
    conn: &Connection,
    student_id: StudentId,
) -> RegistrarResult<Option<EnrollmentRecord>> {
    let sql = format!("{ENROLLMENT_SELECT} WHERE e.student_id = ?1 {ENROLLMENT_ORDER} LIMIT 1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let mut rows = stmt
        .query_map(params![student_id], row_to_header)
        .map_err(sql_err)?;
    let header = match rows.next() {
        Some(row) => row.map_err(sql_err)?,
        None => return Ok(None),
    };
    drop(rows);
    let slots = load_slots(conn, header.id)?;
    Ok(Some(EnrollmentRecord { slots, ..header }))
}

/// Certificates that captured this record keep their row with a null link.
pub fn delete_enrollment(conn: &Connection, id: EnrollmentId) -> RegistrarResult<usize> {
    conn.execute("DELETE FROM enrollments WHERE id = ?1", params![id])
        .map_err(sql_err)
}
