//! Queries for the students table.

use chrono::{DateTime, Utc};
use registrar_core::errors::{RegistrarResult, ValidationError};
use registrar_core::models::{Gender, Student, StudentDetails, StudentId};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{sql_err, unique_violation_column};

pub(crate) const STUDENT_COLUMNS: &str = "s.id, s.reg_form_no, s.u_registration_no, \
    s.class_roll_no, s.course_name, s.batch, s.student_name, s.parent_name, s.mother_name, \
    s.gender, s.state, s.district, s.tehsil, s.constituency, s.province, s.village, \
    s.address, s.community, s.mobile, s.email_id, s.is_active, s.admission_date, \
    s.created_at, s.updated_at";

/// Decode a row selected with `STUDENT_COLUMNS`.
pub(crate) fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    let gender_code: String = row.get(9)?;
    let gender = Gender::from_code(&gender_code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            Type::Text,
            format!("unknown gender code: {gender_code}").into(),
        )
    })?;

    Ok(Student {
        id: row.get(0)?,
        details: StudentDetails {
            reg_form_no: row.get(1)?,
            u_registration_no: row.get(2)?,
            class_roll_no: row.get(3)?,
            course_name: row.get(4)?,
            batch: row.get(5)?,
            student_name: row.get(6)?,
            parent_name: row.get(7)?,
            mother_name: row.get(8)?,
            gender,
            state: row.get(10)?,
            district: row.get(11)?,
            tehsil: row.get(12)?,
            constituency: row.get(13)?,
            province: row.get(14)?,
            village: row.get(15)?,
            address: row.get(16)?,
            community: row.get(17)?,
            mobile: row.get(18)?,
            email_id: row.get(19)?,
            admission_date: row.get(21)?,
        },
        is_active: row.get(20)?,
        created_at: row.get(22)?,
        updated_at: row.get(23)?,
    })
}

/// Insert a new, active student. A clash on any of the three identifiers
/// is reported as `DuplicateIdentifier` naming the offending column.
pub fn insert_student(
    conn: &Connection,
    details: &StudentDetails,
    now: DateTime<Utc>,
) -> RegistrarResult<StudentId> {
    let result = conn.execute(
        "INSERT INTO students (reg_form_no, u_registration_no, class_roll_no, course_name,
             batch, student_name, parent_name, mother_name, gender, state, district, tehsil,
             constituency, province, village, address, community, mobile, email_id,
             is_active, admission_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
             ?17, ?18, ?19, 1, ?20, ?21, ?21)",
        params![
            details.reg_form_no,
            details.u_registration_no,
            details.class_roll_no,
            details.course_name,
            details.batch,
            details.student_name,
            details.parent_name,
            details.mother_name,
            details.gender.code(),
            details.state,
            details.district,
            details.tehsil,
            details.constituency,
            details.province,
            details.village,
            details.address,
            details.community,
            details.mobile,
            details.email_id,
            details.admission_date,
            now,
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) => match unique_violation_column(&e) {
            Some(field) => {
                let value = match field.as_str() {
                    "reg_form_no" => details.reg_form_no.clone(),
                    "u_registration_no" => details.u_registration_no.clone(),
                    "class_roll_no" => details.class_roll_no.clone(),
                    _ => String::new(),
                };
                Err(ValidationError::DuplicateIdentifier { field, value }.into())
            }
            None => Err(sql_err(e)),
        },
    }
}

pub fn get_student(conn: &Connection, id: StudentId) -> RegistrarResult<Option<Student>> {
    let sql = format!("SELECT {STUDENT_COLUMNS} FROM students s WHERE s.id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![id], row_to_student)
        .optional()
        .map_err(sql_err)
}

/// Students whose university registration number or class roll number
/// equals `identifier`. More than one hit means two different students
/// share the value across the two columns.
pub fn find_by_identifier(conn: &Connection, identifier: &str) -> RegistrarResult<Vec<Student>> {
    let sql = format!(
        "SELECT {STUDENT_COLUMNS} FROM students s
         WHERE s.u_registration_no = ?1 OR s.class_roll_no = ?1
         ORDER BY s.id"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map(params![identifier], row_to_student)
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

pub fn list_students(conn: &Connection, active_only: bool) -> RegistrarResult<Vec<Student>> {
    let sql = format!(
        "SELECT {STUDENT_COLUMNS} FROM students s
         WHERE (?1 = 0 OR s.is_active = 1)
         ORDER BY s.student_name, s.id"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map(params![active_only], row_to_student)
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

/// Returns the number of rows touched (0 when the id is unknown).
pub fn set_active(
    conn: &Connection,
    id: StudentId,
    is_active: bool,
    now: DateTime<Utc>,
) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE students SET is_active = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, is_active, now],
    )
    .map_err(sql_err)
}

/// Hard delete. Enrollments and certificates go with it (ON DELETE CASCADE).
pub fn delete_student(conn: &Connection, id: StudentId) -> RegistrarResult<usize> {
    conn.execute("DELETE FROM students WHERE id = ?1", params![id])
        .map_err(sql_err)
}
