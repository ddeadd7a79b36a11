//! Flattened read-side rows for the statistics layer.
//!
//! Both queries apply the same population filter: active students only,
//! and for enrollments only records with `is_enrolled = 1`.

use std::collections::HashMap;

use registrar_core::errors::RegistrarResult;
use registrar_core::models::{
    EnrollmentFact, EnrollmentId, Gender, SlotCategory, SlotMap, StudentFact, SubjectRef,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

use super::util::{parse_code, sql_err, to_u32};

fn gender_at(idx: usize, code: &str) -> rusqlite::Result<Gender> {
    Gender::from_code(code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown gender code: {code}").into(),
        )
    })
}

pub fn active_student_facts(conn: &Connection) -> RegistrarResult<Vec<StudentFact>> {
    let mut stmt = conn
        .prepare_cached("SELECT gender, batch FROM students WHERE is_active = 1 ORDER BY id")
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| {
            let gender: String = row.get(0)?;
            Ok(StudentFact {
                gender: gender_at(0, &gender)?,
                batch: row.get(1)?,
            })
        })
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

pub fn enrollment_facts(
    conn: &Connection,
    semester_number: Option<u32>,
) -> RegistrarResult<Vec<EnrollmentFact>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT e.id, s.gender, sem.semester_number, sem.semester_name
             FROM enrollments e
             JOIN students s ON s.id = e.student_id
             JOIN semesters sem ON sem.id = e.semester_id
             WHERE s.is_active = 1 AND e.is_enrolled = 1
               AND (?1 IS NULL OR sem.semester_number = ?1)
             ORDER BY e.id",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![semester_number], |row| {
            let gender: String = row.get(1)?;
            Ok(EnrollmentFact {
                enrollment_id: row.get(0)?,
                gender: gender_at(1, &gender)?,
                semester_number: to_u32(2, row.get(2)?)?,
                semester_name: row.get(3)?,
                slots: SlotMap::empty(),
            })
        })
        .map_err(sql_err)?;
    let mut facts = rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)?;

    let index: HashMap<EnrollmentId, usize> = facts
        .iter()
        .enumerate()
        .map(|(i, f)| (f.enrollment_id, i))
        .collect();

    let mut stmt = conn
        .prepare_cached(
            "SELECT es.enrollment_id, es.slot, sub.id, sub.subject_code, sub.subject_name
             FROM enrollment_slots es
             JOIN enrollments e ON e.id = es.enrollment_id
             JOIN students s ON s.id = e.student_id
             JOIN semesters sem ON sem.id = e.semester_id
             JOIN subjects sub ON sub.id = es.subject_id
             WHERE s.is_active = 1 AND e.is_enrolled = 1
               AND (?1 IS NULL OR sem.semester_number = ?1)",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![semester_number], |row| {
            let slot: String = row.get(1)?;
            let slot: SlotCategory = parse_code(1, &slot)?;
            Ok((
                row.get::<_, EnrollmentId>(0)?,
                slot,
                SubjectRef {
                    id: row.get(2)?,
                    subject_code: row.get(3)?,
                    subject_name: row.get(4)?,
                },
            ))
        })
        .map_err(sql_err)?;

    for row in rows {
        let (enrollment_id, slot, subject) = row.map_err(sql_err)?;
        if let Some(&i) = index.get(&enrollment_id) {
            facts[i].slots.set(slot, Some(subject));
        }
    }
    Ok(facts)
}
