//! Queries for the certificates table.

use chrono::{DateTime, NaiveDate, Utc};
use registrar_core::errors::{RegistrarResult, ValidationError};
use registrar_core::models::{
    CertificateId, CertificateRecord, CertificateType, EnrollmentId, NewCertificate, StudentId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{parse_code, sql_err, unique_violation_column};

const CERTIFICATE_COLUMNS: &str = "id, student_id, enrollment_id, certificate_type, \
    certificate_number, issue_date, purpose, remarks, issued_by, created_at";

fn row_to_certificate(row: &Row<'_>) -> rusqlite::Result<CertificateRecord> {
    let certificate_type: String = row.get(3)?;
    Ok(CertificateRecord {
        id: row.get(0)?,
        student_id: row.get(1)?,
        enrollment_id: row.get(2)?,
        certificate_type: parse_code(3, &certificate_type)?,
        certificate_number: row.get(4)?,
        issue_date: row.get(5)?,
        purpose: row.get(6)?,
        remarks: row.get(7)?,
        issued_by: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn duplicate_number(e: rusqlite::Error, number: Option<&str>) -> registrar_core::RegistrarError {
    match unique_violation_column(&e) {
        Some(field) => ValidationError::DuplicateIdentifier {
            field,
            value: number.unwrap_or_default().to_string(),
        }
        .into(),
        None => sql_err(e),
    }
}

pub fn insert_certificate(
    conn: &Connection,
    certificate: &NewCertificate,
    enrollment_id: Option<EnrollmentId>,
    now: DateTime<Utc>,
) -> RegistrarResult<CertificateId> {
    conn.execute(
        "INSERT INTO certificates (student_id, enrollment_id, certificate_type,
             certificate_number, issue_date, purpose, remarks, issued_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            certificate.student_id,
            enrollment_id,
            certificate.certificate_type.code(),
            certificate.certificate_number,
            certificate.issue_date,
            certificate.purpose,
            certificate.remarks,
            certificate.issued_by,
            now,
        ],
    )
    .map_err(|e| duplicate_number(e, certificate.certificate_number.as_deref()))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_certificate(
    conn: &Connection,
    id: CertificateId,
) -> RegistrarResult<Option<CertificateRecord>> {
    let sql = format!("SELECT {CERTIFICATE_COLUMNS} FROM certificates WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    stmt.query_row(params![id], row_to_certificate)
        .optional()
        .map_err(sql_err)
}

/// Newest issue date first; same-day certificates by id descending.
pub fn list_for_student(
    conn: &Connection,
    student_id: StudentId,
    certificate_type: Option<CertificateType>,
) -> RegistrarResult<Vec<CertificateRecord>> {
    let sql = format!(
        "SELECT {CERTIFICATE_COLUMNS} FROM certificates
         WHERE student_id = ?1 AND (?2 IS NULL OR certificate_type = ?2)
         ORDER BY issue_date DESC, id DESC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
    let rows = stmt
        .query_map(
            params![student_id, certificate_type.map(CertificateType::code)],
            row_to_certificate,
        )
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}

/// Most recent issue date of the given type, if any.
pub fn last_issue_date(
    conn: &Connection,
    student_id: StudentId,
    certificate_type: CertificateType,
) -> RegistrarResult<Option<NaiveDate>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT MAX(issue_date) FROM certificates
             WHERE student_id = ?1 AND certificate_type = ?2",
        )
        .map_err(sql_err)?;
    stmt.query_row(params![student_id, certificate_type.code()], |row| {
        row.get::<_, Option<NaiveDate>>(0)
    })
    .map_err(sql_err)
}

pub fn set_certificate_number(
    conn: &Connection,
    id: CertificateId,
    number: &str,
) -> RegistrarResult<usize> {
    conn.execute(
        "UPDATE certificates SET certificate_number = ?2 WHERE id = ?1",
        params![id, number],
    )
    .map_err(|e| duplicate_number(e, Some(number)))
}
