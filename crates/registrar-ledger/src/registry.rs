//! Student admission, lookup, and search.

use registrar_core::errors::{RegistrarError, RegistrarResult, ValidationError};
use registrar_core::models::{Student, StudentDetails, StudentId};
use registrar_core::traits::IRegistrarStorage;
use tracing::{debug, info};

pub struct StudentRegistry<'a> {
    storage: &'a dyn IRegistrarStorage,
}

impl<'a> StudentRegistry<'a> {
    pub fn new(storage: &'a dyn IRegistrarStorage) -> Self {
        Self { storage }
    }

    /// Admit a new student. The three identifiers must be non-blank and
    /// unused by any other student.
    pub fn admit(&self, details: &StudentDetails) -> RegistrarResult<Student> {
        for (field, value) in [
            ("reg_form_no", &details.reg_form_no),
            ("u_registration_no", &details.u_registration_no),
            ("class_roll_no", &details.class_roll_no),
            ("student_name", &details.student_name),
            ("batch", &details.batch),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::invalid(field, "must not be blank").into());
            }
        }
        let student = self.storage.create_student(details)?;
        info!(
            student_id = student.id,
            u_registration_no = %student.details.u_registration_no,
            "student admitted"
        );
        Ok(student)
    }

    pub fn get(&self, id: StudentId) -> RegistrarResult<Student> {
        self.storage
            .get_student(id)?
            .ok_or_else(|| RegistrarError::not_found("student", id))
    }

    /// Exact match on university registration number or class roll number.
    /// Exactly one student must match.
    pub fn search(&self, identifier: &str) -> RegistrarResult<Student> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::invalid("identifier", "must not be blank").into());
        }

        let mut matches = self.storage.find_students_by_identifier(identifier)?;
        debug!(identifier, matches = matches.len(), "student search");
        match matches.len() {
            0 => Err(RegistrarError::not_found("student", identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(ValidationError::AmbiguousMatch {
                identifier: identifier.to_string(),
                matches: n,
            }
            .into()),
        }
    }

    /// Ordered by student name.
    pub fn list(&self, active_only: bool) -> RegistrarResult<Vec<Student>> {
        self.storage.list_students(active_only)
    }

    /// Withdrawal or graduation. History is kept.
    pub fn set_active(&self, id: StudentId, is_active: bool) -> RegistrarResult<()> {
        self.storage.set_student_active(id, is_active)?;
        info!(student_id = id, is_active, "student status changed");
        Ok(())
    }

    /// Hard delete. Removes the student's enrollments and certificates too.
    pub fn delete(&self, id: StudentId) -> RegistrarResult<()> {
        self.storage.delete_student(id)?;
        info!(student_id = id, "student deleted with history");
        Ok(())
    }
}
