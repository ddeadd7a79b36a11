//! Domain models: students, catalog entries, enrollments, certificates,
//! and the read-side facts the statistics layer aggregates.

pub mod catalog;
pub mod certificate;
pub mod enrollment;
pub mod facts;
pub mod slots;
pub mod student;

pub use catalog::{
    AcademicSession, CourseType, NewSession, NewSubject, Semester, SemesterId, SessionId,
    Subject, SubjectId,
};
pub use certificate::{
    CertificateId, CertificateRecord, CertificateSnapshot, CertificateType, NewCertificate,
};
pub use enrollment::{EnrollmentId, EnrollmentRecord, NewEnrollment};
pub use facts::{EnrollmentFact, StudentFact, SubjectRef};
pub use slots::{SlotCategory, SlotMap};
pub use student::{Gender, Student, StudentDetails, StudentId};
