//! Records exchanged with the enrollment backend.
//!
//! Field names follow the backend's JSON (`alumnoId`, `cursoNombre`, ...) via
//! serde renames; the Rust side uses English names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the backend for `fecha`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// An enrollment linking one student to one course on a given date.
///
/// `student_name` and `course_name` are copies taken when the record was last
/// written. They are not refreshed when the student or course is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    #[serde(flatten)]
    pub fields: EnrollmentFields,
}

/// The writable part of an [`Enrollment`]; also the POST body, which has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentFields {
    #[serde(rename = "alumnoId")]
    pub student_id: i64,
    #[serde(rename = "cursoId")]
    pub course_id: i64,
    #[serde(rename = "alumnoNombre")]
    pub student_name: String,
    #[serde(rename = "cursoNombre")]
    pub course_name: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(rename = "fecha")]
    pub date: String,
}

impl EnrollmentFields {
    /// Snapshot the names of `student` and `course` into a new payload dated `date`.
    pub fn new(student: &Student, course: &Course, date: NaiveDate) -> Self {
        Self {
            student_id: student.id,
            course_id: course.id,
            student_name: student.name.clone(),
            course_name: course.name.clone(),
            date: date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl Enrollment {
    pub fn student_id(&self) -> i64 {
        self.fields.student_id
    }

    pub fn course_id(&self) -> i64 {
        self.fields.course_id
    }
}
