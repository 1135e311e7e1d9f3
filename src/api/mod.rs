//! Backend seam for the enrollment manager.
//!
//! [`EnrollmentApi`] is the interface the manager talks to. [`HttpApi`] is the
//! production implementation; tests substitute an in-memory backend.

pub mod http;

pub use http::HttpApi;

use async_trait::async_trait;

use crate::error::EnrollmentError;
use crate::model::{Course, Enrollment, EnrollmentFields, Student};

/// Path of the enrollment collection.
pub const ENROLLMENTS_PATH: &str = "/matriculas";
/// Path of the student collection.
pub const STUDENTS_PATH: &str = "/alumnos";
/// Path of the course collection.
pub const COURSES_PATH: &str = "/cursos";

/// CRUD operations against the enrollment backend.
///
/// Students and courses are read-only from this client.
#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, EnrollmentError>;

    async fn list_students(&self) -> Result<Vec<Student>, EnrollmentError>;

    async fn list_courses(&self) -> Result<Vec<Course>, EnrollmentError>;

    /// POST a new enrollment; the backend assigns the id.
    async fn create_enrollment(
        &self,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, EnrollmentError>;

    /// PUT the full record at `enrollment.id`.
    async fn update_enrollment(&self, enrollment: &Enrollment)
    -> Result<Enrollment, EnrollmentError>;

    /// DELETE the enrollment with `id`. The response body is ignored.
    async fn delete_enrollment(&self, id: i64) -> Result<(), EnrollmentError>;
}

/// Path of a single enrollment, e.g. `/matriculas/5`.
pub fn enrollment_path(id: i64) -> String {
    format!("{ENROLLMENTS_PATH}/{id}")
}
