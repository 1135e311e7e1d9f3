//! Client-side mirror of the enrollment backend.
//!
//! [`EnrollmentManager`] holds the last-loaded enrollment, student, and course
//! collections plus the form state (selected student, selected course, edit
//! target). Every write goes to the backend first and is followed by a full
//! [`reload_all`](EnrollmentManager::reload_all); local collections are never
//! patched in place.

use chrono::NaiveDate;

use crate::api::EnrollmentApi;
use crate::error::EnrollmentError;
use crate::model::{Course, Enrollment, EnrollmentFields, Student};

/// Whether a submit creates a new enrollment or updates the edit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing(i64),
}

impl FormMode {
    /// Label for the submit button.
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Enroll",
            FormMode::Editing(_) => "Update",
        }
    }
}

/// A write the backend accepted.
///
/// `submit` yields `Created` or `Updated`; `Deleted` only appears inside
/// [`EnrollmentError::ReloadAfterWrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(i64),
    Updated(i64),
    Deleted(i64),
}

impl std::fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOutcome::Created(id) => write!(f, "Created enrollment {id}"),
            WriteOutcome::Updated(id) => write!(f, "Updated enrollment {id}"),
            WriteOutcome::Deleted(id) => write!(f, "Deleted enrollment {id}"),
        }
    }
}

pub struct EnrollmentManager<A: EnrollmentApi> {
    api: A,
    enrollments: Vec<Enrollment>,
    students: Vec<Student>,
    courses: Vec<Course>,
    /// Decimal id of the selected student, or empty.
    selected_student_id: String,
    /// Decimal id of the selected course, or empty.
    selected_course_id: String,
    edit_target_id: Option<i64>,
}

impl<A: EnrollmentApi> EnrollmentManager<A> {
    /// Create a manager with empty collections. Call [`Self::reload_all`] to populate.
    pub fn new(api: A) -> Self {
        Self {
            api,
            enrollments: Vec::new(),
            students: Vec::new(),
            courses: Vec::new(),
            selected_student_id: String::new(),
            selected_course_id: String::new(),
            edit_target_id: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn selected_student_id(&self) -> &str {
        &self.selected_student_id
    }

    pub fn selected_course_id(&self) -> &str {
        &self.selected_course_id
    }

    pub fn edit_target_id(&self) -> Option<i64> {
        self.edit_target_id
    }

    pub fn mode(&self) -> FormMode {
        match self.edit_target_id {
            Some(id) => FormMode::Editing(id),
            None => FormMode::Create,
        }
    }

    /// Set the student selection. An empty string clears it.
    pub fn select_student(&mut self, id: impl Into<String>) {
        self.selected_student_id = id.into();
    }

    /// Set the course selection. An empty string clears it.
    pub fn select_course(&mut self, id: impl Into<String>) {
        self.selected_course_id = id.into();
    }

    pub fn find_enrollment(&self, id: i64) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }

    /// The loaded student named by the current selection, if any.
    pub fn selected_student(&self) -> Option<&Student> {
        let id = parse_id(&self.selected_student_id)?;
        self.students.iter().find(|s| s.id == id)
    }

    /// The loaded course named by the current selection, if any.
    pub fn selected_course(&self) -> Option<&Course> {
        let id = parse_id(&self.selected_course_id)?;
        self.courses.iter().find(|c| c.id == id)
    }

    /// Fetch all three collections concurrently and replace the local mirrors.
    ///
    /// Mirrors change only if all three requests succeed.
    pub async fn reload_all(&mut self) -> Result<(), EnrollmentError> {
        let (enrollments, students, courses) = tokio::try_join!(
            self.api.list_enrollments(),
            self.api.list_students(),
            self.api.list_courses(),
        )?;

        tracing::info!(
            enrollments = enrollments.len(),
            students = students.len(),
            courses = courses.len(),
            "Reloaded collections"
        );

        self.enrollments = enrollments;
        self.students = students;
        self.courses = courses;
        Ok(())
    }

    /// Submit the form dated today (local time). See [`Self::submit_on`].
    pub async fn submit(&mut self) -> Result<WriteOutcome, EnrollmentError> {
        self.submit_on(chrono::Local::now().date_naive()).await
    }

    /// Create or update an enrollment from the current selection.
    ///
    /// Nothing is sent if either selection is empty, malformed, or names an
    /// entity missing from the loaded mirrors. A failed write leaves the form
    /// as it was. After a successful write the selections (and edit target)
    /// are cleared, then all collections are reloaded. A failed reload is
    /// returned as [`EnrollmentError::ReloadAfterWrite`], which carries the
    /// committed write.
    pub async fn submit_on(&mut self, date: NaiveDate) -> Result<WriteOutcome, EnrollmentError> {
        let fields = self.build_fields(date)?;

        let outcome = match self.edit_target_id {
            Some(id) => {
                let enrollment = Enrollment { id, fields };
                self.api.update_enrollment(&enrollment).await?;
                tracing::info!(id, course_id = enrollment.course_id(), "Updated enrollment");
                self.edit_target_id = None;
                WriteOutcome::Updated(id)
            }
            None => {
                let created = self.api.create_enrollment(&fields).await?;
                tracing::info!(
                    id = created.id,
                    student_id = fields.student_id,
                    course_id = fields.course_id,
                    "Created enrollment"
                );
                WriteOutcome::Created(created.id)
            }
        };

        self.clear_selection();
        self.reload_after(outcome).await?;
        Ok(outcome)
    }

    /// Load `enrollment` into the form and switch to editing it. No backend call.
    pub fn begin_edit(&mut self, enrollment: &Enrollment) {
        self.selected_student_id = enrollment.student_id().to_string();
        self.selected_course_id = enrollment.course_id().to_string();
        self.edit_target_id = Some(enrollment.id);
    }

    /// Leave editing mode without saving and clear the form. No-op in create mode.
    pub fn cancel_edit(&mut self) {
        if self.edit_target_id.take().is_some() {
            self.clear_selection();
        }
    }

    /// Delete the enrollment with `id`, then reload everything.
    ///
    /// The id is not checked against the local mirror; whether deleting an
    /// unknown id fails is up to the backend.
    pub async fn delete(&mut self, id: i64) -> Result<(), EnrollmentError> {
        self.api.delete_enrollment(id).await?;
        tracing::info!(id, "Deleted enrollment");
        self.reload_after(WriteOutcome::Deleted(id)).await
    }

    /// Reload following a committed write, tagging a failure with that write.
    async fn reload_after(&mut self, outcome: WriteOutcome) -> Result<(), EnrollmentError> {
        self.reload_all()
            .await
            .map_err(|source| EnrollmentError::ReloadAfterWrite {
                outcome,
                source: Box::new(source),
            })
    }

    fn clear_selection(&mut self) {
        self.selected_student_id.clear();
        self.selected_course_id.clear();
    }

    /// Resolve the selection against the mirrors and snapshot names into a payload.
    fn build_fields(&self, date: NaiveDate) -> Result<EnrollmentFields, EnrollmentError> {
        let student_id = required_id("student", &self.selected_student_id)?;
        let course_id = required_id("course", &self.selected_course_id)?;

        let student = self
            .students
            .iter()
            .find(|s| s.id == student_id)
            .ok_or(EnrollmentError::NotFound {
                entity: "Student",
                id: student_id,
            })?;
        let course = self
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .ok_or(EnrollmentError::NotFound {
                entity: "Course",
                id: course_id,
            })?;

        Ok(EnrollmentFields::new(student, course, date))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn required_id(field: &str, raw: &str) -> Result<i64, EnrollmentError> {
    if raw.trim().is_empty() {
        return Err(EnrollmentError::Validation(format!("a {field} must be selected")));
    }
    parse_id(raw)
        .ok_or_else(|| EnrollmentError::Validation(format!("invalid {field} id `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_label_follows_mode() {
        assert_eq!(FormMode::Create.submit_label(), "Enroll");
        assert_eq!(FormMode::Editing(3).submit_label(), "Update");
    }

    #[test]
    fn required_id_rejects_empty_and_garbage() {
        assert!(matches!(required_id("student", ""), Err(EnrollmentError::Validation(_))));
        assert!(matches!(required_id("course", "abc"), Err(EnrollmentError::Validation(_))));
        assert_eq!(required_id("course", "12").unwrap(), 12);
    }

    #[test]
    fn stored_id_round_trips_through_selection() {
        for id in [0_i64, 7, 1234567890123] {
            assert_eq!(parse_id(&id.to_string()), Some(id));
        }
    }
}
