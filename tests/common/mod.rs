//! In-memory enrollment backend for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use enrollments::api::{COURSES_PATH, ENROLLMENTS_PATH, EnrollmentApi, STUDENTS_PATH, enrollment_path};
use enrollments::error::EnrollmentError;
use enrollments::model::{Course, Enrollment, EnrollmentFields, Student};

#[derive(Default)]
struct Backend {
    enrollments: Vec<Enrollment>,
    students: Vec<Student>,
    courses: Vec<Course>,
    next_id: i64,
    /// Every request as "METHOD /path", in order.
    requests: Vec<String>,
    /// Requests ("METHOD /path") that fail with a network error.
    failing: HashSet<String>,
    /// When true, deleting an unknown id answers 404.
    strict_delete: bool,
}

pub struct FakeApi {
    backend: Mutex<Backend>,
}

impl FakeApi {
    pub fn new(students: Vec<Student>, courses: Vec<Course>) -> Self {
        Self {
            backend: Mutex::new(Backend {
                students,
                courses,
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    /// The usual fixture: Ana and Luis; Matemáticas and Historia.
    pub fn school() -> Self {
        Self::new(
            vec![student(1, "Ana"), student(4, "Luis")],
            vec![course(2, "Matemáticas"), course(3, "Historia")],
        )
    }

    /// Seed an enrollment as if it had been created earlier.
    pub fn seed(&self, enrollment: Enrollment) {
        let mut b = self.backend.lock().unwrap();
        b.next_id = b.next_id.max(enrollment.id + 1);
        b.enrollments.push(enrollment);
    }

    pub fn set_students(&self, students: Vec<Student>) {
        self.backend.lock().unwrap().students = students;
    }

    pub fn set_courses(&self, courses: Vec<Course>) {
        self.backend.lock().unwrap().courses = courses;
    }

    pub fn fail(&self, request: &str) {
        self.backend.lock().unwrap().failing.insert(request.to_string());
    }

    pub fn recover(&self, request: &str) {
        self.backend.lock().unwrap().failing.remove(request);
    }

    pub fn strict_delete(&self) {
        self.backend.lock().unwrap().strict_delete = true;
    }

    pub fn requests(&self) -> Vec<String> {
        self.backend.lock().unwrap().requests.clone()
    }

    /// Number of POST/PUT/DELETE requests received.
    pub fn write_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| !r.starts_with("GET "))
            .count()
    }

    pub fn stored_enrollments(&self) -> Vec<Enrollment> {
        self.backend.lock().unwrap().enrollments.clone()
    }

    pub fn stored_courses(&self) -> Vec<Course> {
        self.backend.lock().unwrap().courses.clone()
    }

    /// Record the request and fail it if it was marked failing.
    fn begin(&self, method: &str, path: &str) -> Result<std::sync::MutexGuard<'_, Backend>, EnrollmentError> {
        let mut b = self.backend.lock().unwrap();
        let request = format!("{method} {path}");
        b.requests.push(request.clone());
        if b.failing.contains(&request) {
            return Err(network(method, path, "connection refused"));
        }
        Ok(b)
    }
}

fn network(method: &str, path: &str, message: &str) -> EnrollmentError {
    EnrollmentError::Network {
        method: method.to_string(),
        url: format!("http://fake{path}"),
        message: message.to_string(),
    }
}

#[async_trait]
impl EnrollmentApi for FakeApi {
    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, EnrollmentError> {
        Ok(self.begin("GET", ENROLLMENTS_PATH)?.enrollments.clone())
    }

    async fn list_students(&self) -> Result<Vec<Student>, EnrollmentError> {
        Ok(self.begin("GET", STUDENTS_PATH)?.students.clone())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, EnrollmentError> {
        Ok(self.begin("GET", COURSES_PATH)?.courses.clone())
    }

    async fn create_enrollment(
        &self,
        fields: &EnrollmentFields,
    ) -> Result<Enrollment, EnrollmentError> {
        let mut b = self.begin("POST", ENROLLMENTS_PATH)?;
        let created = Enrollment {
            id: b.next_id,
            fields: fields.clone(),
        };
        b.next_id += 1;
        b.enrollments.push(created.clone());
        Ok(created)
    }

    async fn update_enrollment(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Enrollment, EnrollmentError> {
        let path = enrollment_path(enrollment.id);
        let mut b = self.begin("PUT", &path)?;
        match b.enrollments.iter_mut().find(|e| e.id == enrollment.id) {
            Some(stored) => {
                *stored = enrollment.clone();
                Ok(enrollment.clone())
            }
            None => Err(network("PUT", &path, "HTTP 404 Not Found")),
        }
    }

    async fn delete_enrollment(&self, id: i64) -> Result<(), EnrollmentError> {
        let path = enrollment_path(id);
        let mut b = self.begin("DELETE", &path)?;
        let before = b.enrollments.len();
        b.enrollments.retain(|e| e.id != id);
        if b.strict_delete && b.enrollments.len() == before {
            return Err(network("DELETE", &path, "HTTP 404 Not Found"));
        }
        Ok(())
    }
}

pub fn student(id: i64, name: &str) -> Student {
    Student {
        id,
        name: name.to_string(),
    }
}

pub fn course(id: i64, name: &str) -> Course {
    Course {
        id,
        name: name.to_string(),
    }
}

pub fn enrollment(id: i64, student: &Student, course: &Course, date: &str) -> Enrollment {
    Enrollment {
        id,
        fields: EnrollmentFields {
            student_id: student.id,
            course_id: course.id,
            student_name: student.name.clone(),
            course_name: course.name.clone(),
            date: date.to_string(),
        },
    }
}
