mod common;

use chrono::NaiveDate;
use common::{FakeApi, course, enrollment, student};
use enrollments::error::EnrollmentError;
use enrollments::manager::{EnrollmentManager, FormMode, WriteOutcome};

// ─── Helper ───────────────────────────────────────────────────────────

fn march_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

async fn loaded(api: FakeApi) -> EnrollmentManager<FakeApi> {
    let mut manager = EnrollmentManager::new(api);
    manager.reload_all().await.unwrap();
    manager
}

// ============================================================
// reload_all
// ============================================================

#[tokio::test]
async fn reload_mirrors_backend_in_order() {
    let api = FakeApi::school();
    let ana = student(1, "Ana");
    let luis = student(4, "Luis");
    let math = course(2, "Matemáticas");
    api.seed(enrollment(9, &luis, &math, "2024-01-10"));
    api.seed(enrollment(3, &ana, &math, "2024-01-11"));

    let manager = loaded(api).await;

    let ids: Vec<i64> = manager.enrollments().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![9, 3]);
    assert_eq!(manager.students(), &[ana, luis][..]);
    assert_eq!(manager.courses().len(), 2);
    assert_eq!(manager.courses()[0].name, "Matemáticas");

    let mut requests = manager.api().requests();
    requests.sort();
    assert_eq!(requests, vec!["GET /alumnos", "GET /cursos", "GET /matriculas"]);
}

#[tokio::test]
async fn failed_reload_keeps_previous_mirrors() {
    let manager_api = FakeApi::school();
    let mut manager = loaded(manager_api).await;

    manager.api().set_courses(vec![course(8, "Arte")]);
    manager.api().fail("GET /alumnos");

    let err = manager.reload_all().await.unwrap_err();
    assert!(matches!(err, EnrollmentError::Network { .. }));
    // The new course list must not be applied on its own.
    assert_eq!(manager.courses().len(), 2);
    assert_eq!(manager.courses()[0].name, "Matemáticas");
    assert_eq!(manager.students().len(), 2);

    manager.api().recover("GET /alumnos");
    manager.reload_all().await.unwrap();
    assert_eq!(manager.courses(), &[course(8, "Arte")][..]);
}

// ============================================================
// submit: create
// ============================================================

#[tokio::test]
async fn create_snapshots_names_and_date() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");
    manager.select_course("2");

    let outcome = manager.submit_on(march_first()).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Created(1));

    assert_eq!(manager.enrollments().len(), 1);
    let created = &manager.enrollments()[0];
    assert_eq!(created.student_id(), 1);
    assert_eq!(created.course_id(), 2);
    assert_eq!(created.fields.student_name, "Ana");
    assert_eq!(created.fields.course_name, "Matemáticas");
    assert_eq!(created.fields.date, "2024-03-01");
}

#[tokio::test]
async fn submit_dates_with_local_today() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("4");
    manager.select_course("3");

    manager.submit().await.unwrap();

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(manager.enrollments()[0].fields.date, today);
}

#[tokio::test]
async fn create_resets_form_and_reloads() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");
    manager.select_course("2");
    manager.submit_on(march_first()).await.unwrap();

    assert_eq!(manager.selected_student_id(), "");
    assert_eq!(manager.selected_course_id(), "");
    assert_eq!(manager.mode(), FormMode::Create);
    assert_eq!(manager.mode().submit_label(), "Enroll");

    let requests = manager.api().requests();
    // Initial load (3) + POST + reload (3).
    assert_eq!(requests.len(), 7);
    assert_eq!(requests[3], "POST /matriculas");
}

// ============================================================
// submit: update
// ============================================================

#[tokio::test]
async fn update_puts_to_edit_target() {
    let api = FakeApi::school();
    let ana = student(1, "Ana");
    api.seed(enrollment(5, &ana, &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;

    let target = manager.find_enrollment(5).cloned().unwrap();
    manager.begin_edit(&target);
    manager.select_course("3");

    let outcome = manager.submit_on(march_first()).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Updated(5));
    assert_eq!(manager.edit_target_id(), None);
    assert_eq!(manager.mode(), FormMode::Create);

    assert!(manager.api().requests().contains(&"PUT /matriculas/5".to_string()));
    assert_eq!(manager.api().write_count(), 1);

    let updated = manager.find_enrollment(5).unwrap();
    assert_eq!(updated.course_id(), 3);
    assert_eq!(updated.fields.course_name, "Historia");
    assert_eq!(updated.fields.student_name, "Ana");
    assert_eq!(updated.fields.date, "2024-03-01");
    assert_eq!(manager.enrollments().len(), 1);
}

#[tokio::test]
async fn begin_edit_loads_record_into_form() {
    let api = FakeApi::school();
    api.seed(enrollment(5, &student(4, "Luis"), &course(3, "Historia"), "2024-01-10"));
    let mut manager = loaded(api).await;

    let target = manager.enrollments()[0].clone();
    manager.begin_edit(&target);

    assert_eq!(manager.selected_student_id(), "4");
    assert_eq!(manager.selected_course_id(), "3");
    assert_eq!(manager.mode(), FormMode::Editing(5));
    assert_eq!(manager.mode().submit_label(), "Update");
    assert_eq!(manager.selected_student().unwrap().name, "Luis");
    assert_eq!(manager.api().write_count(), 0);
}

#[tokio::test]
async fn cancel_edit_returns_to_create_without_writing() {
    let api = FakeApi::school();
    api.seed(enrollment(5, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;

    let target = manager.enrollments()[0].clone();
    manager.begin_edit(&target);
    manager.cancel_edit();

    assert_eq!(manager.mode(), FormMode::Create);
    assert_eq!(manager.selected_student_id(), "");
    assert_eq!(manager.selected_course_id(), "");
    assert_eq!(manager.api().write_count(), 0);
}

#[tokio::test]
async fn cancel_edit_in_create_mode_keeps_selection() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");
    manager.cancel_edit();
    assert_eq!(manager.selected_student_id(), "1");
}

#[tokio::test]
async fn denormalized_names_are_not_resynced() {
    let api = FakeApi::school();
    api.seed(enrollment(5, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;

    manager.api().set_students(vec![student(1, "Ana María"), student(4, "Luis")]);
    manager.reload_all().await.unwrap();

    assert_eq!(manager.students()[0].name, "Ana María");
    assert_eq!(manager.find_enrollment(5).unwrap().fields.student_name, "Ana");
}

// ============================================================
// submit: guards
// ============================================================

#[tokio::test]
async fn stale_selection_is_not_found_and_writes_nothing() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");
    manager.select_course("42");

    let err = manager.submit_on(march_first()).await.unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::NotFound {
            entity: "Course",
            id: 42
        }
    ));
    assert_eq!(manager.api().write_count(), 0);
    assert!(manager.enrollments().is_empty());
    assert_eq!(manager.selected_course_id(), "42");
}

#[tokio::test]
async fn student_removed_after_selection_is_not_found() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("4");
    manager.select_course("2");

    manager.api().set_students(vec![student(1, "Ana")]);
    manager.reload_all().await.unwrap();

    let err = manager.submit_on(march_first()).await.unwrap_err();
    assert!(matches!(err, EnrollmentError::NotFound { entity: "Student", id: 4 }));
    assert_eq!(manager.api().write_count(), 0);
}

#[tokio::test]
async fn empty_selection_is_validation_error() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");

    let err = manager.submit_on(march_first()).await.unwrap_err();
    assert!(matches!(err, EnrollmentError::Validation(_)));
    assert_eq!(manager.api().write_count(), 0);
}

#[tokio::test]
async fn failed_write_leaves_form_untouched() {
    let api = FakeApi::school();
    api.seed(enrollment(5, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;
    manager.api().fail("PUT /matriculas/5");

    let target = manager.enrollments()[0].clone();
    manager.begin_edit(&target);
    manager.select_course("3");

    let err = manager.submit_on(march_first()).await.unwrap_err();
    assert!(matches!(err, EnrollmentError::Network { .. }));
    assert_eq!(manager.mode(), FormMode::Editing(5));
    assert_eq!(manager.selected_course_id(), "3");
    assert_eq!(manager.find_enrollment(5).unwrap().course_id(), 2);
}

#[tokio::test]
async fn failed_reload_after_create_reports_committed_write() {
    let mut manager = loaded(FakeApi::school()).await;
    manager.select_student("1");
    manager.select_course("2");
    manager.api().fail("GET /cursos");

    let err = manager.submit_on(march_first()).await.unwrap_err();

    assert_eq!(err.committed_write(), Some(WriteOutcome::Created(1)));
    match &err {
        EnrollmentError::ReloadAfterWrite { source, .. } => {
            assert!(matches!(**source, EnrollmentError::Network { .. }));
        }
        other => panic!("expected ReloadAfterWrite, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Created enrollment 1; reload failed: "));

    // The write went through once and the form was cleared.
    assert_eq!(manager.api().write_count(), 1);
    assert_eq!(manager.api().stored_enrollments().len(), 1);
    assert_eq!(manager.selected_student_id(), "");
    assert_eq!(manager.selected_course_id(), "");
    // The mirror is stale until the next successful reload.
    assert!(manager.enrollments().is_empty());

    manager.api().recover("GET /cursos");
    manager.reload_all().await.unwrap();
    assert_eq!(manager.enrollments().len(), 1);
}

#[tokio::test]
async fn failed_reload_after_update_clears_edit_target() {
    let api = FakeApi::school();
    api.seed(enrollment(5, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;
    let target = manager.enrollments()[0].clone();
    manager.begin_edit(&target);
    manager.select_course("3");
    manager.api().fail("GET /matriculas");

    let err = manager.submit_on(march_first()).await.unwrap_err();

    assert_eq!(err.committed_write(), Some(WriteOutcome::Updated(5)));
    assert_eq!(manager.mode(), FormMode::Create);
}

// ============================================================
// delete
// ============================================================

#[tokio::test]
async fn delete_removes_row_after_reload() {
    let api = FakeApi::school();
    let ana = student(1, "Ana");
    let math = course(2, "Matemáticas");
    api.seed(enrollment(6, &ana, &math, "2024-01-10"));
    api.seed(enrollment(7, &ana, &math, "2024-01-11"));
    let mut manager = loaded(api).await;

    manager.delete(7).await.unwrap();

    assert!(manager.find_enrollment(7).is_none());
    assert!(manager.find_enrollment(6).is_some());
    assert!(manager.api().requests().contains(&"DELETE /matriculas/7".to_string()));
}

#[tokio::test]
async fn delete_missing_id_on_tolerant_backend_changes_nothing() {
    let api = FakeApi::school();
    api.seed(enrollment(6, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;

    manager.delete(7).await.unwrap();
    manager.delete(7).await.unwrap();

    let ids: Vec<i64> = manager.enrollments().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![6]);
}

#[tokio::test]
async fn delete_missing_id_on_strict_backend_is_network_error() {
    let api = FakeApi::school();
    api.seed(enrollment(6, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    api.strict_delete();
    let mut manager = loaded(api).await;

    let err = manager.delete(7).await.unwrap_err();
    assert!(matches!(err, EnrollmentError::Network { .. }));
    assert_eq!(manager.enrollments().len(), 1);
}

#[tokio::test]
async fn failed_reload_after_delete_reports_committed_write() {
    let api = FakeApi::school();
    api.seed(enrollment(6, &student(1, "Ana"), &course(2, "Matemáticas"), "2024-01-10"));
    let mut manager = loaded(api).await;
    manager.api().fail("GET /alumnos");

    let err = manager.delete(6).await.unwrap_err();

    assert_eq!(err.committed_write(), Some(WriteOutcome::Deleted(6)));
    assert!(manager.api().stored_enrollments().is_empty());
}

#[tokio::test]
async fn delete_does_not_touch_edit_target() {
    let api = FakeApi::school();
    let ana = student(1, "Ana");
    let math = course(2, "Matemáticas");
    api.seed(enrollment(5, &ana, &math, "2024-01-10"));
    api.seed(enrollment(6, &ana, &math, "2024-01-11"));
    let mut manager = loaded(api).await;

    let target = manager.find_enrollment(5).cloned().unwrap();
    manager.begin_edit(&target);
    manager.delete(6).await.unwrap();

    assert_eq!(manager.mode(), FormMode::Editing(5));
    assert_eq!(manager.selected_student_id(), "1");
}
