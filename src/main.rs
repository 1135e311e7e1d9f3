use clap::Parser;

use enrollments::api::{EnrollmentApi, HttpApi};
use enrollments::cli::{Cli, Commands};
use enrollments::config::{self, AppConfig};
use enrollments::error::EnrollmentError;
use enrollments::logging;
use enrollments::manager::{EnrollmentManager, WriteOutcome};
use enrollments::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    // Stderr first so config problems are visible; the screen moves logs to a file.
    let log_handle = logging::init_stderr()?;
    let config = config::load_config(&cli)?;

    match command {
        Commands::Ui => {
            log_handle.redirect_to_file(&config.log_path)?;
            tracing::info!(base_url = %config.base_url, "Starting enrollment screen");
            tui::run_tui(&config).await
        }
        headless => run_headless(headless, &config).await,
    }
}

async fn run_headless(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let api = HttpApi::from_config(config)?;
    tracing::debug!(base_url = api.base_url(), "Using backend");
    let mut manager = EnrollmentManager::new(api);

    match command {
        Commands::Ui => anyhow::bail!("the interactive screen is not a headless command"),
        Commands::List => {
            manager.reload_all().await?;
        }
        Commands::Enroll { student, course } => {
            manager.reload_all().await?;
            manager.select_student(student.to_string());
            manager.select_course(course.to_string());
            report_submit(manager.submit().await?);
        }
        Commands::Update {
            id,
            student,
            course,
        } => {
            manager.reload_all().await?;
            let target = manager
                .find_enrollment(id)
                .cloned()
                .ok_or(EnrollmentError::NotFound {
                    entity: "Enrollment",
                    id,
                })?;
            manager.begin_edit(&target);
            if let Some(student) = student {
                manager.select_student(student.to_string());
            }
            if let Some(course) = course {
                manager.select_course(course.to_string());
            }
            report_submit(manager.submit().await?);
        }
        Commands::Delete { id } => {
            manager.delete(id).await?;
            println!("Deleted enrollment {id}");
        }
    }

    print_table(&manager);
    Ok(())
}

fn report_submit(outcome: WriteOutcome) {
    println!("{outcome}");
}

fn print_table<A: EnrollmentApi>(manager: &EnrollmentManager<A>) {
    println!(
        "{:>5}  {:<24}  {:<24}  {}",
        "ID", "Student", "Course", "Date"
    );
    for e in manager.enrollments() {
        println!(
            "{:>5}  {:<24}  {:<24}  {}",
            e.id, e.fields.student_name, e.fields.course_name, e.fields.date
        );
    }
}
