//! Enrollment command handlers.

use serde::Serialize;
use tabled::Tabled;

use campus_api::enrollments::EnrollmentQuery;
use campus_api::models::Enrollment;

use crate::cli::{EnrollArgs, EnrollCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled, Serialize)]
pub struct EnrollmentRow {
    pub id: i64,
    pub course: String,
    pub code: String,
    pub teacher: String,
    pub credits: String,
    pub status: String,
    pub grade: String,
}

impl From<&Enrollment> for EnrollmentRow {
    fn from(e: &Enrollment) -> Self {
        Self {
            id: e.id,
            course: e.course_name.clone().unwrap_or_default(),
            code: e.course_code.clone().unwrap_or_default(),
            teacher: e.teacher_name.clone().unwrap_or_default(),
            credits: e.credits.map(|v| v.to_string()).unwrap_or_default(),
            status: e.status.clone().unwrap_or_default(),
            grade: e.grade.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Ctx, args: EnrollArgs) -> Result<(), CliError> {
    match args.command {
        EnrollCommand::Add { course_id } => {
            let enrollment = ctx.resolve(ctx.client().enroll_course(course_id).await)?;
            output::success(
                ctx.quiet,
                &format!(
                    "enrolled in {} (enrollment #{})",
                    enrollment.course_name.as_deref().unwrap_or("course"),
                    enrollment.id
                ),
            );
            Ok(())
        }

        EnrollCommand::Drop { enrollment_id } => {
            if !ctx.confirm(&format!("Drop enrollment #{enrollment_id}?"))? {
                return Ok(());
            }
            ctx.resolve(ctx.client().drop_course(enrollment_id).await)?;
            output::success(ctx.quiet, "enrollment dropped");
            Ok(())
        }

        EnrollCommand::Mine { page, size } => {
            let query = EnrollmentQuery {
                page: Some(page),
                page_size: Some(size),
                status: None,
            };
            let result = ctx.resolve(ctx.client().enrolled_courses(&query).await)?;
            let rows: Vec<EnrollmentRow> = result.records.iter().map(EnrollmentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        EnrollCommand::Market { page, size } => {
            let query = EnrollmentQuery {
                page: Some(page),
                page_size: Some(size),
                status: None,
            };
            let result = ctx.resolve(ctx.client().available_courses(&query).await)?;
            let rows: Vec<EnrollmentRow> = result.records.iter().map(EnrollmentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        EnrollCommand::History => {
            let records = ctx.resolve(ctx.client().enrollment_history().await)?;
            let rows: Vec<EnrollmentRow> = records.iter().map(EnrollmentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())
        }

        EnrollCommand::Active => {
            let records = ctx.resolve(ctx.client().active_enrollments().await)?;
            let rows: Vec<EnrollmentRow> = records.iter().map(EnrollmentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())
        }
    }
}
