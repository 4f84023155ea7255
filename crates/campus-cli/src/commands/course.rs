//! Course command handlers.

use serde::Serialize;
use tabled::Tabled;

use campus_api::courses::CourseListQuery;
use campus_api::models::{Course, CourseAttachment, CourseForm, CourseSchedule};

use crate::cli::{CourseArgs, CourseCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled, Serialize)]
pub struct CourseRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub teacher: String,
    /// `enrolled/capacity`
    pub seats: String,
    pub credits: String,
    pub status: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            code: c.code.clone().unwrap_or_default(),
            teacher: c.teacher_name.clone().unwrap_or_default(),
            seats: format!("{}/{}", c.enrolled.unwrap_or(0), c.capacity),
            credits: c.credits.map(|v| v.to_string()).unwrap_or_default(),
            status: c.status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Ctx, args: CourseArgs) -> Result<(), CliError> {
    match args.command {
        CourseCommand::List {
            page,
            size,
            keyword,
            status,
            semester,
        } => {
            let query = CourseListQuery {
                current: Some(page),
                size: Some(size),
                keyword,
                status,
                semester,
            };
            let result = ctx.resolve(ctx.client().list_courses(&query).await)?;
            let rows: Vec<CourseRow> = result.records.iter().map(CourseRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        CourseCommand::Get { id } => {
            let course = ctx.resolve(ctx.client().get_course(id).await)?;
            output::print_record(&course)
        }

        CourseCommand::Create {
            name,
            capacity,
            code,
            description,
            teacher,
            category,
            credits,
            location,
        } => {
            let form = CourseForm {
                name,
                capacity,
                code,
                description,
                teacher_id: teacher,
                category,
                credits,
                location,
                ..CourseForm::default()
            };
            let course = ctx.resolve(ctx.client().create_course(&form).await)?;
            output::success(ctx.quiet, &format!("created course #{}", course.id));
            Ok(())
        }

        CourseCommand::Update {
            id,
            name,
            capacity,
            code,
            description,
            teacher,
            category,
            credits,
            location,
            status,
        } => {
            let form = CourseForm {
                name,
                capacity,
                code,
                description,
                teacher_id: teacher,
                category,
                credits,
                location,
                status,
                ..CourseForm::default()
            };
            let course = ctx.resolve(ctx.client().update_course(id, &form).await)?;
            output::success(ctx.quiet, &format!("updated course #{}", course.id));
            Ok(())
        }

        CourseCommand::Delete { id } => {
            if !ctx.confirm(&format!("Delete course #{id}?"))? {
                return Ok(());
            }
            ctx.resolve(ctx.client().delete_course(id).await)?;
            output::success(ctx.quiet, "course deleted");
            Ok(())
        }

        CourseCommand::AddSchedule {
            course_id,
            day,
            start,
            end,
            location,
        } => {
            if !(1..=7).contains(&day) {
                return Err(CliError::Validation {
                    field: "day".into(),
                    reason: "must be 1 (Monday) through 7 (Sunday)".into(),
                });
            }
            let schedule = CourseSchedule {
                id: None,
                day_of_week: day,
                start_time: start,
                end_time: end,
                location,
            };
            let created = ctx.resolve(ctx.client().add_course_schedule(course_id, &schedule).await)?;
            output::success(
                ctx.quiet,
                &format!("added schedule slot #{}", created.id.unwrap_or_default()),
            );
            Ok(())
        }

        CourseCommand::DeleteSchedule { schedule_id } => {
            ctx.resolve(ctx.client().delete_course_schedule(schedule_id).await)?;
            output::success(ctx.quiet, "schedule slot removed");
            Ok(())
        }

        CourseCommand::Attach {
            course_id,
            file_name,
            file_url,
        } => {
            let attachment = CourseAttachment {
                id: None,
                file_name,
                file_url,
                file_type: None,
                file_size: None,
            };
            let created = ctx.resolve(
                ctx.client()
                    .add_course_attachment(course_id, &attachment)
                    .await,
            )?;
            output::success(ctx.quiet, &format!("attached {}", created.file_name));
            Ok(())
        }
    }
}
