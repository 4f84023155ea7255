//! Student command handlers.

use serde::Serialize;
use tabled::Tabled;

use campus_api::models::{Student, StudentForm};
use campus_api::students::StudentListQuery;

use crate::cli::{StudentArgs, StudentCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled, Serialize)]
pub struct StudentRow {
    pub id: i64,
    #[tabled(rename = "student id")]
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub class: String,
    pub major: String,
    pub status: String,
}

impl From<&Student> for StudentRow {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id,
            student_id: s.student_id.clone(),
            name: s.name.clone(),
            gender: s.gender.clone().unwrap_or_default(),
            class: s.class_name.clone().unwrap_or_default(),
            major: s.major.clone().unwrap_or_default(),
            status: s.status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Ctx, args: StudentArgs) -> Result<(), CliError> {
    match args.command {
        StudentCommand::List {
            page,
            size,
            keyword,
            class,
            status,
        } => {
            let query = StudentListQuery {
                current: Some(page),
                size: Some(size),
                keyword,
                class_id: class,
                status,
            };
            let result = ctx.resolve(ctx.client().list_students(&query).await)?;
            let rows: Vec<StudentRow> = result.records.iter().map(StudentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        StudentCommand::Get { id } => {
            let student = ctx.resolve(ctx.client().get_student(id).await)?;
            output::print_record(&student)
        }

        StudentCommand::Create {
            student_id,
            name,
            gender,
            class,
            age,
            phone,
            email,
            major,
            admission_year,
        } => {
            let form = StudentForm {
                student_id,
                name,
                gender,
                class_id: class,
                age,
                phone,
                email,
                major,
                admission_year,
                ..StudentForm::default()
            };
            let student = ctx.resolve(ctx.client().create_student(&form).await)?;
            output::success(ctx.quiet, &format!("created student #{}", student.id));
            Ok(())
        }

        StudentCommand::Update {
            id,
            student_id,
            name,
            gender,
            class,
            age,
            phone,
            email,
            major,
            admission_year,
            status,
        } => {
            let form = StudentForm {
                student_id,
                name,
                gender,
                class_id: class,
                age,
                phone,
                email,
                major,
                admission_year,
                status,
                ..StudentForm::default()
            };
            let student = ctx.resolve(ctx.client().update_student(id, &form).await)?;
            output::success(ctx.quiet, &format!("updated student #{}", student.id));
            Ok(())
        }

        StudentCommand::Delete { id } => {
            if !ctx.confirm(&format!("Delete student #{id}?"))? {
                return Ok(());
            }
            ctx.resolve(ctx.client().delete_student(id).await)?;
            output::success(ctx.quiet, "student deleted");
            Ok(())
        }

        StudentCommand::BatchDelete { ids } => {
            if !ctx.confirm(&format!("Delete {} students?", ids.len()))? {
                return Ok(());
            }
            ctx.resolve(ctx.client().batch_delete_students(&ids).await)?;
            output::success(ctx.quiet, &format!("deleted {} students", ids.len()));
            Ok(())
        }
    }
}
