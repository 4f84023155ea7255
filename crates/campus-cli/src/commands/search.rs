//! Search command handlers.

use campus_api::search::SearchQuery;

use crate::cli::{SearchArgs, SearchCommand};
use crate::error::CliError;
use crate::output;

use super::course::CourseRow;
use super::student::StudentRow;
use super::Ctx;

pub async fn handle(ctx: &Ctx, args: SearchArgs) -> Result<(), CliError> {
    match args.command {
        SearchCommand::Courses {
            keyword,
            page,
            size,
        } => {
            let query = SearchQuery {
                keyword,
                current: Some(page),
                size: Some(size),
            };
            let result = ctx.resolve(ctx.client().search_courses(&query).await)?;
            let rows: Vec<CourseRow> = result.records.iter().map(CourseRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        SearchCommand::Students {
            keyword,
            page,
            size,
        } => {
            let query = SearchQuery {
                keyword,
                current: Some(page),
                size: Some(size),
            };
            let result = ctx.resolve(ctx.client().search_students(&query).await)?;
            let rows: Vec<StudentRow> = result.records.iter().map(StudentRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.id.to_string())?;
            output::page_footer(ctx.quiet, rows.len(), result.total);
            Ok(())
        }

        SearchCommand::Global { keyword } => {
            let hits = ctx.resolve(ctx.client().global_search(&keyword).await)?;

            let students: Vec<StudentRow> = hits.students.iter().map(StudentRow::from).collect();
            let courses: Vec<CourseRow> = hits.courses.iter().map(CourseRow::from).collect();
            if !ctx.quiet {
                eprintln!("students ({})", students.len());
            }
            output::print_list(ctx.format, &students, |r| r.id.to_string())?;
            if !ctx.quiet {
                eprintln!("courses ({})", courses.len());
            }
            output::print_list(ctx.format, &courses, |r| r.id.to_string())
        }

        SearchCommand::Popular { limit } => {
            let keywords = ctx.resolve(ctx.client().popular_keywords(limit).await)?;
            for keyword in keywords {
                println!("{keyword}");
            }
            Ok(())
        }
    }
}
