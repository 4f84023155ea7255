//! Dictionary command handlers.

use serde::Serialize;
use tabled::Tabled;

use campus_api::models::DictItem;

use crate::cli::{DictArgs, DictCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled, Serialize)]
struct ClassRow {
    id: i64,
    name: String,
}

#[derive(Tabled, Serialize)]
struct DictRow {
    value: String,
    label: String,
}

impl From<&DictItem> for DictRow {
    fn from(item: &DictItem) -> Self {
        Self {
            value: item.value.clone(),
            label: item.label.clone(),
        }
    }
}

pub async fn handle(ctx: &Ctx, args: DictArgs) -> Result<(), CliError> {
    match args.command {
        DictCommand::Classes => {
            let classes = ctx.resolve(ctx.client().classes().await)?;
            let rows: Vec<ClassRow> = classes
                .iter()
                .map(|c| ClassRow {
                    id: c.id,
                    name: c.name.clone(),
                })
                .collect();
            output::print_list(ctx.format, &rows, |r| r.name.clone())
        }

        DictCommand::Status => {
            let items = ctx.resolve(ctx.client().status_dict().await)?;
            let rows: Vec<DictRow> = items.iter().map(DictRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.value.clone())
        }

        DictCommand::Gender => {
            let items = ctx.resolve(ctx.client().gender_dict().await)?;
            let rows: Vec<DictRow> = items.iter().map(DictRow::from).collect();
            output::print_list(ctx.format, &rows, |r| r.value.clone())
        }
    }
}
