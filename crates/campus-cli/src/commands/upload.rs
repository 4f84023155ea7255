//! Upload command handlers.

use std::path::Path;

use crate::cli::{UploadArgs, UploadCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

async fn read_file(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Validation {
            field: "file".into(),
            reason: format!("{} has no usable file name", path.display()),
        })?
        .to_owned();
    let bytes = tokio::fs::read(path).await?;
    Ok((name, bytes))
}

pub async fn handle(ctx: &Ctx, args: UploadArgs) -> Result<(), CliError> {
    ctx.require_login()?;
    match args.command {
        UploadCommand::Avatar { file } => {
            let (name, bytes) = read_file(&file).await?;
            let result = ctx.resolve(ctx.client().upload_avatar(&name, bytes).await)?;
            output::success(ctx.quiet, "avatar uploaded");
            println!("{}", result.url);
            Ok(())
        }

        UploadCommand::File { file, dir } => {
            let (name, bytes) = read_file(&file).await?;
            let result = ctx.resolve(ctx.client().upload_file(&name, bytes, dir.as_deref()).await)?;
            output::success(ctx.quiet, "file uploaded");
            println!("{}", result.url);
            Ok(())
        }

        UploadCommand::StudentAvatar { student_id, file } => {
            let (name, bytes) = read_file(&file).await?;
            let result = ctx.resolve(
                ctx.client()
                    .upload_student_avatar(student_id, &name, bytes)
                    .await,
            )?;
            output::success(
                ctx.quiet,
                &format!("avatar uploaded for student #{student_id}"),
            );
            println!("{}", result.url);
            Ok(())
        }
    }
}
