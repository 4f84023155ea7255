//! Auth command handlers: login, logout, register, whoami, roles.

use owo_colors::OwoColorize;

use campus_api::models::{LoginRequest, RegisterRequest};

use crate::cli::{LoginArgs, RegisterArgs, RolesArgs};
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn login(ctx: &Ctx, args: LoginArgs) -> Result<(), CliError> {
    let username = prompt_missing(args.username, "Username")?;
    let password = prompt_password(args.password)?;

    let user = ctx
        .session
        .login(&LoginRequest {
            username,
            password,
            captcha_key: None,
            captcha: None,
        })
        .await?;

    let roles = ctx.session.roles();
    let roles_text = if roles.is_empty() {
        "no roles".to_owned()
    } else {
        roles.join(", ")
    };
    output::success(
        ctx.quiet,
        &format!("signed in as {} ({roles_text})", user.username),
    );
    Ok(())
}

pub async fn logout(ctx: &Ctx) -> Result<(), CliError> {
    ctx.session.logout().await?;
    output::success(ctx.quiet, "signed out");
    Ok(())
}

pub async fn register(ctx: &Ctx, args: RegisterArgs) -> Result<(), CliError> {
    let username = prompt_missing(args.username, "Username")?;
    let email = prompt_missing(args.email, "Email")?;
    let password = prompt_password(args.password)?;

    let user = ctx
        .session
        .register(&RegisterRequest {
            username,
            password,
            email,
            phone: args.phone,
        })
        .await?;

    output::success(ctx.quiet, &format!("registered and signed in as {}", user.username));
    Ok(())
}

pub async fn whoami(ctx: &Ctx) -> Result<(), CliError> {
    ctx.require_login()?;
    // Refresh from the backend so a stale stored record never misleads.
    let user = ctx.resolve(ctx.client().current_user().await)?;
    output::print_record(&user)
}

pub async fn roles(ctx: &Ctx, args: RolesArgs) -> Result<(), CliError> {
    ctx.require_login()?;
    if args.refresh || !ctx.session.roles_fetched() {
        ctx.session.fetch_roles_and_permissions().await;
    }

    println!("{}", "roles".bold());
    for role in ctx.session.roles() {
        println!("  {role}");
    }
    println!("{}", "permissions".bold());
    for permission in ctx.session.permissions() {
        println!("  {permission}");
    }
    Ok(())
}

fn prompt_missing(value: Option<String>, label: &str) -> Result<String, CliError> {
    if let Some(value) = value {
        return Ok(value);
    }
    dialoguer::Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|_| CliError::Validation {
            field: label.to_lowercase(),
            reason: format!("not an interactive terminal; pass --{}", label.to_lowercase()),
        })
}

fn prompt_password(value: Option<String>) -> Result<String, CliError> {
    if let Some(value) = value {
        return Ok(value);
    }
    rpassword::prompt_password("Password: ").map_err(CliError::Io)
}
