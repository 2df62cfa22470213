use crate::context::AppContext;
use crate::error::{CliError, Result};
use crate::output::{guard_json, outcome_json, profile_json};
use crate::terminal_display::TerminalDisplay;

use fa_auth::Registration;

use std::io::BufRead;
use std::sync::Arc;

use log::info;
use serde_json::{Value, json};

/// `--password` wins; otherwise one line from stdin.
pub(crate) fn resolve_password(
    provided: Option<String>,
    input: &mut dyn BufRead,
) -> Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| CliError::input(format!("Could not read password from stdin: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn stdin_password(provided: Option<String>) -> Result<String> {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    resolve_password(provided, &mut lock)
}

pub async fn login(ctx: &AppContext, email: &str, password: Option<String>) -> Result<Value> {
    let password = stdin_password(password)?;
    let outcome = ctx.credential_login().login(email, &password).await?;
    Ok(outcome_json(&outcome))
}

pub async fn register(
    ctx: &AppContext,
    name: String,
    email: String,
    password: Option<String>,
    risk_appetite: Option<String>,
    experience_level: Option<String>,
) -> Result<Value> {
    let registration = Registration {
        name,
        email,
        password: stdin_password(password)?,
        risk_appetite,
        experience_level,
    };
    let outcome = ctx.credential_login().register(&registration).await?;
    Ok(outcome_json(&outcome))
}

pub async fn logout(ctx: &AppContext) -> Result<Value> {
    fa_auth::logout(&ctx.api).await?;
    Ok(json!({"signed_in": false}))
}

pub fn status(ctx: &AppContext) -> Value {
    guard_json(&ctx.route_guard().check())
}

pub async fn set_username(ctx: &AppContext, username: &str) -> Result<Value> {
    let profile = ctx.profiles().set_username(username).await?;
    Ok(profile_json(&profile))
}

pub async fn wallet_connect(ctx: &AppContext, provider_url: Option<&str>) -> Result<Value> {
    let mut flow = ctx.extension_flow(provider_url).await;
    let outcome = flow.connect().await?;
    Ok(outcome_json(&outcome))
}

/// Ctrl-C closes the pairing; the stored session is left as it was.
pub async fn wallet_qr(
    ctx: &AppContext,
    project_id: Option<String>,
    relay_url: Option<&str>,
) -> Result<Value> {
    let display = Arc::new(TerminalDisplay::stderr(&ctx.config.wallet.qr_image_service));
    let mut flow = ctx.qr_flow(project_id, relay_url, display);

    let cancel = flow.cancel_token();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, closing QR sign-in");
            cancel.cancel();
        }
    });

    let result = flow.connect().await;
    watcher.abort();

    let outcome = result?;
    Ok(outcome_json(&outcome))
}

