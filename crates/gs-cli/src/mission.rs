use std::collections::HashMap;

use gs_client::GroundStationClient;
use gs_core::{validate_parameters, CommandParameter};

/// Parses a `NAME:KIND[:SIZE]=VALUE` parameter argument. Values are
/// checked later, together with the rest of the parameters.
pub(crate) fn parse_param(raw: &str) -> Result<(CommandParameter, String), String> {
    let (declaration, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME:KIND[:SIZE]=VALUE, got \"{raw}\""))?;
    let param = declaration.parse::<CommandParameter>().map_err(|e| e.to_string())?;
    Ok((param, value.to_string()))
}

/// Validates every parameter, then builds the text sent to mission
/// control: the command words followed by `NAME=VALUE` for each parameter.
///
/// # Errors
///
/// Returns an error naming the first invalid parameter.
pub(crate) fn build_command(
    words: &[String],
    params: &[(CommandParameter, String)],
) -> anyhow::Result<String> {
    let declared: Vec<CommandParameter> = params.iter().map(|(p, _)| p.clone()).collect();
    let values: HashMap<String, String> = params
        .iter()
        .map(|(p, v)| (p.name.clone(), v.clone()))
        .collect();
    if let Err(e) = validate_parameters(&declared, &values) {
        anyhow::bail!("form invalid: {e}");
    }

    let mut command = words.join(" ");
    for (param, value) in params {
        command.push(' ');
        command.push_str(&param.name);
        command.push('=');
        command.push_str(value.trim());
    }
    Ok(command)
}

/// # Errors
///
/// Returns an error if a parameter is invalid (nothing is sent) or the
/// request fails.
pub(crate) async fn run_command(
    client: &GroundStationClient,
    words: &[String],
    params: &[(CommandParameter, String)],
) -> anyhow::Result<()> {
    let command = build_command(words, params)?;
    let reply = client.send_mission_command(&command).await?;
    tracing::info!(%command, "mission command sent");
    println!("{}", reply.response);
    Ok(())
}
