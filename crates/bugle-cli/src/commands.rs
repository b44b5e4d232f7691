//! Subcommand implementations

use std::time::Duration;

use anyhow::{bail, Context, Result};
use bugle_core::models::Config;
use bugle_core::report::render_markdown;
use bugle_core::stats::aggregate;
use bugle_core::storage::ReportStorage;
use bugle_dingtalk::{Mention, RobotClient};
use bugle_jira::auth::JiraAuth;
use bugle_jira::{extract_issue, ExtractOptions, JiraClient};
use chrono::Local;
use tracing::{info, warn};

/// Title shown on the chat message card.
const REPORT_TITLE: &str = "JIRA REPORT";

/// Fetch board issues, build the report, save artifacts, notify the group.
///
/// Fetch failures abort the run; a failed or skipped delivery does not,
/// since the report has already been generated and saved at that point.
pub async fn run(config: &Config, board_override: Option<u64>) -> Result<()> {
    let Some(board_id) = board_override.or(config.jira.board_id) else {
        bail!("no board id configured; run `bugle boards` and set jira.board_id, or pass --board");
    };

    let client = jira_client(config)?;

    info!(board_id, "fetching board issues");
    let raw_issues = client.board_issues(board_id).await?;

    if raw_issues.is_empty() {
        warn!(board_id, "board has no issues; nothing to report");
        return Ok(());
    }

    let options = ExtractOptions {
        browse_url: config.jira.browse_url.clone(),
        severity_field: config.jira.severity_field.clone(),
    };
    let records: Vec<_> = raw_issues
        .iter()
        .filter_map(|raw| extract_issue(raw, &options))
        .collect();
    info!(
        extracted = records.len(),
        fetched = raw_issues.len(),
        "extracted issue records"
    );

    let stats = aggregate(
        &records,
        &config.jira.issue_type,
        &config.report.closed_status,
    );
    info!(
        issue_type = %config.jira.issue_type,
        total = stats.total,
        "aggregated issue statistics"
    );

    let generated_at = Local::now();
    let markdown = render_markdown(&config.report, &stats, generated_at);

    let storage = ReportStorage::new(config.output.dir.clone().into());
    let report_path = storage
        .save_markdown(&config.report.project_name, generated_at, &markdown)
        .context("failed to save the markdown report")?;
    info!(path = %report_path.display(), "report saved");

    if config.output.save_detailed {
        if config.output.save_csv {
            let path = storage.save_csv(&config.report.project_name, generated_at, &records)?;
            info!(path = %path.display(), "issue details saved as CSV");
        }
        if config.output.save_json {
            let path = storage.save_json(&config.report.project_name, generated_at, &records)?;
            info!(path = %path.display(), "issue details saved as JSON");
        }
    }

    notify(config, &markdown).await;

    Ok(())
}

/// List the boards visible to the configured account.
pub async fn boards(config: &Config) -> Result<()> {
    let client = jira_client(config)?;
    let boards = client.list_boards().await?;

    if boards.is_empty() {
        println!("No boards visible to this account.");
        return Ok(());
    }

    println!("{:>6}  {:<8}  {:<12}  {:<20}  NAME", "ID", "TYPE", "KEY", "PROJECT");
    for board in &boards {
        let location = board.location.as_ref();
        let project_key = location.map_or("N/A", |l| l.project_key.as_str());
        let project_name = location.map_or("N/A", |l| l.project_name.as_str());
        println!(
            "{:>6}  {:<8}  {:<12}  {:<20}  {}",
            board.id, board.board_type, project_key, project_name, board.name
        );
    }
    println!("\nTotal: {} boards", boards.len());

    Ok(())
}

/// Send an ad-hoc markdown message through the group robot.
pub async fn send(
    config: &Config,
    message: &str,
    at_user_ids: Option<&str>,
    at_mobiles: Option<&str>,
    at_all: bool,
) -> Result<()> {
    if !config.robot.is_configured() {
        bail!("robot access token and secret must be configured before sending");
    }

    let client = robot_client(config);
    let mention = Mention {
        user_ids: split_list(at_user_ids),
        mobiles: split_list(at_mobiles),
        at_all,
    };

    match client.send_markdown(REPORT_TITLE, message, &mention).await {
        Some(response) if response.is_ok() => {
            println!("Message delivered.");
            Ok(())
        }
        Some(response) => bail!(
            "robot endpoint rejected the message: {} (errcode {})",
            response.errmsg,
            response.errcode
        ),
        None => bail!("delivery failed; see the log for the cause"),
    }
}

/// Best-effort delivery of the rendered report. Missing credentials and
/// failed requests both log and return; the run already succeeded.
async fn notify(config: &Config, markdown: &str) {
    if !config.robot.is_configured() {
        warn!("robot access token or secret not configured; skipping delivery");
        return;
    }

    let client = robot_client(config);
    let mention = Mention {
        user_ids: config.robot.at_user_ids.clone(),
        mobiles: config.robot.at_mobiles.clone(),
        at_all: config.robot.at_all,
    };

    match client.send_markdown(REPORT_TITLE, markdown, &mention).await {
        Some(response) if response.is_ok() => info!("report delivered to the group"),
        Some(response) => warn!(errcode = response.errcode, "group delivery was rejected"),
        None => warn!("group delivery failed; see the log for the cause"),
    }
}

fn jira_client(config: &Config) -> Result<JiraClient> {
    let auth = JiraAuth::new(config.jira.username.clone(), config.jira.password.clone());
    let client = JiraClient::new(
        config.jira.base_url.clone(),
        auth,
        config.jira.page_size,
        Duration::from_secs(config.jira.timeout_secs),
    )?;
    Ok(client)
}

fn robot_client(config: &Config) -> RobotClient {
    RobotClient::new(
        config.robot.webhook_url.clone(),
        config.robot.access_token.clone(),
        config.robot.secret.clone(),
    )
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}
