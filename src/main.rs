mod cli;

use clap::Parser;
use cli::{Cli, Command, ResultsArgs, UploadArgs, ValidateArgs};
use email_dashboard_core::core::config::load_config;
use email_dashboard_core::results::{ResultFilter, ValidEmailExport};
use email_dashboard_core::service::{check_once, ApiStatus, HealthMonitor, HealthSnapshot};
use email_dashboard_core::ui::{self, notify, views};
use email_dashboard_core::upload::UploadedList;
use email_dashboard_core::{ApiClient, Config, ValidationRequest};

use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut builder = load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        builder = builder.api_base_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn validate(client: &ApiClient, args: ValidateArgs, json: bool) -> anyhow::Result<()> {
    let request = ValidationRequest {
        email: args.email,
        check_smtp: Some(!args.no_smtp),
        check_disposable: Some(!args.no_disposable),
        check_breach: Some(!args.no_breach),
    };

    let pb = ui::spinner("Validating...");
    let result = client.validate_email(&request).await;
    pb.finish_and_clear();
    let result = result?;

    if json {
        return print_json(&result);
    }
    print!("{}", views::render_validation_result(&result));
    Ok(())
}

async fn simple(client: &ApiClient, email: String, json: bool) -> anyhow::Result<()> {
    let pb = ui::spinner("Validating...");
    let result = client
        .validate_email_compat(&ValidationRequest::legacy(email, false))
        .await;
    pb.finish_and_clear();
    let result = result?;

    if json {
        return print_json(&result);
    }
    print!("{}", views::render_legacy_result(&result));
    Ok(())
}

async fn upload(
    client: &ApiClient,
    config: &Config,
    args: UploadArgs,
    json: bool,
) -> anyhow::Result<()> {
    let list = UploadedList::from_path(&args.file, config)?;

    if list.is_empty() {
        notify::info(&format!("No email addresses found in {}", list.filename));
        return Ok(());
    }

    if args.preview_only && json {
        return print_json(&list);
    }
    if !json {
        print!(
            "{}",
            views::render_preview(
                &list,
                &args.search,
                config.max_table_rows,
                config.preview_top_domains
            )
        );
    }

    if args.preview_only {
        return Ok(());
    }

    let pb = ui::spinner(format!("Submitting {} emails...", list.len()));
    let submission = client.bulk_validate(&list.emails).await;
    pb.finish_and_clear();
    let submission = submission?;
    notify::success(&format!(
        "Validation started! Batch ID: {}",
        submission.batch_id
    ));

    if args.no_results {
        return if json { print_json(&submission) } else { Ok(()) };
    }

    if !json {
        println!();
    }
    let results = ResultsArgs {
        batch_id: submission.batch_id,
        search: String::new(),
        status: Default::default(),
        risk: Default::default(),
        export: None,
    };
    show_results(client, config, results, json).await
}

async fn show_results(
    client: &ApiClient,
    config: &Config,
    args: ResultsArgs,
    json: bool,
) -> anyhow::Result<()> {
    let pb = ui::spinner("Loading batch results...");
    let batch = client.get_batch_status(&args.batch_id).await;
    pb.finish_and_clear();
    let batch = batch?;

    if json {
        print_json(&batch)?;
    } else {
        let filter = ResultFilter::new(args.search, args.status, args.risk);
        print!(
            "{}",
            views::render_batch(&batch, &filter, config.max_table_rows)
        );
    }

    if let Some(target) = args.export {
        let export = ValidEmailExport::from_batch(&batch);
        let path = export.write_to(&target)?;
        notify::success(&format!(
            "Exported {} valid emails to {}",
            export.emails.len(),
            path.display()
        ));
    }
    Ok(())
}

async fn history(client: &ApiClient, json: bool) -> anyhow::Result<()> {
    let pb = ui::spinner("Loading history...");
    let batches = client.get_batch_history().await;
    pb.finish_and_clear();
    let batches = batches?;

    if json {
        return print_json(&batches);
    }
    print!("{}", views::render_history(&batches));
    Ok(())
}

async fn analytics(client: &ApiClient, config: &Config, json: bool) -> anyhow::Result<()> {
    let pb = ui::spinner("Loading analytics...");
    let summary = client.get_analytics().await;
    pb.finish_and_clear();
    let summary = summary?;

    if json {
        return print_json(&summary);
    }
    print!(
        "{}",
        views::render_analytics(&summary, config.analytics_top_domains)
    );
    Ok(())
}

/// One status line: compact JSON for scripts, a badge line otherwise.
fn health_line(snapshot: &HealthSnapshot, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(snapshot)?)
    } else {
        Ok(views::render_health(snapshot))
    }
}

async fn status(client: ApiClient, config: &Config, watch: bool, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("{}", client.base_url());
    }

    if !watch {
        let snapshot = check_once(&client).await;
        println!("{}", health_line(&snapshot, json)?);
        if snapshot.status == ApiStatus::Offline {
            std::process::exit(2);
        }
        return Ok(());
    }

    let monitor = HealthMonitor::spawn(client, config.health_poll_interval);
    let mut updates = monitor.subscribe();
    println!("{}", health_line(&monitor.snapshot(), json)?);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", health_line(&snapshot, json)?);
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    let client = ApiClient::new(&config)?;
    let json = cli.json;

    match cli.command {
        Command::Validate(args) => validate(&client, args, json).await,
        Command::Simple { email } => simple(&client, email, json).await,
        Command::Upload(args) => upload(&client, &config, args, json).await,
        Command::Results(args) => show_results(&client, &config, args, json).await,
        Command::History => history(&client, json).await,
        Command::Analytics => analytics(&client, &config, json).await,
        Command::Status { watch } => status(client, &config, watch, json).await,
    }
}

#[tokio::main]
async fn main() {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        notify::error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_health_line_is_parseable() {
        let snapshot = HealthSnapshot {
            status: ApiStatus::Online,
            last_checked: None,
            version: Some("2.3.1".into()),
            last_error: None,
        };
        let line = health_line(&snapshot, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["status"], "online");
        assert_eq!(value["version"], "2.3.1");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn text_health_line_uses_badge() {
        colored::control::set_override(false);
        let line = health_line(&HealthSnapshot::default(), false).unwrap();
        assert!(line.starts_with("[Checking...]"));
    }
}
