//! Template command handlers
//!
//! Handles listing, viewing, creating, updating, deleting and launching
//! templates. The same subcommands serve job templates and workflow job
//! templates.

use anyhow::{Context, Result};
use awx_client::watch::{CheckOnce, JobWatchStrategy, WaitForCompletion};
use awx_client::{AwxClient, Launchable, ResourceService};
use clap::Subcommand;
use colored::*;
use serde_json::{Map, Value};
use tracing::debug;

use super::job::report_outcome;
use super::watch::WatchArgs;
use crate::config::Config;
use crate::output::{TemplateView, print_template_details, print_template_summary};

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List templates
    List {
        /// Only show templates with exactly this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Get template details by name
    Get {
        /// Template name
        name: String,
    },
    /// Create a template from a JSON object
    Create {
        /// Template fields, e.g. '{"name": "deploy", "job_type": "run", ...}'
        #[arg(short, long, value_parser = parse_json_object)]
        data: Map<String, Value>,
    },
    /// Update fields of a template
    Update {
        /// Template ID
        id: u64,

        /// Fields to change, as a JSON object
        #[arg(short, long, value_parser = parse_json_object)]
        data: Map<String, Value>,
    },
    /// Delete a template
    Delete {
        /// Template ID
        id: u64,
    },
    /// Launch a template and wait for the job
    Launch {
        /// Template ID
        id: u64,

        /// Extra variables for the job, as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        extra_vars: Option<Map<String, Value>>,

        /// Check the job status once instead of waiting for it
        #[arg(long)]
        no_wait: bool,

        #[command(flatten)]
        watch: WatchArgs,
    },
}

/// Parse a JSON object argument
fn parse_json_object(s: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(s).context("invalid JSON")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, got `{}`", other),
    }
}

/// Handle template commands
///
/// Routes template subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The template command to execute
/// * `config` - The CLI configuration
pub async fn handle_template_command<R>(command: TemplateCommands, config: &Config) -> Result<()>
where
    R: Launchable + TemplateView,
{
    match command {
        TemplateCommands::List { name } => list_templates::<R>(&config.connect()?, name).await,
        TemplateCommands::Get { name } => get_template::<R>(&config.connect()?, &name).await,
        TemplateCommands::Create { data } => create_template::<R>(&config.connect()?, data).await,
        TemplateCommands::Update { id, data } => {
            update_template::<R>(&config.connect()?, id, data).await
        }
        TemplateCommands::Delete { id } => delete_template::<R>(&config.connect()?, id).await,
        TemplateCommands::Launch {
            id,
            extra_vars,
            no_wait,
            watch,
        } => launch_template::<R>(config, id, extra_vars, no_wait, &watch).await,
    }
}

fn service<R: Launchable>(client: &AwxClient) -> ResourceService<R> {
    client.service::<R>()
}

/// List templates, optionally filtered by name
async fn list_templates<R: Launchable + TemplateView>(
    client: &AwxClient,
    name: Option<String>,
) -> Result<()> {
    let params: Vec<(&str, &str)> = name.as_deref().map(|n| ("name", n)).into_iter().collect();
    let page = service::<R>(client).list(&params).await?;

    if page.is_empty() {
        println!("{}", format!("No {}s found.", R::DISPLAY_NAME).yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} {}(s):", page.count, R::DISPLAY_NAME).bold()
    );
    println!();
    let shown = page.results.len() as u64;
    for template in &page.results {
        print_template_summary(template);
    }
    if shown < page.count {
        println!();
        println!(
            "{}",
            format!("Showing the first {} of {}.", shown, page.count).dimmed()
        );
    }

    Ok(())
}

/// Get and display a single template
async fn get_template<R: Launchable + TemplateView>(client: &AwxClient, name: &str) -> Result<()> {
    let template = service::<R>(client).get_by_name(name).await?;

    print_template_details(&template);

    Ok(())
}

/// Create a template
async fn create_template<R: Launchable + TemplateView>(
    client: &AwxClient,
    data: Map<String, Value>,
) -> Result<()> {
    let created = service::<R>(client)
        .create(&data, &[])
        .await
        .with_context(|| format!("Failed to create {}", R::DISPLAY_NAME))?;

    println!(
        "{} Created {} {}",
        "✓".green(),
        R::DISPLAY_NAME,
        created.id().to_string().cyan()
    );
    print_template_details(&created);

    Ok(())
}

/// Update a template
async fn update_template<R: Launchable + TemplateView>(
    client: &AwxClient,
    id: u64,
    data: Map<String, Value>,
) -> Result<()> {
    let updated = service::<R>(client)
        .update(id, &data, &[])
        .await
        .with_context(|| format!("Failed to update {} {}", R::DISPLAY_NAME, id))?;

    println!("{} Updated {} {}", "✓".green(), R::DISPLAY_NAME, id);
    print_template_details(&updated);

    Ok(())
}

/// Delete a template
async fn delete_template<R: Launchable>(client: &AwxClient, id: u64) -> Result<()> {
    service::<R>(client)
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete {} {}", R::DISPLAY_NAME, id))?;

    println!("{} Deleted {} {}", "✓".green(), R::DISPLAY_NAME, id);

    Ok(())
}

/// Launch a template, then either check the job once or wait for it
async fn launch_template<R: Launchable>(
    config: &Config,
    id: u64,
    extra_vars: Option<Map<String, Value>>,
    no_wait: bool,
    watch: &WatchArgs,
) -> Result<()> {
    let (config, wait) = launch_settings(config, no_wait, watch)?;
    let client = config.connect()?;

    let strategy: &dyn JobWatchStrategy = match &wait {
        Some(wait) => wait,
        None => &CheckOnce,
    };
    let payload = extra_vars.map(|vars| serde_json::json!({ "extra_vars": vars }));

    debug!(
        template_id = id,
        no_wait,
        watch = ?config.client.watch,
        "Launching {}",
        R::DISPLAY_NAME
    );
    println!("Launching {} {}...", R::DISPLAY_NAME, id);

    let launched = service::<R>(&client)
        .launch_with(id, payload, strategy, &config.client.watch)
        .await
        .with_context(|| format!("Failed to launch {} {}", R::DISPLAY_NAME, id))?;

    println!(
        "{} Started {} {}",
        "✓".green(),
        R::JOB_KIND,
        launched.job_id().to_string().cyan()
    );
    println!();

    report_outcome(launched.outcome, !no_wait)
}

/// Configuration and strategy for a launch
///
/// The watch flags only apply when waiting; `--no-wait` checks once and
/// keeps the connection settings as they are.
fn launch_settings(
    config: &Config,
    no_wait: bool,
    watch: &WatchArgs,
) -> Result<(Config, Option<WaitForCompletion>)> {
    if no_wait {
        return Ok((config.clone(), None));
    }
    Ok((config.with_watch(watch.watch_config()?), Some(watch.strategy())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use awx_client::ClientConfig;
    use awx_client::watch::WatchConfig;
    use std::time::Duration;

    fn zero_interval() -> WatchArgs {
        WatchArgs {
            poll_interval: 0,
            max_attempts: None,
            backoff: None,
            timeout: None,
        }
    }

    fn config() -> Config {
        Config {
            client: ClientConfig::new("http://localhost:8052"),
        }
    }

    #[test]
    fn test_no_wait_ignores_watch_flags() {
        let (config, wait) = launch_settings(&config(), true, &zero_interval()).unwrap();

        assert!(wait.is_none());
        assert_eq!(config.client.watch, WatchConfig::default());
        assert!(config.connect().is_ok());
    }

    #[test]
    fn test_waiting_applies_watch_flags() {
        let (config, wait) = launch_settings(&config(), false, &zero_interval()).unwrap();

        assert!(wait.is_some());
        assert_eq!(config.client.watch.poll_interval, Duration::ZERO);
        assert!(config.connect().is_err());
    }

    #[test]
    fn test_parse_json_object() {
        let map = parse_json_object(r#"{"name": "deploy", "inventory": 2}"#).unwrap();
        assert_eq!(map.get("inventory"), Some(&Value::from(2)));
    }

    #[test]
    fn test_parse_json_object_rejects_non_objects() {
        assert!(parse_json_object("[1, 2]").is_err());
        assert!(parse_json_object("not json").is_err());
    }
}
