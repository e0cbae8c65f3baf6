//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod template;
mod watch;

pub use job::JobCommands;
pub use template::TemplateCommands;

use anyhow::Result;
use awx_core::domain::template::{JobTemplate, WorkflowJobTemplate};
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Workflow job template management
    Workflow {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Job template management
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Job status
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Workflow { command } => {
            template::handle_template_command::<WorkflowJobTemplate>(command, config).await
        }
        Commands::Template { command } => {
            template::handle_template_command::<JobTemplate>(command, config).await
        }
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}
