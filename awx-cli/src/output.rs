//! Terminal output helpers

use awx_core::domain::job::{Job, JobStatus};
use awx_core::domain::template::{JobTemplate, WorkflowJobTemplate};
use colored::*;

/// What the CLI shows of a template
pub trait TemplateView {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Extra labelled fields for the detail view
    fn details(&self) -> Vec<(&'static str, String)>;
}

impl TemplateView for WorkflowJobTemplate {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_id(&mut fields, "Organization", self.organization);
        push_id(&mut fields, "Inventory", self.inventory);
        push_id(&mut fields, "Project", self.project);
        fields
    }
}

impl TemplateView for JobTemplate {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(job_type) = &self.job_type {
            fields.push(("Job Type", job_type.clone()));
        }
        push_id(&mut fields, "Inventory", self.inventory);
        push_id(&mut fields, "Project", self.project);
        if let Some(playbook) = &self.playbook {
            fields.push(("Playbook", playbook.clone()));
        }
        fields
    }
}

fn push_id(fields: &mut Vec<(&'static str, String)>, label: &'static str, id: Option<u64>) {
    if let Some(id) = id {
        fields.push((label, id.to_string()));
    }
}

/// Print a one-entry summary of a template
pub fn print_template_summary<T: TemplateView>(template: &T) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        template.name().bold(),
        format!("(id {})", template.id()).dimmed()
    );
    if !template.description().is_empty() {
        println!("    {}", template.description().dimmed());
    }
}

/// Print detailed template information
pub fn print_template_details<T: TemplateView>(template: &T) {
    println!("{}", "Template Details:".bold());
    println!("  ID:           {}", template.id().to_string().cyan());
    println!("  Name:         {}", template.name());
    if !template.description().is_empty() {
        println!("  Description:  {}", template.description());
    }
    for (label, value) in template.details() {
        println!("  {:<13} {}", format!("{}:", label), value);
    }
}

/// Print detailed job information
pub fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.to_string().cyan());
    if !job.name.is_empty() {
        println!("  Name:        {}", job.name);
    }
    println!("  Status:      {}", colorize_status(job.status));

    if let Some(started) = job.started {
        println!("  Started:     {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(finished) = job.finished {
        println!("  Finished:    {}", finished.format("%Y-%m-%d %H:%M:%S"));
        println!("  Elapsed:     {:.1}s", job.elapsed);
    }

    if !job.job_explanation.is_empty() {
        println!("\n{}", "Explanation:".bold());
        println!("{}", job.job_explanation.red());
    }
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Pending | JobStatus::Waiting => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Successful => status_str.green(),
        JobStatus::Failed | JobStatus::Error => status_str.red(),
        JobStatus::Canceled => status_str.dimmed(),
    }
}
