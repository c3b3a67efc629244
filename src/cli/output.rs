//! CLI output formatting

use crate::core::{AppDescriptor, JobSummary};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "-> ");
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "* ");

/// Format one job with its steps for terminal display
pub fn format_job(job: &JobSummary) -> String {
    let mut out = style(&job.job_name).bold().to_string();

    if job.steps.is_empty() {
        out.push_str(&format!(" {}", style("(no steps)").dim()));
        return out;
    }

    for step in &job.steps {
        let connected = if step.connected {
            format!("{}{}", LINK, style("connected").green())
        } else {
            style("unconnected").dim().to_string()
        };
        out.push_str(&format!(
            "\n  {}. {} [{}]",
            step.ordinal,
            style(&step.app_name).cyan(),
            connected
        ));
    }

    out
}

/// Format one registry entry for terminal display
pub fn format_descriptor(descriptor: &AppDescriptor) -> String {
    format!(
        "{}{} {} {}",
        PACKAGE,
        style(&descriptor.name).bold(),
        style(&descriptor.version).cyan(),
        style(&descriptor.github).dim()
    )
}
