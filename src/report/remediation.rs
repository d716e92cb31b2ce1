//! Install guidance for missing entries.

use crate::catalog::{Catalog, DependencyEntry, InstallChannel, Platform, Probe};
use crate::ui::UserInterface;

use super::VerificationReport;

/// Shown for a missing entry the catalog has no instructions for.
pub const NO_INSTRUCTIONS: &str = "No installation instructions available";

/// One install command covering every missing package of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCommand {
    pub channel: InstallChannel,
    pub packages: Vec<String>,
}

impl ChannelCommand {
    /// The full command line, e.g. `pip install numpy pandas`.
    pub fn command_line(&self) -> String {
        format!("{} {}", self.channel.command(), self.packages.join(" "))
    }
}

/// Guidance for one missing required entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInstructions {
    pub name: String,
    pub instructions: String,
}

/// Everything needed to get from the current host to a passing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemediationPlan {
    /// One block per missing required entry, in catalog order.
    pub required: Vec<EntryInstructions>,
    /// Batched commands for missing required packages.
    pub required_packages: Vec<ChannelCommand>,
    /// Batched commands for missing optional packages.
    pub optional_packages: Vec<ChannelCommand>,
    /// Pointer to project install scripts, if configured.
    pub hint: Option<String>,
}

impl RemediationPlan {
    /// Build the plan for a finished report.
    pub fn build(report: &VerificationReport, catalog: &Catalog, hint: Option<&str>) -> Self {
        let platform = catalog.platform();
        let missing_required: Vec<&DependencyEntry> = report
            .missing_required()
            .iter()
            .filter_map(|key| catalog.get(key))
            .collect();
        let missing_optional: Vec<&DependencyEntry> = report
            .missing_optional()
            .iter()
            .filter_map(|key| catalog.get(key))
            .collect();

        let required = missing_required
            .iter()
            .map(|entry| EntryInstructions {
                name: entry.name.clone(),
                instructions: instructions_for(entry, platform),
            })
            .collect();

        Self {
            required,
            required_packages: group_by_channel(&missing_required),
            optional_packages: group_by_channel(&missing_optional),
            hint: hint.map(String::from),
        }
    }

    /// Whether there is nothing to install.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
            && self.required_packages.is_empty()
            && self.optional_packages.is_empty()
    }

    /// Print the plan.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        if self.is_empty() {
            return;
        }
        ui.show_header("Installation help");

        for entry in &self.required {
            ui.message(&format!("\n{}:", entry.name));
            for line in entry.instructions.lines() {
                ui.message(&format!("  {}", line));
            }
        }

        if !self.required_packages.is_empty() {
            ui.message("\nRequired packages:");
            for command in &self.required_packages {
                ui.show_command(&command.command_line());
            }
        }

        if !self.optional_packages.is_empty() {
            ui.message("\nOptional packages:");
            for command in &self.optional_packages {
                ui.show_command(&command.command_line());
            }
        }

        if let Some(hint) = &self.hint {
            ui.message("");
            ui.show_hint(hint);
        }
    }
}

/// Platform instructions from the catalog.
///
/// Packages without explicit instructions get their channel's install
/// command; other entries fall back to [`NO_INSTRUCTIONS`].
fn instructions_for(entry: &DependencyEntry, platform: Platform) -> String {
    if let Some(text) = entry.install_instructions(platform) {
        return text.to_string();
    }
    match &entry.probe {
        Probe::Package(spec) => format!("{} {}", spec.channel.command(), spec.install_name()),
        Probe::Commands(_) => NO_INSTRUCTIONS.to_string(),
    }
}

/// Batch package entries into one command per channel, conda first.
fn group_by_channel(entries: &[&DependencyEntry]) -> Vec<ChannelCommand> {
    [InstallChannel::Conda, InstallChannel::Pip]
        .into_iter()
        .filter_map(|channel| {
            let packages: Vec<String> = entries
                .iter()
                .filter_map(|entry| entry.probe.package())
                .filter(|spec| spec.channel == channel)
                .map(|spec| spec.install_name().to_string())
                .collect();
            (!packages.is_empty()).then_some(ChannelCommand { channel, packages })
        })
        .collect()
}
