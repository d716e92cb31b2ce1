//! Check command implementation.
//!
//! The `envcheck check` command probes every catalog entry, writes the JSON
//! report and prints install help when required entries are missing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::Platform;
use crate::checker::DependencyChecker;
use crate::cli::args::CheckArgs;
use crate::config::{load_catalog, LoadedCatalog};
use crate::error::Result;
use crate::probe::{ProbeRunner, SystemProbeRunner};
use crate::report::{persist, RemediationPlan, VerificationReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    catalog_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, catalog_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            catalog_path: catalog_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Report location, or `None` when reporting is disabled.
    ///
    /// Relative paths are taken from the project root.
    fn report_path(&self, loaded: &LoadedCatalog) -> Option<PathBuf> {
        if self.args.no_report {
            return None;
        }
        let path = self
            .args
            .report
            .clone()
            .unwrap_or_else(|| loaded.settings.report_path.clone());
        Some(self.project_root.join(path))
    }

    fn timeout(&self, loaded: &LoadedCatalog) -> Duration {
        self.args
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| loaded.settings.timeout())
    }

    /// Run the check against a loaded catalog with the given runner.
    fn check(
        &self,
        loaded: &LoadedCatalog,
        runner: &dyn ProbeRunner,
        ui: &mut dyn UserInterface,
    ) -> VerificationReport {
        if let Some(source) = &loaded.source {
            tracing::debug!("Using catalog {}", source.display());
        }
        if ui.output_mode().shows_progress() {
            ui.message(&format!(
                "Checking {} dependencies on {}",
                loaded.catalog.len(),
                loaded.catalog.platform()
            ));
        }

        let report = DependencyChecker::new(&loaded.catalog, runner).run(ui);

        if let Some(path) = self.report_path(loaded) {
            match persist(&report, &path) {
                Ok(written) => {
                    ui.message(&format!("\nDependency report saved to {}", written.display()))
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    ui.warning(&format!("Could not save dependency report: {}", e));
                }
            }
        }

        if !report.all_required_satisfied() {
            RemediationPlan::build(
                &report,
                &loaded.catalog,
                loaded.settings.install_hint.as_deref(),
            )
            .render(ui);
        }

        report
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = Platform::current();
        let loaded = load_catalog(self.catalog_path.as_deref(), &self.project_root, platform)?;

        let lookup = self
            .args
            .package_lookup
            .unwrap_or(loaded.settings.package_lookup);
        let runner = SystemProbeRunner::new(
            self.timeout(&loaded),
            lookup.presence(loaded.settings.interpreters_for(platform)),
        );

        let report = self.check(&loaded, &runner, ui);
        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CommandSpec, DependencyEntry, PackageSpec, PlatformTable};
    use crate::config::Settings;
    use crate::probe::ProbeOutcome;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    /// Finds only the programs and modules it was given.
    struct InstalledOnly(Vec<&'static str>);

    impl ProbeRunner for InstalledOnly {
        fn run_command(&self, spec: &CommandSpec) -> ProbeOutcome {
            if self.0.contains(&spec.program.as_str()) {
                ProbeOutcome::Found {
                    output: Some(format!("{} version 3.27.4", spec.program)),
                    version: None,
                }
            } else {
                ProbeOutcome::NotFound
            }
        }

        fn lookup_package(&self, spec: &PackageSpec) -> ProbeOutcome {
            if self.0.contains(&spec.module.as_str()) {
                ProbeOutcome::Found {
                    output: None,
                    version: Some("99.0".to_string()),
                }
            } else {
                ProbeOutcome::NotFound
            }
        }
    }

    fn loaded(settings: Settings) -> LoadedCatalog {
        let catalog = Catalog::new(
            Platform::Linux,
            vec![
                DependencyEntry::tool(
                    "cmake",
                    "CMake",
                    Some("3.10"),
                    vec![CommandSpec::new("cmake", &["--version"])],
                )
                .with_install(PlatformTable::uniform("Download CMake".to_string())),
                DependencyEntry::package("numpy", "1.19", PackageSpec::new("numpy")),
                DependencyEntry::package("torch", "1.9", PackageSpec::new("torch")).optional(),
            ],
        )
        .unwrap();
        LoadedCatalog {
            catalog,
            settings,
            source: None,
        }
    }

    fn command(root: &Path, args: CheckArgs) -> CheckCommand {
        CheckCommand::new(root, None, args)
    }

    #[test]
    fn all_required_present_writes_report_and_skips_help() {
        let temp = TempDir::new().unwrap();
        let cmd = command(temp.path(), CheckArgs::default());
        let mut ui = MockUI::new();

        let report = cmd.check(
            &loaded(Settings::default()),
            &InstalledOnly(vec!["cmake", "numpy"]),
            &mut ui,
        );

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.missing_optional(), ["torch"]);
        assert!(temp.path().join("dependency_report.json").is_file());
        assert!(!ui.headers().contains(&"Installation help".to_string()));
    }

    #[test]
    fn missing_required_prints_install_help() {
        let temp = TempDir::new().unwrap();
        let cmd = command(temp.path(), CheckArgs::default());
        let mut settings = Settings::default();
        settings.install_hint = Some("Run ./scripts/install_dependencies.sh".to_string());
        let mut ui = MockUI::new();

        let report = cmd.check(&loaded(settings), &InstalledOnly(vec![]), &mut ui);

        assert_eq!(report.missing_required(), ["cmake", "numpy"]);
        assert_eq!(report.exit_code(), 1);
        assert!(ui.has_message("Download CMake"));
        assert!(ui.has_message("pip install numpy"));
        assert!(ui.has_command("pip install numpy"));
        assert!(ui.has_command("pip install torch"));
        assert!(ui.has_hint("install_dependencies.sh"));
    }

    #[test]
    fn report_flag_overrides_settings() {
        let temp = TempDir::new().unwrap();
        let args = CheckArgs {
            report: Some(PathBuf::from("out/custom.json")),
            ..Default::default()
        };
        let cmd = command(temp.path(), args);
        let mut ui = MockUI::new();

        cmd.check(
            &loaded(Settings::default()),
            &InstalledOnly(vec!["cmake", "numpy", "torch"]),
            &mut ui,
        );

        assert!(temp.path().join("out/custom.json").is_file());
        assert!(!temp.path().join("dependency_report.json").exists());
    }

    #[test]
    fn no_report_flag_skips_artifact() {
        let temp = TempDir::new().unwrap();
        let args = CheckArgs {
            no_report: true,
            ..Default::default()
        };
        let cmd = command(temp.path(), args);
        let mut ui = MockUI::new();

        cmd.check(&loaded(Settings::default()), &InstalledOnly(vec![]), &mut ui);

        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn unwritable_report_is_a_warning_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blocker"), "").unwrap();
        let args = CheckArgs {
            report: Some(PathBuf::from("blocker/report.json")),
            ..Default::default()
        };
        let cmd = command(temp.path(), args);
        let mut ui = MockUI::new();

        let report = cmd.check(
            &loaded(Settings::default()),
            &InstalledOnly(vec!["cmake", "numpy"]),
            &mut ui,
        );

        assert_eq!(report.exit_code(), 0);
        assert!(ui.has_warning("Could not save dependency report"));
    }

    #[test]
    fn timeout_flag_overrides_settings() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            timeout_secs: 7,
            ..Settings::default()
        };
        let loaded = loaded(settings);

        assert_eq!(
            command(temp.path(), CheckArgs::default()).timeout(&loaded),
            Duration::from_secs(7)
        );
        let args = CheckArgs {
            timeout: Some(2),
            ..Default::default()
        };
        assert_eq!(
            command(temp.path(), args).timeout(&loaded),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn execute_with_missing_catalog_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let cmd = CheckCommand::new(temp.path(), Some(&missing), CheckArgs::default());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn execute_runs_descriptor_probes() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envcheck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("catalog.yml"),
            r#"
entries:
  - key: shell-tool
    name: Shell Tool
    kind: system-tool
    minimum_version: "1.0"
    commands:
      - program: sh
        args: ["-c", "echo shell-tool 1.2.3"]
"#,
        )
        .unwrap();
        let cmd = CheckCommand::new(temp.path(), None, CheckArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Shell Tool: 1.2.3"));
        let json = fs::read_to_string(temp.path().join("dependency_report.json")).unwrap();
        assert!(json.contains("\"shell-tool\""));
    }
}
