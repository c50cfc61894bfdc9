use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use podmod_merge::ManifestDiff;
use podmod_plugin::{
    FsManifestStore, ManifestStore, PipelineResult, PluginOptions, PluginPipeline, PodmodConfig,
    ProjectConfig, SectionStatus, StepOutcome, VlcKitPlugin,
};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Apply(args) => cmd_apply(&args, format),
        Command::Diff(args) => cmd_diff(&args, format),
        Command::Remove(args) => cmd_remove(&args, format),
        Command::Status(args) => cmd_status(&args, format),
    }
}

/// Project paths and plugin options after merging the config file and flags.
struct Resolved {
    project: ProjectConfig,
    options: PluginOptions,
}

impl Resolved {
    fn podfile(&self) -> PathBuf {
        VlcKitPlugin::podfile_path(&self.project)
    }
}

fn resolve(args: &ProjectArgs, include_vlc_kit: bool) -> anyhow::Result<Resolved> {
    let (mut cfg, base) = match &args.config {
        Some(path) => {
            let cfg = PodmodConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (cfg, base)
        }
        None => (PodmodConfig::default(), PathBuf::from(".")),
    };

    if let Some(name) = &args.name {
        cfg.project.name = name.clone();
    }
    if let Some(ios_dir) = &args.ios_dir {
        cfg.project.ios_dir = ios_dir.clone();
    }
    let project = match &args.project_root {
        Some(root) => ProjectConfig::new(cfg.project.name.clone(), root, &cfg.project.ios_dir),
        None => cfg.project_config(&base),
    };

    let options = if include_vlc_kit {
        PluginOptions::with_vlc_kit(true)
    } else {
        cfg.options()
    };
    tracing::debug!(
        project = %project.name,
        podfile = %VlcKitPlugin::podfile_path(&project).display(),
        enabled = options.include_vlc_kit(),
        "resolved project"
    );
    Ok(Resolved { project, options })
}

fn cmd_apply(args: &ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = resolve(&args.project, args.include_vlc_kit)?;
    let pipeline = PluginPipeline::new().with(VlcKitPlugin::new(resolved.options.clone()));
    let result = pipeline
        .run(resolved.project.clone(), &FsManifestStore)
        .context("apply failed")?;
    report_steps("apply", &resolved, &result, format)
}

fn cmd_remove(args: &ProjectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = resolve(args, false)?;
    let pipeline = PluginPipeline::new().with(VlcKitPlugin::removal());
    let result = pipeline
        .run(resolved.project.clone(), &FsManifestStore)
        .context("remove failed")?;
    report_steps("remove", &resolved, &result, format)
}

fn report_steps(
    command: &str,
    resolved: &Resolved,
    result: &PipelineResult,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let podfile = resolved.podfile();
    match format {
        OutputFormat::Json => {
            let value = json!({
                "command": command,
                "podfile": podfile,
                "steps": result.steps,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for step in &result.steps {
                let line = match step.outcome {
                    StepOutcome::Skipped => format!(
                        "{} {}: ios.includeVLCKit not set, nothing to do",
                        "-".dimmed(),
                        step.plugin
                    ),
                    StepOutcome::Unchanged => format!(
                        "{} {} already up to date",
                        "✓".green(),
                        podfile.display().to_string().bold()
                    ),
                    StepOutcome::Patched { cleared_stale } => format!(
                        "{} Patched {}{}",
                        "✓".green().bold(),
                        podfile.display().to_string().bold(),
                        if cleared_stale { " (replaced stale section)".yellow().to_string() } else { String::new() }
                    ),
                    StepOutcome::Removed => format!(
                        "{} Removed generated section from {}",
                        "✓".green().bold(),
                        podfile.display().to_string().bold()
                    ),
                    StepOutcome::NotPresent => format!(
                        "{} No generated section in {}",
                        "-".dimmed(),
                        podfile.display().to_string().bold()
                    ),
                };
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_diff(args: &ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = resolve(&args.project, args.include_vlc_kit)?;
    let podfile = resolved.podfile();
    let plugin = VlcKitPlugin::new(resolved.options.clone());

    if !plugin.is_enabled() {
        match format {
            OutputFormat::Json => println!("{}", json!({ "podfile": podfile, "enabled": false })),
            OutputFormat::Text => println!("ios.includeVLCKit not set, nothing to do"),
        }
        return Ok(());
    }

    let old = FsManifestStore.read(&podfile)?;
    let outcome = plugin.plan(&old)?;
    let diff = ManifestDiff::compute(&old, &outcome.contents);

    match format {
        OutputFormat::Json => {
            let value = json!({
                "podfile": podfile,
                "enabled": true,
                "changed": outcome.is_changed(),
                "additions": diff.additions(),
                "deletions": diff.deletions(),
                "diff": diff,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text if diff.is_empty() => {
            println!("{} {} already up to date", "✓".green(), podfile.display().to_string().bold());
        }
        OutputFormat::Text => {
            for line in diff.unified(&podfile.display().to_string()).lines() {
                let styled = if line.starts_with("+++") || line.starts_with("---") {
                    line.bold()
                } else if line.starts_with('+') {
                    line.green()
                } else if line.starts_with('-') {
                    line.red()
                } else if line.starts_with("@@") {
                    line.cyan()
                } else {
                    line.normal()
                };
                println!("{styled}");
            }
        }
    }
    Ok(())
}

fn cmd_status(args: &ProjectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let resolved = resolve(args, false)?;
    let podfile = resolved.podfile();
    let plugin = VlcKitPlugin::new(resolved.options.clone());
    let contents = FsManifestStore.read(&podfile)?;
    let status = plugin.status(&contents)?;

    match format {
        OutputFormat::Json => {
            let value = json!({
                "podfile": podfile,
                "enabled": plugin.is_enabled(),
                "status": status,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let label = match status {
                SectionStatus::Absent => "absent".dimmed(),
                SectionStatus::Current => "current".green(),
                SectionStatus::Stale => "stale".yellow(),
            };
            println!("{}: VLCKit section {}", podfile.display().to_string().bold(), label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn project_dir(podfile: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ios")).unwrap();
        fs::write(dir.path().join("ios/Podfile"), podfile).unwrap();
        dir
    }

    fn args_for(dir: &tempfile::TempDir) -> ProjectArgs {
        ProjectArgs {
            project_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn resolve_defaults_without_config() {
        let resolved = resolve(&ProjectArgs::default(), false).unwrap();
        assert_eq!(resolved.podfile(), PathBuf::from("./ios/Podfile"));
        assert!(!resolved.options.include_vlc_kit());
    }

    #[test]
    fn resolve_reads_config_relative_to_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("podmod.toml");
        fs::write(&cfg, "[project]\nroot = \"mobile\"\n\n[ios]\nincludeVLCKit = true\n").unwrap();
        let args = ProjectArgs {
            config: Some(cfg),
            ..Default::default()
        };
        let resolved = resolve(&args, false).unwrap();
        assert_eq!(resolved.podfile(), dir.path().join("mobile").join("ios").join("Podfile"));
        assert!(resolved.options.include_vlc_kit());
    }

    #[test]
    fn resolve_flags_override_config() {
        let args = ProjectArgs {
            project_root: Some(PathBuf::from("/app")),
            ios_dir: Some(PathBuf::from("apple")),
            name: Some("Player".into()),
            ..Default::default()
        };
        let resolved = resolve(&args, true).unwrap();
        assert_eq!(resolved.project.name, "Player");
        assert_eq!(resolved.podfile(), PathBuf::from("/app/apple/Podfile"));
        assert!(resolved.options.include_vlc_kit());
    }

    #[test]
    fn resolve_missing_config_fails() {
        let args = ProjectArgs {
            config: Some(PathBuf::from("/definitely/not/here/podmod.toml")),
            ..Default::default()
        };
        assert!(resolve(&args, false).is_err());
    }

    #[test]
    fn apply_then_remove() {
        let original = "use_expo_modules!\ntarget 'App' do\nend\n";
        let dir = project_dir(original);
        let apply = ApplyArgs {
            project: args_for(&dir),
            include_vlc_kit: true,
        };
        cmd_apply(&apply, OutputFormat::Text).unwrap();
        let patched = fs::read_to_string(dir.path().join("ios/Podfile")).unwrap();
        assert!(patched.contains("  pod 'VLCKit', '4.0.0a10'"));

        cmd_apply(&apply, OutputFormat::Json).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("ios/Podfile")).unwrap(), patched);

        cmd_remove(&args_for(&dir), OutputFormat::Text).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("ios/Podfile")).unwrap(), original);
    }

    #[test]
    fn apply_without_flag_leaves_file() {
        let original = "use_expo_modules!\n";
        let dir = project_dir(original);
        let apply = ApplyArgs {
            project: args_for(&dir),
            include_vlc_kit: false,
        };
        cmd_apply(&apply, OutputFormat::Text).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("ios/Podfile")).unwrap(), original);
    }

    #[test]
    fn diff_never_writes() {
        let original = "use_expo_modules!\ntarget 'App' do\nend\n";
        let dir = project_dir(original);
        let diff = ApplyArgs {
            project: args_for(&dir),
            include_vlc_kit: true,
        };
        cmd_diff(&diff, OutputFormat::Text).unwrap();
        cmd_diff(&diff, OutputFormat::Json).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("ios/Podfile")).unwrap(), original);
    }

    #[test]
    fn apply_without_anchor_fails() {
        let dir = project_dir("target 'App' do\nend\n");
        let apply = ApplyArgs {
            project: args_for(&dir),
            include_vlc_kit: true,
        };
        let err = cmd_apply(&apply, OutputFormat::Text).unwrap_err();
        assert!(format!("{err:#}").contains("use_expo_modules"));
    }

    #[test]
    fn status_on_missing_podfile_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_status(&args_for(&dir), OutputFormat::Text).is_err());
    }

    #[test]
    fn status_after_apply() {
        let dir = project_dir("use_expo_modules!\n");
        cmd_status(&args_for(&dir), OutputFormat::Json).unwrap();
        let apply = ApplyArgs {
            project: args_for(&dir),
            include_vlc_kit: true,
        };
        cmd_apply(&apply, OutputFormat::Text).unwrap();
        cmd_status(&args_for(&dir), OutputFormat::Text).unwrap();
    }
}
