use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "podmod",
    about = "Idempotent Podfile patches for VLCKit",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add the VLCKit pod to the Podfile when enabled
    Apply(ApplyArgs),
    /// Show the change `apply` would make, without writing
    Diff(ApplyArgs),
    /// Remove the generated VLCKit section from the Podfile
    Remove(ProjectArgs),
    /// Report whether the generated section is absent, current, or stale
    Status(ProjectArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ProjectArgs {
    /// Path to podmod.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Project root (overrides the config file)
    #[arg(long)]
    pub project_root: Option<PathBuf>,
    /// iOS project directory, relative to the project root
    #[arg(long)]
    pub ios_dir: Option<PathBuf>,
    /// Project name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    /// Enable VLCKit regardless of the config file
    #[arg(long)]
    pub include_vlc_kit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_apply() {
        let cli = Cli::try_parse_from(["podmod", "apply"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert!(!args.include_vlc_kit);
            assert!(args.project.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_apply_with_overrides() {
        let cli = Cli::try_parse_from([
            "podmod", "apply", "-c", "podmod.toml", "--project-root", "/app",
            "--ios-dir", "native/ios", "--include-vlc-kit",
        ]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert!(args.include_vlc_kit);
            assert_eq!(args.project.config, Some(PathBuf::from("podmod.toml")));
            assert_eq!(args.project.project_root, Some(PathBuf::from("/app")));
            assert_eq!(args.project.ios_dir, Some(PathBuf::from("native/ios")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["podmod", "diff", "--include-vlc-kit"]).unwrap();
        assert!(matches!(cli.command, Command::Diff(ApplyArgs { include_vlc_kit: true, .. })));
    }

    #[test]
    fn parse_remove() {
        let cli = Cli::try_parse_from(["podmod", "remove", "--project-root", "."]).unwrap();
        assert!(matches!(cli.command, Command::Remove(_)));
    }

    #[test]
    fn remove_has_no_enable_flag() {
        assert!(Cli::try_parse_from(["podmod", "remove", "--include-vlc-kit"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["podmod", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["podmod", "--verbose", "status"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["podmod", "--format", "json", "status"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
