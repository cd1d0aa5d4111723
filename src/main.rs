use std::path::PathBuf;

use clap::{Parser, Subcommand};
mod commands;
mod istioctl;
mod logging;
mod utils;

use commands::{DownloadCommand, InjectCommand, RuleCommand};
use istioctl::{Istioctl, RuleAction};
use utils::Config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL to download istioctl-linux from [default: $ISTIOCTL_URL]
    #[arg(long, global = true)]
    istioctl_url: Option<String>,

    /// Directory the istioctl binary is downloaded into
    #[arg(long, global = true, default_value_os_t = std::env::temp_dir())]
    tmp_dir: PathBuf,

    /// Namespace every istioctl call targets
    #[arg(short, long, global = true, default_value = "default")]
    namespace: String,

    /// Dotenv file to read settings from
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download istioctl and make it executable
    Download,
    /// Write a copy of an app manifest with the proxy sidecar injected
    KubeInject {
        /// Manifest to inject
        #[arg(short = 'f', long)]
        yaml_file: String,
        /// Service name, used to name the injected manifest
        #[arg(long)]
        svc_name: String,
        /// Directory the injected manifest is written to
        #[arg(long)]
        yaml_dir: PathBuf,
        /// Proxy image hub
        #[arg(long)]
        hub: String,
        /// Proxy image tag
        #[arg(long)]
        tag: String,
    },
    /// Create rule(s)
    CreateRule { rule: String },
    /// Replace rule(s)
    ReplaceRule { rule: String },
    /// Delete rule(s)
    DeleteRule { rule: String },
}

impl Cli {
    fn istioctl(&self, config: &Config) -> Istioctl {
        let remote_path = self
            .istioctl_url
            .clone()
            .or_else(|| config.istioctl_url().map(str::to_string))
            .unwrap_or_default();
        Istioctl::new(remote_path, &self.tmp_dir, self.namespace.clone())
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let config = Config::new(&cli.env_file)?;
    let mut istioctl = cli.istioctl(&config);

    match cli.command {
        Commands::Download => {
            DownloadCommand::new().execute(&mut istioctl)?;
        }
        Commands::KubeInject { yaml_file, svc_name, yaml_dir, hub, tag } => {
            InjectCommand::new(yaml_file, svc_name, yaml_dir, hub, tag).execute(&mut istioctl)?;
        }
        Commands::CreateRule { rule } => {
            RuleCommand::new(RuleAction::Create, rule).execute(&mut istioctl)?;
        }
        Commands::ReplaceRule { rule } => {
            RuleCommand::new(RuleAction::Replace, rule).execute(&mut istioctl)?;
        }
        Commands::DeleteRule { rule } => {
            RuleCommand::new(RuleAction::Delete, rule).execute(&mut istioctl)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_kube_inject() {
        let cli = Cli::try_parse_from([
            "istioctl-e2e",
            "--tmp-dir",
            "/tmp/e2e",
            "-n",
            "bookinfo",
            "kube-inject",
            "-f",
            "app.yaml",
            "--svc-name",
            "echo",
            "--yaml-dir",
            "/tmp/yaml",
            "--hub",
            "docker.io/istio",
            "--tag",
            "0.2.1",
        ])
        .unwrap();

        assert_eq!(cli.tmp_dir, Path::new("/tmp/e2e"));
        assert_eq!(cli.namespace, "bookinfo");
        match cli.command {
            Commands::KubeInject { yaml_file, svc_name, yaml_dir, hub, tag } => {
                assert_eq!(yaml_file, "app.yaml");
                assert_eq!(svc_name, "echo");
                assert_eq!(yaml_dir, Path::new("/tmp/yaml"));
                assert_eq!(hub, "docker.io/istio");
                assert_eq!(tag, "0.2.1");
            }
            _ => panic!("expected kube-inject"),
        }
    }

    #[test]
    fn url_flag_takes_precedence_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "ISTIOCTL_URL=https://from-file\n").unwrap();
        let config = Config::new(&env_file).unwrap();

        let cli = Cli::try_parse_from([
            "istioctl-e2e",
            "--istioctl-url",
            "https://from-flag",
            "create-rule",
            "route.yaml",
        ])
        .unwrap();
        assert_eq!(cli.istioctl(&config).remote_path(), "https://from-flag");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["istioctl-e2e", "delete-rule", "route.yaml", "--namespace", "prod"]).unwrap();
        assert_eq!(cli.namespace, "prod");
        assert!(matches!(cli.command, Commands::DeleteRule { ref rule } if rule == "route.yaml"));
    }
}
