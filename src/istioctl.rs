//! Wrapper around the `istioctl` binary used by the e2e harness.
//!
//! [`Istioctl`] knows where to fetch the binary from, where it lives locally
//! and which namespace it targets. Every wrapper builds one command line and
//! runs it through `sh -c`; the first failure is returned untouched.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::utils::{http_download, CommandExecutor};

const BINARY_NAME: &str = "istioctl";
const LINUX_ARTIFACT: &str = "istioctl-linux";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Create,
    Replace,
    Delete,
}

impl RuleAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleAction::Create => "create",
            RuleAction::Replace => "replace",
            RuleAction::Delete => "delete",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Istioctl {
    remote_path: String,
    binary_path: PathBuf,
    kube_config: Option<PathBuf>,
    namespace: String,
    executor: CommandExecutor,
}

impl Istioctl {
    pub fn new(remote_path: impl Into<String>, tmp_dir: impl AsRef<Path>, namespace: impl Into<String>) -> Self {
        Istioctl {
            remote_path: remote_path.into(),
            binary_path: tmp_dir.as_ref().join(BINARY_NAME),
            kube_config: None,
            namespace: namespace.into(),
            executor: CommandExecutor::new(),
        }
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kube_config(&self) -> Option<&Path> {
        self.kube_config.as_deref()
    }

    pub fn download_url(&self) -> String {
        format!("{}/{}", self.remote_path.trim_end_matches('/'), LINUX_ARTIFACT)
    }

    pub fn download(&mut self) -> Result<()> {
        let kube_config = default_kube_config()?;

        http_download(&self.binary_path, &self.download_url())?;
        make_executable(&self.binary_path)?;

        self.use_kube_config(kube_config);
        Ok(())
    }

    pub fn use_kube_config(&mut self, path: impl Into<PathBuf>) {
        self.kube_config = Some(path.into());
    }

    pub fn use_default_kube_config(&mut self) -> Result<()> {
        self.use_kube_config(default_kube_config()?);
        Ok(())
    }

    fn base_command(&self) -> String {
        match &self.kube_config {
            Some(config) => format!("{} -c {}", self.binary_path.display(), config.display()),
            None => self.binary_path.display().to_string(),
        }
    }

    pub fn kube_inject_command(
        &self,
        yaml_file: &str,
        injected_yaml_file: &Path,
        proxy_hub: &str,
        proxy_tag: &str,
    ) -> String {
        format!(
            "{} kube-inject -f {} -o {} --hub {} --tag {} -n {}",
            self.base_command(),
            yaml_file,
            injected_yaml_file.display(),
            proxy_hub,
            proxy_tag,
            self.namespace
        )
    }

    pub fn rule_command(&self, action: RuleAction, rule: &str) -> String {
        format!("{} -n {} {} -f {}", self.base_command(), self.namespace, action, rule)
    }

    pub fn kube_inject(
        &self,
        yaml_file: &str,
        svc_name: &str,
        yaml_dir: &Path,
        proxy_hub: &str,
        proxy_tag: &str,
    ) -> Result<PathBuf> {
        let injected_yaml_file = yaml_dir.join(format!("injected-{}-app.yaml", svc_name));
        let command = self.kube_inject_command(yaml_file, &injected_yaml_file, proxy_hub, proxy_tag);
        if let Err(e) = self.executor.shell(&command) {
            tracing::error!("Kube-inject failed for service {}", svc_name);
            return Err(e);
        }
        Ok(injected_yaml_file)
    }

    pub fn create_rule(&self, rule: &str) -> Result<()> {
        self.apply_rule(RuleAction::Create, rule)
    }

    pub fn replace_rule(&self, rule: &str) -> Result<()> {
        self.apply_rule(RuleAction::Replace, rule)
    }

    pub fn delete_rule(&self, rule: &str) -> Result<()> {
        self.apply_rule(RuleAction::Delete, rule)
    }

    fn apply_rule(&self, action: RuleAction, rule: &str) -> Result<()> {
        self.executor.shell(&self.rule_command(action, rule))?;
        Ok(())
    }
}

fn default_kube_config() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine the current user's home directory")?;
    Ok(home.join(".kube").join("config"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(path: &Path) -> Result<()> {
    fs::metadata(path)?;
    Ok(())
}
