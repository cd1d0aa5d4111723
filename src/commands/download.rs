use anyhow::{bail, Result};
use crate::istioctl::Istioctl;

pub struct DownloadCommand;

impl DownloadCommand {
    pub fn new() -> Self {
        DownloadCommand
    }

    pub fn execute(&self, istioctl: &mut Istioctl) -> Result<()> {
        if istioctl.remote_path().is_empty() {
            bail!("no download URL configured; pass --istioctl-url or set ISTIOCTL_URL");
        }

        istioctl.download()?;
        println!("✓ istioctl installed at {}", istioctl.binary_path().display());
        if let Some(kube_config) = istioctl.kube_config() {
            println!("✓ using kube config {}", kube_config.display());
        }
        Ok(())
    }
}
