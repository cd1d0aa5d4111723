mod download;
mod inject;
mod rule;

pub use download::DownloadCommand;
pub use inject::InjectCommand;
pub use rule::RuleCommand;

use anyhow::{bail, Result};
use crate::istioctl::Istioctl;

fn ensure_installed(istioctl: &mut Istioctl) -> Result<()> {
    if !istioctl.binary_path().is_file() {
        bail!(
            "istioctl not found at {}; run `download` first",
            istioctl.binary_path().display()
        );
    }
    istioctl.use_default_kube_config()
}
