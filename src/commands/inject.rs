use std::path::PathBuf;
use anyhow::Result;
use crate::istioctl::Istioctl;

pub struct InjectCommand {
    yaml_file: String,
    svc_name: String,
    yaml_dir: PathBuf,
    proxy_hub: String,
    proxy_tag: String,
}

impl InjectCommand {
    pub fn new(yaml_file: String, svc_name: String, yaml_dir: PathBuf, proxy_hub: String, proxy_tag: String) -> Self {
        InjectCommand {
            yaml_file,
            svc_name,
            yaml_dir,
            proxy_hub,
            proxy_tag,
        }
    }

    pub fn execute(&self, istioctl: &mut Istioctl) -> Result<()> {
        super::ensure_installed(istioctl)?;

        let injected = istioctl.kube_inject(
            &self.yaml_file,
            &self.svc_name,
            &self.yaml_dir,
            &self.proxy_hub,
            &self.proxy_tag,
        )?;
        println!("{}", injected.display());
        Ok(())
    }
}
