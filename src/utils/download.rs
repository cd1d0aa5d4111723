//! Plain GET of a URL into a local file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub fn http_download(dst: &Path, url: &str) -> Result<u64> {
    tracing::info!("downloading {} to {}", url, dst.display());

    let mut out = File::create(dst)?;
    let written = match fetch(&mut out, dst, url) {
        Ok(written) => written,
        Err(e) => {
            drop(out);
            // A partial body must not pass for an installed binary.
            if let Err(rm) = fs::remove_file(dst) {
                tracing::warn!("could not remove {}: {}", dst.display(), rm);
            }
            return Err(e);
        }
    };

    tracing::info!("downloaded {} bytes to {}", written, dst.display());
    Ok(written)
}

fn fetch(out: &mut File, dst: &Path, url: &str) -> Result<u64> {
    let mut written: u64 = 0;
    let mut write_err: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(e).with_context(|| format!("writing {}", dst.display()));
    }
    performed.with_context(|| format!("GET {} failed", url))?;

    // file:// and other status-less schemes report 0.
    let code = easy.response_code().context("no response code")?;
    if code != 0 && !(200..300).contains(&code) {
        bail!("GET {} returned HTTP {}", url, code);
    }

    out.flush()?;
    Ok(written)
}
