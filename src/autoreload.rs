// Restarts the server in place when its binary is replaced on disk, keeping the same
// arguments and environment. Linux only: it watches the /proc/self/exe link.
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

const SELF_EXE: &str = "/proc/self/exe";
const DELETED_SUFFIX: &str = " (deleted)";

/// The path a replaced binary was at, if `link` says the running one was deleted.
pub fn replaced_binary(link: &Path) -> Option<PathBuf> {
    link.to_str()?
        .strip_suffix(DELETED_SUFFIX)
        .map(PathBuf::from)
}

/// Polls once a second and re-execs the new binary once the running one is replaced.
pub fn spawn() -> tokio::task::JoinHandle<()> {
    tokio::spawn(async {
        match tokio::fs::read_link(SELF_EXE).await {
            Ok(exe) => info!(
                exe = %exe.display(),
                "Will restart with the same flags and environment when the binary changes"
            ),
            Err(e) => {
                error!(error = %e, "Autoreload disabled, can't read {}", SELF_EXE);
                return;
            }
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            let Ok(link) = tokio::fs::read_link(SELF_EXE).await else {
                continue;
            };
            if let Some(path) = replaced_binary(&link) {
                info!(exe = %path.display(), "Binary was replaced, restarting");
                let e = restart(&path);
                error!(exe = %path.display(), error = %e, "Autoreload failed");
            }
        }
    })
}

#[cfg(unix)]
fn restart(path: &Path) -> std::io::Error {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure. The environment is inherited.
    std::process::Command::new(path)
        .args(std::env::args_os().skip(1))
        .exec()
}

#[cfg(not(unix))]
fn restart(_path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "autoreload needs a unix exec",
    )
}
