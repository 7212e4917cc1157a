//! PID lockfile kept next to the data document.
//!
//! Two servers writing one document would lose each other's updates, so the
//! server refuses to start while another live process holds the lock.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::errors::{Result, SmartlinkError};

/// Lock paths held by this process.
static HELD: Mutex<Vec<PathBuf>> = parking_lot::const_mutex(Vec::new());

#[derive(Debug)]
pub struct PidLock {
    path: PathBuf,
}

impl PidLock {
    /// Lock path for a data document: `<data_file>.pid`.
    pub fn path_for(data_file: impl AsRef<Path>) -> PathBuf {
        let data_file = data_file.as_ref();
        let mut name = data_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "links.json".into());
        name.push(".pid");
        data_file.with_file_name(name)
    }

    /// Take the lock for `data_file`, reclaiming it when its owner is gone.
    ///
    /// The file is created with `create_new`, so two processes racing for a
    /// free lock cannot both win. A stale file is removed and creation retried once.
    pub fn acquire(data_file: impl AsRef<Path>) -> Result<Self> {
        let path = Self::path_for(data_file);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SmartlinkError::lockfile(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        // 同进程内的获取串行化
        let mut held = HELD.lock();
        let pid = std::process::id();
        let mut reclaimed = false;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(pid.to_string().as_bytes()).map_err(|e| {
                        let _ = fs::remove_file(&path);
                        SmartlinkError::lockfile(format!(
                            "Failed to write {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    held.push(path.clone());
                    info!("Server PID: {} (lock {})", pid, path.display());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && !reclaimed => {
                    check_stale(&path, &held)?;
                    let _ = fs::remove_file(&path);
                    reclaimed = true;
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    return Err(SmartlinkError::lockfile(format!(
                        "{} was taken by another process while reclaiming it",
                        path.display()
                    )));
                }
                Err(e) => {
                    return Err(SmartlinkError::lockfile(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(self) {
        HELD.lock().retain(|p| p != &self.path);
        match fs::remove_file(&self.path) {
            Ok(()) => info!("PID file cleaned: {}", self.path.display()),
            Err(e) => error!("Failed to delete PID file {}: {}", self.path.display(), e),
        }
    }
}

/// Fails when a live owner holds the lock at `path`; otherwise the file is stale.
fn check_stale(path: &Path, held: &[PathBuf]) -> Result<()> {
    match fs::read_to_string(path) {
        // 另一个进程刚创建，尚未写入 PID
        Ok(content) if content.is_empty() => Err(SmartlinkError::lockfile(format!(
            "{} is being acquired by another process (remove it if none is starting)",
            path.display()
        ))),
        Ok(content) => match content.trim().parse::<u32>() {
            Ok(old_pid) if owner_is_alive(old_pid, path, held) => {
                error!("Server already running (PID: {})", old_pid);
                Err(SmartlinkError::lockfile(format!(
                    "{} is held by running process {}",
                    path.display(),
                    old_pid
                )))
            }
            Ok(old_pid) => {
                info!("Stale PID file for {} detected, cleaning up...", old_pid);
                Ok(())
            }
            Err(_) => {
                warn!("Corrupted PID file {}, replacing it", path.display());
                Ok(())
            }
        },
        Err(e) => {
            warn!("Unreadable PID file {}: {}, replacing it", path.display(), e);
            Ok(())
        }
    }
}

/// Our own PID counts as alive only while this process really holds the lock;
/// a leftover file with our PID comes from an earlier run (PID reuse after a
/// container restart).
fn held_by_us(pid: u32, path: &Path, held: &[PathBuf]) -> bool {
    pid == std::process::id() && held.iter().any(|p| p == path)
}

#[cfg(unix)]
fn owner_is_alive(pid: u32, path: &Path, held: &[PathBuf]) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal;
    use nix::unistd::Pid;

    if pid == std::process::id() {
        return held_by_us(pid, path, held);
    }
    // EPERM: 进程存在但属于其他用户
    matches!(
        signal::kill(Pid::from_raw(pid as i32), None),
        Ok(()) | Err(Errno::EPERM)
    )
}

// 非 Unix 平台无法探测进程，存在即视为占用
#[cfg(not(unix))]
fn owner_is_alive(pid: u32, path: &Path, held: &[PathBuf]) -> bool {
    pid != std::process::id() || held_by_us(pid, path, held)
}
