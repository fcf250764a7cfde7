use git2::build::RepoBuilder;
use git2::{FetchOptions, RemoteCallbacks};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

use crate::config::CloneConfig;
use crate::error::{EstimatorError, Result};
use crate::scanner::FileWalker;

/// 待分析仓库的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// 本地目录
    Local(PathBuf),

    /// 远程仓库 URL，克隆到临时目录
    Remote(String),
}

/// 可供遍历的本地检出。远程仓库的临时目录随它一起释放
#[derive(Debug)]
pub struct Checkout {
    root: PathBuf,
    temp_dir: Option<TempDir>,
}

impl Checkout {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_temporary(&self) -> bool {
        self.temp_dir.is_some()
    }
}

impl RepositorySource {
    /// 把来源解析为本地目录
    pub fn acquire(&self, config: &CloneConfig) -> Result<Checkout> {
        match self {
            Self::Local(path) => Ok(Checkout {
                root: FileWalker::resolve_root(path)?,
                temp_dir: None,
            }),
            Self::Remote(url) => {
                let temp_dir = TempDir::new()?;
                clone_repository(
                    url,
                    temp_dir.path(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                Ok(Checkout {
                    root: temp_dir.path().to_path_buf(),
                    temp_dir: Some(temp_dir),
                })
            }
        }
    }
}

/// 克隆仓库到 `target`，超过 `timeout` 仍未完成时返回 `CloneTimeout`
pub fn clone_repository(url: &str, target: &Path, timeout: Duration) -> Result<()> {
    tracing::info!("正在克隆仓库: {}", url);

    let cancelled = Arc::new(AtomicBool::new(false));
    let (sender, receiver) = mpsc::channel();

    let worker = {
        let url = url.to_string();
        let target = target.to_path_buf();
        let cancelled = Arc::clone(&cancelled);
        thread::Builder::new()
            .name("repository-clone".to_string())
            .spawn(move || {
                let _ = sender.send(run_clone(&url, &target, &cancelled));
            })?
    };

    // 连接或握手卡住时回调不会触发，只能在调用方等待截止时间
    match receiver.recv_timeout(timeout) {
        Ok(Ok(())) => {
            let _ = worker.join();
            tracing::info!("克隆完成: {}", target.display());
            Ok(())
        }
        Ok(Err(source)) => {
            let _ = worker.join();
            Err(EstimatorError::Clone {
                url: url.to_string(),
                source,
            })
        }
        Err(RecvTimeoutError::Timeout) => {
            cancelled.store(true, Ordering::Relaxed);
            tracing::warn!("克隆超过 {} 秒，已放弃: {}", timeout.as_secs(), url);
            Err(EstimatorError::CloneTimeout {
                url: url.to_string(),
                timeout_secs: timeout.as_secs(),
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(EstimatorError::Clone {
            url: url.to_string(),
            source: git2::Error::from_str("克隆线程意外退出"),
        }),
    }
}

/// 在工作线程中执行克隆，`cancelled` 置位后在下一次传输回调时中止
fn run_clone(
    url: &str,
    target: &Path,
    cancelled: &AtomicBool,
) -> std::result::Result<(), git2::Error> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.transfer_progress(|progress| {
        if cancelled.load(Ordering::Relaxed) {
            return false;
        }
        tracing::trace!(
            "已接收对象 {}/{}",
            progress.received_objects(),
            progress.total_objects()
        );
        true
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder.clone(url, target)?;
    Ok(())
}
