//! Shared setup for the service integration tests.

#![allow(dead_code)]

use tamed_core::Config;
use tamed_services::Services;
use tempfile::TempDir;

/// Services over filesystem stores in a fresh temporary directory
pub struct TestApp {
    pub dir: TempDir,
    pub config: Config,
    pub services: Services,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_concurrency(1).await
    }

    pub async fn with_concurrency(concurrency: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = Config::local(dir.path());
        config.upload_concurrency = concurrency;
        let services = Services::from_config(&config)
            .await
            .expect("build services");
        Self {
            dir,
            config,
            services,
        }
    }

    /// Names of the files in the media directory
    pub fn media_files(&self) -> Vec<String> {
        list_dir(&self.config.fs_media_path)
    }

    /// Names of the post records on disk
    pub fn post_records(&self) -> Vec<String> {
        list_dir(&self.config.fs_postdb_path.join("posts"))
    }
}

fn list_dir(path: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
