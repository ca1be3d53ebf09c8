#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use healthcards::RESOURCE_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Throwaway site tree: <tmp>/static/resources/<category>/<files>.
pub struct SiteFixture {
    dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate temp site")?;
        fs::create_dir_all(dir.path().join(RESOURCE_DIR))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn resource_root(&self) -> PathBuf {
        self.dir.path().join(RESOURCE_DIR)
    }

    pub fn add_files(&self, category_id: &str, names: &[&str]) -> Result<PathBuf> {
        let dir = self.resource_root().join(category_id);
        fs::create_dir_all(&dir)?;
        for name in names {
            fs::write(dir.join(name), b"%PDF-1.4\n")
                .with_context(|| format!("writing fixture {name}"))?;
        }
        Ok(dir)
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }
}

pub fn healthcards_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_healthcards"))
}

// Base command with configuration env cleared so the host cannot leak in.
pub fn healthcards_command() -> Command {
    let mut cmd = Command::new(healthcards_binary());
    cmd.env_remove("HEALTHCARDS_ROOT")
        .env_remove("HEALTHCARDS_RESOURCE_ROOT")
        .env_remove("HEALTHCARDS_CATEGORIES")
        .env_remove("HEALTHCARDS_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {:?}: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
