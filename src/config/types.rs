//! Configuration types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level mkdocs-runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MkdocsConfig {
    /// Skip every mkdocs operation.
    pub skip: bool,
    /// Directory holding the documentation sources and `mkdocs.yml`.
    pub docs_dir: PathBuf,
    /// Explicit path to the `mkdocs.yml` to use. If not set, it is expected
    /// in the docs directory.
    pub config_file: Option<PathBuf>,
    /// The mkdocs command to invoke, including any extra leading arguments
    /// (e.g. `["python", "-m", "mkdocs"]`).
    pub command: Vec<String>,
    /// Extra environment variables for the mkdocs process.
    pub env: BTreeMap<String, String>,
    /// Options for the build operation.
    pub build: BuildOptions,
    /// Options for the serve operation.
    pub serve: ServeOptions,
    /// Options for the gh-deploy operation.
    pub deploy: DeployOptions,
}

impl Default for MkdocsConfig {
    fn default() -> Self {
        Self {
            skip: false,
            docs_dir: default_docs_dir(),
            config_file: None,
            command: default_command(),
            env: BTreeMap::new(),
            build: BuildOptions::default(),
            serve: ServeOptions::default(),
            deploy: DeployOptions::default(),
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_command() -> Vec<String> {
    vec!["mkdocs".to_string()]
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("target/mkdocs")
}

/// Options for `mkdocs build`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Theme name to be used.
    pub theme: Option<String>,
    /// Directory of a custom theme.
    pub theme_dir: Option<PathBuf>,
    /// Abort the build on any warning.
    pub strict: bool,
    /// Directory the site is generated into.
    pub site_dir: PathBuf,
    /// Remove stale files from the site directory before building.
    pub clean: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            theme: None,
            theme_dir: None,
            strict: false,
            site_dir: default_site_dir(),
            clean: true,
        }
    }
}

/// Options for `mkdocs serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeOptions {
    /// Server host name.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Theme name to be used.
    pub theme: Option<String>,
    /// Directory of a custom theme.
    pub theme_dir: Option<PathBuf>,
    /// Abort on any warning.
    pub strict: bool,
    /// Reload the browser on documentation changes.
    pub livereload: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            theme: None,
            theme_dir: None,
            strict: false,
            livereload: true,
        }
    }
}

/// Options for `mkdocs gh-deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployOptions {
    /// Remove stale files before building the site to deploy.
    pub clean: bool,
    /// Commit message for the pages branch. `{sha}` and `{version}` are
    /// expanded by mkdocs.
    pub message: Option<String>,
    /// The remote branch to commit to.
    pub remote_branch: Option<String>,
    /// The remote name to push to.
    pub remote_name: Option<String>,
    /// Force the push to the repository.
    pub force: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            clean: true,
            message: None,
            remote_branch: None,
            remote_name: None,
            force: false,
        }
    }
}
