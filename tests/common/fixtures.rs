//! Test fixtures for creating superproject environments.
//!
//! Provides a `VendorBuilder` pattern for creating a temporary superproject
//! next to bare `file://` remotes -- all offline.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subvendor::cli::{GlobalOptions, VendorContext};

use super::git_helpers;

/// Lets `git submodule add` clone from local `file://` remotes.
pub const ALLOW_FILE_PROTOCOL: &str = "protocol.file.allow=always";

/// A superproject plus its remotes, cleaned up on drop.
pub struct VendorFixture {
    /// Kept alive for the lifetime of the fixture.
    pub _temp: TempDir,
    /// Superproject working tree root.
    pub root: PathBuf,
    /// Directory holding the bare remotes.
    pub remotes_dir: PathBuf,
    /// Directory holding the scratch clones used to push to the remotes.
    pub sources_dir: PathBuf,
}

impl VendorFixture {
    /// Path of a bare remote.
    pub fn remote_path(&self, name: &str) -> PathBuf {
        self.remotes_dir.join(format!("{}.git", name))
    }

    /// `file://` URL of a bare remote.
    pub fn remote_url(&self, name: &str) -> String {
        format!("file://{}", self.remote_path(name).display())
    }

    /// Scratch clone that pushes to the named remote.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.sources_dir.join(name)
    }

    /// Path of a checkout below the superproject root.
    pub fn vendored(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Commit a file upstream and push it. Returns the new commit hash.
    pub fn push_commit(&self, name: &str, filename: &str, content: &str) -> String {
        let source = self.source_path(name);
        let sha = git_helpers::commit_file(&source, filename, content, &format!("Update {}", filename));
        git_helpers::git(&source, &["push", "origin", "master"]);
        sha
    }

    /// Commit a file on a new upstream branch and push it. Returns the new commit hash.
    pub fn push_branch(&self, name: &str, branch: &str, filename: &str) -> String {
        let source = self.source_path(name);
        git_helpers::git(&source, &["checkout", "-b", branch]);
        let sha = git_helpers::commit_file(&source, filename, branch, &format!("Start {}", branch));
        git_helpers::git(&source, &["push", "origin", branch]);
        git_helpers::git(&source, &["checkout", "master"]);
        sha
    }

    /// Options with the file protocol allowed.
    pub fn options(&self) -> GlobalOptions {
        GlobalOptions {
            config: vec![ALLOW_FILE_PROTOCOL.to_string()],
            ..GlobalOptions::default()
        }
    }

    /// Command context rooted at the superproject.
    pub fn context(&self) -> VendorContext {
        VendorContext::discover(&self.options(), &self.root).expect("superproject should resolve")
    }

    /// Same as [`Self::context`] with `--dry-run` set.
    pub fn dry_run_context(&self) -> VendorContext {
        let options = GlobalOptions {
            dry_run: true,
            ..self.options()
        };
        VendorContext::discover(&options, &self.root).expect("superproject should resolve")
    }

    /// Vendor a remote at `vendor/<alias>` through the add handler.
    pub fn add(&self, name: &str, reference: Option<&str>, alias: &str) {
        let repo = match reference {
            Some(reference) => format!("{}@{}", self.remote_url(name), reference),
            None => self.remote_url(name),
        };
        subvendor::cli::commands::add::run_add(
            &self.context(),
            Some(&repo),
            Some(alias),
            "master",
            false,
        )
        .unwrap_or_else(|e| panic!("failed to vendor {}: {}", name, e));
    }
}

/// Builder for creating test superprojects.
pub struct VendorBuilder {
    remotes: Vec<RemoteSpec>,
}

struct RemoteSpec {
    name: String,
    tags: Vec<String>,
}

impl VendorBuilder {
    pub fn new() -> Self {
        Self {
            remotes: Vec::new(),
        }
    }

    /// Add a bare remote with one commit on `master`.
    pub fn remote(mut self, name: &str) -> Self {
        self.remotes.push(RemoteSpec {
            name: name.to_string(),
            tags: Vec::new(),
        });
        self
    }

    /// Add a bare remote whose initial commit carries `tag`.
    pub fn tagged_remote(mut self, name: &str, tag: &str) -> Self {
        self.remotes.push(RemoteSpec {
            name: name.to_string(),
            tags: vec![tag.to_string()],
        });
        self
    }

    /// Build the fixture.
    pub fn build(self) -> VendorFixture {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = temp.path().join("superproject");
        let remotes_dir = temp.path().join("remotes");
        let sources_dir = temp.path().join("sources");
        fs::create_dir_all(&remotes_dir).unwrap();
        fs::create_dir_all(&sources_dir).unwrap();

        git_helpers::init_repo(&root, "master");
        git_helpers::commit_file(&root, "README.md", "# superproject\n", "Initial commit");

        for spec in &self.remotes {
            let bare = remotes_dir.join(format!("{}.git", spec.name));
            git_helpers::init_bare_repo(&bare);

            let source = sources_dir.join(&spec.name);
            seed_source(&source, &bare, &spec.name, &spec.tags);
        }

        VendorFixture {
            _temp: temp,
            root,
            remotes_dir,
            sources_dir,
        }
    }
}

impl Default for VendorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_source(source: &Path, bare: &Path, name: &str, tags: &[String]) {
    git_helpers::init_repo(source, "master");
    git_helpers::commit_file(
        source,
        "README.md",
        &format!("# {}\n", name),
        "Initial commit",
    );
    for tag in tags {
        git_helpers::tag(source, tag);
    }
    git_helpers::add_remote(source, "origin", &bare.to_string_lossy());
    git_helpers::push_with_tags(source, "origin", "master");
}
