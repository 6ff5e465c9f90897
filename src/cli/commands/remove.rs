//! Remove command implementation
//!
//! Deinitializes a vendored submodule, removes it from the index and cleans
//! up the metadata git leaves behind.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::cli::context::VendorContext;
use crate::cli::error::CommandError;
use crate::cli::output::Output;
use crate::core::spec::vendor_path;
use crate::git::submodule;
use crate::util::print_dry_run;

/// Run the remove command
///
/// Git failures leave the filesystem untouched; cleanup only starts once
/// both `deinit` and `rm` succeeded.
pub fn run_remove(ctx: &VendorContext, alias: Option<&str>) -> Result<String, CommandError> {
    let alias = vendor_path(require_alias(alias)?);

    submodule::deinit(&ctx.git, &alias)?;
    submodule::remove(&ctx.git, &alias)?;

    let module_dir = submodule::module_dir(&ctx.git, &alias)?;
    remove_module_dir(ctx, &module_dir)?;
    prune_gitmodules(ctx)?;

    if ctx.is_dry_run() {
        Output::info(&format!("Would remove {}", alias));
    } else {
        Output::success(&format!("Removed {}", alias));
    }
    Ok(alias)
}

/// The alias argument, or a usage error when it is missing or blank.
pub fn require_alias(alias: Option<&str>) -> Result<&str, CommandError> {
    alias
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| CommandError::Usage("remove requires a vendored path".to_string()))
}

/// Delete `.git/modules/<alias>` if git left it behind.
fn remove_module_dir(ctx: &VendorContext, dir: &Path) -> Result<(), CommandError> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "no module directory");
        return Ok(());
    }
    if ctx.is_dry_run() {
        print_dry_run(&format!("rm -rf {}", dir.display()));
        return Ok(());
    }

    fs::remove_dir_all(dir).map_err(|source| CommandError::Cleanup {
        path: dir.to_path_buf(),
        source,
    })
}

/// Delete `.gitmodules` once the last submodule is gone.
fn prune_gitmodules(ctx: &VendorContext) -> Result<(), CommandError> {
    let path = ctx.root().join(".gitmodules");
    let cleanup_err = |source| CommandError::Cleanup {
        path: path.clone(),
        source,
    };

    let len = match fs::metadata(&path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(cleanup_err(e)),
    };
    if len > 0 || ctx.is_dry_run() {
        return Ok(());
    }

    debug!(path = %path.display(), "removing empty .gitmodules");
    fs::remove_file(&path).map_err(cleanup_err)
}
