//! Exec command implementation

use anyhow::{bail, Context, Result};
use dm_db::Driver;
use log::info;
use std::fs::File;
use std::io::BufReader;

use crate::cli::{ExecArgs, GlobalArgs};
use crate::commands::common::{open_driver, with_lock};

/// Execute the exec command
pub(crate) fn execute(args: &ExecArgs, global: &GlobalArgs) -> Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let mut reader = BufReader::new(file);

    let driver = open_driver(global)?;
    let result = with_lock(driver.as_ref(), |driver| {
        apply(driver, &mut reader, args.version)
    });
    driver.close()?;
    result.with_context(|| format!("Failed to execute {}", args.file.display()))?;

    match args.version {
        Some(version) => println!("Applied {} as version {version}", args.file.display()),
        None => println!("Executed {}", args.file.display()),
    }
    Ok(())
}

/// Run one script, bracketing it with a dirty marker when it carries a
/// version. A dirty database is left untouched.
pub(crate) fn apply(
    driver: &dyn Driver,
    script: &mut dyn std::io::Read,
    version: Option<i64>,
) -> Result<()> {
    let current = driver.version()?;
    if current.dirty {
        bail!(
            "Database is dirty at version {}. Fix it by hand, then run `dm force <version>`",
            current.version
        );
    }

    let Some(version) = version else {
        driver.run_reader(script)?;
        return Ok(());
    };

    driver.set_version(version, true)?;
    driver.run_reader(script)?;
    driver.set_version(version, false)?;
    info!("Migrated from {current} to {version}");
    Ok(())
}

#[cfg(test)]
#[path = "exec_test.rs"]
mod tests;
