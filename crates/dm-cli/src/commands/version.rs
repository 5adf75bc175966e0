//! Version command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::open_driver;

/// Execute the version command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let driver = open_driver(global)?;
    let state = driver.version()?;
    driver.close()?;

    println!("{state}");
    Ok(())
}
