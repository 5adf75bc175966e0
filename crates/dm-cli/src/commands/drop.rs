//! Drop command implementation

use anyhow::{bail, Result};

use crate::cli::{DropArgs, GlobalArgs};
use crate::commands::common::{open_driver, with_lock};

/// Execute the drop command
pub(crate) fn execute(args: &DropArgs, global: &GlobalArgs) -> Result<()> {
    if !args.yes {
        bail!("Refusing to drop every table without --yes");
    }

    let driver = open_driver(global)?;
    let result = with_lock(driver.as_ref(), |driver| {
        let tables = driver.table_names()?;
        driver.drop_all()?;
        Ok(tables.len())
    });
    driver.close()?;

    let dropped = result?;
    println!(
        "Dropped {} table{}",
        dropped,
        if dropped == 1 { "" } else { "s" }
    );
    Ok(())
}
