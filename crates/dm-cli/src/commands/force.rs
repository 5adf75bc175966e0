//! Force command implementation

use anyhow::{bail, Result};
use dm_core::NIL_VERSION;

use crate::cli::{ForceArgs, GlobalArgs};
use crate::commands::common::{open_driver, with_lock};

/// Execute the force command
pub(crate) fn execute(args: &ForceArgs, global: &GlobalArgs) -> Result<()> {
    if args.version < NIL_VERSION {
        bail!("Invalid version {}: must be {NIL_VERSION} or greater", args.version);
    }

    let driver = open_driver(global)?;
    let result = with_lock(driver.as_ref(), |driver| {
        driver.set_version(args.version, false)?;
        Ok(())
    });
    driver.close()?;
    result?;

    if args.version == NIL_VERSION {
        println!("Cleared version");
    } else {
        println!("Forced version {}", args.version);
    }
    Ok(())
}
