//! Tables command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::open_driver;

/// Execute the tables command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let driver = open_driver(global)?;
    let tables = driver.table_names()?;
    driver.close()?;

    if tables.is_empty() {
        println!("No tables found.");
        return Ok(());
    }
    for table in &tables {
        println!("{table}");
    }
    Ok(())
}
