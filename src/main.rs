// projectinfo/src/main.rs

use anyhow::Result;

fn main() -> Result<()> {
    projectinfo::commands::run_cli()
}
