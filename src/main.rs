use std::path::Path;

use anyhow::{Context, Result};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: maplab <map.csv>")?;

    let grid = maplab::parse_map_file(Path::new(&path))
        .with_context(|| format!("parsing {path}"))?;
    info!("parsed {path}: {} loads x {} rpms", grid.rows(), grid.cols());

    let json = serde_json::to_string_pretty(&grid.summary())?;
    println!("{json}");
    Ok(())
}
