//! skill-universe version

use serde::Serialize;

use crate::cli::output::{emit_json, robot_ok};
use crate::error::Result;

#[derive(Serialize)]
struct VersionReport {
    name: &'static str,
    version: &'static str,
}

pub fn run(robot: bool) -> Result<()> {
    let report = VersionReport {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };
    if robot {
        return emit_json(&robot_ok(report));
    }
    println!("{} {}", report.name, report.version);
    Ok(())
}
