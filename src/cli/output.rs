use console::style;
use serde::Serialize;

use crate::error::{Result, SkillError};

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

/// The error envelope printed on stdout in robot mode.
#[must_use]
pub fn robot_error(err: &SkillError) -> serde_json::Value {
    serde_json::json!({
        "error": true,
        "code": err.code(),
        "message": err.to_string(),
    })
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SkillError::Config(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 10,
        }
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let label = format!("{key}:");
        self.lines.push(format!(
            "{} {value}",
            style(format!("{label:width$}", width = self.key_width)).dim()
        ));
        self
    }

    pub fn warning(&mut self, text: &str) -> &mut Self {
        self.lines
            .push(format!("{} {text}", style("Warning:").yellow().bold()));
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}
