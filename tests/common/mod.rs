//! Common test utilities shared across integration tests.
//!
//! `SkillFixture` lays out a skill package in a temp directory and runs the
//! `skill-universe` binary against it with an isolated `$HOME`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;
use walkdir::WalkDir;

pub struct SkillFixture {
    pub scenario: String,
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub output: PathBuf,
    pub home: PathBuf,
}

pub struct CmdOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|err| panic!("stdout is not JSON ({err}): {}", self.stdout))
    }
}

impl SkillFixture {
    pub fn new(scenario: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().join(scenario);
        let output = temp_dir.path().join("out");
        let home = temp_dir.path().join("home");
        std::fs::create_dir_all(&root).expect("create skill dir");
        std::fs::create_dir_all(&home).expect("create home dir");
        println!("[FIXTURE] scenario={scenario} root={}", root.display());
        Self {
            scenario: scenario.to_string(),
            temp_dir,
            root,
            output,
            home,
        }
    }

    /// A package with valid required metadata and a one-line body.
    pub fn basic(scenario: &str) -> Self {
        let fixture = Self::new(scenario);
        fixture.write(
            "skill.yaml",
            &format!(
                "name: {scenario}\nversion: 1.0.0\ndescription: A basic skill with no template directives\nlicense: MIT\n"
            ),
        );
        fixture.write(
            "INSTRUCTIONS.md",
            "# Basic Skill\n\nThis is a basic skill with no template directives.\n",
        );
        fixture
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write fixture file");
    }

    pub fn log_step(&self, step: &str) {
        println!("[STEP] {}: {step}", self.scenario);
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("skill-universe").expect("binary built");
        cmd.env("HOME", &self.home)
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("SKILL_UNIVERSE_CONFIG")
            .env_remove("SKILL_UNIVERSE_OUTPUT")
            .env_remove("SKILL_UNIVERSE_PROVIDERS")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> CmdOutput {
        let output = self.command().args(args).output().expect("run binary");
        let out = CmdOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        println!("[CMD] {args:?} -> {:?}", out.code);
        out
    }

    /// `compile <root> --output <out>` plus `extra` arguments.
    pub fn compile(&self, extra: &[&str]) -> CmdOutput {
        self.compile_to(&self.output, extra)
    }

    pub fn compile_to(&self, output: &Path, extra: &[&str]) -> CmdOutput {
        let root = self.root.to_string_lossy().into_owned();
        let output = output.to_string_lossy().into_owned();
        let mut args = vec!["compile", root.as_str(), "--output", output.as_str()];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    pub fn check(&self) -> CmdOutput {
        let root = self.root.to_string_lossy().into_owned();
        self.run(&["check", root.as_str()])
    }

    pub fn assert_success(&self, output: &CmdOutput, step: &str) {
        assert!(
            output.success,
            "{step} failed (code {:?})\nstdout:\n{}\nstderr:\n{}",
            output.code, output.stdout, output.stderr
        );
    }

    pub fn assert_failure(&self, output: &CmdOutput, step: &str) {
        assert_eq!(
            output.code,
            Some(1),
            "{step} should exit 1\nstdout:\n{}\nstderr:\n{}",
            output.stdout,
            output.stderr
        );
    }

    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output.join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
    }

    pub fn output_exists(&self, relative: &str) -> bool {
        self.output.join(relative).exists()
    }
}

/// Every file under `root`, keyed by `/`-separated relative path.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("entry under root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let bytes = std::fs::read(entry.path()).expect("read output file");
            (relative, bytes)
        })
        .collect()
}

/// Split `SKILL.md` into frontmatter YAML and body.
pub fn split_skill_md(content: &str) -> (serde_yaml::Mapping, String) {
    let rest = content
        .strip_prefix("---\n")
        .expect("SKILL.md starts with a frontmatter fence");
    let (yaml, body) = rest
        .split_once("\n---\n")
        .expect("SKILL.md has a closing frontmatter fence");
    let mapping = serde_yaml::from_str(yaml).expect("frontmatter is valid YAML");
    (mapping, body.to_string())
}

pub fn frontmatter_keys(content: &str) -> Vec<String> {
    split_skill_md(content)
        .0
        .keys()
        .filter_map(|k| k.as_str().map(ToString::to_string))
        .collect()
}

/// Unescaped directive syntax left in compiled output.
pub fn assert_no_template_residue(content: &str) {
    for directive in ["{{#", "{{/", "{{else}}", "{{{{raw}}}}", "{{{{/raw}}}}"] {
        assert!(
            !content.contains(directive),
            "template residue `{directive}` in:\n{content}"
        );
    }
}
