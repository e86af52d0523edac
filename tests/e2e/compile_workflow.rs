//! E2E Scenario: Compile Workflow
//!
//! Compiles multi-provider packages and checks layout, frontmatter shape,
//! metadata merging, script overrides and idempotence.

use super::common::{
    SkillFixture, assert_no_template_residue, frontmatter_keys, snapshot_tree, split_skill_md,
};

const CLAW: &str = "openclaw/all-providers-skill/SKILL.md";
const CLAUDE: &str = "claude-code/all-providers-skill/SKILL.md";
const CODEX: &str = "codex/.agents/skills/all-providers-skill/SKILL.md";
const CODEX_AGENT: &str = "codex/.agents/skills/all-providers-skill/agents/openai.yaml";

fn all_providers_fixture() -> SkillFixture {
    let fixture = SkillFixture::new("all-providers-skill");
    fixture.write(
        "skill.yaml",
        "name: all-providers-skill\n\
         version: 1.0.0\n\
         description: A skill compiled for every provider\n\
         license: MIT\n\
         meta:\n  \
           emoji: lobster\n",
    );
    fixture.write(
        "INSTRUCTIONS.md",
        "# {{name}}\n\nShared instructions for {{provider}}.\n",
    );
    fixture.write(
        "providers/openclaw/metadata.yaml",
        "description: OpenClaw flavoured description\nuser-invocable: true\n",
    );
    fixture.write(
        "providers/claude-code/metadata.yaml",
        "allowed-tools: Bash\n",
    );
    fixture.write(
        "providers/codex/metadata.yaml",
        "short_description: Codex short\n",
    );
    fixture
}

#[test]
fn test_all_providers_layout_and_frontmatter() {
    let fixture = all_providers_fixture();
    fixture.log_step("Compile for all declared providers");
    let output = fixture.compile(&[]);
    fixture.assert_success(&output, "compile");

    fixture.log_step("Verify openclaw output");
    let claw = fixture.read_output(CLAW);
    assert_eq!(
        claw,
        "---\n\
         name: all-providers-skill\n\
         description: OpenClaw flavoured description\n\
         version: 1.0.0\n\
         license: MIT\n\
         metadata.openclaw:\n  \
           emoji: lobster\n  \
           user-invocable: true\n\
         ---\n\
         \n\
         # all-providers-skill\n\
         \n\
         Shared instructions for openclaw.\n"
    );

    fixture.log_step("Verify claude-code output");
    let claude = fixture.read_output(CLAUDE);
    assert_eq!(
        frontmatter_keys(&claude),
        vec!["name", "description", "version", "license", "allowed-tools"]
    );
    assert!(!claude.contains("lobster"));
    assert!(claude.contains("A skill compiled for every provider"));

    fixture.log_step("Verify codex output");
    let codex = fixture.read_output(CODEX);
    assert_eq!(frontmatter_keys(&codex), vec!["name", "description", "version"]);
    assert_eq!(
        fixture.read_output(CODEX_AGENT),
        "interface:\n  display_name: all-providers-skill\n  short_description: Codex short\n"
    );

    for content in [&claw, &claude, &codex] {
        assert_no_template_residue(content);
        assert!(content.ends_with(".\n") && !content.ends_with("\n\n"));
    }
}

#[test]
fn test_output_contains_only_expected_files() {
    let fixture = all_providers_fixture();
    let output = fixture.compile(&[]);
    fixture.assert_success(&output, "compile");

    let files: Vec<String> = snapshot_tree(&fixture.output).into_keys().collect();
    assert_eq!(files, vec![CLAUDE, CODEX, CODEX_AGENT, CLAW]);
}

#[test]
fn test_universal_fields_consistent_unless_overridden() {
    let fixture = all_providers_fixture();
    fixture.assert_success(&fixture.compile(&[]), "compile");

    for path in [CLAW, CLAUDE, CODEX] {
        let (frontmatter, _) = split_skill_md(&fixture.read_output(path));
        assert_eq!(frontmatter["name"].as_str(), Some("all-providers-skill"));
        assert_eq!(frontmatter["version"].as_str(), Some("1.0.0"));
    }
    let (claude, _) = split_skill_md(&fixture.read_output(CLAUDE));
    let (codex, _) = split_skill_md(&fixture.read_output(CODEX));
    assert_eq!(claude["description"], codex["description"]);
}

#[test]
fn test_script_override_by_filename() {
    let fixture = SkillFixture::basic("script-override");
    fixture.write("scripts/common.sh", "echo shared\n");
    fixture.write("scripts/helper.py", "print('helper')\n");
    fixture.write("providers/openclaw/scripts/common.sh", "echo openclaw\n");
    fixture.write("providers/openclaw/scripts/extra.sh", "echo extra\n");

    let output = fixture.compile(&[]);
    fixture.assert_success(&output, "compile with scripts");

    assert_eq!(
        fixture.read_output("openclaw/script-override/scripts/common.sh"),
        "echo openclaw\n"
    );
    assert!(fixture.output_exists("openclaw/script-override/scripts/extra.sh"));
    assert!(fixture.output_exists("openclaw/script-override/scripts/helper.py"));

    assert_eq!(
        fixture.read_output("claude-code/script-override/scripts/common.sh"),
        "echo shared\n"
    );
    assert!(!fixture.output_exists("claude-code/script-override/scripts/extra.sh"));
    assert_eq!(
        fixture.read_output("codex/.agents/skills/script-override/scripts/helper.py"),
        "print('helper')\n"
    );
}

#[test]
fn test_provider_appendix_is_scoped() {
    let fixture = SkillFixture::basic("appendix-skill");
    fixture.write(
        "providers/claude-code/INSTRUCTIONS.md",
        "## Claude Code notes\n\nUse {{name}} carefully.\n",
    );
    fixture.assert_success(&fixture.compile(&[]), "compile");

    let (_, claude_body) = split_skill_md(&fixture.read_output("claude-code/appendix-skill/SKILL.md"));
    assert!(claude_body.ends_with(
        "no template directives.\n\n## Claude Code notes\n\nUse appendix-skill carefully.\n"
    ));
    let claw = fixture.read_output("openclaw/appendix-skill/SKILL.md");
    assert!(!claw.contains("Claude Code notes"));
}

#[test]
fn test_compilation_is_idempotent() {
    let fixture = all_providers_fixture();
    fixture.write("scripts/run.sh", "#!/bin/sh\necho run\n");
    let first = fixture.temp_dir.path().join("first");
    let second = fixture.temp_dir.path().join("second");

    fixture.assert_success(&fixture.compile_to(&first, &[]), "first compile");
    fixture.assert_success(&fixture.compile_to(&second, &[]), "second compile");
    assert_eq!(snapshot_tree(&first), snapshot_tree(&second));

    fixture.log_step("Recompile into the same root");
    fixture.assert_success(&fixture.compile_to(&first, &[]), "recompile");
    assert_eq!(snapshot_tree(&first), snapshot_tree(&second));
}

#[test]
fn test_declared_providers_limit_default_selection() {
    let fixture = SkillFixture::new("declared");
    fixture.write(
        "skill.yaml",
        "name: declared\nversion: 2.0.0\ndescription: d\nproviders: [codex]\n",
    );
    fixture.write("INSTRUCTIONS.md", "body\n");
    let output = fixture.compile(&[]);
    fixture.assert_success(&output, "compile declared");
    assert_eq!(output.stdout.lines().count(), 1);
    assert!(fixture.output_exists("codex/.agents/skills/declared/SKILL.md"));
    assert!(!fixture.output_exists("openclaw"));
}
