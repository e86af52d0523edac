//! E2E Scenario: Template Workflow
//!
//! Variables, conditionals, loops, provider blocks and escaping as they
//! appear in compiled SKILL.md bodies.

use super::common::{SkillFixture, assert_no_template_residue, split_skill_md};

fn body(fixture: &SkillFixture, relative: &str) -> String {
    split_skill_md(&fixture.read_output(relative)).1
}

#[test]
fn test_variables_conditionals_and_loops() {
    let fixture = SkillFixture::new("template-variables");
    fixture.write(
        "skill.yaml",
        "name: template-variables\n\
         version: 1.0.0\n\
         description: Tests template variable interpolation\n\
         license: MIT\n\
         meta:\n  \
           emoji: \"🧪\"\n\
         config:\n  \
           - key: api_key\n    \
             description: API key for auth\n  \
           - key: timeout\n    \
             description: Timeout in seconds\n",
    );
    fixture.write(
        "INSTRUCTIONS.md",
        "# {{name}} v{{version}} {{meta.emoji}}\n\n\
         {{description}}\n\n\
         {{#if license}}Licensed under {{license}}{{/if}}\n\
         {{#if homepage}}HAS_HOMEPAGE{{else}}HOMEPAGE_ELSE_BRANCH{{/if}}\n\
         {{#unless homepage}}NO_HOMEPAGE{{/unless}}\n\n\
         ## Configuration\n\
         {{#each config}}\n- **{{key}}**: {{description}}\n{{/each}}\n",
    );

    let output = fixture.compile(&["--target", "openclaw"]);
    fixture.assert_success(&output, "compile");

    let body = body(&fixture, "openclaw/template-variables/SKILL.md");
    assert_eq!(
        body,
        "\n# template-variables v1.0.0 🧪\n\n\
         Tests template variable interpolation\n\n\
         Licensed under MIT\n\
         HOMEPAGE_ELSE_BRANCH\n\
         NO_HOMEPAGE\n\n\
         ## Configuration\n\n\
         - **api_key**: API key for auth\n\n\
         - **timeout**: Timeout in seconds\n"
    );
}

#[test]
fn test_provider_blocks_are_isolated() {
    let fixture = SkillFixture::new("provider-blocks");
    fixture.write(
        "skill.yaml",
        "name: provider-blocks\nversion: 1.0.0\ndescription: Provider blocks\n",
    );
    fixture.write(
        "INSTRUCTIONS.md",
        "Common content for all providers\n\
         {{#provider openclaw}}OPENCLAW_ONLY_CONTENT\n{{/provider}}\
         {{#provider claude-code}}CLAUDE_CODE_ONLY_CONTENT\n{{/provider}}\
         {{#provider codex}}CODEX_ONLY_CONTENT\n{{/provider}}\
         {{#provider openclaw,codex}}SHARED_OPENCLAW_CODEX\n{{/provider}}",
    );
    fixture.assert_success(&fixture.compile(&[]), "compile");

    let claw = fixture.read_output("openclaw/provider-blocks/SKILL.md");
    let claude = fixture.read_output("claude-code/provider-blocks/SKILL.md");
    let codex = fixture.read_output("codex/.agents/skills/provider-blocks/SKILL.md");

    assert!(claw.contains("OPENCLAW_ONLY_CONTENT"));
    assert!(claw.contains("SHARED_OPENCLAW_CODEX"));
    assert!(!claw.contains("CLAUDE_CODE_ONLY_CONTENT"));
    assert!(!claw.contains("CODEX_ONLY_CONTENT"));

    assert!(claude.contains("CLAUDE_CODE_ONLY_CONTENT"));
    assert!(!claude.contains("OPENCLAW_ONLY_CONTENT"));
    assert!(!claude.contains("SHARED_OPENCLAW_CODEX"));

    assert!(codex.contains("CODEX_ONLY_CONTENT"));
    assert!(codex.contains("SHARED_OPENCLAW_CODEX"));
    assert!(!codex.contains("OPENCLAW_ONLY_CONTENT"));

    for content in [&claw, &claude, &codex] {
        assert!(content.contains("Common content for all providers"));
        assert_no_template_residue(content);
    }
}

#[test]
fn test_escaped_and_raw_content_is_verbatim() {
    let fixture = SkillFixture::basic("escaping");
    fixture.write(
        "INSTRUCTIONS.md",
        "Literal: \\{{literal_braces}}\n\
         {{{{raw}}}}{{not_a_variable}} {{#if x}}{{/if}}{{{{/raw}}}}\n\
         Normal variable: {{name}}\n",
    );
    fixture.assert_success(&fixture.compile(&["--target", "codex"]), "compile");

    let body = body(&fixture, "codex/.agents/skills/escaping/SKILL.md");
    assert_eq!(
        body,
        "\nLiteral: {{literal_braces}}\n{{not_a_variable}} {{#if x}}{{/if}}\nNormal variable: escaping\n"
    );
}

#[test]
fn test_undefined_variable_fails_without_output() {
    let fixture = SkillFixture::basic("undefined-var");
    fixture.write("INSTRUCTIONS.md", "Hello {{nmae}}\n");
    let output = fixture.compile(&[]);
    fixture.assert_failure(&output, "compile undefined variable");
    assert!(output.stderr.contains("nmae"));
    assert!(output.stderr.contains("INSTRUCTIONS.md"));
    assert!(!fixture.output_exists(""));
}

#[test]
fn test_unknown_provider_block_is_a_parse_error() {
    let fixture = SkillFixture::basic("bad-block");
    fixture.write("INSTRUCTIONS.md", "{{#provider cursor}}x{{/provider}}\n");
    let output = fixture.compile(&[]);
    fixture.assert_failure(&output, "compile unknown provider block");
    assert!(output.stderr.contains("cursor"));
    assert!(output.stderr.contains("parse error"));
}
