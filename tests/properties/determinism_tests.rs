use proptest::prelude::*;
use tempfile::TempDir;

use skill_universe::compiler::{Compiler, ProviderSelection};
use skill_universe::core::provider::Provider;

fn write_package(dir: &TempDir, name: &str, description: &str, body: &str) -> std::path::PathBuf {
    let root = dir.path().join("pkg");
    std::fs::create_dir_all(root.join("scripts")).unwrap();
    std::fs::write(
        root.join("skill.yaml"),
        format!("name: \"{name}\"\nversion: 1.0.0\ndescription: \"{description}\"\n"),
    )
    .unwrap();
    std::fs::write(root.join("INSTRUCTIONS.md"), body).unwrap();
    std::fs::write(root.join("scripts/run.sh"), "echo run\n").unwrap();
    root
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_staging_is_deterministic(
        name in "[a-z][a-z0-9-]{0,15}",
        description in "[A-Za-z][A-Za-z ]{0,30}",
        body in "[a-zA-Z0-9][a-zA-Z0-9 .\n]{0,80}",
    ) {
        let dir = TempDir::new().unwrap();
        let root = write_package(&dir, &name, &description, &body);

        let (_, first) = Compiler::stage(&root, &ProviderSelection::Declared).unwrap();
        let (_, second) = Compiler::stage(&root, &ProviderSelection::Declared).unwrap();
        prop_assert_eq!(&first, &second);

        let providers: Vec<Provider> = first.iter().map(|b| b.provider).collect();
        prop_assert_eq!(providers, Provider::ALL.to_vec());

        for bundle in &first {
            let skill = bundle.file("SKILL.md").unwrap();
            let text = std::str::from_utf8(skill).unwrap();
            prop_assert!(text.starts_with("---\n"));
            prop_assert!(text.ends_with('\n'));
            prop_assert!(!text.ends_with("\n\n"));
            prop_assert!(!text.contains("{{"));
            prop_assert!(bundle.file("scripts/run.sh").is_some());
        }
    }

    #[test]
    fn test_body_survives_every_provider(body in "[a-zA-Z0-9 .]{1,60}") {
        let dir = TempDir::new().unwrap();
        let root = write_package(&dir, "body-check", "Body check", &body);
        let (_, bundles) = Compiler::stage(&root, &ProviderSelection::Declared).unwrap();
        for bundle in bundles {
            let text = String::from_utf8(bundle.file("SKILL.md").unwrap().to_vec()).unwrap();
            let expected = format!("---\n\n{body}\n");
            prop_assert!(text.ends_with(&expected), "{}", text);
        }
    }
}
