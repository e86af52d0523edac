use proptest::prelude::*;

use skill_universe::core::provider::Provider;
use skill_universe::import::escape_template;
use skill_universe::template::{RenderContext, Template, Value};

fn ctx(provider: Provider) -> RenderContext {
    let root: Value = [
        ("name", Value::from("prop-skill")),
        ("provider", Value::from(provider.as_str())),
    ]
    .into_iter()
    .collect();
    RenderContext::new(root, provider)
}

fn arb_provider() -> impl Strategy<Value = Provider> {
    prop::sample::select(Provider::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_plain_text_renders_verbatim(text in "[a-zA-Z0-9 .,!?#*\\-\n]{0,120}") {
        let template = Template::parse(text.as_str()).unwrap();
        for provider in Provider::ALL {
            prop_assert_eq!(template.render(&ctx(provider)).unwrap(), text.as_str());
        }
    }

    #[test]
    fn test_parse_never_panics(input in ".{0,200}") {
        let _ = Template::parse(input);
    }

    #[test]
    fn test_rendering_is_deterministic(
        before in "[a-z \n]{0,20}",
        after in "[a-z \n]{0,20}",
        provider in arb_provider(),
    ) {
        let source = format!("{before}{{{{name}}}}{{{{#provider codex}}}}C{{{{/provider}}}}{after}");
        let template = Template::parse(source).unwrap();
        let first = template.render(&ctx(provider)).unwrap();
        let second = template.render(&ctx(provider)).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.contains("{{"));
    }

    #[test]
    fn test_provider_blocks_are_isolated(
        marker in "[A-Z]{6,12}",
        listed in prop::sample::subsequence(Provider::ALL.to_vec(), 1..=3),
        active in arb_provider(),
    ) {
        let names: Vec<&str> = listed.iter().map(|p| p.as_str()).collect();
        let source = format!(
            "shared\n{{{{#provider {}}}}}{marker}{{{{/provider}}}}",
            names.join(",")
        );
        let rendered = Template::parse(source).unwrap().render(&ctx(active)).unwrap();
        prop_assert!(rendered.starts_with("shared\n"));
        prop_assert_eq!(rendered.contains(marker.as_str()), listed.contains(&active));
    }

    #[test]
    fn test_raw_blocks_are_verbatim(content in "[a-z0-9 #/{}\n]{0,60}") {
        prop_assume!(!content.contains("{{{{/raw}}}}"));
        let source = format!("{{{{{{{{raw}}}}}}}}{content}{{{{{{{{/raw}}}}}}}}");
        let rendered = Template::parse(source).unwrap().render(&ctx(Provider::OpenClaw)).unwrap();
        prop_assert_eq!(rendered, content);
    }

    #[test]
    fn test_escaped_braces_drop_only_the_backslash(word in "[a-z_]{1,16}") {
        let source = format!("\\{{{{{word}}}}}");
        let rendered = Template::parse(source).unwrap().render(&ctx(Provider::Codex)).unwrap();
        prop_assert_eq!(rendered, format!("{{{{{word}}}}}"));
    }

    #[test]
    fn test_escaped_import_text_renders_as_itself(text in "[a-z{}\\\\/ \n]{0,80}") {
        let text = format!("{text}\n");
        let escaped = escape_template(&text);
        let rendered = Template::parse(escaped).unwrap().render(&ctx(Provider::ClaudeCode)).unwrap();
        prop_assert_eq!(rendered, text);
    }
}
