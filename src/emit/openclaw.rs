use serde_yaml::{Mapping, Value as YamlValue};

use super::{core_fields, extend_scalars};
use crate::core::package::Metadata;
use crate::core::provider::Provider;

/// Core fields plus a nested `metadata.openclaw` block holding `meta`
/// entries followed by provider fields.
pub(super) fn frontmatter(metadata: &Metadata) -> Mapping {
    let mut fields = core_fields(metadata, true);

    let mut nested = Mapping::new();
    extend_scalars(&mut nested, &metadata.meta);
    extend_scalars(&mut nested, &metadata.provider_fields);
    if !nested.is_empty() {
        fields.insert(
            YamlValue::String(format!("metadata.{}", Provider::OpenClaw)),
            YamlValue::Mapping(nested),
        );
    }
    fields
}
