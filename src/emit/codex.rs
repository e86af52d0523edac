use serde_yaml::{Mapping, Value as YamlValue};

use super::{core_fields, extend_scalars};
use crate::core::package::{Metadata, Scalar, ScalarMap};

/// Exactly `name`, `description`, `version`.
pub(super) fn frontmatter(metadata: &Metadata) -> Mapping {
    core_fields(metadata, false)
}

/// The `agents/openai.yaml` descriptor. Provider fields land under
/// `interface` and may replace the defaults.
pub(super) fn agent_descriptor(metadata: &Metadata) -> Mapping {
    let mut interface = ScalarMap::new();
    interface.insert("display_name", Scalar::String(metadata.name.clone()));
    interface.insert(
        "short_description",
        Scalar::String(metadata.description.clone()),
    );
    for (key, value) in metadata.provider_fields.iter() {
        interface.insert(key, value.clone());
    }

    let mut body = Mapping::new();
    extend_scalars(&mut body, &interface);
    let mut descriptor = Mapping::new();
    descriptor.insert(
        YamlValue::String("interface".to_string()),
        YamlValue::Mapping(body),
    );
    descriptor
}
