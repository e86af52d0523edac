use serde_yaml::Mapping;

use super::{core_fields, extend_scalars};
use crate::core::package::Metadata;

/// Flat frontmatter: core fields, then provider fields. `meta` is not part of
/// this provider's schema.
pub(super) fn frontmatter(metadata: &Metadata) -> Mapping {
    let mut fields = core_fields(metadata, true);
    extend_scalars(&mut fields, &metadata.provider_fields);
    fields
}
