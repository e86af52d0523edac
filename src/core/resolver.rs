//! Per-provider merge resolution.
//!
//! Overrides are applied to a copy of the universal [`Metadata`]; the
//! universal record and the parsed templates are only ever borrowed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use super::package::{Metadata, ProviderProfile, ScalarMap, Scripts, SkillPackage};
use super::provider::Provider;
use crate::error::{Result, SkillError};
use crate::template::{RenderContext, Template, Value};

/// Everything an emitter needs for one provider.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
    pub provider: Provider,
    pub metadata: Metadata,
    /// Rendered instructions (universal text plus any appendix).
    pub body: String,
    pub scripts: Scripts,
    /// Skill directory relative to the output root.
    pub dir: PathBuf,
}

/// An instruction template together with the file it came from.
#[derive(Debug, Clone)]
pub struct SourceTemplate {
    pub path: PathBuf,
    pub template: Template,
}

impl SourceTemplate {
    pub fn parse(path: PathBuf, source: &str) -> Result<Self> {
        let template =
            Template::parse(source).map_err(|err| SkillError::from_template(&path, err))?;
        Ok(Self { path, template })
    }

    fn render(&self, ctx: &RenderContext) -> Result<String> {
        self.template
            .render(ctx)
            .map_err(|err| SkillError::from_template(&self.path, err))
    }
}

/// Every instruction template of a package, parsed once.
#[derive(Debug, Clone, Default)]
pub struct InstructionSet {
    pub universal: Option<SourceTemplate>,
    pub appendices: BTreeMap<Provider, SourceTemplate>,
}

impl InstructionSet {
    /// Parse the universal instructions and every provider appendix.
    pub fn parse(package: &SkillPackage) -> Result<Self> {
        let universal = package
            .instructions
            .as_deref()
            .map(|source| SourceTemplate::parse(package.instructions_path(), source))
            .transpose()?;
        let mut appendices = BTreeMap::new();
        for (provider, profile) in &package.profiles {
            if let Some(source) = profile.instructions.as_deref() {
                appendices.insert(
                    *provider,
                    SourceTemplate::parse(profile.instructions_path.clone(), source)?,
                );
            }
        }
        Ok(Self {
            universal,
            appendices,
        })
    }
}

/// Apply one provider's overrides to a copy of the universal metadata.
#[must_use]
pub fn resolve_metadata(universal: &Metadata, overrides: &ScalarMap) -> Metadata {
    let mut resolved = universal.clone();
    for (key, value) in overrides.iter() {
        match key {
            "name" => resolved.name = value.to_string(),
            "version" => resolved.version = value.to_string(),
            "description" => resolved.description = value.to_string(),
            "license" => resolved.license = Some(value.to_string()),
            "homepage" => resolved.homepage = Some(value.to_string()),
            _ => match key.strip_prefix("meta.") {
                Some(meta_key) => resolved.meta.insert(meta_key, value.clone()),
                None => resolved.provider_fields.insert(key, value.clone()),
            },
        }
    }
    resolved
}

/// Build the template bindings for `metadata` as seen by `provider`.
#[must_use]
pub fn render_context(metadata: &Metadata, provider: Provider) -> RenderContext {
    let mut root = BTreeMap::new();
    for (key, value) in metadata.provider_fields.iter() {
        root.insert(key.to_string(), Value::from(value));
    }
    root.insert("name".to_string(), Value::from(metadata.name.as_str()));
    root.insert("version".to_string(), Value::from(metadata.version.as_str()));
    root.insert(
        "description".to_string(),
        Value::from(metadata.description.as_str()),
    );
    if let Some(license) = &metadata.license {
        root.insert("license".to_string(), Value::from(license.as_str()));
    }
    if let Some(homepage) = &metadata.homepage {
        root.insert("homepage".to_string(), Value::from(homepage.as_str()));
    }
    root.insert("meta".to_string(), scalar_map_value(&metadata.meta));
    root.insert(
        "config".to_string(),
        Value::List(
            metadata
                .config
                .iter()
                .map(|field| {
                    [
                        ("key", Value::from(field.key.as_str())),
                        ("description", Value::from(field.description.as_str())),
                    ]
                    .into_iter()
                    .collect()
                })
                .collect(),
        ),
    );
    root.insert("provider".to_string(), Value::from(provider.as_str()));
    RenderContext::new(Value::Map(root), provider)
}

fn scalar_map_value(map: &ScalarMap) -> Value {
    map.iter().map(|(k, v)| (k, Value::from(v))).collect()
}

/// Render universal instructions and append the provider appendix after
/// exactly one blank line.
pub fn render_instructions(
    instructions: &InstructionSet,
    ctx: &RenderContext,
) -> Result<String> {
    let universal = match &instructions.universal {
        Some(template) => template.render(ctx)?,
        None => String::new(),
    };
    let Some(appendix) = instructions.appendices.get(&ctx.provider()) else {
        return Ok(universal);
    };
    let appendix = appendix.render(ctx)?;
    let head = universal.trim_end_matches(['\n', '\r']);
    if head.is_empty() {
        return Ok(appendix);
    }
    Ok(format!("{head}\n\n{appendix}"))
}

/// Shared scripts overlaid by the provider's scripts, file by file.
#[must_use]
pub fn merge_scripts(shared: &Scripts, profile: Option<&ProviderProfile>) -> Scripts {
    let mut merged = shared.clone();
    if let Some(profile) = profile {
        for (name, content) in &profile.scripts {
            merged.insert(name.clone(), content.clone());
        }
    }
    merged
}

/// Produce the full record for one provider.
pub fn resolve(
    package: &SkillPackage,
    universal: &Metadata,
    instructions: &InstructionSet,
    provider: Provider,
) -> Result<ResolvedRecord> {
    let profile = package.profile(provider);
    let metadata = match profile {
        Some(profile) => resolve_metadata(universal, &profile.overrides),
        None => universal.clone(),
    };
    if let Some(profile) = profile {
        let keys: Vec<&str> = profile.overrides.iter().map(|(k, _)| k).collect();
        debug!(provider = %provider, overrides = ?keys, "applied provider overrides");
    }

    let ctx = render_context(&metadata, provider);
    let body = render_instructions(instructions, &ctx)?;
    let scripts = merge_scripts(&package.scripts, profile);
    let dir = provider.skill_dir(&metadata.name);

    Ok(ResolvedRecord {
        provider,
        metadata,
        body,
        scripts,
        dir,
    })
}
