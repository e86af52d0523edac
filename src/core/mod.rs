//! Skill package model, loading, validation and per-provider resolution

pub mod loader;
pub mod package;
pub mod provider;
pub mod resolver;
pub mod validation;

pub use loader::load_package;
pub use package::{ConfigField, Metadata, Scalar, ScalarMap, Scripts, SkillManifest, SkillPackage};
pub use provider::{Capabilities, FrontmatterShape, Provider};
pub use resolver::{InstructionSet, ResolvedRecord};
pub use validation::{ValidatedSkill, ValidationMode, ValidationWarning, validate};
