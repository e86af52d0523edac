//! skill-universe: compile universal skill packages into provider-specific
//! bundles.
//!
//! The pipeline is [`crate::core::loader`], [`crate::core::validation`],
//! [`template`] (parsed once), then per provider [`crate::core::resolver`]
//! and [`emit`] before writing, driven by [`compiler::Compiler`].
//! [`import`] goes the other way, from a provider `SKILL.md` to a package.

pub mod app;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod core;
pub mod emit;
pub mod error;
pub mod import;
pub mod template;
pub mod utils;


pub use error::{Result, SkillError};
