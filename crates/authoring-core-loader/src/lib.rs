#![warn(missing_docs)]
//! `authoring-core-loader` - file loading helpers for `authoring-core`.
//!
//! The core engine never touches the filesystem. This crate turns term catalogs, plain word lists,
//! and engine configuration files into the values the engine consumes:
//!
//! - [`load_catalog`] - YAML / JSON term catalogs (words and templates)
//! - [`load_word_list`] - one word per line, `#` comments allowed
//! - [`load_engine_config`] - YAML [`authoring_core::EngineConfig`], validated
//!
//! Each loader has a `parse_*` counterpart that works on an in-memory string.

mod catalog;
mod config;
mod error;
mod wordlist;

pub use catalog::{
    CatalogFile, CatalogFormat, DEFAULT_WORD_CATEGORY, TemplateEntry, WordEntry, load_catalog,
    parse_catalog,
};
pub use config::{load_engine_config, parse_engine_config};
pub use error::LoaderError;
pub use wordlist::{load_word_list, parse_word_list};
