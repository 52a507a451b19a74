// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # queryselector-lsp - Language Server Protocol
//!
//! A language server for component classes that look up elements of a
//! companion markup file with `document.querySelector(...)`.
//!
//! ## Overview
//!
//! The server provides:
//! - Completion of `#id` and `[data-*="value"]` selectors inside selector literals
//! - A quick fix that declares a typed private field for an undeclared property
//!   assigned from a `querySelector` call
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • did_open / did_change / did_close    │
//! │  • completion / codeAction / command    │
//! └──────────────┬──────────────────────────┘
//!                │
//!         ┌──────┴──────┬────────────────┐
//!         ↓             ↓                ↓
//! ┌────────────┐ ┌──────────┐  ┌──────────────────┐
//! │   Config   │ │ Document │  │ markup + source  │
//! │   Engine   │ │   Store  │  │     crates       │
//! └────────────┘ └──────────┘  └──────────────────┘
//! ```
//!
//! ### Configuration
//!
//! ```json
//! {
//!   "queryselectorCompletion": {
//!     "attributePrefixes": ["data", "test"],
//!     "propertyIndent": 4
//!   }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`backend`]: Main LSP server implementation
//! - [`completion`]: Selector completion
//! - [`property`]: Typed field synthesis for the quick-fix command
//! - [`code_action`]: Quick-fix code actions
//! - [`markup_link`]: Locating and loading the imported markup file
//! - [`document`]: Document storage
//! - [`config`]: Engine configuration and validation

pub mod backend;
pub mod code_action;
pub mod completion;
pub mod config;
pub mod diagnostic;
pub mod document;
pub mod markup_link;
pub mod property;

// Re-exports for convenience
pub use backend::{LspBackend, LspError, server_capabilities};
pub use code_action::{ADD_PRIVATE_PROPERTY_COMMAND, AddPropertyArguments, quick_fixes};
pub use completion::CompletionEngine;
pub use completion::error::CompletionError;
pub use config::{ConfigError, EngineConfig};
pub use diagnostic::UnknownPropertyCode;
pub use document::{Document, DocumentError, DocumentStore};
pub use markup_link::{LinkError, MarkupLink};
pub use property::{FieldInsertion, PropertyError, add_private_property, element_type_name};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "queryselector-lsp";
