// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! This module provides the main LSP server backend using tower-lsp.
//!
//! ## Architecture
//!
//! ```text
//! Client → LSP Backend → Document Store (text only)
//!                ↓
//!           Engine Config
//!                ↓
//!    Completion / Quick fix / Property command
//!                ↓
//!      linked markup, read fresh per request
//! ```
//!
//! ## Supported LSP Features
//!
//! - textDocument/didOpen, didChange, didClose
//! - textDocument/completion
//! - textDocument/codeAction
//! - workspace/executeCommand
//! - workspace/didChangeConfiguration
//!
//! ## Example
//!
//! ```rust,ignore
//! use queryselector_lsp_lsp::LspBackend;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (service, socket) = LspService::new(LspBackend::new);
//!     Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!         .serve(service)
//!         .await;
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

use crate::code_action::{
    ADD_PRIVATE_PROPERTY_COMMAND, AddPropertyArguments, CommandArgumentsError, quick_fixes,
};
use crate::completion::CompletionEngine;
use crate::completion::error::CompletionError;
use crate::config::EngineConfig;
use crate::document::{Document, DocumentError, DocumentStore};
use crate::property::{PropertyError, add_private_property};
use crate::{SERVER_NAME, VERSION};

/// LSP backend implementation
///
/// Main entry point for all LSP protocol operations.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document store for managing open documents
    documents: Arc<DocumentStore>,

    /// Engine configuration
    config: Arc<RwLock<EngineConfig>>,
}

impl LspBackend {
    /// Create a new LSP backend
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(EngineConfig::default())),
        }
    }

    /// Get the engine configuration
    pub async fn get_config(&self) -> EngineConfig {
        self.config.read().await.clone()
    }

    /// Set the engine configuration
    pub async fn set_config(&self, config: EngineConfig) {
        info!(
            "Engine configuration updated: prefixes={:?}, indent={}",
            config.attribute_prefixes, config.property_indent
        );
        *self.config.write().await = config;
    }

    /// Apply a client settings payload
    ///
    /// Returns whether the payload carried settings. The current config is
    /// kept when the settings are absent or invalid.
    async fn apply_settings(&self, settings: &Value) -> std::result::Result<bool, LspError> {
        match EngineConfig::from_lsp_settings(settings)? {
            Some(config) => {
                self.set_config(config).await;
                Ok(true)
            }
            None => {
                debug!("No queryselectorCompletion settings in payload");
                Ok(false)
            }
        }
    }

    /// Apply settings, reporting invalid ones to the client
    async fn update_settings(&self, settings: &Value) {
        if let Err(e) = self.apply_settings(settings).await {
            warn!("Ignoring invalid settings: {}", e);
            self.log_message(&format!("Invalid settings ignored: {}", e), MessageType::WARNING)
                .await;
        }
    }

    /// Log a message to the client
    async fn log_message(&self, message: &str, message_type: MessageType) {
        self.client.log_message(message_type, message).await;
    }

    /// Show a message to the user
    async fn show_message(&self, message: &str, message_type: MessageType) {
        self.client.show_message(message_type, message).await;
    }

    /// Fetch an open document the server handles
    async fn supported_document(&self, uri: &Url) -> Option<Document> {
        let Some(document) = self.documents.get_document(uri).await else {
            warn!("Document not found: {}", uri);
            return None;
        };
        if !document.is_supported() {
            debug!("Skipping {} document {}", document.language_id(), uri);
            return None;
        }
        Some(document)
    }

    /// Run the property command and return the edit to apply
    async fn add_property_edit(
        &self,
        arguments: &AddPropertyArguments,
    ) -> std::result::Result<WorkspaceEdit, LspError> {
        let uri = &arguments.uri;
        let document = self
            .documents
            .get_document(uri)
            .await
            .ok_or_else(|| DocumentError::DocumentNotFound(uri.clone()))?;
        let path = document
            .file_path()
            .ok_or_else(|| LspError::NotAFile(uri.to_string()))?;

        let config = self.get_config().await;
        let start = arguments.diagnostic.range.start;
        debug!(
            "Adding property to {} (version {}) at {}:{}",
            uri,
            document.version(),
            start.line,
            start.character
        );
        let insertion = add_private_property(
            &document.get_content(),
            &path,
            document.dialect(),
            start,
            start,
            &config,
        )?;

        Ok(WorkspaceEdit {
            changes: Some(HashMap::from([(uri.clone(), vec![insertion.to_text_edit()])])),
            ..Default::default()
        })
    }
}

/// Capabilities advertised in the `initialize` response
pub fn server_capabilities(config: &EngineConfig) -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),

        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(false),
            trigger_characters: Some(config.trigger_characters()),
            work_done_progress_options: WorkDoneProgressOptions {
                work_done_progress: Some(false),
            },
            all_commit_characters: None,
            completion_item: None,
        }),

        code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
            code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
            work_done_progress_options: WorkDoneProgressOptions {
                work_done_progress: Some(false),
            },
            resolve_provider: Some(false),
        })),

        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![ADD_PRIVATE_PROPERTY_COMMAND.to_string()],
            work_done_progress_options: WorkDoneProgressOptions {
                work_done_progress: Some(false),
            },
        }),

        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    /// Initialize the LSP server
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing LSP server");
        info!("Client info: {:?}", params.client_info);

        if let Some(options) = params.initialization_options.as_ref() {
            self.update_settings(options).await;
        }

        let config = self.get_config().await;

        Ok(InitializeResult {
            capabilities: server_capabilities(&config),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(VERSION.to_string()),
            }),
        })
    }

    /// Initialized notification
    async fn initialized(&self, _params: InitializedParams) {
        info!("LSP server initialized successfully");
        self.log_message("queryselector-lsp server initialized", MessageType::INFO)
            .await;
    }

    /// Shutdown the LSP server
    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down LSP server");
        Ok(())
    }

    /// Document opened notification
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;

        info!(
            "Document opened: uri={}, language={}, version={}",
            doc.uri, doc.language_id, doc.version
        );

        self.documents
            .open_document(doc.uri, doc.text, doc.version, doc.language_id)
            .await;
    }

    /// Document changed notification
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let identifier = params.text_document;

        debug!(
            "Document changed: uri={}, version={}, changes={}",
            identifier.uri,
            identifier.version,
            params.content_changes.len()
        );

        match self
            .documents
            .update_document(&identifier, &params.content_changes)
            .await
        {
            Ok(()) => {}
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!("Document not found for change: {}", uri);
            }
            Err(e) => {
                error!("Failed to update document: {}", e);
                self.show_message(
                    &format!("Failed to update document: {}", e),
                    MessageType::ERROR,
                )
                .await;
            }
        }
    }

    /// Document closed notification
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        info!("Document closed: uri={}", uri);

        if !self.documents.close_document(&uri).await {
            warn!("Document not found for close: {}", uri);
        }
    }

    /// Completion request
    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        info!(
            "Completion requested: uri={}, line={}, col={}",
            uri, position.line, position.character
        );

        let Some(document) = self.supported_document(&uri).await else {
            return Ok(None);
        };
        let engine = CompletionEngine::new(self.get_config().await);
        let result = document
            .file_path()
            .ok_or_else(|| CompletionError::NotAFile(uri.to_string()))
            .and_then(|path| engine.complete(&document.get_content(), &path, position));

        match result {
            Ok(Some(list)) => {
                info!("Completion returned {} items", list.items.len());
                Ok(Some(CompletionResponse::List(list)))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                if e.should_return_empty() {
                    debug!("Completion skipped: {}", e);
                } else {
                    error!("Completion error: {}", e);
                    self.log_message(&format!("Completion error: {}", e), MessageType::ERROR)
                        .await;
                }
                Ok(None)
            }
        }
    }

    /// Code action request
    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri;

        debug!(
            "Code actions requested: uri={}, diagnostics={}",
            uri,
            params.context.diagnostics.len()
        );

        let Some(document) = self.supported_document(&uri).await else {
            return Ok(None);
        };

        let config = self.get_config().await;
        let actions = quick_fixes(
            &uri,
            &document.get_content(),
            params.range,
            &params.context.diagnostics,
            &config.quick_fix_codes,
        );

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }

    /// Execute command request
    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        info!("Execute command: {}", params.command);

        if params.command != ADD_PRIVATE_PROPERTY_COMMAND {
            warn!("Unknown command: {}", params.command);
            return Ok(None);
        }

        let outcome = match AddPropertyArguments::from_arguments(&params.arguments) {
            Ok(arguments) => self.add_property_edit(&arguments).await,
            Err(e) => Err(LspError::from(e)),
        };

        match outcome {
            Ok(edit) => match self.client.apply_edit(edit).await {
                Ok(response) if !response.applied => {
                    warn!("Client rejected edit: {:?}", response.failure_reason);
                }
                Ok(_) => info!("Private property inserted"),
                Err(e) => error!("Failed to apply edit: {}", e),
            },
            Err(e) => {
                warn!("Add private property failed: {}", e);
                self.show_message(&e.to_string(), MessageType::ERROR).await;
            }
        }

        Ok(None)
    }

    /// Configuration change notification
    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        info!("Configuration changed");
        self.update_settings(&params.settings).await;
    }
}

/// LSP backend errors
///
/// Errors that can occur during LSP operations.
#[derive(Debug, thiserror::Error)]
pub enum LspError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Document error
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Document URI has no file system path
    #[error("Document is not a local file: {0}")]
    NotAFile(String),

    /// Malformed command arguments
    #[error("Invalid command arguments: {0}")]
    CommandArguments(#[from] CommandArgumentsError),

    /// Property command failure, shown verbatim
    #[error(transparent)]
    Property(#[from] PropertyError),
}
