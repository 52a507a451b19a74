// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Quick fixes
//!
//! One "add private property" action per unknown-property diagnostic. The
//! action only carries a command; the edit is computed when the command
//! runs, against the document text at that moment.

use queryselector_lsp_source::{LineIndex, find_markup_import, locate_selector};
use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, Range, Url,
};
use tracing::{debug, warn};

use crate::diagnostic::{UnknownPropertyCode, is_eligible};

/// Command that inserts the typed private property
pub const ADD_PRIVATE_PROPERTY_COMMAND: &str = "queryselector-completion.addPrivateProperty";

/// Errors decoding the command's arguments
#[derive(Debug, thiserror::Error)]
pub enum CommandArgumentsError {
    #[error("Expected a document URI and a diagnostic, got {0} argument(s)")]
    Arity(usize),

    #[error("Malformed command argument: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Arguments of [`ADD_PRIVATE_PROPERTY_COMMAND`], passed positionally
#[derive(Debug, Clone, PartialEq)]
pub struct AddPropertyArguments {
    pub uri: Url,
    pub diagnostic: Diagnostic,
}

impl AddPropertyArguments {
    pub fn to_arguments(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(vec![
            serde_json::to_value(&self.uri)?,
            serde_json::to_value(&self.diagnostic)?,
        ])
    }

    pub fn from_arguments(arguments: &[Value]) -> Result<Self, CommandArgumentsError> {
        match arguments {
            [uri, diagnostic] => Ok(Self {
                uri: serde_json::from_value(uri.clone())?,
                diagnostic: serde_json::from_value(diagnostic.clone())?,
            }),
            _ => Err(CommandArgumentsError::Arity(arguments.len())),
        }
    }
}

/// Title shown for the quick fix
pub fn action_title(selector: &str) -> String {
    format!("Add private property for \"{}\"", selector)
}

/// Build one quick fix per eligible diagnostic
///
/// Nothing is offered unless the first line of `range` holds a selector
/// literal and the source imports a markup file.
pub fn quick_fixes(
    uri: &Url,
    source_text: &str,
    range: Range,
    diagnostics: &[Diagnostic],
    enabled: &[UnknownPropertyCode],
) -> Vec<CodeActionOrCommand> {
    let eligible: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| is_eligible(d, enabled))
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }

    let Some(selector) = LineIndex::new(source_text)
        .line(range.start.line as usize)
        .and_then(locate_selector)
    else {
        debug!("No selector literal on line {}", range.start.line);
        return Vec::new();
    };

    if find_markup_import(source_text).is_none() {
        debug!("Source imports no markup, no quick fix offered");
        return Vec::new();
    }

    eligible
        .into_iter()
        .filter_map(|diagnostic| add_property_action(uri, diagnostic, &selector.text_within_quotes))
        .collect()
}

fn add_property_action(
    uri: &Url,
    diagnostic: &Diagnostic,
    selector: &str,
) -> Option<CodeActionOrCommand> {
    let arguments = AddPropertyArguments {
        uri: uri.clone(),
        diagnostic: diagnostic.clone(),
    };
    let arguments = match arguments.to_arguments() {
        Ok(arguments) => arguments,
        Err(e) => {
            warn!("Failed to encode command arguments: {}", e);
            return None;
        }
    };

    let title = action_title(selector);
    Some(CodeActionOrCommand::CodeAction(CodeAction {
        title: title.clone(),
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![diagnostic.clone()]),
        command: Some(Command {
            title,
            command: ADD_PRIVATE_PROPERTY_COMMAND.to_string(),
            arguments: Some(arguments),
        }),
        ..Default::default()
    }))
}
