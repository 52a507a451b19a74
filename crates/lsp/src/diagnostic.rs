// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Unknown-property diagnostics
//!
//! The TypeScript checker reports an assignment to an undeclared field with
//! one of two codes. Those diagnostics are the ones the quick fix can act on.
//!
//! ```text
//! this.submit = document.querySelector("#submit");
//!      ~~~~~~ 2339: Property 'submit' does not exist on type 'Login'.
//! ```

use tower_lsp::lsp_types::{Diagnostic, NumberOrString};

/// Diagnostic codes that mark a missing class property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnknownPropertyCode {
    /// TS2339: Property does not exist on type
    PropertyDoesNotExist,
    /// TS2551: Property does not exist on type, with a "did you mean" hint
    PropertyDoesNotExistDidYouMean,
}

impl UnknownPropertyCode {
    /// Every code the quick fix understands
    pub const ALL: [UnknownPropertyCode; 2] = [
        UnknownPropertyCode::PropertyDoesNotExist,
        UnknownPropertyCode::PropertyDoesNotExistDidYouMean,
    ];

    /// Numeric code as reported by the TypeScript checker
    pub fn code(self) -> i32 {
        match self {
            UnknownPropertyCode::PropertyDoesNotExist => 2339,
            UnknownPropertyCode::PropertyDoesNotExistDidYouMean => 2551,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.code()) == code)
    }

    /// Classify an LSP diagnostic code, numeric or textual
    pub fn from_diagnostic_code(code: &NumberOrString) -> Option<Self> {
        match code {
            NumberOrString::Number(n) => Self::from_code(i64::from(*n)),
            NumberOrString::String(s) => s.trim().parse::<i64>().ok().and_then(Self::from_code),
        }
    }
}

/// Whether a diagnostic carries one of the enabled codes
pub fn is_eligible(diagnostic: &Diagnostic, enabled: &[UnknownPropertyCode]) -> bool {
    diagnostic
        .code
        .as_ref()
        .and_then(UnknownPropertyCode::from_diagnostic_code)
        .is_some_and(|code| enabled.contains(&code))
}
