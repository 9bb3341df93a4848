//! Error codes for all compiler diagnostics.

use std::fmt;

/// Error codes. The first digit names the phase:
/// - E1xxx: lexing and parsing
/// - E2xxx: lowering
/// - E9xxx: internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected a specific token
    E1002,
    /// Expected expression
    E1003,
    /// Unterminated block comment
    E1004,
    /// Unterminated string literal
    E1005,
    /// Unterminated character literal
    E1006,
    /// Unknown preprocessor directive (warning)
    E1007,

    // Lowering errors (E2xxx)
    /// Missing predefined or well-known member
    E2001,
    /// No applicable method
    E2002,
    /// Ambiguous method call
    E2003,
    /// Invalid initializer
    E2004,

    // Internal errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description for `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected a specific token",
            ErrorCode::E1003 => "expected expression",
            ErrorCode::E1004 => "unterminated block comment",
            ErrorCode::E1005 => "unterminated string literal",
            ErrorCode::E1006 => "unterminated character literal",
            ErrorCode::E1007 => "unknown preprocessor directive",
            ErrorCode::E2001 => "missing predefined member",
            ErrorCode::E2002 => "no applicable method",
            ErrorCode::E2003 => "ambiguous method call",
            ErrorCode::E2004 => "invalid initializer",
            ErrorCode::E9001 => "internal compiler error",
        }
    }

    pub fn is_parse_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_lowering_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}
