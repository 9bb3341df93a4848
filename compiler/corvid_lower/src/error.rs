use corvid_diagnostic::{Diagnostic, ErrorCode};
use corvid_ir::{Cancelled, Span};

/// A required library member is absent from the compilation.
///
/// Carries the diagnostic to report. Lowering of the current method body is
/// abandoned when this surfaces; it is never retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("missing predefined member `{member}`")]
pub struct MissingPredefinedMember {
    /// Qualified name of the missing type or member.
    pub member: String,
    diagnostic: Diagnostic,
}

impl MissingPredefinedMember {
    pub(crate) fn new(member: String, span: Span) -> Self {
        let diagnostic = Diagnostic::error(ErrorCode::E2001)
            .with_message(format!("missing predefined member `{member}`"))
            .with_label(span, "required here")
            .with_note("the runtime library does not declare this member");
        MissingPredefinedMember { member, diagnostic }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Failure of a lowering pass.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LowerError {
    #[error(transparent)]
    MissingMember(#[from] MissingPredefinedMember),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
