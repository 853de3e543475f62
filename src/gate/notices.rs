//! Login-screen messaging.
//!
//! The login screen shows at most one default notice: it only appears when no
//! other message or error is queued for the same render pass. Sources that
//! would have raced as hook registrations compose sequentially here: the
//! candidate message is inspected first, and the default-notice step runs only
//! when the candidate is empty.

pub const DEFAULT_LOGIN_NOTICE: &str = "Please log in to view this site.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Append the default notice when the collection and the secondary error slot
/// are both empty.
pub fn apply_default_notice(notices: &mut Vec<Notice>, secondary_error: Option<&str>) {
    let slot_empty = secondary_error.is_none_or(|err| err.trim().is_empty());
    if notices.is_empty() && slot_empty {
        notices.push(Notice::info(DEFAULT_LOGIN_NOTICE));
    }
}

/// Compose the notices for one render pass of the login screen.
///
/// A non-empty candidate message suppresses the default-notice step entirely;
/// messages from other sources always take priority over the default notice.
#[must_use]
pub fn compose_login_notices(
    candidate_message: &str,
    notices: Vec<Notice>,
    secondary_error: Option<&str>,
) -> Vec<Notice> {
    let mut notices = notices;
    if candidate_message.trim().is_empty() {
        apply_default_notice(&mut notices, secondary_error);
    }
    notices
}
