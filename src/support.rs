//! Customer-service contact sheet.
//!
//! Shows the service number in an action sheet and lets the user call it
//! or copy it. Failures are reported to the user with a toast and never
//! propagate.

use crate::platform::{Platform, Toast};

/// Action sheet label for calling the number.
pub const CALL_LABEL: &str = "Call";

/// Action sheet label for copying the number.
pub const COPY_LABEL: &str = "Copy";

/// What the user did with the contact sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The sheet was closed, or the number itself was tapped.
    Dismissed,
    /// A phone call was started.
    Called,
    /// The number was copied to the clipboard.
    Copied,
    /// The chosen action failed; the user has been told.
    Failed,
}

/// Shows the contact sheet for `phone`.
///
/// The number is displayed as given; dashes are stripped before it is
/// dialled or copied.
pub async fn contact_service(platform: &dyn Platform, phone: &str) -> ContactOutcome {
    let digits: String = phone.chars().filter(|c| *c != '-').collect();
    let items = [phone.to_string(), CALL_LABEL.to_string(), COPY_LABEL.to_string()];

    let choice = match platform.show_action_sheet(&items).await {
        Ok(choice) => choice,
        Err(e) => {
            tracing::debug!("Contact sheet closed: {e}");
            return ContactOutcome::Dismissed;
        }
    };

    match choice {
        1 => match platform.make_phone_call(&digits) {
            Ok(()) => ContactOutcome::Called,
            Err(e) => {
                tracing::warn!("Phone call failed: {e}");
                platform.show_toast(&Toast::text("Call failed"));
                ContactOutcome::Failed
            }
        },
        2 => match platform.set_clipboard(&digits) {
            Ok(()) => {
                platform.show_toast(&Toast::success("Number copied"));
                ContactOutcome::Copied
            }
            Err(e) => {
                tracing::warn!("Copy to clipboard failed: {e}");
                platform.show_toast(&Toast::text("Copy failed"));
                ContactOutcome::Failed
            }
        },
        _ => ContactOutcome::Dismissed,
    }
}
