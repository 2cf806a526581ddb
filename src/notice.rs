//! Administrative dependency warning.
//!
//! Checked once per admin page load. The notice is advisory: the accordion
//! still renders (empty) when the membership capability is missing.

use crate::host::HostFeatures;
use crate::render::escape_html;

pub const DEPENDENCY_NOTICE_TEXT: &str =
    "Membership Categories Accordion requires the membership plugin to be installed and activated.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

impl NoticeLevel {
    fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Error => "notice-error",
            NoticeLevel::Warning => "notice-warning",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A dismissable-looking banner for the admin screens.
pub struct AdminNotice {
    pub level: NoticeLevel,
    pub message: String,
}

impl AdminNotice {
    pub fn render(&self) -> String {
        format!(
            "<div class=\"notice {}\">\n<p>{}</p>\n</div>\n",
            self.level.css_class(),
            escape_html(&self.message)
        )
    }
}

/// The notice to show when membership products are unavailable, if any.
pub fn dependency_notice<H: HostFeatures + ?Sized>(host: &H) -> Option<AdminNotice> {
    if host.membership_products_available() {
        return None;
    }
    tracing::warn!("membership product capability missing");
    Some(AdminNotice {
        level: NoticeLevel::Error,
        message: DEPENDENCY_NOTICE_TEXT.to_string(),
    })
}
