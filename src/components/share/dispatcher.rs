use crate::error::{dispatch_error, AppResult};
use tracing::debug;

/// Opens a URL with whatever the platform considers its handler. Behind a
/// trait so tests can record URLs instead of touching the OS.
pub trait LinkOpener {
    fn open(&self, url: &str) -> AppResult<()>;
}

/// Opener backed by the system browser / URL handler
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> AppResult<()> {
        webbrowser::open(url).map_err(|e| dispatch_error(&format!("Failed to open {}: {}", url, e)))
    }
}

/// Which branch delivered the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The messaging app handled the custom scheme
    App,
    /// Fell back to the provider's web URL
    Web,
}

/// Sends a message through the WhatsApp deep link, falling back to the web
/// URL when the custom scheme cannot be opened
pub struct Dispatcher<O: LinkOpener> {
    opener: O,
}

impl<O: LinkOpener> Dispatcher<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    pub fn dispatch(&self, text: &str, phone: Option<&str>) -> AppResult<DispatchOutcome> {
        let scheme_url = app_url(text, phone);
        debug!(%scheme_url, "Dispatching share message");
        if self.opener.open(&scheme_url).is_ok() {
            return Ok(DispatchOutcome::App);
        }

        let fallback = web_url(text, phone);
        debug!(%fallback, "Scheme open failed, falling back to web URL");
        self.opener
            .open(&fallback)
            .map(|_| DispatchOutcome::Web)
            .map_err(|e| dispatch_error(&format!("Both app and web dispatch failed: {}", e)))
    }
}

/// Custom-scheme URL handled by the installed messaging app
pub fn app_url(text: &str, phone: Option<&str>) -> String {
    match phone {
        Some(phone) => format!(
            "whatsapp://send?phone={}&text={}",
            phone,
            urlencoding::encode(text)
        ),
        None => format!("whatsapp://send?text={}", urlencoding::encode(text)),
    }
}

/// Web fallback under the provider's public domain
pub fn web_url(text: &str, phone: Option<&str>) -> String {
    match phone {
        Some(phone) => format!("https://wa.me/{}?text={}", phone, urlencoding::encode(text)),
        None => format!("https://wa.me/?text={}", urlencoding::encode(text)),
    }
}
