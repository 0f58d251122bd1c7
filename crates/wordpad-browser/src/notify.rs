//! Transient toast notifications.

use gloo_timers::callback::Timeout;
use web_sys::Element;
use wordpad_core::Notifier;

use crate::document;

pub const TOAST_CLASS: &str = "wordpad-toast";

/// Shows each message in a `div.wordpad-toast` appended to `<body>` and
/// removes it after `duration_ms`.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    duration_ms: u32,
}

impl ToastNotifier {
    pub fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    fn show(&self, message: &str) -> Option<Element> {
        let document = document().ok()?;
        let body = document.body()?;
        let toast = document.create_element("div").ok()?;
        toast.set_class_name(TOAST_CLASS);
        toast.set_attribute("role", "status").ok()?;
        toast.set_text_content(Some(message));
        body.append_child(&toast).ok()?;
        Some(toast)
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "notify");
        let Some(toast) = self.show(message) else {
            tracing::warn!("could not show notification");
            return;
        };
        Timeout::new(self.duration_ms, move || toast.remove()).forget();
    }
}
