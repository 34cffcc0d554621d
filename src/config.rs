#[cfg(debug_assertions)]
pub fn get_form_endpoint() -> &'static str {
    "https://script.google.com/macros/s/AKfycbx3v0BE24PJAAU600sf2Mp7QPCSXSN1E9oN5P_UeFXT/dev"  // Test deployment of the sheet script
}

#[cfg(not(debug_assertions))]
pub fn get_form_endpoint() -> &'static str {
    "https://script.google.com/macros/s/AKfycbx3v0BE24PJAAU600sf2Mp7QPCSXSN1E9oN5P_UeFXT/exec"
}

pub const WHATSAPP_NUMBER: &str = "919985585558";

/// Viewports at or below this width use the compact (mobile) switcher.
pub const COMPACT_BREAKPOINT: f64 = 1024.0;
/// Viewports at or below this width turn the showcase grid into a slider.
pub const SLIDER_BREAKPOINT: f64 = 768.0;

pub const FEEDBACK_STORAGE_KEY: &str = "userRatings";
pub const FEEDBACK_CAPACITY: usize = 50;
pub const WHATSAPP_NOTIFICATION_KEY: &str = "whatsappNotification";

/// Tunables for the section switcher gestures.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherConfig {
    /// Extra px around the indicator that still start a drag.
    pub drag_tolerance: f64,
    /// Pointer travel (px) below which a gesture is a click.
    pub click_threshold: f64,
    pub resize_debounce_ms: u32,
    /// How long the click trailing a drag stays swallowed.
    pub click_suppression_ms: u32,
    /// Section pinned (and drag locked) while the footer is visible.
    pub lock_section: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            drag_tolerance: 10.0,
            click_threshold: 5.0,
            resize_debounce_ms: 100,
            click_suppression_ms: 50,
            lock_section: "contact".to_string(),
        }
    }
}
