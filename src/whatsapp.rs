use chrono::{Local, Timelike};

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

pub fn current_greeting() -> &'static str {
    greeting(Local::now().hour())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    General,
    Quote,
    Support,
    Project,
    /// Copy used by the plain floating button.
    Float,
}

impl MessageKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "quote" => MessageKind::Quote,
            "support" => MessageKind::Support,
            "project" => MessageKind::Project,
            "float" => MessageKind::Float,
            _ => MessageKind::General,
        }
    }
}

pub fn message(kind: MessageKind, greeting: &str, page_title: &str) -> String {
    let page = if page_title.trim().is_empty() { "your website" } else { page_title };
    match kind {
        MessageKind::General => format!("{}! I'm visiting {} and interested in your services.", greeting, page),
        MessageKind::Quote => format!("{}! I'd like to get a custom quote for a project.", greeting),
        MessageKind::Support => format!("{}! I need some assistance with my project.", greeting),
        MessageKind::Project => format!("{}! I'd like to discuss a potential collaboration.", greeting),
        MessageKind::Float => format!(
            "{}! I'm visiting {} and interested in Clipo Media's services.",
            greeting, page
        ),
    }
}

pub fn chat_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

/// Index that receives focus when Tab leaves the menu at either end, or
/// `None` when the browser should move focus itself.
pub fn wrap_focus(focused: Option<usize>, count: usize, backwards: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match (focused, backwards) {
        (Some(0), true) => Some(count - 1),
        (Some(i), false) if i == count - 1 => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_follows_the_clock() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(16), "Good afternoon");
        assert_eq!(greeting(17), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn unknown_kind_falls_back_to_general() {
        assert_eq!(MessageKind::parse("quote"), MessageKind::Quote);
        assert_eq!(MessageKind::parse("sales"), MessageKind::General);
        assert_eq!(
            message(MessageKind::parse("sales"), "Hi", ""),
            "Hi! I'm visiting your website and interested in your services."
        );
    }

    #[test]
    fn chat_link_encodes_message() {
        let text = message(MessageKind::Float, "Good evening", "Clipo Media");
        assert_eq!(
            chat_link("919985585558", &text),
            "https://wa.me/919985585558?text=Good%20evening%21%20I%27m%20visiting%20Clipo%20Media%20and%20interested%20in%20Clipo%20Media%27s%20services."
        );
    }

    #[test]
    fn tab_wraps_at_the_edges() {
        assert_eq!(wrap_focus(Some(2), 3, false), Some(0));
        assert_eq!(wrap_focus(Some(0), 3, true), Some(2));
        assert_eq!(wrap_focus(Some(1), 3, false), None);
        assert_eq!(wrap_focus(None, 3, true), None);
        assert_eq!(wrap_focus(Some(0), 0, true), None);
    }
}
