use log::{info, Level};
use yew::prelude::*;

mod config;
mod contact;
mod error;
mod events;
mod feedback;
mod media;
mod observers;
mod showcase;
mod storage;
mod switcher;
mod whatsapp;

mod components {
    pub mod contact_form;
    pub mod feedback_widget;
    pub mod hero_video;
    pub mod modal;
    pub mod section_switcher;
    pub mod showcase;
    pub mod theme_pill;
    pub mod whatsapp_widget;
}
mod pages {
    pub mod home;
}

use components::modal::ModalHost;
use pages::home::Home;

#[function_component]
fn App() -> Html {
    html! {
        <ModalHost>
            <Home />
        </ModalHost>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting site scripts");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    const STYLES: &str = include_str!("../styles.css");

    #[test]
    fn stylesheet_styles_every_state_class() {
        for rule in [
            ".video-card.hidden",
            ".whatsapp-menu.active",
            ".custom-modal-overlay.active",
            ".video-modal.active",
            ".switcher__bubble",
            ".whatsapp-toggle.has-notification",
            ".hero__device.has-played .hero__play-btn",
            ".showcase-device.has-played .showcase-play-btn",
            "[data-theme=\"dark\"]",
        ] {
            assert!(STYLES.contains(rule), "no rule for {}", rule);
        }
    }
}
