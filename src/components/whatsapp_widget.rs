use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlElement, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{WHATSAPP_NOTIFICATION_KEY, WHATSAPP_NUMBER};
use crate::storage::{local_storage_flag, KeyValueStore, LocalStorage};
use crate::whatsapp::{chat_link, current_greeting, message, wrap_focus, MessageKind};

const MENU_OPTIONS: [(&str, &str, &str); 4] = [
    ("general", "Chat with us", "Questions about our services"),
    ("quote", "Get a quote", "Pricing for your project"),
    ("support", "Project support", "Help with an ongoing edit"),
    ("project", "Collaborate", "Pitch a new idea"),
];

fn set_notification(visible: bool) {
    let result = if visible {
        LocalStorage.set(WHATSAPP_NOTIFICATION_KEY, "true")
    } else {
        LocalStorage.remove(WHATSAPP_NOTIFICATION_KEY)
    };
    if let Err(e) = result {
        log::warn!("whatsapp: {}", e);
    }
}

fn page_title() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.title())
        .unwrap_or_default()
}

fn track(category: &str, action: &str) {
    gloo_console::log!("📊 Event:", category, action);
}

fn focus(node: &NodeRef) {
    if let Some(element) = node.cast::<HtmlElement>() {
        let _ = element.focus();
    }
}

#[derive(Properties, PartialEq)]
pub struct WhatsAppWidgetProps {
    /// Render the plain floating button instead of the menu.
    #[prop_or_default]
    pub simple: bool,
    /// Show the badge once the page is scrolled past this percentage.
    #[prop_or_default]
    pub notify_at_scroll_percent: Option<f64>,
}

#[function_component(WhatsAppWidget)]
pub fn whatsapp_widget(props: &WhatsAppWidgetProps) -> Html {
    if props.simple {
        html! { <WhatsAppFloat /> }
    } else {
        html! { <WhatsAppMenu notify_at_scroll_percent={props.notify_at_scroll_percent} /> }
    }
}

#[derive(Properties, PartialEq)]
struct WhatsAppMenuProps {
    notify_at_scroll_percent: Option<f64>,
}

#[function_component(WhatsAppMenu)]
fn whatsapp_menu(props: &WhatsAppMenuProps) -> Html {
    let open = use_state(|| false);
    let notification = use_state(|| local_storage_flag(WHATSAPP_NOTIFICATION_KEY));
    let container = use_node_ref();
    let toggle = use_node_ref();
    let option_refs = use_memo(|_| vec![NodeRef::default(); MENU_OPTIONS.len()], ());

    let close = {
        let open = open.clone();
        Callback::from(move |_: ()| open.set(false))
    };
    let open_menu = {
        let open = open.clone();
        let notification = notification.clone();
        let option_refs = option_refs.clone();
        Callback::from(move |_: ()| {
            open.set(true);
            if *notification {
                notification.set(false);
                set_notification(false);
            }
            let option_refs = option_refs.clone();
            Timeout::new(100, move || focus(&option_refs[0])).forget();
            track("WhatsApp Menu", "Opened");
        })
    };
    let toggle_menu = {
        let open = open.clone();
        let open_menu = open_menu.clone();
        let close = close.clone();
        Callback::from(move |_: ()| if *open { close.emit(()) } else { open_menu.emit(()) })
    };

    {
        let close = close.clone();
        use_click_away(container.clone(), move |_: Event| close.emit(()));
    }
    {
        let open = open.clone();
        let toggle = toggle.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" && *open {
                open.set(false);
                focus(&toggle);
            }
        });
    }
    {
        let notification = notification.clone();
        let threshold = props.notify_at_scroll_percent;
        let triggered = use_mut_ref(|| false);
        use_event_with_window("scroll", move |_: Event| {
            let Some(threshold) = threshold else {
                return;
            };
            if *triggered.borrow() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(root) = window.document().and_then(|d| d.document_element()) else {
                return;
            };
            let scrollable = f64::from(root.scroll_height()) - window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
            let scrolled = window.scroll_y().unwrap_or(0.0);
            if scrollable > 0.0 && scrolled / scrollable * 100.0 >= threshold {
                *triggered.borrow_mut() = true;
                notification.set(true);
                set_notification(true);
            }
        });
    }

    let on_toggle_click = {
        let toggle_menu = toggle_menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            toggle_menu.emit(());
        })
    };
    let on_toggle_key = {
        let toggle_menu = toggle_menu.clone();
        let close = close.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" | " " => {
                e.prevent_default();
                toggle_menu.emit(());
            }
            "Escape" => close.emit(()),
            _ => {}
        })
    };
    let on_menu_key = {
        let option_refs = option_refs.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Tab" {
                return;
            }
            let focused = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.active_element())
                .and_then(|active| {
                    option_refs
                        .iter()
                        .position(|node| node.cast::<Element>().map_or(false, |el| el == active))
                });
            if let Some(target) = wrap_focus(focused, option_refs.len(), e.shift_key()) {
                e.prevent_default();
                focus(&option_refs[target]);
            }
        })
    };

    let greeting = current_greeting();
    let title = page_title();
    let options = MENU_OPTIONS.iter().enumerate().map(|(index, &(kind, heading, detail))| {
        let href = chat_link(WHATSAPP_NUMBER, &message(MessageKind::parse(kind), greeting, &title));
        let close = close.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            track("WhatsApp Option Click", heading);
            close.emit(());
        });
        html! {
            <a
                ref={option_refs[index].clone()}
                class="whatsapp-option"
                {href}
                target="_blank"
                rel="noopener noreferrer"
                {onclick}
            >
                <strong>{ heading }</strong>
                <span>{ detail }</span>
            </a>
        }
    });

    html! {
        <div ref={container} class="whatsapp-widget">
            <div
                id="whatsappMenu"
                class={classes!("whatsapp-menu", (*open).then_some("active"))}
                role="menu"
                onkeydown={on_menu_key}
            >
                <div class="whatsapp-menu__header">{ format!("{}! How can we help?", greeting) }</div>
                { for options }
            </div>
            <button
                id="whatsappToggle"
                ref={toggle}
                class={classes!(
                    "whatsapp-toggle",
                    (*open).then_some("active"),
                    (*notification).then_some("has-notification"),
                )}
                aria-label="Chat on WhatsApp"
                aria-expanded={(*open).to_string()}
                onclick={on_toggle_click}
                onkeydown={on_toggle_key}
            >
                { "💬" }
            </button>
        </div>
    }
}

#[function_component(WhatsAppFloat)]
fn whatsapp_float() -> Html {
    let button = use_node_ref();
    let href = chat_link(WHATSAPP_NUMBER, &message(MessageKind::Float, current_greeting(), &page_title()));

    let onclick = Callback::from(|_: MouseEvent| track("WhatsApp", "Float Button"));
    let onkeydown = {
        let button = button.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" || e.key() == " " {
                e.prevent_default();
                if let Some(element) = button.cast::<HtmlElement>() {
                    element.click();
                }
            }
        })
    };

    html! {
        <a
            ref={button}
            class="whatsapp-float"
            {href}
            target="_blank"
            rel="noopener noreferrer"
            aria-label="Chat on WhatsApp"
            {onclick}
            {onkeydown}
        >
            { "💬" }
        </a>
    }
}
