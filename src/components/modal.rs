use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Anything a widget can ask the modal host to show. Only one modal is on
/// screen at a time; a new request replaces the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalRequest {
    Alert(String),
    Success { name: String },
    Video { url: String, direct_file: bool },
}

#[derive(Clone, PartialEq)]
pub struct ModalHandle {
    open: Callback<ModalRequest>,
}

impl ModalHandle {
    pub fn alert(&self, message: impl Into<String>) {
        self.open.emit(ModalRequest::Alert(message.into()));
    }

    pub fn success(&self, name: impl Into<String>) {
        self.open.emit(ModalRequest::Success { name: name.into() });
    }

    /// `.mp4` URLs always play in a `<video>` element, anything else embeds.
    pub fn video(&self, url: impl Into<String>, direct_file: bool) {
        let url = url.into();
        let direct_file = direct_file || url.ends_with(".mp4");
        self.open.emit(ModalRequest::Video { url, direct_file });
    }
}

const FADE_MS: u32 = 300;

/// Counts opens so a fade-out only removes the modal it started on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FadeGuard {
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeToken(u32);

impl FadeGuard {
    pub fn open(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn close(&self) -> FadeToken {
        FadeToken(self.generation)
    }

    /// Whether the modal closed with `token` is still the one on screen.
    pub fn is_current(&self, token: FadeToken) -> bool {
        self.generation == token.0
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalHostProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ModalHost)]
pub fn modal_host(props: &ModalHostProps) -> Html {
    let current = use_state(|| None::<ModalRequest>);
    let visible = use_state(|| false);
    let fade = use_mut_ref(FadeGuard::default);

    let handle = {
        let current = current.clone();
        let visible = visible.clone();
        let fade = fade.clone();
        use_memo(
            move |_| ModalHandle {
                open: Callback::from(move |request: ModalRequest| {
                    log::debug!("modal: {:?}", request);
                    fade.borrow_mut().open();
                    current.set(Some(request));
                    visible.set(false);
                    let visible = visible.clone();
                    Timeout::new(16, move || visible.set(true)).forget();
                }),
            },
            (),
        )
    };

    let close = {
        let current = current.clone();
        let visible = visible.clone();
        let fade = fade.clone();
        Callback::from(move |_: MouseEvent| {
            visible.set(false);
            let current = current.clone();
            let fade = fade.clone();
            let token = fade.borrow().close();
            Timeout::new(FADE_MS, move || {
                if fade.borrow().is_current(token) {
                    current.set(None);
                }
            })
            .forget();
        })
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let modal = match &*current {
        None => html! {},
        Some(ModalRequest::Alert(message)) => html! {
            <div class={classes!("custom-modal-overlay", (*visible).then_some("active"))} onclick={close.clone()}>
                <div class="custom-modal" onclick={keep_open.clone()}>
                    <div class="custom-modal-content">{ message }</div>
                    <button class="custom-modal-btn" onclick={close.clone()}>{ "OK" }</button>
                </div>
            </div>
        },
        Some(ModalRequest::Success { name }) => html! {
            <div class={classes!("custom-modal-overlay", (*visible).then_some("active"))} onclick={close.clone()}>
                <div class="custom-modal success-modal" onclick={keep_open.clone()}>
                    <div class="success-icon">
                        <svg viewBox="0 0 52 52">
                            <circle cx="26" cy="26" r="25" fill="none"/>
                            <path fill="none" stroke="currentColor" stroke-width="5" stroke-linecap="round" stroke-linejoin="round" d="M14.1 27.2l7.1 7.2 16.7-16.8"/>
                        </svg>
                    </div>
                    <h3 class="success-title">{ "Request Received!" }</h3>
                    <p class="success-message">
                        { "Thanks " }<span class="highlight">{ name }</span>{ "!" }<br/>
                        { "We'll call you within 24 hours." }
                    </p>
                    <button class="success-btn" onclick={close.clone()}>{ "Got It" }</button>
                </div>
            </div>
        },
        Some(ModalRequest::Video { url, direct_file }) => {
            let player = if *direct_file {
                html! { <video src={url.clone()} controls=true autoplay=true /> }
            } else {
                html! {
                    <iframe
                        src={url.clone()}
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                        allowfullscreen=true
                    />
                }
            };
            html! {
                <div id="videoModal" class={classes!("video-modal", (*visible).then_some("active"))}>
                    <div class="modal-overlay" onclick={close.clone()}></div>
                    <div class="modal-content">
                        <button class="modal-close" aria-label="Close video" onclick={close.clone()}>{ "×" }</button>
                        <div class="modal-player">{ player }</div>
                    </div>
                </div>
            }
        }
    };

    html! {
        <ContextProvider<ModalHandle> context={(*handle).clone()}>
            { for props.children.iter() }
            { modal }
        </ContextProvider<ModalHandle>>
    }
}

/// Modal handle from the surrounding [`ModalHost`]. Outside a host requests are
/// only logged.
#[hook]
pub fn use_modal() -> ModalHandle {
    use_context::<ModalHandle>().unwrap_or_else(|| ModalHandle {
        open: Callback::from(|request: ModalRequest| log::warn!("no modal host for {:?}", request)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_out_clears_the_modal_it_closed() {
        let mut fade = FadeGuard::default();
        fade.open();
        let token = fade.close();
        assert!(fade.is_current(token));
    }

    #[test]
    fn open_during_fade_keeps_the_new_modal() {
        let mut fade = FadeGuard::default();
        fade.open();
        let token = fade.close();
        fade.open();
        assert!(!fade.is_current(token));

        // Closing the new one fades it normally.
        let token = fade.close();
        assert!(fade.is_current(token));
    }

    #[test]
    fn repeated_close_of_one_modal_stays_current() {
        let mut fade = FadeGuard::default();
        fade.open();
        let first = fade.close();
        let second = fade.close();
        assert_eq!(first, second);
        assert!(fade.is_current(first));
    }
}
