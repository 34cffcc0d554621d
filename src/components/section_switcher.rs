use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};
use yew::prelude::*;

use crate::config::{SwitcherConfig, COMPACT_BREAKPOINT};
use crate::events::{pointer_client_x, viewport_width, Listener};
use crate::switcher::{
    Motion, OptionBounds, SelectionChanged, Switcher, SwitcherInput, SwitcherOption,
};

#[derive(Properties, PartialEq)]
pub struct SectionSwitcherProps {
    pub options: Vec<SwitcherOption>,
    #[prop_or_default]
    pub initial: Option<AttrValue>,
    /// Section currently in the middle of the viewport.
    #[prop_or_default]
    pub section_in_view: Option<AttrValue>,
    #[prop_or_default]
    pub footer_visible: bool,
    #[prop_or_default]
    pub config: SwitcherConfig,
    pub on_change: Callback<SelectionChanged>,
}

pub enum Msg {
    Input(SwitcherInput),
    DragStarted,
    Resized,
    Measure,
}

pub struct SectionSwitcher {
    switcher: Rc<RefCell<Switcher>>,
    container: NodeRef,
    bubble: NodeRef,
    option_refs: Vec<NodeRef>,
    press_listeners: Vec<Listener>,
    drag_listeners: Vec<Listener>,
    _resize_listener: Option<Listener>,
    resize_timeout: Option<Timeout>,
    click_timeout: Option<Timeout>,
}

fn relative_x(container: &NodeRef, event: &Event) -> Option<f64> {
    let container = container.cast::<Element>()?;
    let client_x = pointer_client_x(event)?;
    Some(client_x - container.get_bounding_client_rect().left())
}

fn transition(motion: Motion) -> &'static str {
    match motion {
        Motion::Snap | Motion::Follow => "none",
        Motion::Glide => "transform 0.45s cubic-bezier(0.32, 0.72, 0, 1), width 0.35s cubic-bezier(0.34, 1.56, 0.64, 1)",
        Motion::Settle => "transform 0.5s cubic-bezier(0.32, 2, 0, 1), width 0.4s cubic-bezier(0.32, 2, 0, 1)",
    }
}

impl SectionSwitcher {
    fn measure(&self) -> Option<Vec<OptionBounds>> {
        let container = self.container.cast::<Element>()?;
        let origin = container.get_bounding_client_rect().left();
        self.option_refs
            .iter()
            .map(|option| {
                let rect = option.cast::<Element>()?.get_bounding_client_rect();
                Some(OptionBounds::new(rect.left() - origin, rect.width()))
            })
            .collect()
    }

    fn apply(&mut self, ctx: &Context<Self>, input: SwitcherInput) {
        let ends_drag = matches!(input, SwitcherInput::PointerUp | SwitcherInput::PointerCancel);
        let changed = self.switcher.borrow_mut().handle(input);
        if ends_drag {
            self.drag_listeners.clear();
            let link = ctx.link().clone();
            let window = ctx.props().config.click_suppression_ms;
            self.click_timeout = Some(Timeout::new(window, move || {
                link.send_message(Msg::Input(SwitcherInput::ClickWindowElapsed));
            }));
        }
        if let Some(change) = changed {
            ctx.props().on_change.emit(change);
        }
    }

    fn listen_for_press(&mut self, ctx: &Context<Self>) {
        let Some(container) = self.container.cast::<Element>() else {
            return;
        };
        for event in ["mousedown", "touchstart"] {
            let switcher = self.switcher.clone();
            let container_ref = self.container.clone();
            let link = ctx.link().clone();
            self.press_listeners.push(Listener::active(&container, event, move |e: Event| {
                if let Some(mouse) = e.dyn_ref::<web_sys::MouseEvent>() {
                    if mouse.button() != 0 {
                        return;
                    }
                }
                let Some(x) = relative_x(&container_ref, &e) else {
                    return;
                };
                let started = {
                    let mut switcher = switcher.borrow_mut();
                    switcher.handle(SwitcherInput::PointerDown(x));
                    switcher.is_dragging()
                };
                if started {
                    if e.cancelable() {
                        e.prevent_default();
                    }
                    link.send_message(Msg::DragStarted);
                }
            }));
        }
    }

    fn listen_for_drag(&mut self, ctx: &Context<Self>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        self.drag_listeners.clear();
        for event in ["mousemove", "touchmove"] {
            let container = self.container.clone();
            let link = ctx.link().clone();
            self.drag_listeners.push(Listener::active(&document, event, move |e: Event| {
                // The button came up outside the window.
                if let Some(mouse) = e.dyn_ref::<web_sys::MouseEvent>() {
                    if mouse.buttons() == 0 {
                        link.send_message(Msg::Input(SwitcherInput::PointerCancel));
                        return;
                    }
                }
                if e.cancelable() {
                    e.prevent_default();
                }
                if let Some(x) = relative_x(&container, &e) {
                    link.send_message(Msg::Input(SwitcherInput::PointerMove(x)));
                }
            }));
        }
        for (event, input) in [
            ("mouseup", SwitcherInput::PointerUp),
            ("touchend", SwitcherInput::PointerUp),
            ("touchcancel", SwitcherInput::PointerCancel),
        ] {
            let link = ctx.link().clone();
            self.drag_listeners.push(Listener::new(&document, event, move |_| {
                link.send_message(Msg::Input(input.clone()));
            }));
        }
        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            self.drag_listeners.push(Listener::new(&window, "blur", move |_| {
                link.send_message(Msg::Input(SwitcherInput::PointerCancel));
            }));
        }
    }
}

impl Component for SectionSwitcher {
    type Message = Msg;
    type Properties = SectionSwitcherProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let switcher = Switcher::new(props.options.clone(), props.initial.as_deref(), props.config.clone());
        Self {
            switcher: Rc::new(RefCell::new(switcher)),
            container: NodeRef::default(),
            bubble: NodeRef::default(),
            option_refs: vec![NodeRef::default(); props.options.len()],
            press_listeners: Vec::new(),
            drag_listeners: Vec::new(),
            _resize_listener: None,
            resize_timeout: None,
            click_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(input) => {
                self.apply(ctx, input);
                true
            }
            Msg::DragStarted => {
                self.listen_for_drag(ctx);
                true
            }
            Msg::Resized => {
                let link = ctx.link().clone();
                // Replacing the pending timeout cancels it.
                self.resize_timeout = Some(Timeout::new(ctx.props().config.resize_debounce_ms, move || {
                    link.send_message(Msg::Measure);
                }));
                false
            }
            Msg::Measure => match self.measure() {
                Some(bounds) => {
                    self.apply(ctx, SwitcherInput::Relayout(bounds));
                    true
                }
                None => false,
            },
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.footer_visible != old_props.footer_visible {
            self.apply(ctx, SwitcherInput::FooterVisible(props.footer_visible));
        }
        if props.section_in_view != old_props.section_in_view {
            if let Some(section) = props.section_in_view.as_deref() {
                self.apply(ctx, SwitcherInput::SectionInView(section.to_string()));
            }
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        if self.bubble.get().is_some() {
            self.switcher.borrow_mut().attach_indicator();
        }
        if let Some(bounds) = self.measure() {
            self.switcher.borrow_mut().relayout(bounds);
        }
        self.listen_for_press(ctx);
        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            self._resize_listener = Some(Listener::new(&window, "resize", move |_| {
                link.send_message(Msg::Resized);
            }));
        }
        // Re-render with the measured layout.
        ctx.link().send_message(Msg::Measure);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.drag_listeners.clear();
        self.press_listeners.clear();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let switcher = self.switcher.borrow();
        let displayed = switcher.displayed_index();
        let highlighted = switcher.highlighted_index();

        let bubble_style = switcher.indicator().map(|indicator| {
            let scale = match indicator.motion {
                Motion::Follow if viewport_width() <= COMPACT_BREAKPOINT => " scale(1.4, 1.3)",
                Motion::Follow => " scale(1.1, 1.05)",
                Motion::Settle => " scale(1)",
                Motion::Snap | Motion::Glide => "",
            };
            format!(
                "width: {}px; transform: translateX({}px){}; transition: {};",
                indicator.width,
                indicator.offset,
                scale,
                transition(indicator.motion)
            )
        });

        let options = switcher.options().iter().enumerate().map(|(index, option)| {
            let onclick = ctx.link().callback(move |e: MouseEvent| {
                e.prevent_default();
                Msg::Input(SwitcherInput::Click(index))
            });
            html! {
                <label
                    ref={self.option_refs[index].clone()}
                    class={classes!(
                        "switcher__option",
                        (index == displayed).then_some("active"),
                        (highlighted == Some(index)).then_some("switcher__option--highlight"),
                    )}
                    {onclick}
                >
                    <input
                        type="radio"
                        name="section"
                        value={option.key.clone()}
                        c-option={option.key.clone()}
                        checked={index == switcher.active_index()}
                    />
                    <span class="switcher__label">{ &option.label }</span>
                </label>
            }
        });

        html! {
            <nav
                ref={self.container.clone()}
                class={classes!(
                    "switcher",
                    switcher.is_dragging().then_some("switcher--dragging"),
                    switcher.is_locked().then_some("switcher--locked"),
                )}
                style={switcher.is_dragging().then_some("cursor: grabbing;")}
                c-previous={switcher.previous_key().unwrap_or_default().to_string()}
            >
                { for options }
                <div ref={self.bubble.clone()} class="switcher__bubble" style={bubble_style}></div>
            </nav>
        }
    }
}
