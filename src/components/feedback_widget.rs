use chrono::{Duration, Utc};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::components::modal::ModalHandle;
use crate::error::{Result, SiteError};
use crate::feedback::{
    rating_label, ExportFormat, FeedbackEntry, FeedbackStats, FeedbackStore, RATING_PROMPT, RECENT_REVIEWS,
};
use crate::storage::LocalStorage;

const SAVE_DELAY_MS: u32 = 500;
const AUTO_RESET_MS: u32 = 5_000;

pub enum FeedbackMsg {
    Hover(u8),
    Leave,
    Select(u8),
    Submit,
    Save(FeedbackEntry),
    Reset,
    Export(ExportFormat),
    ModalChanged(ModalHandle),
}

pub struct FeedbackWidget {
    store: FeedbackStore<LocalStorage>,
    selected: Option<u8>,
    hovered: Option<u8>,
    loading: bool,
    submitted: bool,
    stats: Option<FeedbackStats>,
    recent: Vec<FeedbackEntry>,
    form: NodeRef,
    name: NodeRef,
    email: NodeRef,
    comment: NodeRef,
    modal: Option<ModalHandle>,
    _modal_listener: Option<ContextHandle<ModalHandle>>,
    pending: Option<Timeout>,
}

impl FeedbackWidget {
    fn refresh(&mut self) {
        self.stats = self.store.stats();
        self.recent = self.store.recent(RECENT_REVIEWS);
    }

    fn alert(&self, message: &str) {
        match &self.modal {
            Some(modal) => modal.alert(message),
            None => log::warn!("{}", message),
        }
    }

    fn entry(&self, rating: u8) -> Result<FeedbackEntry> {
        let value = |node: &NodeRef| node.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default();
        let comment = self
            .comment
            .cast::<HtmlTextAreaElement>()
            .map(|t| t.value())
            .unwrap_or_default();
        let window = web_sys::window().ok_or(SiteError::StorageUnavailable)?;
        let page = window.location().pathname().unwrap_or_default();
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        Ok(FeedbackEntry::new(rating, &value(&self.name), &value(&self.email), &comment, Utc::now())?
            .with_context(page, user_agent))
    }

    fn download(&self, format: ExportFormat) -> Result<()> {
        let data = self.store.export(format)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(SiteError::StorageUnavailable)?;
        let link = document
            .create_element("a")
            .map_err(|e| SiteError::Feedback(format!("{:?}", e)))?
            .unchecked_into::<HtmlAnchorElement>();
        link.set_href(&format!(
            "data:{};charset=utf-8,{}",
            format.mime(),
            urlencoding::encode(&data)
        ));
        link.set_download(&format.file_name(Utc::now().timestamp_millis()));
        link.click();
        Ok(())
    }

    fn label(&self) -> &'static str {
        self.hovered
            .or(self.selected)
            .and_then(rating_label)
            .unwrap_or(RATING_PROMPT)
    }
}

impl Component for FeedbackWidget {
    type Message = FeedbackMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (modal, listener) = match ctx
            .link()
            .context::<ModalHandle>(ctx.link().callback(FeedbackMsg::ModalChanged))
        {
            Some((modal, listener)) => (Some(modal), Some(listener)),
            None => (None, None),
        };
        let mut widget = Self {
            store: FeedbackStore::new(LocalStorage),
            selected: None,
            hovered: None,
            loading: false,
            submitted: false,
            stats: None,
            recent: Vec::new(),
            form: NodeRef::default(),
            name: NodeRef::default(),
            email: NodeRef::default(),
            comment: NodeRef::default(),
            modal,
            _modal_listener: listener,
            pending: None,
        };
        widget.refresh();
        if let Some(stats) = widget.stats {
            let now = Utc::now();
            log::info!(
                "Feedback statistics: {} reviews, average {} ({:.1} over 30 days), distribution {:?}",
                stats.total,
                stats.average_label(),
                widget.store.average_between(now - Duration::days(30), now),
                widget.store.distribution()
            );
        }
        widget
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            FeedbackMsg::Hover(rating) => {
                self.hovered = Some(rating);
                true
            }
            FeedbackMsg::Leave => {
                self.hovered = None;
                true
            }
            FeedbackMsg::Select(rating) => {
                self.selected = Some(rating);
                if let Some(window) = web_sys::window() {
                    window.navigator().vibrate_with_duration(10);
                }
                true
            }
            FeedbackMsg::Submit => {
                let Some(rating) = self.selected else {
                    self.alert("Please select a rating before submitting");
                    return false;
                };
                match self.entry(rating) {
                    Ok(entry) => {
                        self.loading = true;
                        let link = ctx.link().clone();
                        self.pending = Some(Timeout::new(SAVE_DELAY_MS, move || {
                            link.send_message(FeedbackMsg::Save(entry));
                        }));
                    }
                    Err(e) => {
                        log::error!("Error submitting feedback: {}", e);
                        self.alert("Sorry, there was an error. Please try again.");
                    }
                }
                true
            }
            FeedbackMsg::Save(entry) => {
                match self.store.add(entry) {
                    Ok(()) => {
                        log::info!("Feedback submitted");
                        self.submitted = true;
                        self.refresh();
                        let link = ctx.link().clone();
                        self.pending = Some(Timeout::new(AUTO_RESET_MS, move || {
                            link.send_message(FeedbackMsg::Reset);
                        }));
                    }
                    Err(e) => {
                        log::error!("Error submitting feedback: {}", e);
                        self.alert("Sorry, there was an error. Please try again.");
                        self.loading = false;
                    }
                }
                true
            }
            FeedbackMsg::Reset => {
                self.pending = None;
                if let Some(form) = self.form.cast::<HtmlFormElement>() {
                    form.reset();
                }
                self.selected = None;
                self.hovered = None;
                self.loading = false;
                self.submitted = false;
                true
            }
            FeedbackMsg::Export(format) => {
                if let Err(e) = self.download(format) {
                    log::error!("Export failed: {}", e);
                }
                false
            }
            FeedbackMsg::ModalChanged(modal) => {
                self.modal = Some(modal);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            FeedbackMsg::Submit
        });

        let stars = (1..=5u8).rev().map(|rating| {
            let id = format!("star{}", rating);
            html! {
                <>
                    <input
                        type="radio"
                        id={id.clone()}
                        name="rating"
                        value={rating.to_string()}
                        checked={self.selected == Some(rating)}
                        onchange={link.callback(move |_| FeedbackMsg::Select(rating))}
                    />
                    <label
                        for={id}
                        title={rating_label(rating).unwrap_or_default()}
                        onmouseenter={link.callback(move |_| FeedbackMsg::Hover(rating))}
                    >
                        { "★" }
                    </label>
                </>
            }
        });

        let summary = match self.stats {
            Some(stats) => html! {
                <div class="feedback__summary">
                    <span id="averageScore" class="feedback__average">{ stats.average_label() }</span>
                    <div id="starsDisplay" class="stars-display">
                        <div class="stars-fill" style={format!("width: {}%;", stats.star_fill_percent())}>{ "★★★★★" }</div>
                    </div>
                    <span class="feedback__total">
                        { "Based on " }<span id="totalRatings">{ stats.total.to_string() }</span>{ " ratings" }
                    </span>
                    <div class="feedback__export">
                        <button type="button" onclick={link.callback(|_| FeedbackMsg::Export(ExportFormat::Json))}>{ "Export JSON" }</button>
                        <button type="button" onclick={link.callback(|_| FeedbackMsg::Export(ExportFormat::Csv))}>{ "Export CSV" }</button>
                    </div>
                </div>
            },
            None => html! {},
        };

        let reviews = if self.recent.is_empty() {
            html! {}
        } else {
            html! {
                <div id="recentReviews" class="recent-reviews">
                    <div id="reviewsList">
                        { for self.recent.iter().map(|review| html! {
                            <div class="review-item">
                                <div class="review-header">
                                    <span class="review-author">{ &review.name }</span>
                                    <span class="review-stars">{ review.stars() }</span>
                                </div>
                                <div class="review-date">{ review.date_label() }</div>
                                if !review.comment.is_empty() {
                                    <p class="review-comment">{ &review.comment }</p>
                                }
                            </div>
                        }) }
                    </div>
                </div>
            }
        };

        let label_selected = self.hovered.is_some() || self.selected.is_some();
        html! {
            <div class="feedback">
                { summary }
                <form
                    id="feedbackForm"
                    ref={self.form.clone()}
                    class={classes!("feedback__form", self.loading.then_some("loading"))}
                    style={self.submitted.then_some("display: none;")}
                    {onsubmit}
                >
                    <div id="starRating" class="star-rating" onmouseleave={link.callback(|_| FeedbackMsg::Leave)}>
                        { for stars }
                    </div>
                    <p id="ratingText" class={classes!("rating-text", label_selected.then_some("selected"))}>
                        { self.label() }
                    </p>
                    <input ref={self.name.clone()} type="text" name="name" placeholder="Your name (optional)" />
                    <input ref={self.email.clone()} type="email" name="email" placeholder="Email (optional)" />
                    <textarea ref={self.comment.clone()} name="comment" rows="3" placeholder="Tell us more" />
                    <button type="submit" class="btn btn--primary" disabled={self.loading}>{ "Submit Feedback" }</button>
                </form>
                if self.submitted {
                    <div id="feedbackSuccess" class="feedback__success">
                        <h4>{ "Thank you for your feedback!" }</h4>
                        <button id="feedbackResetBtn" type="button" onclick={link.callback(|_| FeedbackMsg::Reset)}>
                            { "Leave another review" }
                        </button>
                    </div>
                }
                { reviews }
            </div>
        }
    }
}
