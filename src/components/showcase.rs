use web_sys::{Element, HtmlElement, KeyboardEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::modal::use_modal;
use crate::config::SLIDER_BREAKPOINT;
use crate::events::viewport_width;
use crate::media;
use crate::observers::Observer;
use crate::showcase::{filter_key_target, matches_filter, youtube_embed_url, Playback, Slider, ALL_CATEGORIES};

/// Share of the showcase that must stay on screen for videos to keep playing.
const VISIBLE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    YouTube(&'static str),
    File(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    pub title: &'static str,
    pub category: &'static str,
    pub source: VideoSource,
}

#[derive(Properties, PartialEq)]
pub struct ShowcaseProps {
    /// `(category, label)` pairs for the filter bar.
    pub filters: Vec<(&'static str, &'static str)>,
    pub cards: Vec<VideoCard>,
}

#[function_component(Showcase)]
pub fn showcase(props: &ShowcaseProps) -> Html {
    let modal = use_modal();
    let filter = use_state(|| ALL_CATEGORIES);
    let slider = use_state(|| Slider::new(props.cards.len()));
    let sliding = use_state(|| viewport_width() <= SLIDER_BREAKPOINT);
    let filter_refs = use_memo(|count| vec![NodeRef::default(); *count], props.filters.len());
    let video_refs = use_memo(|count| vec![NodeRef::default(); *count], props.cards.len());
    let playback = use_state(Playback::default);
    let container = use_node_ref();

    // Keep the <video> elements in line with the playback state.
    {
        let video_refs = video_refs.clone();
        use_effect_with_deps(
            move |playback| {
                for (index, video) in video_refs.iter().enumerate() {
                    if playback.is_playing(index) {
                        media::play(video);
                    } else {
                        media::pause(video, true);
                    }
                }
                || ()
            },
            *playback,
        );
    }
    {
        let container = container.clone();
        let playback = playback.clone();
        use_effect_with_deps(
            move |_| {
                let observer = container.cast::<Element>().and_then(|showcase| {
                    Observer::visibility(&showcase, "0px", VISIBLE_THRESHOLD, move |visible| {
                        if !visible {
                            playback.set(Playback::default());
                        }
                    })
                });
                move || drop(observer)
            },
            (),
        );
    }

    {
        let slider = slider.clone();
        let sliding = sliding.clone();
        use_event_with_window("resize", move |_: Event| {
            let narrow = viewport_width() <= SLIDER_BREAKPOINT;
            if !narrow && slider.index() != 0 {
                let mut next = *slider;
                next.reset();
                slider.set(next);
            }
            sliding.set(narrow);
        });
    }

    let step = |forward: bool| {
        let slider = slider.clone();
        let playback = playback.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let mut stopped = *playback;
            if stopped.stop_all().is_some() {
                playback.set(stopped);
            }
            let mut next = *slider;
            if forward {
                next.next();
            } else {
                next.prev();
            }
            slider.set(next);
        })
    };

    let buttons = props.filters.iter().enumerate().map(|(index, &(category, label))| {
        let onclick = {
            let filter = filter.clone();
            Callback::from(move |_: MouseEvent| filter.set(category))
        };
        let onkeydown = {
            let filter_refs = filter_refs.clone();
            Callback::from(move |e: KeyboardEvent| {
                let Some(target) = filter_key_target(&e.key(), index, filter_refs.len()) else {
                    return;
                };
                e.prevent_default();
                if let Some(button) = filter_refs[target].cast::<HtmlElement>() {
                    let _ = button.focus();
                    button.click();
                }
            })
        };
        html! {
            <button
                ref={filter_refs[index].clone()}
                class={classes!("filter-btn", (*filter == category).then_some("active"))}
                data-category={category}
                {onclick}
                {onkeydown}
            >
                { label }
            </button>
        }
    });

    let cards = props.cards.iter().enumerate().map(|(index, card)| {
        let hidden = (!matches_filter(*filter, card.category)).then_some("hidden");
        let player = match card.source {
            VideoSource::YouTube(id) => {
                let onclick = {
                    let modal = modal.clone();
                    Callback::from(move |_: MouseEvent| modal.video(youtube_embed_url(id), false))
                };
                html! {
                    <div class="video-wrapper" {onclick}>
                        <img
                            src={format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id)}
                            alt={card.title}
                            loading="lazy"
                        />
                        <span class="video-play" aria-hidden="true">{ "▶" }</span>
                    </div>
                }
            }
            VideoSource::File(url) => {
                let playing = playback.is_playing(index);
                let onplay = {
                    let playback = playback.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        e.stop_propagation();
                        let mut next = *playback;
                        if let Some(paused) = next.play(index) {
                            log::debug!("showcase: card {} pauses card {}", index, paused);
                        }
                        playback.set(next);
                    })
                };
                let onexpand = {
                    let modal = modal.clone();
                    let playback = playback.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.stop_propagation();
                        playback.set(Playback::default());
                        modal.video(url, true);
                    })
                };
                html! {
                    <div class={classes!("showcase-device", playing.then_some("has-played"), playing.then_some("is-playing"))}>
                        <video
                            ref={video_refs[index].clone()}
                            class="showcase-video"
                            src={url}
                            preload="auto"
                            playsinline=true
                            onloadedmetadata={Callback::from(media::show_first_frame)}
                        />
                        if !playing {
                            <button class="showcase-play-btn" aria-label="Play video" onclick={onplay}>{ "▶" }</button>
                        }
                        <button class="showcase-expand-btn" aria-label="Open full screen" onclick={onexpand}>{ "⤢" }</button>
                    </div>
                }
            }
        };
        html! {
            <article class={classes!("video-card", hidden)} data-category={card.category}>
                { player }
                <div class="video-info"><h3>{ card.title }</h3></div>
            </article>
        }
    });

    html! {
        <div ref={container} class="ourwork-showcase">
            <div class="video-filters" role="toolbar">{ for buttons }</div>
            <div class="video-showcase">
                <button class="showcase-nav-btn prev" aria-label="Previous" onclick={step(false)}>{ "‹" }</button>
                <div class="video-showcase-grid" style={slider.transform(*sliding).map(|t| format!("transform: {};", t))}>
                    { for cards }
                </div>
                <button class="showcase-nav-btn next" aria-label="Next" onclick={step(true)}>{ "›" }</button>
            </div>
        </div>
    }
}
