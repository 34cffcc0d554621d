use web_sys::Element;
use yew::prelude::*;

use crate::media;
use crate::observers::Observer;

/// Pause once the player is mostly scrolled off screen.
const OFFSCREEN_MARGIN: &str = "-100px 0px -100px 0px";
const OFFSCREEN_THRESHOLD: f64 = 0.3;

#[derive(Properties, PartialEq)]
pub struct HeroVideoProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub poster: Option<AttrValue>,
}

#[function_component(HeroVideo)]
pub fn hero_video(props: &HeroVideoProps) -> Html {
    let device = use_node_ref();
    let video = use_node_ref();
    let played = use_state(|| false);

    {
        let device = device.clone();
        let video = video.clone();
        use_effect_with_deps(
            move |_| {
                let observer = device.cast::<Element>().and_then(|device| {
                    Observer::visibility(&device, OFFSCREEN_MARGIN, OFFSCREEN_THRESHOLD, move |visible| {
                        if !visible && media::pause(&video, false) {
                            log::debug!("hero video paused off screen");
                        }
                    })
                });
                move || drop(observer)
            },
            (),
        );
    }

    let onclick = {
        let video = video.clone();
        let played = played.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            media::play(&video);
            played.set(true);
        })
    };

    html! {
        <div ref={device} class={classes!("hero__device", (*played).then_some("has-played"))}>
            <video
                ref={video}
                id="hero-video"
                src={props.src.clone()}
                poster={props.poster.clone()}
                preload="metadata"
                playsinline=true
                onloadedmetadata={Callback::from(media::show_first_frame)}
            />
            if !*played {
                <button class="hero__play-btn" aria-label="Play showreel" {onclick}>{ "▶" }</button>
            }
        </div>
    }
}
