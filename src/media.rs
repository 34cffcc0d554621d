//! Play/pause helpers for `<video>` elements held in `NodeRef`s.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlMediaElement};
use yew::NodeRef;

/// Seeking here makes browsers paint the first frame instead of black.
const FIRST_FRAME_SECS: f64 = 0.1;

pub fn show_first_frame(e: Event) {
    let Some(video) = e.target().and_then(|t| t.dyn_into::<HtmlMediaElement>().ok()) else {
        return;
    };
    if video.current_time() < FIRST_FRAME_SECS {
        video.set_current_time(FIRST_FRAME_SECS);
    }
}

/// Turns on the native controls and starts playback.
pub fn play(node: &NodeRef) {
    let Some(video) = node.cast::<HtmlMediaElement>() else {
        return;
    };
    video.set_controls(true);
    if !video.paused() {
        return;
    }
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("video: playback refused: {:?}", e);
            }
        }),
        Err(e) => log::warn!("video: play failed: {:?}", e),
    }
}

/// Pauses the video. Returns whether it was playing.
pub fn pause(node: &NodeRef, hide_controls: bool) -> bool {
    let Some(video) = node.cast::<HtmlMediaElement>() else {
        return false;
    };
    let was_playing = !video.paused();
    if was_playing {
        if let Err(e) = video.pause() {
            log::warn!("video: pause failed: {:?}", e);
        }
    }
    if hide_controls {
        video.set_controls(false);
    }
    was_playing
}
