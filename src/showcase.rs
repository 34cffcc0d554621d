//! Portfolio grid: category filter, filter-button keyboard navigation, the
//! mobile slider position and which inline video is playing.

pub const ALL_CATEGORIES: &str = "all";

pub fn matches_filter(filter: &str, category: &str) -> bool {
    filter == ALL_CATEGORIES || filter == category
}

/// Target button for a key press on button `index` of `count`, or `None` for
/// keys the filter bar does not handle.
pub fn filter_key_target(key: &str, index: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match key {
        "ArrowLeft" => Some(if index > 0 { index - 1 } else { count - 1 }),
        "ArrowRight" => Some(if index + 1 < count { index + 1 } else { 0 }),
        "Home" => Some(0),
        "End" => Some(count - 1),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slider {
    index: usize,
    count: usize,
}

impl Slider {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
    }

    pub fn prev(&mut self) {
        if self.count > 0 {
            self.index = self.index.checked_sub(1).unwrap_or(self.count - 1);
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// CSS transform for the grid, `None` when the slider is not active.
    pub fn transform(&self, sliding: bool) -> Option<String> {
        sliding.then(|| format!("translateX({}%)", -(self.index as i64) * 100))
    }
}

/// Inline showcase playback. At most one card plays at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    playing: Option<usize>,
}

impl Playback {
    pub fn is_playing(&self, index: usize) -> bool {
        self.playing == Some(index)
    }

    /// Starts `index` and returns the card that has to pause for it.
    pub fn play(&mut self, index: usize) -> Option<usize> {
        self.playing.replace(index).filter(|&previous| previous != index)
    }

    /// Stops whatever is playing and returns it.
    pub fn stop_all(&mut self) -> Option<usize> {
        self.playing.take()
    }
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=1", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_matches_every_category() {
        assert!(matches_filter("all", "wedding"));
        assert!(matches_filter("reels", "reels"));
        assert!(!matches_filter("reels", "wedding"));
    }

    #[test]
    fn arrow_keys_wrap_around() {
        assert_eq!(filter_key_target("ArrowLeft", 0, 4), Some(3));
        assert_eq!(filter_key_target("ArrowRight", 3, 4), Some(0));
        assert_eq!(filter_key_target("ArrowRight", 1, 4), Some(2));
        assert_eq!(filter_key_target("Home", 2, 4), Some(0));
        assert_eq!(filter_key_target("End", 0, 4), Some(3));
        assert_eq!(filter_key_target("Enter", 0, 4), None);
        assert_eq!(filter_key_target("Home", 0, 0), None);
    }

    #[test]
    fn slider_wraps_both_ways() {
        let mut slider = Slider::new(3);
        slider.prev();
        assert_eq!(slider.index(), 2);
        slider.next();
        assert_eq!(slider.index(), 0);
        slider.next();
        assert_eq!(slider.transform(true).as_deref(), Some("translateX(-100%)"));
        assert_eq!(slider.transform(false), None);
        slider.reset();
        assert_eq!(slider.index(), 0);

        let mut empty = Slider::new(0);
        empty.next();
        empty.prev();
        assert_eq!(empty.index(), 0);
    }

    #[test]
    fn starting_a_video_pauses_the_other_one() {
        let mut playback = Playback::default();
        assert_eq!(playback.play(1), None);
        assert!(playback.is_playing(1));

        assert_eq!(playback.play(3), Some(1));
        assert!(playback.is_playing(3));
        assert!(!playback.is_playing(1));

        // Pressing play on the running card again pauses nothing.
        assert_eq!(playback.play(3), None);
    }

    #[test]
    fn stop_all_leaves_nothing_playing() {
        let mut playback = Playback::default();
        assert_eq!(playback.stop_all(), None);
        playback.play(2);
        assert_eq!(playback.stop_all(), Some(2));
        assert_eq!(playback, Playback::default());
    }
}
