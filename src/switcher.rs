//! State machine behind the pill-style section switcher.
//!
//! Nothing in here touches the DOM. The `SectionSwitcher` component measures
//! the options, turns browser events into [`SwitcherInput`]s and renders the
//! [`Indicator`] this module leaves behind, which keeps every transition
//! testable on the host.

use std::mem;

use log::{debug, warn};

use crate::config::SwitcherConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherOption {
    pub key: String,
    pub label: String,
}

impl SwitcherOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Horizontal extent of an option relative to the switcher container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptionBounds {
    pub left: f64,
    pub width: f64,
}

impl OptionBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }

    fn contains(&self, x: f64, tolerance: f64) -> bool {
        x >= self.left - tolerance && x <= self.right() + tolerance
    }
}

/// How the indicator should travel to its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Jump without a transition (layout correction).
    Snap,
    /// Regular slide after a click or a scroll-driven change.
    Glide,
    /// Springy settle after a drag is released.
    Settle,
    /// Tracks the pointer 1:1 while dragging.
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub offset: f64,
    pub width: f64,
    pub motion: Motion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start_pointer_x: f64,
    pub initial_offset: f64,
    pub current_offset: f64,
    pub indicator_width: f64,
    /// Option under the pointer when the gesture started.
    pub pressed: usize,
    /// Nearest option to the indicator center, highlighted but not committed.
    pub nearest: usize,
    /// Set once the pointer travelled past the click threshold.
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Click,
    Drag,
    Viewport,
}

/// Emitted whenever the committed selection moves to another option.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged {
    pub index: usize,
    pub previous: usize,
    pub key: String,
    pub source: SelectionSource,
}

impl SelectionChanged {
    /// Scroll-driven changes follow the page, everything else drives it.
    pub fn scrolls_page(&self) -> bool {
        self.source != SelectionSource::Viewport
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitcherInput {
    Click(usize),
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    PointerCancel,
    SectionInView(String),
    FooterVisible(bool),
    Relayout(Vec<OptionBounds>),
    ClickWindowElapsed,
}

#[derive(Debug, Clone)]
pub struct Switcher {
    config: SwitcherConfig,
    options: Vec<SwitcherOption>,
    bounds: Vec<OptionBounds>,
    active: usize,
    previous: Option<usize>,
    drag: DragState,
    max_offset: f64,
    locked: bool,
    suppress_click: bool,
    indicator: Option<Indicator>,
}

impl Switcher {
    /// Builds the switcher with `initial` (a section key) active, falling back
    /// to the first option. Layout is unknown until the first [`relayout`].
    ///
    /// [`relayout`]: Switcher::relayout
    pub fn new(options: Vec<SwitcherOption>, initial: Option<&str>, config: SwitcherConfig) -> Self {
        let active = initial
            .and_then(|key| options.iter().position(|o| o.key == key))
            .unwrap_or(0);
        let bounds = vec![OptionBounds::default(); options.len()];
        Self {
            config,
            options,
            bounds,
            active,
            previous: None,
            drag: DragState::Idle,
            max_offset: 0.0,
            locked: false,
            suppress_click: false,
            indicator: None,
        }
    }

    pub fn options(&self) -> &[SwitcherOption] {
        &self.options
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn previous_key(&self) -> Option<&str> {
        self.previous
            .and_then(|i| self.options.get(i))
            .map(|o| o.key.as_str())
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn indicator(&self) -> Option<&Indicator> {
        self.indicator.as_ref()
    }

    /// Option that should look active right now: the drag preview while a
    /// gesture is running, the committed selection otherwise.
    pub fn displayed_index(&self) -> usize {
        match self.drag {
            DragState::Dragging(drag) => drag.nearest,
            DragState::Idle => self.active,
        }
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        match self.drag {
            DragState::Dragging(drag) => Some(drag.nearest),
            DragState::Idle => None,
        }
    }

    pub fn attach_indicator(&mut self) {
        let bounds = self.bounds.get(self.active).copied().unwrap_or_default();
        self.indicator = Some(Indicator {
            offset: bounds.left,
            width: bounds.width,
            motion: Motion::Snap,
        });
    }

    pub fn handle(&mut self, input: SwitcherInput) -> Option<SelectionChanged> {
        match input {
            SwitcherInput::Click(index) => self.click(index),
            SwitcherInput::PointerDown(x) => {
                self.begin_drag(x);
                None
            }
            SwitcherInput::PointerMove(x) => {
                self.update_drag(x);
                None
            }
            SwitcherInput::PointerUp => self.end_drag(),
            SwitcherInput::PointerCancel => self.cancel_drag(),
            SwitcherInput::SectionInView(key) => self.on_viewport_section_changed(&key),
            SwitcherInput::FooterVisible(visible) => self.set_footer_visible(visible),
            SwitcherInput::Relayout(bounds) => {
                self.relayout(bounds);
                None
            }
            SwitcherInput::ClickWindowElapsed => {
                self.suppress_click = false;
                None
            }
        }
    }

    /// Commits `index` (clamped into range) as the active option.
    ///
    /// Returns the change notification, or `None` when the option was already
    /// active or there are no options at all.
    pub fn select_by_index(&mut self, index: usize, source: SelectionSource) -> Option<SelectionChanged> {
        if self.options.is_empty() {
            return None;
        }
        let index = index.min(self.options.len() - 1);
        if index == self.active {
            self.place_indicator(Motion::Glide);
            return None;
        }

        let previous = self.active;
        self.previous = Some(previous);
        self.active = index;
        self.place_indicator(Motion::Glide);

        let key = self.options[index].key.clone();
        debug!("switcher: {} -> {} ({:?})", self.options[previous].key, key, source);
        Some(SelectionChanged {
            index,
            previous,
            key,
            source,
        })
    }

    /// Click on an option label. Swallowed while dragging and right after a
    /// drag, where the browser still delivers the trailing click.
    pub fn click(&mut self, index: usize) -> Option<SelectionChanged> {
        if self.is_dragging() {
            return None;
        }
        if self.suppress_click {
            self.suppress_click = false;
            return None;
        }
        self.select_by_index(index, SelectionSource::Click)
    }

    /// Starts a drag if `pointer_x` lands on the indicator. Returns whether
    /// the drag started.
    pub fn begin_drag(&mut self, pointer_x: f64) -> bool {
        if self.is_dragging() {
            // The release of the previous gesture never reached us.
            debug!("switcher: dropping stale drag");
            self.drag = DragState::Idle;
            self.place_indicator(Motion::Snap);
        }
        if self.options.is_empty() || self.locked {
            return false;
        }
        let bubble = self.bounds[self.active];
        if !bubble.contains(pointer_x, self.config.drag_tolerance) {
            return false;
        }

        let pressed = self
            .bounds
            .iter()
            .position(|b| b.contains(pointer_x, 0.0))
            .unwrap_or(self.active);
        self.drag = DragState::Dragging(Drag {
            start_pointer_x: pointer_x,
            initial_offset: bubble.left,
            current_offset: bubble.left,
            indicator_width: bubble.width,
            pressed,
            nearest: self.active,
            moved: false,
        });
        self.suppress_click = false;
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.offset = bubble.left;
            indicator.width = bubble.width;
            indicator.motion = Motion::Follow;
        }
        true
    }

    /// Moves the dragged indicator and returns the option it is nearest to.
    pub fn update_drag(&mut self, pointer_x: f64) -> Option<usize> {
        let DragState::Dragging(drag) = &mut self.drag else {
            return None;
        };

        let delta = pointer_x - drag.start_pointer_x;
        if delta.abs() > self.config.click_threshold {
            drag.moved = true;
        }
        drag.current_offset = (drag.initial_offset + delta).clamp(0.0, self.max_offset);
        let center = drag.current_offset + drag.indicator_width / 2.0;
        drag.nearest = nearest_option(&self.bounds, center).unwrap_or(self.active);

        if let Some(indicator) = self.indicator.as_mut() {
            indicator.offset = drag.current_offset;
            indicator.motion = Motion::Follow;
        }
        Some(drag.nearest)
    }

    /// Releases the drag and commits its outcome.
    pub fn end_drag(&mut self) -> Option<SelectionChanged> {
        let DragState::Dragging(drag) = mem::take(&mut self.drag) else {
            return None;
        };

        let (target, source) = if drag.moved {
            self.suppress_click = true;
            (drag.nearest, SelectionSource::Drag)
        } else {
            (drag.pressed, SelectionSource::Click)
        };
        let changed = self.select_by_index(target, source);
        self.place_indicator(Motion::Settle);
        changed
    }

    /// `touchcancel` or a lost pointer: finish the gesture as if released.
    pub fn cancel_drag(&mut self) -> Option<SelectionChanged> {
        self.end_drag()
    }

    /// Follows the section currently scrolled into view.
    pub fn on_viewport_section_changed(&mut self, section_key: &str) -> Option<SelectionChanged> {
        let index = self.options.iter().position(|o| o.key == section_key)?;
        if index == self.active {
            return None;
        }
        self.select_by_index(index, SelectionSource::Viewport)
    }

    /// The footer locks dragging and pins the selection to the lock section.
    pub fn set_footer_visible(&mut self, visible: bool) -> Option<SelectionChanged> {
        self.locked = visible;
        if !visible {
            return None;
        }
        let lock_section = self.config.lock_section.clone();
        self.on_viewport_section_changed(&lock_section)
    }

    /// Takes fresh option measurements and re-seats the indicator under the
    /// active option without animating.
    pub fn relayout(&mut self, bounds: Vec<OptionBounds>) {
        if bounds.len() != self.options.len() {
            warn!(
                "switcher: ignoring layout with {} entries for {} options",
                bounds.len(),
                self.options.len()
            );
            return;
        }
        self.max_offset = bounds.last().map(|b| b.left.max(0.0)).unwrap_or(0.0);
        self.bounds = bounds;

        if let DragState::Dragging(drag) = &mut self.drag {
            drag.current_offset = drag.current_offset.clamp(0.0, self.max_offset);
            if let Some(indicator) = self.indicator.as_mut() {
                indicator.offset = drag.current_offset;
            }
        } else {
            self.place_indicator(Motion::Snap);
        }
    }

    fn place_indicator(&mut self, motion: Motion) {
        if self.is_dragging() {
            return;
        }
        if let (Some(indicator), Some(bounds)) = (self.indicator.as_mut(), self.bounds.get(self.active)) {
            indicator.offset = bounds.left;
            indicator.width = bounds.width;
            indicator.motion = motion;
        }
    }
}

/// Index of the option whose center is closest to `center`.
///
/// Ties go to the leftmost option: the scan runs left to right and only a
/// strictly smaller distance replaces the current best.
pub fn nearest_option(bounds: &[OptionBounds], center: f64) -> Option<usize> {
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;
    for (index, option) in bounds.iter().enumerate() {
        let distance = (center - option.center()).abs();
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(index);
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_options() -> Switcher {
        let options = vec![
            SwitcherOption::new("home", "Home"),
            SwitcherOption::new("services", "Services"),
            SwitcherOption::new("contact", "Contact"),
        ];
        let mut switcher = Switcher::new(options, Some("home"), SwitcherConfig::default());
        switcher.relayout(vec![
            OptionBounds::new(0.0, 80.0),
            OptionBounds::new(100.0, 90.0),
            OptionBounds::new(220.0, 70.0),
        ]);
        switcher.attach_indicator();
        switcher
    }

    #[test]
    fn select_moves_indicator_to_left_bound() {
        let mut switcher = three_options();
        for index in 0..3 {
            switcher.select_by_index(index, SelectionSource::Click);
            assert_eq!(switcher.active_index(), index);
            assert_eq!(switcher.displayed_index(), index);
            let indicator = switcher.indicator().unwrap();
            assert_eq!(indicator.offset, switcher.bounds[index].left);
            assert_eq!(indicator.width, switcher.bounds[index].width);
        }
    }

    #[test]
    fn select_clamps_out_of_range_index() {
        let mut switcher = three_options();
        let changed = switcher.select_by_index(42, SelectionSource::Click).unwrap();
        assert_eq!(changed.index, 2);
        assert_eq!(changed.key, "contact");
        assert_eq!(switcher.previous, Some(0));
    }

    #[test]
    fn select_is_idempotent() {
        let mut once = three_options();
        once.select_by_index(1, SelectionSource::Click);

        let mut twice = three_options();
        assert!(twice.select_by_index(1, SelectionSource::Click).is_some());
        assert!(twice.select_by_index(1, SelectionSource::Click).is_none());

        assert_eq!(once.active_index(), twice.active_index());
        assert_eq!(once.previous, twice.previous);
        assert_eq!(once.indicator(), twice.indicator());
    }

    #[test]
    fn drag_offset_stays_within_bounds() {
        let mut switcher = three_options();
        assert!(switcher.begin_drag(40.0));
        for x in [-500.0, -10.0, 0.0, 35.0, 120.0, 260.0, 300.0, 900.0] {
            switcher.update_drag(x);
            let DragState::Dragging(drag) = &switcher.drag else {
                panic!("drag ended early");
            };
            assert!(drag.current_offset >= 0.0);
            assert!(drag.current_offset <= switcher.max_offset);
            assert_eq!(switcher.indicator().unwrap().offset, drag.current_offset);
        }
    }

    #[test]
    fn begin_drag_outside_indicator_is_ignored() {
        let mut switcher = three_options();
        assert!(!switcher.begin_drag(91.0));
        assert!(!switcher.begin_drag(-11.0));
        assert_eq!(&switcher.drag, &DragState::Idle);
        assert_eq!(switcher.active_index(), 0);

        // Inside the tolerance band on either side.
        assert!(switcher.begin_drag(89.0));
        switcher.end_drag();
        assert!(switcher.begin_drag(-9.0));
    }

    #[test]
    fn drag_release_selects_nearest_center() {
        let mut switcher = three_options();
        assert!(switcher.begin_drag(40.0));
        assert_eq!(switcher.update_drag(190.0), Some(1));
        let DragState::Dragging(drag) = &switcher.drag else {
            panic!("not dragging");
        };
        assert_eq!(drag.current_offset, 150.0);
        assert_eq!(switcher.highlighted_index(), Some(1));
        // Preview only, nothing committed yet.
        assert_eq!(switcher.active_index(), 0);

        let changed = switcher.end_drag().unwrap();
        assert_eq!(changed.index, 1);
        assert_eq!(changed.source, SelectionSource::Drag);
        assert!(!switcher.is_dragging());
        let indicator = switcher.indicator().unwrap();
        assert_eq!(indicator.offset, 100.0);
        assert_eq!(indicator.width, 90.0);
        assert_eq!(indicator.motion, Motion::Settle);
    }

    #[test]
    fn nearest_option_prefers_leftmost_on_tie() {
        let bounds = [
            OptionBounds::new(0.0, 100.0),
            OptionBounds::new(100.0, 100.0),
        ];
        assert_eq!(nearest_option(&bounds, 100.0), Some(0));
        assert_eq!(nearest_option(&bounds, 101.0), Some(1));
        assert_eq!(nearest_option(&[], 10.0), None);
    }

    #[test]
    fn small_movement_counts_as_click() {
        let mut switcher = three_options();
        assert!(switcher.begin_drag(40.0));
        switcher.update_drag(44.0);
        assert!(switcher.end_drag().is_none());
        assert_eq!(switcher.active_index(), 0);
        // A real click right after is not swallowed.
        assert!(switcher.click(2).is_some());
    }

    #[test]
    fn trailing_click_after_drag_is_suppressed() {
        let mut switcher = three_options();
        switcher.begin_drag(40.0);
        switcher.update_drag(190.0);
        switcher.end_drag();
        assert!(switcher.click(2).is_none());
        assert_eq!(switcher.active_index(), 1);

        switcher.begin_drag(140.0);
        switcher.update_drag(300.0);
        switcher.end_drag();
        switcher.handle(SwitcherInput::ClickWindowElapsed);
        assert_eq!(switcher.click(0).unwrap().index, 0);
    }

    #[test]
    fn update_and_end_without_drag_are_noops() {
        let mut switcher = three_options();
        assert_eq!(switcher.update_drag(150.0), None);
        assert!(switcher.end_drag().is_none());
        assert!(switcher.cancel_drag().is_none());
        assert_eq!(switcher.active_index(), 0);
    }

    #[test]
    fn cancel_commits_like_release() {
        let mut switcher = three_options();
        switcher.begin_drag(40.0);
        switcher.update_drag(300.0);
        let changed = switcher.handle(SwitcherInput::PointerCancel).unwrap();
        assert_eq!(changed.index, 2);
        assert!(!switcher.is_dragging());
    }

    #[test]
    fn lost_pointer_releases_the_drag() {
        let mut switcher = three_options();
        assert!(switcher.begin_drag(40.0));
        switcher.update_drag(43.0);
        // Window blur arrives instead of the release.
        assert!(switcher.handle(SwitcherInput::PointerCancel).is_none());
        assert!(!switcher.is_dragging());
        assert_eq!(switcher.indicator().unwrap().offset, 0.0);
        assert_eq!(switcher.click(2).unwrap().index, 2);
    }

    #[test]
    fn press_after_missed_release_starts_a_new_drag() {
        let mut switcher = three_options();
        assert!(switcher.begin_drag(40.0));
        switcher.update_drag(45.0);

        switcher.handle(SwitcherInput::PointerDown(40.0));
        assert!(switcher.is_dragging());
        let DragState::Dragging(drag) = &switcher.drag else {
            panic!("not dragging");
        };
        assert_eq!(drag.start_pointer_x, 40.0);
        assert!(!drag.moved);
        assert_eq!(switcher.end_drag(), None);

        // A stale drag is also dropped when the new press misses the bubble.
        assert!(switcher.begin_drag(40.0));
        assert!(!switcher.begin_drag(250.0));
        assert!(!switcher.is_dragging());
        assert_eq!(switcher.indicator().unwrap().motion, Motion::Snap);
        assert_eq!(switcher.click(2).unwrap().index, 2);
    }

    #[test]
    fn viewport_change_follows_section() {
        let mut switcher = three_options();
        let changed = switcher.on_viewport_section_changed("services").unwrap();
        assert_eq!(changed.source, SelectionSource::Viewport);
        assert!(!changed.scrolls_page());
        assert!(switcher.on_viewport_section_changed("unknown").is_none());
        assert_eq!(switcher.active_index(), 1);
    }

    #[test]
    fn viewport_change_to_active_section_is_noop() {
        let mut switcher = three_options();
        switcher.select_by_index(2, SelectionSource::Click);
        let before = switcher.clone();
        assert!(switcher.on_viewport_section_changed("contact").is_none());
        assert_eq!(switcher.previous, before.previous);
        assert_eq!(switcher.indicator(), before.indicator());
    }

    #[test]
    fn relayout_keeps_active_option() {
        let mut switcher = three_options();
        switcher.select_by_index(1, SelectionSource::Click);
        switcher.relayout(vec![
            OptionBounds::new(0.0, 60.0),
            OptionBounds::new(70.0, 64.0),
            OptionBounds::new(150.0, 58.0),
        ]);
        assert_eq!(switcher.active_index(), 1);
        assert_eq!(switcher.max_offset, 150.0);
        let indicator = switcher.indicator().unwrap();
        assert_eq!(indicator.offset, 70.0);
        assert_eq!(indicator.width, 64.0);
        assert_eq!(indicator.motion, Motion::Snap);
    }

    #[test]
    fn relayout_with_wrong_length_is_ignored() {
        let mut switcher = three_options();
        switcher.relayout(vec![OptionBounds::new(5.0, 5.0)]);
        assert_eq!(switcher.bounds.len(), 3);
        assert_eq!(switcher.bounds[0], OptionBounds::new(0.0, 80.0));
    }

    #[test]
    fn footer_locks_drag_and_pins_contact() {
        let mut switcher = three_options();
        let changed = switcher.set_footer_visible(true).unwrap();
        assert_eq!(changed.key, "contact");
        assert!(!switcher.begin_drag(250.0));

        switcher.set_footer_visible(false);
        assert!(switcher.begin_drag(250.0));
    }

    #[test]
    fn empty_switcher_ignores_everything() {
        let mut switcher = Switcher::new(Vec::new(), None, SwitcherConfig::default());
        switcher.relayout(Vec::new());
        switcher.attach_indicator();
        assert!(switcher.select_by_index(3, SelectionSource::Click).is_none());
        assert!(!switcher.begin_drag(0.0));
        assert!(switcher.update_drag(10.0).is_none());
        assert!(switcher.end_drag().is_none());
        assert!(switcher.on_viewport_section_changed("contact").is_none());
        assert!(switcher.previous_key().is_none());
    }

    #[test]
    fn selection_updates_without_indicator() {
        let mut switcher = three_options();
        switcher.indicator = None;
        assert!(switcher.select_by_index(2, SelectionSource::Click).is_some());
        assert_eq!(switcher.active_index(), 2);
        assert!(switcher.begin_drag(250.0));
        switcher.update_drag(0.0);
        assert_eq!(switcher.end_drag().unwrap().index, 0);
        assert!(switcher.indicator().is_none());
    }

    #[test]
    fn initial_key_selects_matching_option() {
        let options = vec![SwitcherOption::new("home", "Home"), SwitcherOption::new("work", "Work")];
        let switcher = Switcher::new(options.clone(), Some("work"), SwitcherConfig::default());
        assert_eq!(switcher.active_index(), 1);
        let switcher = Switcher::new(options, Some("missing"), SwitcherConfig::default());
        assert_eq!(switcher.active_index(), 0);
        assert_eq!(switcher.previous_key(), None);
    }
}
