//! Scroll-driven masthead chrome state.
//!
//! The [`NavChrome`] struct decides when the masthead is pinned to the top
//! of the screen and when the pinned masthead is shown, from nothing but the
//! sequence of scroll offsets it observes. It knows nothing about rendering:
//! flag changes are pushed through the [`NavSurface`] capability trait, so
//! the algorithm can be driven with synthetic offset sequences in tests.

/// Presentation surface for the masthead flags.
///
/// Implemented by whatever layer actually draws the chrome. Calls are
/// idempotent: setting a flag to its current value is a no-op for a
/// well-behaved surface.
pub trait NavSurface {
    /// Pin or un-pin the masthead at the top of the screen.
    fn set_pinned(&mut self, pinned: bool);

    /// Show or hide the pinned masthead.
    fn set_visible(&mut self, visible: bool);
}

/// Decides the masthead flags from scroll movement.
///
/// The rules, applied per observed offset:
/// - Scrolling up mid-page while pinned reveals the masthead.
/// - Scrolling up to the very top un-pins and hides it.
/// - Any downward scroll hides it, and pins it once the offset passes the
///   chrome's own height.
///
/// # Example
///
/// ```
/// use masthead::nav::{NavChrome, NavSurface};
///
/// struct Flags {
///     pinned: bool,
///     visible: bool,
/// }
///
/// impl NavSurface for Flags {
///     fn set_pinned(&mut self, pinned: bool) {
///         self.pinned = pinned;
///     }
///     fn set_visible(&mut self, visible: bool) {
///         self.visible = visible;
///     }
/// }
///
/// let mut chrome = NavChrome::new(3);
/// let mut flags = Flags { pinned: false, visible: false };
///
/// chrome.observe(10, &mut flags);
/// assert!(flags.pinned && !flags.visible);
///
/// chrome.observe(6, &mut flags);
/// assert!(flags.pinned && flags.visible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavChrome {
    header_height: usize,
    previous_offset: usize,
    pinned: bool,
    visible: bool,
}

impl NavChrome {
    /// Create chrome state for a masthead of the given rendered height.
    ///
    /// The height is captured once per page session; a recomposed page gets
    /// a fresh `NavChrome`.
    pub const fn new(header_height: usize) -> Self {
        Self {
            header_height,
            previous_offset: 0,
            pinned: false,
            visible: false,
        }
    }

    /// The masthead height the pin threshold is measured against.
    pub const fn header_height(&self) -> usize {
        self.header_height
    }

    /// The last offset fed to [`observe`](Self::observe).
    pub const fn previous_offset(&self) -> usize {
        self.previous_offset
    }

    /// Whether the masthead is currently pinned.
    pub const fn pinned(&self) -> bool {
        self.pinned
    }

    /// Whether the pinned masthead is currently shown.
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Feed one scroll offset through the state machine.
    ///
    /// Flag updates reach `surface` in the order they are decided; the
    /// stored offset is updated last, unconditionally. Each call is O(1)
    /// and total, so the caller may invoke it at any event rate.
    pub fn observe<S: NavSurface>(&mut self, current_top: usize, surface: &mut S) {
        if current_top < self.previous_offset {
            // Scrolling up.
            if current_top > 0 && self.pinned {
                self.show(surface);
            } else {
                self.hide(surface);
                self.unpin(surface);
            }
        } else {
            // Scrolling down, or no movement.
            self.hide(surface);
            if current_top > self.header_height && !self.pinned {
                self.pin(surface);
            }
        }
        self.previous_offset = current_top;
    }

    fn pin<S: NavSurface>(&mut self, surface: &mut S) {
        self.pinned = true;
        surface.set_pinned(true);
    }

    fn unpin<S: NavSurface>(&mut self, surface: &mut S) {
        self.pinned = false;
        surface.set_pinned(false);
    }

    fn show<S: NavSurface>(&mut self, surface: &mut S) {
        self.visible = true;
        surface.set_visible(true);
    }

    fn hide<S: NavSurface>(&mut self, surface: &mut S) {
        self.visible = false;
        surface.set_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that mirrors the flags and counts calls.
    #[derive(Debug, Default)]
    struct Recorder {
        pinned: bool,
        visible: bool,
        calls: Vec<&'static str>,
    }

    impl NavSurface for Recorder {
        fn set_pinned(&mut self, pinned: bool) {
            self.pinned = pinned;
            self.calls.push(if pinned { "pin" } else { "unpin" });
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
            self.calls.push(if visible { "show" } else { "hide" });
        }
    }

    fn drive(chrome: &mut NavChrome, surface: &mut Recorder, offsets: &[usize]) {
        for &offset in offsets {
            chrome.observe(offset, surface);
        }
    }

    #[test]
    fn test_new_chrome_is_unpinned_and_hidden() {
        let chrome = NavChrome::new(3);
        assert!(!chrome.pinned());
        assert!(!chrome.visible());
        assert_eq!(chrome.previous_offset(), 0);
    }

    #[test]
    fn test_scrolling_down_past_header_pins() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        chrome.observe(100, &mut surface);
        assert!(surface.pinned);
        assert!(!surface.visible);
    }

    #[test]
    fn test_scrolling_down_within_header_does_not_pin() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        chrome.observe(80, &mut surface);
        assert!(!surface.pinned); // threshold is strict
    }

    #[test]
    fn test_scrolling_down_while_pinned_stays_pinned() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[100, 150, 200]);
        assert!(surface.pinned);
        assert!(!surface.visible);
        // Only the first pass pushed a pin.
        assert_eq!(surface.calls.iter().filter(|c| **c == "pin").count(), 1);
    }

    #[test]
    fn test_scrolling_up_mid_page_reveals_pinned_masthead() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[100, 50]);
        assert!(surface.pinned);
        assert!(surface.visible);
    }

    #[test]
    fn test_scrolling_up_to_top_unpins_and_hides() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[100, 50, 0]);
        assert!(!surface.pinned);
        assert!(!surface.visible);
    }

    #[test]
    fn test_scrolling_up_while_unpinned_stays_hidden() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        // Never past the header, so never pinned.
        drive(&mut chrome, &mut surface, &[40, 20]);
        assert!(!surface.pinned);
        assert!(!surface.visible);
    }

    #[test]
    fn test_stationary_offset_hides_visible_masthead() {
        let mut chrome = NavChrome::new(80);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[100, 50]);
        assert!(surface.visible);
        // Same offset again counts as "not up".
        chrome.observe(50, &mut surface);
        assert!(!surface.visible);
        assert!(surface.pinned);
    }

    #[test]
    fn test_reveal_then_hide_then_reveal() {
        let mut chrome = NavChrome::new(10);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[50, 30, 40, 20]);
        // down, up (reveal), down (hide), up (reveal again)
        assert!(surface.pinned);
        assert!(surface.visible);
    }

    #[test]
    fn test_previous_offset_tracks_last_observation() {
        let mut chrome = NavChrome::new(10);
        let mut surface = Recorder::default();
        drive(&mut chrome, &mut surface, &[5, 12, 7, 7, 90]);
        assert_eq!(chrome.previous_offset(), 90);
    }

    #[test]
    fn test_chrome_flags_mirror_surface() {
        let mut chrome = NavChrome::new(25);
        let mut surface = Recorder::default();
        for offset in [30, 10, 0, 80, 60, 61, 2] {
            chrome.observe(offset, &mut surface);
            assert_eq!(chrome.pinned(), surface.pinned);
            assert_eq!(chrome.visible(), surface.visible);
        }
    }

    #[test]
    fn test_zero_height_header_pins_on_first_line() {
        let mut chrome = NavChrome::new(0);
        let mut surface = Recorder::default();
        chrome.observe(1, &mut surface);
        assert!(surface.pinned);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn previous_offset_equals_last_observed(
                offsets in prop::collection::vec(0..10000usize, 1..200),
            ) {
                let mut chrome = NavChrome::new(80);
                let mut surface = Recorder::default();
                for &offset in &offsets {
                    chrome.observe(offset, &mut surface);
                }
                prop_assert_eq!(chrome.previous_offset(), *offsets.last().unwrap());
            }

            #[test]
            fn visible_implies_pinned(
                header_height in 0..200usize,
                offsets in prop::collection::vec(0..10000usize, 0..200),
            ) {
                let mut chrome = NavChrome::new(header_height);
                let mut surface = Recorder::default();
                for &offset in &offsets {
                    chrome.observe(offset, &mut surface);
                    prop_assert!(!chrome.visible() || chrome.pinned());
                }
            }

            #[test]
            fn surface_never_diverges_from_chrome(
                header_height in 0..200usize,
                offsets in prop::collection::vec(0..10000usize, 0..200),
            ) {
                let mut chrome = NavChrome::new(header_height);
                let mut surface = Recorder::default();
                for &offset in &offsets {
                    chrome.observe(offset, &mut surface);
                    prop_assert_eq!(chrome.pinned(), surface.pinned);
                    prop_assert_eq!(chrome.visible(), surface.visible);
                }
            }

            #[test]
            fn at_top_is_always_unpinned_and_hidden(
                header_height in 0..200usize,
                offsets in prop::collection::vec(1..10000usize, 1..100),
            ) {
                let mut chrome = NavChrome::new(header_height);
                let mut surface = Recorder::default();
                for &offset in &offsets {
                    chrome.observe(offset, &mut surface);
                }
                // Returning to the top always resets both flags.
                chrome.observe(0, &mut surface);
                prop_assert!(!chrome.pinned());
                prop_assert!(!chrome.visible());
            }
        }
    }
}
