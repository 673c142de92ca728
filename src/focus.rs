use crate::env::PageEnvironment;
use crate::error::NavError;
use crate::page::PageModel;
use serde::{Deserialize, Serialize};

/// Default distance, in CSS pixels, kept between the focused link and the viewport edges
pub const DEFAULT_HIGHLIGHT_MARGIN: f64 = 100.0;

/// The focus index handed to the registry as plugin state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusState {
    pub index: usize,
}

/// Owns the focus index and keeps the highlight marker and scroll position in sync with it.
///
/// The index always lies in `[0, N-1]` for a page with `N > 0` links and stays
/// at 0 for an empty page.
#[derive(Debug, Clone)]
pub struct FocusController {
    state: FocusState,
    margin: f64,
    marker: String,
}

impl FocusController {
    /// Create a controller focused on the first link
    pub fn new(margin: f64, marker: impl Into<String>) -> Self {
        Self {
            state: FocusState::default(),
            margin,
            marker: marker.into(),
        }
    }

    /// Index of the focused link
    pub fn current_index(&self) -> usize {
        self.state.index
    }

    /// Snapshot of the focus state
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Style marker applied to the focused link
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Replace the index, clamped to the page's link range
    pub fn set_index(&mut self, page: &PageModel, index: usize) {
        self.state.index = clamp_index(page, index as isize);
    }

    /// Move the index by `delta`, saturating at both ends
    pub fn shift(&mut self, page: &PageModel, delta: isize) {
        self.state.index = clamp_index(page, self.state.index as isize + delta);
    }

    /// Remove the marker from every link of the page
    pub fn clear_highlight(&self, page: &PageModel, env: &mut dyn PageEnvironment) {
        for link in page.links() {
            env.remove_marker(link, &self.marker);
        }
    }

    /// Mark link `index` and scroll it into the safe band.
    ///
    /// Scrolls the minimum needed: an element above the band is pulled down
    /// until its top sits at the margin, one below it is pushed up until its
    /// bottom sits a margin above the viewport bottom.
    pub fn apply_highlight(
        &self,
        page: &PageModel,
        env: &mut dyn PageEnvironment,
        index: usize,
    ) -> Result<(), NavError> {
        let link = page.link_at(index)?;
        if !env.is_attached(link) {
            return Err(NavError::Detached { index });
        }

        env.add_marker(link, &self.marker);

        let rect = env.element_rect(link);
        let viewport = env.viewport();
        if rect.top < self.margin {
            let y = viewport.scroll_y + rect.top - self.margin;
            ::log::trace!("Scrolling up to {} for link {}", y, index);
            env.scroll_to(viewport.scroll_x, y);
        } else if rect.top > viewport.height - self.margin {
            let y = viewport.scroll_y + (rect.top - viewport.height + self.margin + rect.height);
            ::log::trace!("Scrolling down to {} for link {}", y, index);
            env.scroll_to(viewport.scroll_x, y);
        }

        Ok(())
    }

    /// Clear, shift and re-apply the highlight as one unit.
    ///
    /// If the target link is detached nothing is touched, so the page never
    /// ends up with zero highlighted links.
    pub fn move_focus(
        &mut self,
        page: &PageModel,
        env: &mut dyn PageEnvironment,
        delta: isize,
    ) -> Result<(), NavError> {
        let target = clamp_index(page, self.state.index as isize + delta);
        self.focus_at(page, env, target)
    }

    /// Move the highlight to `index` (clamped), leaving the page untouched if
    /// that link is detached
    pub fn focus_at(
        &mut self,
        page: &PageModel,
        env: &mut dyn PageEnvironment,
        index: usize,
    ) -> Result<(), NavError> {
        if page.link_count() == 0 {
            return Ok(());
        }

        let target = clamp_index(page, index as isize);
        let link = page.link_at(target)?;
        if !env.is_attached(link) {
            return Err(NavError::Detached { index: target });
        }

        self.clear_highlight(page, env);
        self.state.index = target;
        ::log::trace!("Focus moved to link {} of {}", target, page.link_count());
        self.apply_highlight(page, env, target)
    }
}

fn clamp_index(page: &PageModel, index: isize) -> usize {
    let count = page.link_count();
    if count == 0 {
        return 0;
    }
    index.clamp(0, count as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementId, Link};
    use crate::simulated::{PageEffect, SimulatedPage};

    const MARKER: &str = "focused";

    fn page_with(n: usize) -> PageModel {
        PageModel::new(
            (0..n)
                .map(|i| Link::new(ElementId(i), format!("https://example.com/{}", i), ""))
                .collect(),
        )
    }

    fn controller() -> FocusController {
        FocusController::new(DEFAULT_HIGHLIGHT_MARGIN, MARKER)
    }

    #[test]
    fn test_shift_saturates_at_end() {
        let page = page_with(4);
        let mut focus = controller();

        for _ in 0..4 {
            focus.shift(&page, 1);
        }
        assert_eq!(focus.current_index(), 3);

        focus.shift(&page, 1);
        focus.shift(&page, 10);
        assert_eq!(focus.current_index(), 3);
    }

    #[test]
    fn test_shift_saturates_at_start() {
        let page = page_with(4);
        let mut focus = controller();
        focus.set_index(&page, 2);

        focus.shift(&page, -1);
        focus.shift(&page, -1);
        assert_eq!(focus.current_index(), 0);
        focus.shift(&page, -1);
        assert_eq!(focus.current_index(), 0);
    }

    #[test]
    fn test_index_stays_in_range() {
        let deltas = [1, 3, -2, 7, -9, 1, 1, -1, 4, -4, 2];
        for n in 0..6 {
            let page = page_with(n);
            let mut focus = controller();
            for delta in deltas {
                focus.shift(&page, delta);
                assert!(focus.current_index() <= n.saturating_sub(1));
            }
        }
    }

    #[test]
    fn test_empty_page_is_noop() {
        let page = page_with(0);
        let mut focus = controller();
        let mut env = SimulatedPage::new(600.0);

        focus.shift(&page, 1);
        assert_eq!(focus.current_index(), 0);
        assert!(focus.move_focus(&page, &mut env, 1).is_ok());
        assert!(env.transcript().is_empty());
    }

    #[test]
    fn test_set_index_clamps() {
        let page = page_with(3);
        let mut focus = controller();
        focus.set_index(&page, 42);
        assert_eq!(focus.current_index(), 2);
    }

    #[test]
    fn test_single_highlight_after_clear_and_apply() {
        let page = page_with(5);
        let focus = controller();
        let mut env = SimulatedPage::with_uniform_layout(&page, 800.0, 150.0, 50.0);

        for i in 0..5 {
            env.add_marker(page.link_at(i).unwrap(), MARKER);
        }
        focus.clear_highlight(&page, &mut env);
        focus.apply_highlight(&page, &mut env, 2).unwrap();

        assert_eq!(env.marked(MARKER), vec![ElementId(2)]);
    }

    #[test]
    fn test_apply_highlight_out_of_range() {
        let page = page_with(2);
        let focus = controller();
        let mut env = SimulatedPage::with_uniform_layout(&page, 800.0, 150.0, 50.0);

        assert_eq!(
            focus.apply_highlight(&page, &mut env, 2),
            Err(NavError::OutOfRange { index: 2, len: 2 })
        );
        assert!(env.transcript().is_empty());
    }

    #[test]
    fn test_scroll_up_to_margin() {
        let page = page_with(1);
        let focus = controller();
        // Element sits 40px from the viewport top
        let mut env = SimulatedPage::new(600.0)
            .with_element(ElementId(0), 540.0, 30.0)
            .with_scroll(0.0, 500.0);

        focus.apply_highlight(&page, &mut env, 0).unwrap();

        let top = env.element_rect(page.link_at(0).unwrap()).top;
        assert_eq!(top, DEFAULT_HIGHLIGHT_MARGIN);
        assert_eq!(env.scroll_y(), 440.0);
    }

    #[test]
    fn test_scroll_down_to_margin() {
        let page = page_with(1);
        let focus = controller();
        // Element top at 550 in a 600px viewport, 30px tall
        let mut env = SimulatedPage::new(600.0).with_element(ElementId(0), 550.0, 30.0);

        focus.apply_highlight(&page, &mut env, 0).unwrap();

        let rect = env.element_rect(page.link_at(0).unwrap());
        assert_eq!(rect.top + rect.height, 600.0 - DEFAULT_HIGHLIGHT_MARGIN);
        assert_eq!(env.scroll_y(), 80.0);
    }

    #[test]
    fn test_no_scroll_inside_safe_band() {
        let page = page_with(3);
        let focus = controller();
        let mut env = SimulatedPage::new(600.0)
            .with_element(ElementId(0), 100.0, 30.0)
            .with_element(ElementId(1), 300.0, 30.0)
            .with_element(ElementId(2), 500.0, 30.0);

        for i in 0..3 {
            focus.apply_highlight(&page, &mut env, i).unwrap();
        }

        assert_eq!(env.scroll_y(), 0.0);
        assert!(
            !env
                .transcript()
                .iter()
                .any(|e| matches!(e, PageEffect::ScrollTo { .. }))
        );
    }

    #[test]
    fn test_move_focus_keeps_one_highlight() {
        let page = page_with(5);
        let mut focus = controller();
        let mut env = SimulatedPage::with_uniform_layout(&page, 800.0, 150.0, 50.0);
        focus.apply_highlight(&page, &mut env, 0).unwrap();

        focus.move_focus(&page, &mut env, 1).unwrap();
        focus.move_focus(&page, &mut env, 1).unwrap();
        assert_eq!(focus.current_index(), 2);
        assert_eq!(env.marked(MARKER), vec![ElementId(2)]);

        focus.move_focus(&page, &mut env, -5).unwrap();
        assert_eq!(focus.current_index(), 0);
        assert_eq!(env.marked(MARKER), vec![ElementId(0)]);
    }

    #[test]
    fn test_move_focus_to_detached_link() {
        let page = page_with(3);
        let mut focus = controller();
        let mut env = SimulatedPage::with_uniform_layout(&page, 800.0, 150.0, 50.0);
        focus.apply_highlight(&page, &mut env, 0).unwrap();
        env.detach(ElementId(1));
        let before = env.transcript().len();

        assert_eq!(
            focus.move_focus(&page, &mut env, 1),
            Err(NavError::Detached { index: 1 })
        );
        assert_eq!(focus.current_index(), 0);
        assert_eq!(env.marked(MARKER), vec![ElementId(0)]);
        assert_eq!(env.transcript().len(), before);
    }

    #[test]
    fn test_focus_at_detached_link_keeps_highlight() {
        let page = page_with(3);
        let mut focus = controller();
        let mut env = SimulatedPage::with_uniform_layout(&page, 800.0, 150.0, 50.0);
        focus.apply_highlight(&page, &mut env, 0).unwrap();
        env.detach(ElementId(2));

        assert_eq!(
            focus.focus_at(&page, &mut env, 2),
            Err(NavError::Detached { index: 2 })
        );
        assert_eq!(focus.current_index(), 0);
        assert_eq!(env.marked(MARKER), vec![ElementId(0)]);

        focus.focus_at(&page, &mut env, 7).unwrap_err();
        assert_eq!(env.marked(MARKER), vec![ElementId(0)]);

        focus.focus_at(&page, &mut env, 1).unwrap();
        assert_eq!(focus.current_index(), 1);
        assert_eq!(env.marked(MARKER), vec![ElementId(1)]);
    }
}
