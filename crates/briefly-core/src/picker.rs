//! Style and length dropdowns: visibility, mutual exclusion, and which way
//! each one opens.
//!
//! Geometry is expressed in whatever unit the front end uses (pixels in a
//! browser, rows in a terminal). Only vertical extents matter.

/// Which way a dropdown opens relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropDirection {
    Up,
    #[default]
    Down,
}

/// Vertical extent of a dropdown trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerBounds {
    pub top: u32,
    pub bottom: u32,
}

impl TriggerBounds {
    pub fn new(top: u32, bottom: u32) -> Self {
        Self { top, bottom }
    }
}

/// Open upward only when there is not enough room below and enough above.
pub fn drop_direction(
    trigger: TriggerBounds,
    viewport_height: u32,
    dropdown_height: u32,
) -> DropDirection {
    let space_below = viewport_height.saturating_sub(trigger.bottom);
    let space_above = trigger.top;

    if space_below < dropdown_height && space_above > dropdown_height {
        DropDirection::Up
    } else {
        DropDirection::Down
    }
}

/// Estimated dropdown heights used for the direction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownMetrics {
    pub style_height: u32,
    pub length_height: u32,
}

impl Default for DropdownMetrics {
    /// Pixel estimates from the web form.
    fn default() -> Self {
        Self {
            style_height: 250,
            length_height: 180,
        }
    }
}

/// The two dropdowns on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dropdown {
    Style,
    Length,
}

/// Open/closed state and direction of both dropdowns. At most one is open.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    metrics: DropdownMetrics,
    open: Option<Dropdown>,
    style_direction: DropDirection,
    length_direction: DropDirection,
    /// Keyboard highlight inside the open dropdown.
    highlight: usize,
}

impl PickerState {
    pub fn new(metrics: DropdownMetrics) -> Self {
        Self {
            metrics,
            ..Default::default()
        }
    }

    pub fn open(&self) -> Option<Dropdown> {
        self.open
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open == Some(dropdown)
    }

    pub fn direction(&self, dropdown: Dropdown) -> DropDirection {
        match dropdown {
            Dropdown::Style => self.style_direction,
            Dropdown::Length => self.length_direction,
        }
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Toggle one dropdown, closing the other. The direction is recomputed
    /// from the trigger position on every toggle.
    pub fn toggle(&mut self, dropdown: Dropdown, trigger: TriggerBounds, viewport_height: u32) {
        let height = match dropdown {
            Dropdown::Style => self.metrics.style_height,
            Dropdown::Length => self.metrics.length_height,
        };
        let direction = drop_direction(trigger, viewport_height, height);
        match dropdown {
            Dropdown::Style => self.style_direction = direction,
            Dropdown::Length => self.length_direction = direction,
        }

        self.open = if self.open == Some(dropdown) {
            None
        } else {
            Some(dropdown)
        };
        self.highlight = 0;
    }

    /// Open a dropdown with a given entry highlighted.
    pub fn toggle_at(
        &mut self,
        dropdown: Dropdown,
        trigger: TriggerBounds,
        viewport_height: u32,
        highlight: usize,
    ) {
        self.toggle(dropdown, trigger, viewport_height);
        if self.open.is_some() {
            self.highlight = highlight;
        }
    }

    /// Close both dropdowns (click outside, Esc, or a selection).
    pub fn close_all(&mut self) {
        self.open = None;
        self.highlight = 0;
    }

    /// Move the highlight down, clamped to `len` entries.
    pub fn highlight_next(&mut self, len: usize) {
        if len > 0 {
            self.highlight = (self.highlight + 1).min(len - 1);
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlight = self.highlight.saturating_sub(1);
    }
}
