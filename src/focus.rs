use crate::error::{EditorError, EditorResult};
use crate::widgets::{FieldHandle, WidgetLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

impl FocusDirection {
    pub fn offset(self) -> isize {
        match self {
            FocusDirection::Forward => 1,
            FocusDirection::Backward => -1,
        }
    }

    /// Tab moves forward, Shift+Tab moves backward.
    pub fn from_shift(shift_held: bool) -> Self {
        if shift_held {
            FocusDirection::Backward
        } else {
            FocusDirection::Forward
        }
    }
}

/// Wraps a tab index into `[0, count)`: one past the end goes to the first
/// field, anything below zero goes to the last.
pub fn resolve_index(index: isize, count: usize) -> EditorResult<usize> {
    if count == 0 {
        return Err(EditorError::invalid_state("cannot resolve a tab index over an empty field set"));
    }
    if index < 0 {
        Ok(count - 1)
    } else if index as usize >= count {
        Ok(0)
    } else {
        Ok(index as usize)
    }
}

/// Tab-order navigation over a fixed sequence of entry fields.
///
/// The navigator only references the fields; the widget layer owns them and
/// their focus flags. Focus is re-read on every call because a pointer click
/// can move it without the navigator noticing. The remembered index covers
/// the case where focus was cleared programmatically, e.g. after a commit.
#[derive(Debug, Clone)]
pub struct FocusNavigator {
    fields: Vec<FieldHandle>,
    last_focused: Option<usize>,
}

impl FocusNavigator {
    pub fn new(fields: Vec<FieldHandle>) -> Self {
        Self { fields, last_focused: None }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldHandle] {
        &self.fields
    }

    pub fn last_focused(&self) -> Option<usize> {
        self.last_focused
    }

    pub fn forget(&mut self) {
        self.last_focused = None;
    }

    pub fn resolve_index(&self, index: isize) -> EditorResult<usize> {
        resolve_index(index, self.fields.len())
    }

    pub fn focused_index<W: WidgetLayer + ?Sized>(&self, widgets: &W) -> Option<usize> {
        self.fields.iter().position(|&field| widgets.has_focus(field))
    }

    /// Moves focus one step in `direction` and returns the index that now
    /// holds it. Returns `None` when nothing is focused and nothing was ever
    /// focused through the navigator.
    pub fn advance<W: WidgetLayer + ?Sized>(
        &mut self,
        widgets: &mut W,
        direction: FocusDirection,
    ) -> EditorResult<Option<usize>> {
        let origin = match self.focused_index(widgets).or(self.last_focused) {
            Some(origin) => origin,
            None => {
                log::debug!("[focus] no focused field and no remembered index; ignoring tab");
                return Ok(None);
            }
        };
        let next = self.resolve_index(origin as isize + direction.offset())?;
        widgets.set_focus(self.fields[next], true);
        self.last_focused = Some(next);
        Ok(Some(next))
    }
}
