use glam::Vec2;

/// Opaque reference to an entry field owned by a [`WidgetLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle(usize);

impl FieldHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The toolkit side of entry fields: creation plus the focus flag.
///
/// Implementations own the fields. Granting focus to one field is expected to
/// clear the flag on whichever field held it before; callers never do that
/// themselves. Focus flags are only touched from the UI thread.
pub trait WidgetLayer {
    fn create_field(&mut self, label: &'static str, position: Vec2, initial_value: &str) -> FieldHandle;
    fn set_focus(&mut self, field: FieldHandle, focused: bool);
    fn has_focus(&self, field: FieldHandle) -> bool;
}

#[derive(Debug, Clone)]
pub struct FocusableField {
    pub label: &'static str,
    pub position: Vec2,
    pub value: String,
    has_focus: bool,
}

impl FocusableField {
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }
}

/// In-memory widget layer used by the editor shell and the egui panel.
#[derive(Debug, Default, Clone)]
pub struct FieldSet {
    fields: Vec<FocusableField>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, handle: FieldHandle) -> Option<&FocusableField> {
        self.fields.get(handle.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldHandle, &FocusableField)> {
        self.fields.iter().enumerate().map(|(idx, field)| (FieldHandle::new(idx), field))
    }

    pub fn value(&self, handle: FieldHandle) -> Option<&str> {
        self.field(handle).map(|field| field.value.as_str())
    }

    pub fn set_value(&mut self, handle: FieldHandle, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(handle.index()) {
            field.value = value.into();
        }
    }

    pub fn value_mut(&mut self, handle: FieldHandle) -> Option<&mut String> {
        self.fields.get_mut(handle.index()).map(|field| &mut field.value)
    }

    /// Focus change that did not come from keyboard navigation (pointer click).
    pub fn click(&mut self, handle: FieldHandle) {
        self.set_focus(handle, true);
    }

    pub fn clear_focus(&mut self) {
        for field in &mut self.fields {
            field.has_focus = false;
        }
    }

    pub fn focused(&self) -> Option<FieldHandle> {
        self.fields.iter().position(|field| field.has_focus).map(FieldHandle::new)
    }
}

impl WidgetLayer for FieldSet {
    fn create_field(&mut self, label: &'static str, position: Vec2, initial_value: &str) -> FieldHandle {
        self.fields.push(FocusableField {
            label,
            position,
            value: initial_value.to_string(),
            has_focus: false,
        });
        FieldHandle::new(self.fields.len() - 1)
    }

    fn set_focus(&mut self, field: FieldHandle, focused: bool) {
        if field.index() >= self.fields.len() {
            log::warn!("[widgets] focus request for unknown field #{}", field.index());
            return;
        }
        if focused {
            self.clear_focus();
        }
        self.fields[field.index()].has_focus = focused;
    }

    fn has_focus(&self, field: FieldHandle) -> bool {
        self.fields.get(field.index()).map(|f| f.has_focus).unwrap_or(false)
    }
}
