/// Most recently observed text selection, used when the page agent cannot be polled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    last_selected_text: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_selected_text(&mut self, text: impl Into<String>) {
        self.last_selected_text = text.into();
    }

    pub fn last_selected_text(&self) -> &str {
        &self.last_selected_text
    }
}
