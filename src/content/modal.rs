use crate::content::{CardData, ContentSet};
use crate::foundation::error::{GiltError, GiltResult};

/// Which card, if any, is expanded into the modal view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardModal {
    active: Option<String>,
}

impl CardModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id`: selecting the open card closes it, any other card replaces it.
    ///
    /// Returns the id that is open afterwards.
    pub fn select(&mut self, content: &ContentSet, id: &str) -> GiltResult<Option<&str>> {
        if content.card(id).is_none() {
            return Err(GiltError::validation(format!("unknown card id '{id}'")));
        }
        if self.active.as_deref() == Some(id) {
            self.active = None;
        } else {
            self.active = Some(id.to_owned());
        }
        tracing::debug!(active = ?self.active, "card modal toggled");
        Ok(self.active.as_deref())
    }

    /// Close the modal (background click or the close button).
    pub fn dismiss(&mut self) {
        self.active = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active<'a>(&self, content: &'a ContentSet) -> Option<&'a CardData> {
        self.active.as_deref().and_then(|id| content.card(id))
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/modal.rs"]
mod tests;
