//! Modal stack for managing overlays
//!
//! Modals are an enum-based stack instead of a set of boolean flags.

/// A modal overlay displayed on top of the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Help dialog showing all keyboard shortcuts
    Help,
    /// Module picker
    ModulePicker,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterate bottom to top, the order modals are drawn in
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_top_is_last_pushed() {
        let mut stack = ModalStack::new();
        stack.push(Modal::ModulePicker);
        stack.push(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));
    }

    #[test]
    fn test_iter_is_bottom_to_top() {
        let mut stack = ModalStack::new();
        stack.push(Modal::ModulePicker);
        stack.push(Modal::QuitConfirm);
        let order: Vec<&Modal> = stack.iter().collect();
        assert_eq!(order[1], &Modal::QuitConfirm);
    }
}
