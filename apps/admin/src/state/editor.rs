//! # Editor State
//!
//! The quotation and invoice forms as currently filled in. Exports read a
//! copy; a failed export never touches the forms, so the operator can fix
//! one field and retry.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use taraang_core::{InvoiceDetails, Quotation};

/// Both editor forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor {
    pub quotation: Quotation,
    pub invoice: InvoiceDetails,
}

impl Editor {
    /// Blank forms; the invoice is dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Editor {
            quotation: Quotation::new(),
            invoice: InvoiceDetails::new(today),
        }
    }
}

/// Thread-safe wrapper around the [`Editor`].
#[derive(Debug, Clone)]
pub struct EditorState {
    editor: Arc<Mutex<Editor>>,
}

impl EditorState {
    pub fn new(today: NaiveDate) -> Self {
        EditorState {
            editor: Arc::new(Mutex::new(Editor::new(today))),
        }
    }

    /// Executes a function with read access to the editor.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = editor.with_editor(|e| e.quotation.charges.total());
    /// ```
    pub fn with_editor<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Editor) -> R,
    {
        let editor = self.editor.lock().expect("Editor mutex poisoned");
        f(&editor)
    }

    /// Executes a function with write access to the editor.
    pub fn with_editor_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Editor) -> R,
    {
        let mut editor = self.editor.lock().expect("Editor mutex poisoned");
        f(&mut editor)
    }

    pub fn quotation(&self) -> Quotation {
        self.with_editor(|e| e.quotation.clone())
    }

    pub fn invoice(&self) -> InvoiceDetails {
        self.with_editor(|e| e.invoice.clone())
    }
}
