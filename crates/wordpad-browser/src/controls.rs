//! Toolbar wiring: one listener per control, plus the selection listener
//! that drives the format painter.
//!
//! Controls are looked up by their ids (`boldBtn`, `fontSize`, ...); a page
//! may leave any of them out.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement};
use wordpad_core::theme::DARK_CLASS;
use wordpad_core::{
    ButtonStates, DispatchOutcome, EditorConfig, EditorError, Notifier, Theme, ToolbarAction,
    ToolbarKind, Wordpad,
};

use crate::export::{download_doc, export_pdf, open_preview};
use crate::{
    AutosaveTimer, BrowserSurface, BrowserWordpad, LocalStore, ToastNotifier, document, window,
};

/// Class toggled on pressed toolbar buttons.
pub const SELECTED_CLASS: &str = "selected";

/// An editor attached to the page. Dropping it (or calling `unmount`)
/// removes every listener and stops autosave.
pub struct MountedEditor {
    editor: Rc<RefCell<BrowserWordpad>>,
    listeners: Vec<EventListener>,
    timer: Option<AutosaveTimer>,
}

impl MountedEditor {
    pub fn editor(&self) -> &Rc<RefCell<BrowserWordpad>> {
        &self.editor
    }

    /// Run an action as if its control had been used.
    pub fn dispatch(&self, action: &ToolbarAction) -> Option<DispatchOutcome> {
        run_action(&self.editor, action)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn unmount(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
        self.listeners.clear();
        tracing::info!("editor unmounted");
    }
}

impl std::fmt::Debug for MountedEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedEditor")
            .field("listeners", &self.listeners.len())
            .field("autosave", &self.timer.is_some())
            .finish()
    }
}

/// Build the editor on the element named by `config.editor_id`, restore the
/// draft and theme, and attach the toolbar.
pub fn mount(config: EditorConfig) -> Result<MountedEditor, EditorError> {
    let surface = BrowserSurface::from_id(&config.editor_id)?;
    let element = surface.element().clone();
    let notifier = ToastNotifier::new(config.toast_duration_ms);
    let autosave_period = config.autosave_enabled().then_some(config.autosave_interval_ms);

    let mut wordpad = Wordpad::new(surface, LocalStore::new(), notifier, config);
    apply_theme(wordpad.start());
    let editor = Rc::new(RefCell::new(wordpad));

    let page = document()?;
    let mut listeners = Vec::new();
    for kind in ToolbarKind::ALL {
        let Some(control) = page.get_element_by_id(kind.control_id()) else {
            continue;
        };
        let editor = editor.clone();
        listeners.push(EventListener::new(&control, event_name(kind), move |event| {
            on_control(&editor, kind, event);
        }));
    }

    let painter_editor = editor.clone();
    listeners.push(EventListener::new(&element, "mouseup", move |_| {
        let Ok(mut editor) = painter_editor.try_borrow_mut() else {
            return;
        };
        if editor.selection_finished().applied() {
            set_selected(ToolbarKind::FormatPainter, false);
        }
    }));

    let timer = autosave_period.map(|period| AutosaveTimer::start(editor.clone(), period));
    tracing::info!(controls = listeners.len() - 1, autosave = timer.is_some(), "editor mounted");

    Ok(MountedEditor {
        editor,
        listeners,
        timer,
    })
}

fn event_name(kind: ToolbarKind) -> &'static str {
    match kind {
        ToolbarKind::FontSize | ToolbarKind::FontFamily => "change",
        ToolbarKind::TextColor | ToolbarKind::HighlightColor => "input",
        _ => "click",
    }
}

/// Current value of a select or input control.
fn control_value(event: &Event) -> Option<String> {
    let target = event.target()?;
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target.dyn_ref::<HtmlInputElement>().map(|input| input.value())
}

fn prompt(message: &str) -> Option<String> {
    window().ok()?.prompt_with_message(message).ok().flatten()
}

/// The control's value, asking the user when the control has none.
/// `None` means the user cancelled.
fn value_for(kind: ToolbarKind, event: &Event) -> Option<Option<String>> {
    match kind {
        ToolbarKind::InsertLink => prompt("Enter URL:").map(Some),
        ToolbarKind::InsertImage => prompt("Enter image URL:").map(Some),
        ToolbarKind::InsertTable => {
            let rows = prompt("Enter number of rows:")?;
            let cols = prompt("Enter number of columns:")?;
            Some(Some(format!("{rows}x{cols}")))
        }
        _ if kind.takes_value() => Some(control_value(event)),
        _ => Some(None),
    }
}

fn on_control(editor: &Rc<RefCell<BrowserWordpad>>, kind: ToolbarKind, event: &Event) {
    let Some(value) = value_for(kind, event) else {
        return;
    };
    let pdf_mode = editor.borrow().config().pdf_mode;
    let Some(action) = kind.into_action(value.as_deref(), pdf_mode) else {
        tracing::debug!(?kind, "control has no usable value");
        return;
    };
    run_action(editor, &action);
}

/// Dispatch and then finish the platform half of the outcome.
fn run_action(
    editor: &Rc<RefCell<BrowserWordpad>>,
    action: &ToolbarAction,
) -> Option<DispatchOutcome> {
    let outcome = editor.try_borrow_mut().ok()?.handle(action)?;
    let editor = editor.borrow();

    let finished = match &outcome {
        DispatchOutcome::Preview(markup) => open_preview(markup),
        DispatchOutcome::ExportDoc(export) => download_doc(export),
        DispatchOutcome::ExportPdf(request) => export_pdf(request, editor.surface().element()),
        DispatchOutcome::Theme(theme) => {
            apply_theme(*theme);
            Ok(())
        }
        DispatchOutcome::Painter(_) => {
            set_selected(ToolbarKind::FormatPainter, editor.painter().is_active());
            Ok(())
        }
        DispatchOutcome::Applied => {
            sync_buttons(editor.buttons());
            Ok(())
        }
        DispatchOutcome::Ignored | DispatchOutcome::Saved => Ok(()),
    };

    if let Err(err) = finished {
        tracing::warn!(kind = ?action.kind(), error = %err, "action failed in the browser");
        editor.notifier().notify(&err.to_string());
    }
    Some(outcome)
}

fn set_selected(kind: ToolbarKind, selected: bool) {
    let Some(control) = document()
        .ok()
        .and_then(|d| d.get_element_by_id(kind.control_id()))
    else {
        return;
    };
    let _ = control
        .class_list()
        .toggle_with_force(SELECTED_CLASS, selected);
}

fn sync_buttons(states: ButtonStates) {
    set_selected(ToolbarKind::Bold, states.bold);
    set_selected(ToolbarKind::Italic, states.italic);
    set_selected(ToolbarKind::Underline, states.underline);
}

/// Put the theme class on `<body>`.
pub fn apply_theme(theme: Theme) {
    let Some(body) = document().ok().and_then(|d| d.body()) else {
        return;
    };
    let _ = body.class_list().toggle_with_force(DARK_CLASS, theme.is_dark());
}
