//! The format painter: copy the look of one selection onto another.
//!
//! Capture reads the *computed* style of the selection's anchor element, so
//! the copied look matches what the user sees regardless of how the source
//! text was marked up. Apply wraps the target selection in a styled `span`;
//! when the range cannot be wrapped as a single node it falls back to the
//! `foreColor` and `fontName` commands, which carry only color and font
//! family over.

use crate::commands::FormattingCommand;
use crate::error::WrapError;
use crate::platform::{DocumentSurface, Notifier};
use crate::style::{StyleProperty, StyleSnapshot};

pub const MSG_DEACTIVATED: &str = "Format painter deactivated";
pub const MSG_SELECT_SOURCE: &str = "Select formatted text first";
pub const MSG_COPIED: &str = "Formatting copied";
pub const MSG_SELECT_TARGET: &str = "Select text to apply formatting to";
pub const MSG_APPLIED: &str = "Formatting applied";

/// Painter state. The snapshot lives inside `Armed`, so an active painter
/// always has one and an idle painter never does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PainterState {
    #[default]
    Idle,
    Armed(StyleSnapshot),
}

/// Result of `FormatPainter::toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A snapshot was taken; the painter is armed.
    Captured,
    /// The painter was armed and has been switched off.
    Deactivated,
    /// No usable selection; the painter stays idle.
    NoSelection,
}

/// Result of `FormatPainter::apply_at_selection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Painter is idle; nothing happened.
    Inactive,
    /// Armed, but there is no usable target selection; still armed.
    NoSelection,
    /// The selection was wrapped in a styled span.
    Wrapped,
    /// Wrapping was impossible; color and font family were applied with
    /// formatting commands instead.
    Fallback,
}

impl ApplyOutcome {
    /// Whether formatting was applied and the painter went back to idle.
    pub fn applied(self) -> bool {
        matches!(self, Self::Wrapped | Self::Fallback)
    }
}

/// Capture the computed style of the current selection's anchor element.
///
/// Returns `None` when there is no selection or it is collapsed.
pub fn capture_style<D>(surface: &D) -> Option<StyleSnapshot>
where
    D: DocumentSurface + ?Sized,
{
    let selection = surface.selection().filter(|s| s.is_usable())?;
    let element = surface.element_of(&selection.anchor)?;
    Some(StyleSnapshot::capture(|property| {
        surface.computed_style(&element, property)
    }))
}

#[derive(Debug, Clone, Default)]
pub struct FormatPainter {
    state: PainterState,
}

impl FormatPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PainterState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PainterState::Armed(_))
    }

    pub fn snapshot(&self) -> Option<&StyleSnapshot> {
        match &self.state {
            PainterState::Armed(snapshot) => Some(snapshot),
            PainterState::Idle => None,
        }
    }

    /// Switch off without notifying. Returns whether the painter was armed.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = PainterState::Idle;
        was_active
    }

    /// Arm from the current selection, or disarm if already armed.
    pub fn toggle<D, N>(&mut self, surface: &D, notifier: &N) -> CaptureOutcome
    where
        D: DocumentSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        if self.deactivate() {
            tracing::debug!("format painter deactivated");
            notifier.notify(MSG_DEACTIVATED);
            return CaptureOutcome::Deactivated;
        }

        match capture_style(surface) {
            Some(snapshot) => {
                tracing::debug!(properties = snapshot.len(), "format painter armed");
                self.state = PainterState::Armed(snapshot);
                notifier.notify(MSG_COPIED);
                CaptureOutcome::Captured
            }
            None => {
                notifier.notify(MSG_SELECT_SOURCE);
                CaptureOutcome::NoSelection
            }
        }
    }

    /// Apply the captured style to the current selection.
    ///
    /// Called when the user finishes a selection on the surface.
    pub fn apply_at_selection<D, N>(&mut self, surface: &mut D, notifier: &N) -> ApplyOutcome
    where
        D: DocumentSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        let PainterState::Armed(snapshot) = &self.state else {
            return ApplyOutcome::Inactive;
        };

        if !surface.selection().is_some_and(|s| s.is_usable()) {
            notifier.notify(MSG_SELECT_TARGET);
            return ApplyOutcome::NoSelection;
        }

        let outcome = match surface.wrap_selection(&snapshot.to_container()) {
            Ok(()) => ApplyOutcome::Wrapped,
            Err(WrapError::NoSelection) => {
                notifier.notify(MSG_SELECT_TARGET);
                return ApplyOutcome::NoSelection;
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot wrap selection, applying color and font only");
                apply_fallback(surface, snapshot);
                ApplyOutcome::Fallback
            }
        };

        self.state = PainterState::Idle;
        surface.clear_selection();
        notifier.notify(MSG_APPLIED);
        outcome
    }
}

fn apply_fallback<D>(surface: &mut D, snapshot: &StyleSnapshot)
where
    D: DocumentSurface + ?Sized,
{
    let commands = [
        (FormattingCommand::ForeColor, StyleProperty::Color),
        (FormattingCommand::FontName, StyleProperty::FontFamily),
    ];
    for (command, property) in commands {
        let Some(value) = snapshot.get(property) else {
            continue;
        };
        if let Err(err) = surface.execute(command, Some(value)) {
            tracing::warn!(%command, error = %err, "fallback command failed");
        }
    }
}
