//! Formatting commands understood by document surfaces.
//!
//! These mirror the browser's `document.execCommand` names. The browser
//! surface passes `as_str()` straight through; other surfaces interpret the
//! command themselves.

/// A named formatting operation, optionally taking a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormattingCommand {
    // === Inline ===
    Bold,
    Italic,
    Underline,
    /// Font family; value is the family name.
    FontName,
    /// Legacy font size; value is `1`..=`7`.
    FontSize,
    /// Text color; value is a CSS color.
    ForeColor,
    /// Background highlight; value is a CSS color.
    HiliteColor,
    /// Wrap selection in a link; value is the URL.
    CreateLink,
    /// Strip inline formatting from the selection.
    RemoveFormat,

    // === Block ===
    /// Change the enclosing block type; value is a tag such as `<h1>`.
    FormatBlock,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    JustifyFull,
    InsertOrderedList,
    InsertUnorderedList,

    // === Clipboard ===
    Copy,
}

impl FormattingCommand {
    /// The command name as passed to `execCommand`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::FontName => "fontName",
            Self::FontSize => "fontSize",
            Self::ForeColor => "foreColor",
            Self::HiliteColor => "hiliteColor",
            Self::CreateLink => "createLink",
            Self::RemoveFormat => "removeFormat",
            Self::FormatBlock => "formatBlock",
            Self::JustifyLeft => "justifyLeft",
            Self::JustifyCenter => "justifyCenter",
            Self::JustifyRight => "justifyRight",
            Self::JustifyFull => "justifyFull",
            Self::InsertOrderedList => "insertOrderedList",
            Self::InsertUnorderedList => "insertUnorderedList",
            Self::Copy => "copy",
        }
    }

    /// Parse an `execCommand` name. Matching is case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "fontName" => Self::FontName,
            "fontSize" => Self::FontSize,
            "foreColor" => Self::ForeColor,
            "hiliteColor" => Self::HiliteColor,
            "createLink" => Self::CreateLink,
            "removeFormat" => Self::RemoveFormat,
            "formatBlock" => Self::FormatBlock,
            "justifyLeft" => Self::JustifyLeft,
            "justifyCenter" => Self::JustifyCenter,
            "justifyRight" => Self::JustifyRight,
            "justifyFull" => Self::JustifyFull,
            "insertOrderedList" => Self::InsertOrderedList,
            "insertUnorderedList" => Self::InsertUnorderedList,
            "copy" => Self::Copy,
            _ => return None,
        })
    }

    /// Whether the command needs a value to do anything.
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            Self::FontName
                | Self::FontSize
                | Self::ForeColor
                | Self::HiliteColor
                | Self::CreateLink
                | Self::FormatBlock
        )
    }

    /// Whether the command operates on whole blocks rather than the
    /// selected text run.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Self::FormatBlock
                | Self::JustifyLeft
                | Self::JustifyCenter
                | Self::JustifyRight
                | Self::JustifyFull
                | Self::InsertOrderedList
                | Self::InsertUnorderedList
        )
    }

    /// CSS `text-align` value for the justify commands.
    pub fn alignment(self) -> Option<&'static str> {
        match self {
            Self::JustifyLeft => Some("left"),
            Self::JustifyCenter => Some("center"),
            Self::JustifyRight => Some("right"),
            Self::JustifyFull => Some("justify"),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormattingCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for name in [
            "bold",
            "fontName",
            "hiliteColor",
            "formatBlock",
            "justifyFull",
            "insertUnorderedList",
            "copy",
        ] {
            let cmd = FormattingCommand::parse(name).expect(name);
            assert_eq!(cmd.as_str(), name);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(FormattingCommand::parse("Bold"), None);
        assert_eq!(FormattingCommand::parse("strikeThrough"), None);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(FormattingCommand::JustifyFull.alignment(), Some("justify"));
        assert_eq!(FormattingCommand::Bold.alignment(), None);
        assert!(FormattingCommand::JustifyCenter.is_block());
        assert!(!FormattingCommand::ForeColor.is_block());
    }
}
