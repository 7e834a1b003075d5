//! Command identifiers and what they do.
//!
//! The host binds buttons and menu items to string ids; [`lookup`] turns an
//! id into a [`Command`]. Ids are matched exactly. Unknown ids map to `None`
//! and the session ignores them.

/// Editing operations implemented by the text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOperation {
    CapitalizeCase,
    CommentLines,
    UncommentLines,
    ConvertSpacesToTabs,
    ConvertTabsToSpaces,
    Copy,
    Cut,
    Paste,
    Delete,
    Indent,
    Outdent,
    DeleteBlankLines,
    DeleteHorizontalWhitespace,
    DeleteLine,
    Duplicate,
    FormatDocument,
    FormatSelection,
    MakeLowercase,
    MakeUppercase,
    MoveLinesUp,
    MoveLinesDown,
    TabifySelectedLines,
    UntabifySelectedLines,
    ToggleCharacterCasing,
    TransposeCharacters,
    TransposeLines,
    TransposeWords,
    TrimTrailingWhitespace,
    SelectAll,
    Undo,
    Redo,
    CollapseToDefinitions,
    ToggleOutliningExpansion,
    ToggleAllOutlining,
    StopOutlining,
}

impl EditOperation {
    /// Whether the operation can change the document text.
    pub fn modifies_text(self) -> bool {
        !matches!(
            self,
            EditOperation::Copy
                | EditOperation::SelectAll
                | EditOperation::CollapseToDefinitions
                | EditOperation::ToggleOutliningExpansion
                | EditOperation::ToggleAllOutlining
                | EditOperation::StopOutlining
        )
    }
}

/// Boolean view settings of the text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewOption {
    IndicatorMargin,
    LineNumbers,
    OutliningMargin,
    Ruler,
    SelectionMargin,
    WordWrap,
    WordWrapGlyphs,
    Whitespace,
    ScrollPastDocumentEnd,
    VirtualSpace,
    IndentationGuides,
    LineModificationMarks,
    CurrentLineHighlight,
    DelimiterHighlight,
    AutoCorrect,
    SplitHorizontally,
    ReadOnly,
}

impl ViewOption {
    pub const ALL: [ViewOption; 17] = [
        ViewOption::IndicatorMargin,
        ViewOption::LineNumbers,
        ViewOption::OutliningMargin,
        ViewOption::Ruler,
        ViewOption::SelectionMargin,
        ViewOption::WordWrap,
        ViewOption::WordWrapGlyphs,
        ViewOption::Whitespace,
        ViewOption::ScrollPastDocumentEnd,
        ViewOption::VirtualSpace,
        ViewOption::IndentationGuides,
        ViewOption::LineModificationMarks,
        ViewOption::CurrentLineHighlight,
        ViewOption::DelimiterHighlight,
        ViewOption::AutoCorrect,
        ViewOption::SplitHorizontally,
        ViewOption::ReadOnly,
    ];

    /// Initial state of a freshly created text surface.
    pub fn default_enabled(self) -> bool {
        matches!(
            self,
            ViewOption::IndicatorMargin
                | ViewOption::LineNumbers
                | ViewOption::OutliningMargin
                | ViewOption::SelectionMargin
                | ViewOption::CurrentLineHighlight
                | ViewOption::DelimiterHighlight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileAction {
    NewDocument,
    OpenDocument,
    SaveDocument,
    ExportSpreadsheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Edit(EditOperation),
    Toggle(ViewOption),
    File(FileAction),
}

use Command::{Edit, File, Toggle};

static COMMANDS: &[(&str, Command)] = &[
    ("capitalize", Edit(EditOperation::CapitalizeCase)),
    ("comment-lines", Edit(EditOperation::CommentLines)),
    ("uncomment-lines", Edit(EditOperation::UncommentLines)),
    ("convert-spaces-to-tabs", Edit(EditOperation::ConvertSpacesToTabs)),
    ("convert-tabs-to-spaces", Edit(EditOperation::ConvertTabsToSpaces)),
    ("copy", Edit(EditOperation::Copy)),
    ("cut", Edit(EditOperation::Cut)),
    ("paste", Edit(EditOperation::Paste)),
    ("delete", Edit(EditOperation::Delete)),
    ("indent", Edit(EditOperation::Indent)),
    ("outdent", Edit(EditOperation::Outdent)),
    ("delete-blank-lines", Edit(EditOperation::DeleteBlankLines)),
    ("delete-horizontal-whitespace", Edit(EditOperation::DeleteHorizontalWhitespace)),
    ("delete-line", Edit(EditOperation::DeleteLine)),
    ("duplicate", Edit(EditOperation::Duplicate)),
    ("format-document", Edit(EditOperation::FormatDocument)),
    ("format-selection", Edit(EditOperation::FormatSelection)),
    ("make-lowercase", Edit(EditOperation::MakeLowercase)),
    ("make-uppercase", Edit(EditOperation::MakeUppercase)),
    ("move-lines-up", Edit(EditOperation::MoveLinesUp)),
    ("move-lines-down", Edit(EditOperation::MoveLinesDown)),
    ("tabify", Edit(EditOperation::TabifySelectedLines)),
    ("untabify", Edit(EditOperation::UntabifySelectedLines)),
    ("toggle-case", Edit(EditOperation::ToggleCharacterCasing)),
    ("transpose-characters", Edit(EditOperation::TransposeCharacters)),
    ("transpose-lines", Edit(EditOperation::TransposeLines)),
    ("transpose-words", Edit(EditOperation::TransposeWords)),
    ("trim-trailing-whitespace", Edit(EditOperation::TrimTrailingWhitespace)),
    ("select-all", Edit(EditOperation::SelectAll)),
    ("undo", Edit(EditOperation::Undo)),
    ("redo", Edit(EditOperation::Redo)),
    ("collapse-to-definitions", Edit(EditOperation::CollapseToDefinitions)),
    ("toggle-outlining-expansion", Edit(EditOperation::ToggleOutliningExpansion)),
    ("toggle-all-outlining", Edit(EditOperation::ToggleAllOutlining)),
    ("stop-outlining", Edit(EditOperation::StopOutlining)),
    ("toggle-indicator-margin", Toggle(ViewOption::IndicatorMargin)),
    ("toggle-line-numbers", Toggle(ViewOption::LineNumbers)),
    ("toggle-outlining-margin", Toggle(ViewOption::OutliningMargin)),
    ("toggle-ruler", Toggle(ViewOption::Ruler)),
    ("toggle-selection-margin", Toggle(ViewOption::SelectionMargin)),
    ("toggle-word-wrap", Toggle(ViewOption::WordWrap)),
    ("toggle-word-wrap-glyphs", Toggle(ViewOption::WordWrapGlyphs)),
    ("toggle-whitespace", Toggle(ViewOption::Whitespace)),
    ("toggle-scroll-past-end", Toggle(ViewOption::ScrollPastDocumentEnd)),
    ("toggle-virtual-space", Toggle(ViewOption::VirtualSpace)),
    ("toggle-indentation-guides", Toggle(ViewOption::IndentationGuides)),
    ("toggle-line-modification-marks", Toggle(ViewOption::LineModificationMarks)),
    ("toggle-current-line-highlight", Toggle(ViewOption::CurrentLineHighlight)),
    ("toggle-delimiter-highlight", Toggle(ViewOption::DelimiterHighlight)),
    ("toggle-auto-correct", Toggle(ViewOption::AutoCorrect)),
    ("toggle-split-horizontally", Toggle(ViewOption::SplitHorizontally)),
    ("toggle-read-only", Toggle(ViewOption::ReadOnly)),
    ("new-document", File(FileAction::NewDocument)),
    ("open-file", File(FileAction::OpenDocument)),
    ("save", File(FileAction::SaveDocument)),
    ("export-excel", File(FileAction::ExportSpreadsheet)),
];

pub fn lookup(id: &str) -> Option<Command> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, command)| *command)
}

/// All registered ids, in registration order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_ids() {
        assert_eq!(lookup("comment-lines"), Some(Edit(EditOperation::CommentLines)));
        assert_eq!(lookup("make-uppercase"), Some(Edit(EditOperation::MakeUppercase)));
        assert_eq!(lookup("toggle-word-wrap"), Some(Toggle(ViewOption::WordWrap)));
        assert_eq!(lookup("export-excel"), Some(File(FileAction::ExportSpreadsheet)));
    }

    #[test]
    fn read_only_operations() {
        assert!(!EditOperation::Copy.modifies_text());
        assert!(!EditOperation::SelectAll.modifies_text());
        assert!(EditOperation::Paste.modifies_text());
        assert!(EditOperation::Undo.modifies_text());
    }

    #[test]
    fn unknown_ids() {
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("Comment-Lines"), None);
        assert_eq!(lookup("launch-missiles"), None);
    }

    #[test]
    fn ids_are_unique() {
        let unique: HashSet<_> = ids().collect();
        assert_eq!(unique.len(), COMMANDS.len());
    }

    #[test]
    fn every_view_option_has_a_toggle() {
        for option in ViewOption::ALL {
            assert!(
                COMMANDS.iter().any(|(_, c)| *c == Toggle(option)),
                "{option:?} has no command"
            );
        }
    }
}
