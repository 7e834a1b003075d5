//! Language hints for the text surface.
//!
//! Maps display names, aliases and file extensions to a [`Language`]. Anything
//! unrecognised is plain text. Grammars live in the external editor widget;
//! this module only names them.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    PlainText,
    Assembly,
    BatchFile,
    C,
    CSharp,
    Cpp,
    Css,
    Html,
    IniFile,
    Java,
    JavaScript,
    Json,
    Lua,
    Markdown,
    Msil,
    Pascal,
    Perl,
    Php,
    PowerShell,
    Python,
    Rtf,
    Ruby,
    Sql,
    VisualBasic,
    VbScript,
    Xaml,
    Xml,
}

/// How a language comments out a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Line(&'static str),
    Range {
        start: &'static str,
        end: &'static str,
    },
}

struct LanguageEntry {
    language: Language,
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
}

const fn entry(
    language: Language,
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
) -> LanguageEntry {
    LanguageEntry {
        language,
        name,
        aliases,
        extensions,
    }
}

static LANGUAGES: &[LanguageEntry] = &[
    entry(Language::PlainText, "Plain text", &["text", "plain", "txt"], &["txt", "log"]),
    entry(Language::Assembly, "Assembly", &["asm"], &["asm", "s"]),
    entry(Language::BatchFile, "Batch file", &["batch", "bat", "cmd"], &["bat", "cmd"]),
    entry(Language::C, "C", &[], &["c", "h"]),
    entry(Language::CSharp, "C#", &["csharp", "cs"], &["cs", "csx"]),
    entry(Language::Cpp, "C++", &["cpp", "cplusplus"], &["cpp", "cc", "cxx", "hpp", "hxx"]),
    entry(Language::Css, "CSS", &[], &["css"]),
    entry(Language::Html, "HTML", &["htm"], &["html", "htm"]),
    entry(Language::IniFile, "INI file", &["ini"], &["ini", "cfg"]),
    entry(Language::Java, "Java", &[], &["java"]),
    entry(Language::JavaScript, "JavaScript", &["js", "ecmascript"], &["js", "mjs", "cjs"]),
    entry(Language::Json, "JSON", &[], &["json"]),
    entry(Language::Lua, "Lua", &[], &["lua"]),
    entry(Language::Markdown, "Markdown", &["md"], &["md", "markdown"]),
    entry(Language::Msil, "MSIL", &["il", "cil"], &["il"]),
    entry(Language::Pascal, "Pascal", &["delphi"], &["pas", "pp"]),
    entry(Language::Perl, "Perl", &[], &["pl", "pm"]),
    entry(Language::Php, "PHP", &[], &["php"]),
    entry(Language::PowerShell, "PowerShell", &["ps", "pwsh"], &["ps1", "psm1", "psd1"]),
    entry(Language::Python, "Python", &["py"], &["py", "pyw"]),
    entry(Language::Rtf, "RTF", &[], &["rtf"]),
    entry(Language::Ruby, "Ruby", &["rb"], &["rb"]),
    entry(Language::Sql, "SQL", &["tsql", "t-sql"], &["sql"]),
    entry(Language::VisualBasic, "VB", &["vb.net", "visual basic", "visualbasic"], &["vb"]),
    entry(Language::VbScript, "VBScript", &["vbs"], &["vbs"]),
    entry(Language::Xaml, "XAML", &[], &["xaml"]),
    entry(Language::Xml, "XML", &[], &["xml", "xsd", "xsl", "xslt", "config", "csproj"]),
];

impl Language {
    /// Resolves a hint such as `"C#"`, `"sql"` or `"JavaScript"`.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Unknown names
    /// give [`Language::PlainText`].
    pub fn from_name(name: &str) -> Language {
        let name = name.trim();
        LANGUAGES
            .iter()
            .find(|e| {
                e.name.eq_ignore_ascii_case(name)
                    || e.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
            })
            .map_or(Language::PlainText, |e| e.language)
    }

    pub fn from_extension(extension: &str) -> Language {
        let extension = extension.trim_start_matches('.');
        LANGUAGES
            .iter()
            .find(|e| e.extensions.iter().any(|x| x.eq_ignore_ascii_case(extension)))
            .map_or(Language::PlainText, |e| e.language)
    }

    pub fn from_path(path: &Path) -> Language {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Language::PlainText, Language::from_extension)
    }

    /// Resolves an optional payload hint.
    pub fn from_hint(hint: Option<&str>) -> Language {
        hint.map_or(Language::PlainText, Language::from_name)
    }

    pub fn display_name(self) -> &'static str {
        LANGUAGES
            .iter()
            .find(|e| e.language == self)
            .map_or("Plain text", |e| e.name)
    }

    /// What the comment-lines command inserts; `None` for languages
    /// without comments.
    pub fn comment_style(self) -> Option<CommentStyle> {
        match self {
            Language::C
            | Language::CSharp
            | Language::Cpp
            | Language::Java
            | Language::JavaScript
            | Language::Php => Some(CommentStyle::Line("//")),
            Language::VisualBasic | Language::VbScript => Some(CommentStyle::Line("'")),
            Language::Python
            | Language::Perl
            | Language::Ruby
            | Language::PowerShell => Some(CommentStyle::Line("#")),
            Language::Sql | Language::Lua => Some(CommentStyle::Line("--")),
            Language::IniFile | Language::Assembly => Some(CommentStyle::Line(";")),
            Language::BatchFile => Some(CommentStyle::Line("REM ")),
            Language::Html | Language::Xml | Language::Xaml | Language::Markdown => {
                Some(CommentStyle::Range {
                    start: "<!--",
                    end: "-->",
                })
            }
            Language::Css => Some(CommentStyle::Range {
                start: "/*",
                end: "*/",
            }),
            Language::PlainText
            | Language::Json
            | Language::Msil
            | Language::Pascal
            | Language::Rtf => None,
        }
    }

    /// Languages whose editor support includes background analysis
    /// (completion, quick info) on top of highlighting.
    pub fn has_language_services(self) -> bool {
        matches!(
            self,
            Language::CSharp
                | Language::VisualBasic
                | Language::Python
                | Language::JavaScript
                | Language::Json
                | Language::Xml
        )
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
