use once_cell::sync::Lazy;
use regex::Regex;

// @module: DokuWiki to TiddlyWiki markup translation

/// One entry of the substitution table: a compiled search pattern and its
/// replacement template.
#[derive(Debug)]
pub struct TranslationRule {
    /// Diagnostic name of the construct the rule rewrites
    pub name: &'static str,
    /// Compiled search pattern
    pub pattern: Regex,
    /// Replacement template, `$1`/`$2` expand capture groups
    pub replacement: &'static str,
}

// The table order is part of the contract: later rules rely on text shapes
// produced or left behind by earlier ones (headings insert the leading
// newlines the block rules assume, the table-header rule runs before the
// superscript rule emits `^^`). Reordering changes output.
//
// All spans are non-greedy so a block construct never swallows unrelated
// later content. `(?s)` is set only on the rules that scan across newlines;
// the line-shaped rules are `(?m)` anchored instead.
const RULE_TABLE: &[(&str, &str, &str)] = &[
    ("codeblock", r"(?s)<code\s?(.*?)>(.+?)</code>", "\n```$1$2```"),
    ("monospace", r"'{2}(.+?)'{2}", "`$1`"),
    ("noformat", r"(?s)%%(.+?)%%", "\n```$1```"),
    ("nowiki", r"(?s)<nowiki>(.+?)</nowiki>", "\n```$1```"),
    ("filetag", r"(?s)<file\s?(.*?)>(.+?)</file>", "\n```$1$2```"),
    // h1 gets no leading blank line, TiddlyWiki only needs one above h2..h5
    ("h1", r"={6}(.+?)={6}", "!$1"),
    ("h2", r"={5}(.+?)={5}", "\n!!$1"),
    ("h3", r"={4}(.+?)={4}", "\n!!!$1"),
    ("h4", r"={3}(.+?)={3}", "\n!!!!$1"),
    ("h5", r"={2}(.+?)={2}", "\n!!!!!$1"),
    // consumes the single character after `^`, normally the cell padding
    ("tableheader", r"\^.+?", "|!"),
    ("tableheaderclose", r"(?m)\^$", "|"),
    ("bold", r"\*{2}(.+?)\*{2}", "''$1''"),
    // italic and underline read the same in both dialects
    ("strikethrough", r"<del>(.+?)</del>", "~~$1~~"),
    ("superscript", r"<sup>(.+?)</sup>", "^^$1^^"),
    ("subscript", r"<sub>(.+?)</sub>", ",,$1,,"),
    ("horizontalrule", r"(?m)^\s?-{4,}$", "\n---\n"),
    ("ulistlvl1", r"(?m)^ {2}\*", "*"),
    ("ulistlvl2", r"(?m)^ {4}\*", "**"),
    ("ulistlvl3", r"(?m)^ {6}\*", "***"),
    ("olistlvl1", r"(?m)^ {2}-", "#"),
    ("olistlvl2", r"(?m)^ {4}-", "##"),
    ("olistlvl3", r"(?m)^ {6}-", "###"),
    // namespace prefix and size suffix are dropped, only the last namespace
    // segment and the filename survive as an img/ path
    (
        "imagetag",
        r"\{{2}.*?:?(.+?):(.+?\.\w{3,4}).*?\}{2}",
        "[img [img/$1/$2]]",
    ),
];

static RULES: Lazy<Vec<TranslationRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(name, pattern, replacement)| TranslationRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
});

// @struct: Markup translation utility
pub struct MarkupTranslator;

impl MarkupTranslator {
    /// Translate a block of DokuWiki page text to TiddlyWiki markup.
    ///
    /// Each rule makes exactly one global substitution pass, in table order;
    /// the result is a pure function of the input text.
    pub fn translate(text: &str) -> String {
        let mut output = text.to_string();
        for rule in RULES.iter() {
            output = rule.pattern.replace_all(&output, rule.replacement).into_owned();
        }
        output
    }

    /// The substitution table, in application order.
    pub fn rules() -> &'static [TranslationRule] {
        RULES.as_slice()
    }
}
