//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::Options;
use std::ops::Range;
use std::path::Path;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Attributes added to links leaving the page.
const EXTERNAL_LINK_ATTRS: &str = "target=\"_blank\" rel=\"noopener noreferrer\" ";

const CODE_OPEN: &str = "<code class=\"language-";
const CODE_CLOSE: &str = "</code>";

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Content arriving through share links is untrusted, so raw HTML in the
/// source is omitted rather than passed through. Fenced code blocks with a
/// language are highlighted by syntect using CSS classes.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    syntax_set: SyntaxSet,
}

/// Location of one fenced code block inside comrak output.
struct CodeBlock {
    /// From `<code` through the closing `</code>`.
    element: Range<usize>,
    language: Range<usize>,
    body: Range<usize>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Enables tables, strikethrough, autolinks, task lists and footnotes.
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        // Shared documents come from arbitrary links
        options.render.unsafe_ = false;

        Self {
            options,
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails
    pub fn render(&self, content: &str) -> Result<String> {
        let html = comrak::markdown_to_html(content, &self.options);
        let html = mark_external_links(&html);

        self.highlight_code_blocks(&html)
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content)
    }

    /// Swaps the escaped text of each `language-X` code block for syntect
    /// output with `hljs-` prefixed classes.
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut copied = 0;

        while let Some(block) = find_code_block(html, copied) {
            let language = &html[block.language.clone()];
            let code = unescape(&html[block.body.clone()]);
            let highlighted = self
                .highlight(&code, language)
                .with_context(|| format!("Failed to highlight {} code block", language))?;

            result.push_str(&html[copied..block.body.start]);
            result.push_str(&highlighted);
            result.push_str(CODE_CLOSE);
            copied = block.element.end;
        }

        result.push_str(&html[copied..]);
        Ok(result)
    }

    /// Highlights one code block. Languages syntect does not know are
    /// returned escaped but unstyled.
    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language));

        let Some(syntax) = syntax else {
            return Ok(escape(code));
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the next complete `<code class="language-X">...</code>` element
/// starting at byte `from`. Malformed openings are skipped.
fn find_code_block(html: &str, from: usize) -> Option<CodeBlock> {
    let mut search = from;

    loop {
        let start = search + html[search..].find(CODE_OPEN)?;
        let language_start = start + CODE_OPEN.len();

        let block = html[language_start..].find('"').and_then(|len| {
            let language_end = language_start + len;
            let body_start = language_end + html[language_end..].find('>')? + 1;
            let body_end = body_start + html[body_start..].find(CODE_CLOSE)?;
            Some(CodeBlock {
                element: start..body_end + CODE_CLOSE.len(),
                language: language_start..language_end,
                body: body_start..body_end,
            })
        });

        match block {
            Some(block) => return Some(block),
            None => search = language_start,
        }
    }
}

/// Adds new-tab attributes to absolute http(s) links. Anchors and relative
/// links are left alone.
fn mark_external_links(html: &str) -> String {
    const ANCHOR: &str = "<a href=\"";

    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(found) = rest.find(ANCHOR) {
        let (before, tag) = rest.split_at(found);
        let url = &tag[ANCHOR.len()..];

        result.push_str(before);
        if url.starts_with("http://") || url.starts_with("https://") {
            result.push_str("<a ");
            result.push_str(EXTERNAL_LINK_ATTRS);
            result.push_str("href=\"");
        } else {
            result.push_str(ANCHOR);
        }
        rest = url;
    }

    result.push_str(rest);
    result
}

/// Undoes comrak's entity escaping inside code blocks; `&amp;` last so
/// escaped entities survive.
fn unescape(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
