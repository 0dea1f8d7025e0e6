//! Editor session state restored from a link.

use clap::ValueEnum;

use crate::error::ShareError;
use crate::share::{DecodedShare, ShareLink, decode_share};

/// Document shown when a link carries no content.
pub const WELCOME_MARKDOWN: &str = r#"# Welcome to MarkShare 👋

Paste your Markdown here, or type away!

## Features
- **Real-time Preview**: See changes instantly.
- **Instant Sharing**: Click 'Share' to generate a permanent link.
- **Beautiful Typography**: Clean and readable.

```javascript
console.log("Code highlighting works too!");
```

> "Simplicity is the ultimate sophistication." - Leonardo da Vinci
"#;

/// Which panes are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// Source only.
    Editor,
    /// Rendered output only.
    Preview,
    /// Source and rendered output side by side.
    #[default]
    Split,
}

impl ViewMode {
    pub fn shows_editor(self) -> bool {
        matches!(self, ViewMode::Editor | ViewMode::Split)
    }

    pub fn shows_preview(self) -> bool {
        matches!(self, ViewMode::Preview | ViewMode::Split)
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Editor => "editor",
            ViewMode::Preview => "preview",
            ViewMode::Split => "split",
        }
    }
}

/// Markdown buffer plus the view it is displayed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    markdown: String,
    view_mode: ViewMode,
    shared: bool,
    shared_at: Option<i64>,
}

impl Session {
    /// Creates session for locally authored content.
    pub fn new(markdown: impl Into<String>, view_mode: ViewMode) -> Self {
        Self {
            markdown: markdown.into(),
            view_mode,
            shared: false,
            shared_at: None,
        }
    }

    /// Restores session from a URL fragment.
    ///
    /// Shared content opens straight into the preview. Anything else,
    /// including an empty shared document, falls back to the welcome
    /// document in split view.
    pub fn from_fragment(fragment: &str) -> Self {
        Self::from_decoded(decode_share(fragment))
    }

    /// Restores session from an already decoded share.
    pub fn from_decoded(shared: Option<DecodedShare>) -> Self {
        match shared {
            Some(share) if !share.content.is_empty() => Self {
                markdown: share.content,
                view_mode: ViewMode::Preview,
                shared: true,
                shared_at: share.timestamp,
            },
            _ => Self::new(WELCOME_MARKDOWN, ViewMode::Split),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Whether the content came from a share link.
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// When the content was shared, in epoch milliseconds, if the link
    /// recorded it.
    pub fn shared_at(&self) -> Option<i64> {
        self.shared_at
    }

    /// Text of the first level one heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.markdown
            .lines()
            .filter_map(|line| line.strip_prefix("# "))
            .map(str::trim)
            .find(|title| !title.is_empty())
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Empties the buffer and switches to the editor.
    pub fn clear(&mut self) {
        self.markdown.clear();
        self.view_mode = ViewMode::Editor;
    }

    /// Builds a share link for the current buffer.
    ///
    /// # Errors
    ///
    /// Propagates [`ShareLink::build`] errors.
    pub fn share_link(&self, link: &ShareLink) -> Result<String, ShareError> {
        link.build(&self.markdown)
    }
}
