//! Language options: the mutable policy knobs read by the parser,
//! interpreter and C generator.

/// The three line-number policies a program can be parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineNumberMode {
    /// Lines may be labeled or unlabeled; labels need not be monotonic.
    #[default]
    Optional,
    /// An unlabeled line is assigned `previous_label + 1`.
    Implied,
    /// A label is required on every line; labels must strictly increase.
    Mandatory,
}

/// Whether comment-only lines round-trip through the formatter/codegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    #[default]
    Enabled,
    Disabled,
}

/// Policy knobs consulted by the parser, interpreter and C generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOptions {
    pub line_numbers: LineNumberMode,
    /// Maximum accepted label value, if any. `None` means unlimited.
    pub line_limit: Option<i32>,
    pub comments: CommentPolicy,
    /// Maximum depth of the GOSUB stack before `E_TOO_MANY_GOSUBS`.
    pub gosub_limit: usize,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            line_numbers: LineNumberMode::Optional,
            line_limit: None,
            comments: CommentPolicy::Enabled,
            gosub_limit: 255,
        }
    }
}

impl LanguageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_line_numbers(&mut self, mode: LineNumberMode) -> &mut Self {
        self.line_numbers = mode;
        self
    }

    pub fn set_line_limit(&mut self, limit: i32) -> &mut Self {
        self.line_limit = Some(limit);
        self
    }

    pub fn set_comments(&mut self, policy: CommentPolicy) -> &mut Self {
        self.comments = policy;
        self
    }

    pub fn set_gosub_limit(&mut self, limit: usize) -> &mut Self {
        self.gosub_limit = limit;
        self
    }

    /// `true` if `label` exceeds a configured line limit.
    pub fn exceeds_line_limit(&self, label: i32) -> bool {
        matches!(self.line_limit, Some(limit) if label > limit)
    }
}
