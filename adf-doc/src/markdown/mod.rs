//! Markdown output.
//!
//! The serializer walks the typed tree top-down; every variant knows its own
//! Markdown shape and delegates to its children. Output policy lives in
//! [`RenderRules`] so callers (and the config layer) can tune rendering
//! without threading individual flags through the recursion.

pub mod serializer;

/// How `hardBreak` nodes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardBreakStyle {
    /// Two trailing spaces before the newline, the classic Markdown form.
    Spaces,
    /// Nothing at all, for consumers that treat any newline as a break.
    Empty,
}

impl HardBreakStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            HardBreakStyle::Spaces => "  \n",
            HardBreakStyle::Empty => "",
        }
    }
}

/// Rendering policy, applied uniformly across the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRules {
    /// Skip children whose rendering fails with a data error instead of
    /// failing the whole document. Library bugs still propagate.
    pub ignore_errors: bool,
    pub hard_break: HardBreakStyle,
}

impl Default for RenderRules {
    fn default() -> Self {
        RenderRules {
            ignore_errors: false,
            hard_break: HardBreakStyle::Spaces,
        }
    }
}
