//! Context assembly options.

/// Options controlling how a [`DocxContext`](crate::DocxContext) is assembled.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Fail assembly when the numbering part is malformed.
    ///
    /// When off, the failure is recorded on the context and returned from
    /// every numbering accessor while relationships, properties and images
    /// stay available.
    pub strict_numbering: bool,

    /// Fail assembly when the core properties part cannot be read.
    ///
    /// When off, the failure is returned from the property accessors only.
    pub strict_properties: bool,

    /// Attach each relationship's own descriptor (e.g. a header's images)
    /// as its nested relationships.
    pub cross_link: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            strict_numbering: false,
            strict_properties: false,
            cross_link: true,
        }
    }
}

impl ContextOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort assembly on malformed numbering definitions.
    pub fn with_strict_numbering(mut self, strict: bool) -> Self {
        self.strict_numbering = strict;
        self
    }

    /// Abort assembly on an unreadable core properties part.
    pub fn with_strict_properties(mut self, strict: bool) -> Self {
        self.strict_properties = strict;
        self
    }

    /// Enable or disable nested relationship cross-linking.
    pub fn with_cross_link(mut self, cross_link: bool) -> Self {
        self.cross_link = cross_link;
        self
    }
}
