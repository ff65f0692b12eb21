/// Pretty output indents and breaks lines; minified output is a single line
/// with no padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializeMode {
    #[default]
    Pretty,
    Minified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineStyle {
    #[default]
    Lf,
    CrLf,
}

impl NewlineStyle {
    pub(crate) fn as_bytes(self) -> &'static [u8] {
        match self {
            NewlineStyle::Lf => b"\n",
            NewlineStyle::CrLf => b"\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tabs,
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeOptions {
    pub mode: SerializeMode,
    pub newline: NewlineStyle,
    pub indent: Indent,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minified() -> Self {
        Self::new().with_mode(SerializeMode::Minified)
    }

    pub fn with_mode(mut self, mode: SerializeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_newline(mut self, newline: NewlineStyle) -> Self {
        self.newline = newline;
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

/// Sizes the value arena and both node pools; all three share one capacity.
#[derive(Debug, Clone, Copy)]
pub struct DocumentConfig {
    pub max_value_count: u32,
}

impl DocumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_value_count(mut self, max_value_count: u32) -> Self {
        self.max_value_count = max_value_count;
        self
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_value_count: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_defaults() {
        let options = SerializeOptions::default();
        assert_eq!(options.mode, SerializeMode::Pretty);
        assert_eq!(options.newline, NewlineStyle::Lf);
        assert_eq!(options.indent, Indent::Spaces(2));

        let config = DocumentConfig::default();
        assert_eq!(config.max_value_count, 4096);
    }

    #[rstest::rstest]
    fn test_builders() {
        let options = SerializeOptions::new()
            .with_mode(SerializeMode::Minified)
            .with_newline(NewlineStyle::CrLf)
            .with_indent(Indent::Tabs);
        assert_eq!(options.mode, SerializeMode::Minified);
        assert_eq!(options.newline, NewlineStyle::CrLf);
        assert_eq!(options.indent, Indent::Tabs);

        let config = DocumentConfig::new().with_max_value_count(64);
        assert_eq!(config.max_value_count, 64);
    }

    #[rstest::rstest]
    fn test_newline_bytes() {
        assert_eq!(NewlineStyle::Lf.as_bytes(), b"\n");
        assert_eq!(NewlineStyle::CrLf.as_bytes(), b"\r\n");
    }
}
