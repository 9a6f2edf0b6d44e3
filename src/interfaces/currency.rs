//! Currency formatting.

/// Formats amounts for display.
pub trait CurrencyFormat {
    /// Render an amount.
    fn format(&self, amount: i64) -> String;
}

/// `%d`-style format string, e.g. `"%d"` or `"K%d"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatStr(pub String);

impl FormatStr {
    /// Wrap a format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }
}

impl CurrencyFormat for FormatStr {
    fn format(&self, amount: i64) -> String {
        self.0.replace("%d", &amount.to_string())
    }
}
