use std::fmt;

use strum_macros::Display;

/// Which remote service holds the series, and the key it is filed under there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Central bank (SGS) series, keyed by numeric code
    CentralBankSeries { code: u32 },
    /// Market quote (Yahoo), keyed by ticker symbol
    MarketQuote { ticker: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ProviderKind {
    #[strum(to_string = "SGS")]
    CentralBank,
    #[strum(to_string = "Yahoo")]
    Market,
}

impl SourceKind {
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::CentralBankSeries { .. } => ProviderKind::CentralBank,
            Self::MarketQuote { .. } => ProviderKind::Market,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CentralBankSeries { code } => write!(f, "SGS #{}", code),
            Self::MarketQuote { ticker } => write!(f, "Yahoo {}", ticker),
        }
    }
}

/// A user-selectable series. Identity is the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub name: &'static str,
    pub source: SourceKind,
}

impl Indicator {
    pub const fn central_bank(name: &'static str, code: u32) -> Self {
        Self {
            name,
            source: SourceKind::CentralBankSeries { code },
        }
    }

    pub const fn market_quote(name: &'static str, ticker: &'static str) -> Self {
        Self {
            name,
            source: SourceKind::MarketQuote { ticker },
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.source)
    }
}
