//! Remote data provider endpoints.

/// Banco Central do Brasil SGS time-series service
pub struct SgsConfig {
    pub base_url: &'static str,
    /// The service rejects daily-series requests spanning more than ten years.
    pub max_window_years: i32,
}

/// Yahoo Finance chart service
pub struct YahooConfig {
    pub base_url: &'static str,
    pub interval: &'static str,
    /// The chart endpoint answers 429 to clients without a browser-like agent.
    pub user_agent: &'static str,
}

pub struct ProvidersConfig {
    pub sgs: SgsConfig,
    pub yahoo: YahooConfig,
}

pub const PROVIDERS: ProvidersConfig = ProvidersConfig {
    sgs: SgsConfig {
        base_url: "https://api.bcb.gov.br",
        max_window_years: 10,
    },
    yahoo: YahooConfig {
        base_url: "https://query1.finance.yahoo.com",
        interval: "1d",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    },
};
