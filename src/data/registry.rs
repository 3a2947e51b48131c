use crate::domain::Indicator;

/// Static name -> source lookup. Declaration order drives the checklist order.
pub struct SeriesRegistry {
    indicators: &'static [Indicator],
}

pub const REGISTRY: SeriesRegistry = SeriesRegistry {
    indicators: &[
        Indicator::central_bank("CDI", 12),
        Indicator::central_bank("SELIC", 432),
        Indicator::central_bank("IPCA", 433),
        Indicator::central_bank("IGPM", 189),
        Indicator::central_bank("Dólar", 1),
        Indicator::central_bank("IBC-Br", 24363),
        Indicator::central_bank("CDI Acumulado no Mês", 4391),
        Indicator::central_bank("CDI Acumulado no Mês Anualizado", 4392),
        Indicator::central_bank("SELIC Anualizado", 1178),
        Indicator::market_quote("IBOV", "^BVSP"),
        Indicator::market_quote("S&P 500", "^GSPC"),
        Indicator::market_quote("NASDAQ", "^IXIC"),
    ],
};

impl SeriesRegistry {
    pub fn list_indicators(&self) -> Vec<&'static str> {
        self.indicators.iter().map(|i| i.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&'static Indicator> {
        self.indicators.iter().find(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Indicator> {
        self.indicators.iter()
    }

    /// Known names from `names`, deduplicated and put in declaration order.
    pub fn in_registry_order<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        self.indicators
            .iter()
            .filter(|i| names.iter().any(|n| n.as_ref() == i.name))
            .map(|i| i.name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceKind;
    use std::collections::HashSet;

    #[test]
    fn listing_follows_declaration_order() {
        let names = REGISTRY.list_indicators();
        assert_eq!(names.len(), 12);
        assert_eq!(names.first(), Some(&"CDI"));
        assert_eq!(names[9], "IBOV");
        assert_eq!(names.last(), Some(&"NASDAQ"));
        assert_eq!(names, REGISTRY.list_indicators());
    }

    #[test]
    fn selection_is_reordered_and_filtered() {
        let picked = ["NASDAQ", "CDI", "BTC", "CDI", "IPCA"];
        assert_eq!(REGISTRY.in_registry_order(&picked), vec!["CDI", "IPCA", "NASDAQ"]);
        assert!(REGISTRY.in_registry_order::<&str>(&[]).is_empty());
    }

    #[test]
    fn names_are_unique() {
        let names = REGISTRY.list_indicators();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn lookup_resolves_provider_keys() {
        assert_eq!(
            REGISTRY.get("SELIC").map(|i| i.source),
            Some(SourceKind::CentralBankSeries { code: 432 })
        );
        assert_eq!(
            REGISTRY.get("S&P 500").map(|i| i.source),
            Some(SourceKind::MarketQuote { ticker: "^GSPC" })
        );
        assert!(REGISTRY.get("BTC").is_none());
        assert!(!REGISTRY.contains("cdi"));
    }
}
