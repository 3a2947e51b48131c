mod provider;
mod registry;
mod result_store;
mod sgs;
mod yahoo;

pub use {
    provider::{CentralBankProvider, DataProviderAdapter, QuoteProvider},
    registry::{REGISTRY, SeriesRegistry},
    result_store::ResultStore,
    sgs::SgsProvider,
    yahoo::YahooProvider,
};
