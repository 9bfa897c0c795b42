pub mod deepl;
pub mod interface;
pub mod normalizer;

pub use deepl::DeepLClient;
pub use interface::{ProviderError, TranslateRequest, TranslationProvider};
pub use normalizer::NormalizationError;
