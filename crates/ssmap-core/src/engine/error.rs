use thiserror::Error;

use super::config::ConfigError;
use crate::core::spatial::pairs::PairSetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Neighbor index capacity exceeded: {source}")]
    NeighborCapacity {
        #[from]
        source: PairSetError,
    },
}
