// Service exports
pub mod appwrite;
pub mod cache;
pub mod generator;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use cache::{CacheKey, CacheManager, CacheError};
pub use generator::{GeneratedSet, GeneratorClient, GeneratorError, GeneratorResponse};
