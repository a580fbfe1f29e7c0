pub mod cache;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use self::cache::TileCache;
pub use self::loader::TileLoader;
pub use self::source::{TileSource, UrlTemplateSource};
