pub mod gateway;
pub mod pragmas;

pub use gateway::{AliasMatch, PersistentStoreGateway, WildcardMatch};
