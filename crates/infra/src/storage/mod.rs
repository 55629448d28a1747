//! `ConfigStore` adapters

pub mod file;
pub mod keychain;
pub mod memory;

pub use file::FileConfigStore;
pub use keychain::KeychainConfigStore;
pub use memory::MemoryConfigStore;
