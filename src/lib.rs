pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

pub use adapters::{FioClient, KawaClient, LocalStorage, StaticKeyStore};
pub use config::{KawaSettings, ServerSettings};
pub use core::{etl::EtlEngine, kawa::KawaPipeline};
pub use utils::error::{PrunError, Result};
