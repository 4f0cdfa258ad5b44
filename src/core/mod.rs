pub mod catalog;
pub mod etl;
pub mod kawa;
pub mod shipping;
pub mod table;
pub mod text;

pub use crate::domain::model::{Fleet, KawaPrice, MaterialRow, PriceSheet};
pub use crate::domain::ports::{ApiKeyStore, FioSource, Pipeline, Storage};
pub use crate::utils::error::Result;
