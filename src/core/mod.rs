pub mod etl;
pub mod headers;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{NormalizedTable, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
