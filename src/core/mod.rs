pub mod etl;
pub mod pipeline;
pub mod resolver;
pub mod validator;

pub use crate::domain::model::{CompanyRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SearchConfig, Storage};
pub use crate::utils::error::Result;
