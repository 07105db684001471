//! Market data aggregate: asset records, view value objects, the derive pipeline and the
//! static coin catalog.

pub mod catalog;
pub mod entities;
pub mod repositories;
pub mod services;
pub mod synthesis;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use services::*;
pub use synthesis::*;
pub use value_objects::*;
