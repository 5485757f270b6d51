mod as_value;
mod column;
mod complex;
mod config;
mod connection;
mod crud;
mod driver;
mod entity;
mod error;
mod executor;
mod join;
mod query;
mod select;
mod statement;
mod transaction;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use complex::*;
pub use config::*;
pub use connection::*;
pub use crud::*;
pub use driver::*;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use join::*;
pub use query::*;
pub use select::*;
pub use statement::*;
pub use transaction::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
