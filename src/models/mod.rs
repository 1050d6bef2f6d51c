pub mod common;
pub mod item;
pub mod member;
pub mod order;
pub mod order_query;
pub mod pagination;

pub use common::*;
pub use item::*;
pub use member::*;
pub use order::*;
pub use order_query::*;
pub use pagination::*;
