pub mod item_service;
pub mod member_service;
pub mod order_query_service;
pub mod order_service;

pub use item_service::*;
pub use member_service::*;
pub use order_query_service::*;
pub use order_service::*;
