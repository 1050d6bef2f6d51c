pub mod item;
pub mod member;
pub mod order;
pub mod simple_order;

pub use item::item_config;
pub use member::member_config;
pub use order::order_config;
pub use simple_order::simple_order_config;
