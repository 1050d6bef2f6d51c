pub mod deliveries;
pub mod items;
pub mod members;
pub mod order_items;
pub mod orders;

pub use deliveries::DeliveryStatus;
pub use items::ItemKind;
pub use orders::OrderStatus;

pub use deliveries as delivery_entity;
pub use items as item_entity;
pub use members as member_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
