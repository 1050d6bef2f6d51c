use super::DbPool;
use crate::config::FetchConfig;
use crate::entities::member_entity as members;
use crate::error::AppResult;
use crate::models::{CreateItemRequest, OrderLine};
use crate::services::{ItemService, MemberService, OrderService};
use sea_orm::{EntityTrait, PaginatorTrait};

struct SampleOrder {
    member: &'static str,
    city: &'static str,
    street: &'static str,
    zipcode: &'static str,
    // (商品名, 单价, 库存, 订购数量)
    books: [(&'static str, i32, i32, i32); 2],
}

const SAMPLE_ORDERS: [SampleOrder; 2] = [
    SampleOrder {
        member: "userA",
        city: "Seoul",
        street: "1",
        zipcode: "1111",
        books: [("JPA1 BOOK", 10000, 100, 1), ("JPA2 BOOK", 20000, 100, 2)],
    },
    SampleOrder {
        member: "userB",
        city: "Jinju",
        street: "2",
        zipcode: "2222",
        books: [("SPRING1 BOOK", 20000, 200, 3), ("SPRING2 BOOK", 40000, 300, 4)],
    },
];

/// 写入示例数据: 两个会员各下一单, 每单两本书
///
/// 已有会员时不做任何事, 返回是否写入。
pub async fn init_sample_data(pool: &DbPool) -> AppResult<bool> {
    let existing = members::Entity::find().count(pool.as_ref()).await?;
    if existing > 0 {
        log::info!("Skip sample data: {existing} members already exist");
        return Ok(false);
    }

    let member_service = MemberService::new(pool.clone());
    let item_service = ItemService::new(pool.clone());
    let order_service = OrderService::new(pool.clone(), FetchConfig::default());

    for sample in &SAMPLE_ORDERS {
        let member_id = member_service
            .join(members::Model {
                id: 0,
                name: sample.member.to_string(),
                city: Some(sample.city.to_string()),
                street: Some(sample.street.to_string()),
                zipcode: Some(sample.zipcode.to_string()),
            })
            .await?;

        let mut lines = Vec::with_capacity(sample.books.len());
        for (name, price, stock, count) in sample.books {
            let item_id = item_service
                .save_item(CreateItemRequest::book(name, price, stock))
                .await?;
            lines.push(OrderLine { item_id, count });
        }

        order_service.order(member_id, &lines).await?;
    }

    log::info!("Sample data initialized");
    Ok(true)
}
