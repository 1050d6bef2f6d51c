pub mod order_query_repository;
pub mod order_repository;
pub mod order_simple_query_repository;

pub use order_query_repository::*;
pub use order_repository::*;
pub use order_simple_query_repository::*;

use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{EntityTrait, IdenStatic, Iterable, QueryTrait, Select};

/// 为 select 追加实体 E 的全部列, 别名为 `{prefix}{列名}`
///
/// 多个实体 join 在同一条语句里时用前缀区分同名列 (id, city ...),
/// 读取时配合 `Model::from_query_result(res, prefix)`。
pub(crate) fn select_prefixed<E, S>(mut select: Select<S>, prefix: &str) -> Select<S>
where
    E: EntityTrait,
    S: EntityTrait,
{
    for col in E::Column::iter() {
        let alias = format!("{prefix}{}", col.as_str());
        QueryTrait::query(&mut select).expr_as(Expr::col((E::default(), col)), Alias::new(alias.as_str()));
    }
    select
}
