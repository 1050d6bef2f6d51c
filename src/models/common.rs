use sea_orm::{DbErr, FromQueryResult, QueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 列表响应外层包装: `{"data": ...}`
/// 直接返回集合时无法再扩展字段, 包一层之后可以追加 count 等信息
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub data: T,
}

impl<T> ResultEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// 地址值类型, 会员与配送共用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
}

impl Address {
    pub fn new(city: Option<String>, street: Option<String>, zipcode: Option<String>) -> Self {
        Self {
            city,
            street,
            zipcode,
        }
    }
}

/// 从查询结果的 city / street / zipcode 列读取 (DTO 直接查询时使用)
impl FromQueryResult for Address {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            city: res.try_get(pre, "city")?,
            street: res.try_get(pre, "street")?,
            zipcode: res.try_get(pre, "zipcode")?,
        })
    }
}
