//! 各页面的状态模型与远端操作
//!
//! 视图层只负责渲染与收集输入；统计、筛选、分页、表单校验都在这里完成，
//! 远端写操作统一遵循"服务端确认成功后才修改本地状态"。

pub mod analytics;
pub mod dashboard;
pub mod feedback;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod profile;
pub mod signup;

use crate::error::AdminResult;
use crate::notify::Notifier;

/// 远端操作失败时记录日志并发出一条错误提示，结果原样返回
pub(crate) fn report<T, N>(notifier: &N, op: &str, result: AdminResult<T>) -> AdminResult<T>
where
    N: Notifier + ?Sized,
{
    result.map_err(|e| {
        let e = e.in_op(op);
        log::warn!("[Screen] {}", e);
        notifier.error(e.user_message());
        e
    })
}

/// 金额展示，保留两位小数
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::api::CanteenApi;
    use crate::request::mock::MockHttpClient;
    use crate::session::Session;
    use canteen_shared::{AdminInfo, FoodItem, Order, OrderLine, OrderStatus};
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    pub const BASE: &str = "http://api.test/api/v1";

    pub fn api() -> CanteenApi<MockHttpClient> {
        CanteenApi::new(MockHttpClient::new(), BASE)
    }

    pub fn session() -> Session {
        Session {
            info: AdminInfo {
                admin_name: "Asha".into(),
                admin_email: "asha@example.com".into(),
                phone_number: None,
                college_name: None,
                role: None,
            },
            admin_id: "a1".into(),
            token: "tok".into(),
        }
    }

    pub fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    /// 2024-05-16 (Thursday) 15:00 UTC
    pub fn now() -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(2024, 5, 16, 15, 0, 0).unwrap()
    }

    pub fn food(id: &str, price: f64, active: bool) -> FoodItem {
        FoodItem {
            id: id.into(),
            name: format!("Food {}", id),
            price,
            category: "Snacks".into(),
            description: String::new(),
            is_veg: true,
            is_active: active,
            image: String::new(),
        }
    }

    pub fn order(
        id: &str,
        created: (i32, u32, u32, u32),
        total: f64,
        items: &[(&str, u32)],
        customer: &str,
    ) -> Order {
        let (y, m, d, h) = created;
        Order {
            id: id.into(),
            order_number: None,
            customer: Some(canteen_shared::CustomerInfo {
                name: Some(customer.into()),
                email: Some(format!("{}@example.com", customer.to_lowercase())),
            }),
            items: items
                .iter()
                .map(|(name, qty)| OrderLine {
                    food_name: name.to_string(),
                    quantity: *qty,
                })
                .collect(),
            total_price: total,
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }
}
