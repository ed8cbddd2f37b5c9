//! 控制面板 (Dashboard)
//!
//! 卡片与图表全部由实时的订单和菜单数据推导。

use super::report;
use crate::api::CanteenApi;
use crate::error::AdminResult;
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::session::Session;
use canteen_shared::{FoodItem, Order, OrderStatus};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 趋势图覆盖的天数（含今天）
pub const TREND_DAYS: usize = 6;
const RECENT_ORDERS: usize = 5;

pub const DAYPART_LABELS: [&str; 6] = [
    "6-9 AM", "9-12 PM", "12-3 PM", "3-6 PM", "6-9 PM", "9-12 AM",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub today_orders: usize,
    pub today_revenue: f64,
    pub customers_today: usize,
    pub top_food_today: Option<String>,
    /// 最近 `TREND_DAYS` 天，最早的在前
    pub order_trend: Vec<usize>,
    pub revenue_trend: Vec<f64>,
    pub customer_trend: Vec<usize>,
    /// 各时段的订单量（6 AM 起每 3 小时一段）
    pub orders_by_daypart: [usize; 6],
    pub status_breakdown: Vec<(OrderStatus, usize)>,
    /// 菜单分类分布，数量降序
    pub menu_categories: Vec<(String, usize)>,
    pub active_menu_items: usize,
    pub recent_orders: Vec<Order>,
}

fn customer_key(order: &Order) -> Option<String> {
    let email = order.customer_email();
    if !email.is_empty() {
        return Some(email.to_ascii_lowercase());
    }
    order
        .customer
        .as_ref()
        .and_then(|c| c.name.clone())
        .filter(|n| !n.trim().is_empty())
}

fn daypart(hour: u32) -> Option<usize> {
    match hour {
        6..=23 => Some(((hour - 6) / 3) as usize),
        _ => None,
    }
}

impl DashboardStats {
    pub fn compute(orders: &[Order], menu: &[FoodItem], now: &DateTime<FixedOffset>) -> Self {
        let offset = now.offset();
        let today = now.date_naive();
        let first_day = today - Duration::days(TREND_DAYS as i64 - 1);
        let day_index = |day: NaiveDate| -> Option<usize> {
            if day < first_day || day > today {
                None
            } else {
                Some((day - first_day).num_days() as usize)
            }
        };

        let mut stats = DashboardStats {
            order_trend: vec![0; TREND_DAYS],
            revenue_trend: vec![0.0; TREND_DAYS],
            customer_trend: vec![0; TREND_DAYS],
            ..Default::default()
        };
        let mut customers: Vec<HashSet<String>> = vec![HashSet::new(); TREND_DAYS];
        let mut foods_today: HashMap<&str, u32> = HashMap::new();
        let mut statuses: BTreeMap<String, (OrderStatus, usize)> = BTreeMap::new();

        for order in orders {
            let local = order.created_at.with_timezone(offset);

            let entry = statuses
                .entry(order.status.as_str().to_ascii_lowercase())
                .or_insert_with(|| (order.status.clone(), 0));
            entry.1 += 1;

            let Some(idx) = day_index(local.date_naive()) else {
                continue;
            };
            stats.order_trend[idx] += 1;
            stats.revenue_trend[idx] += order.total_price;
            if let Some(key) = customer_key(order) {
                customers[idx].insert(key);
            }

            if local.date_naive() == today {
                if let Some(part) = daypart(local.hour()) {
                    stats.orders_by_daypart[part] += 1;
                }
                for line in &order.items {
                    *foods_today.entry(line.food_name.as_str()).or_insert(0) += line.quantity;
                }
            }
        }

        stats.customer_trend = customers.iter().map(HashSet::len).collect();
        stats.today_orders = stats.order_trend[TREND_DAYS - 1];
        stats.today_revenue = stats.revenue_trend[TREND_DAYS - 1];
        stats.customers_today = stats.customer_trend[TREND_DAYS - 1];
        stats.top_food_today = foods_today
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(name, _)| name.to_string());
        stats.status_breakdown = statuses.into_values().collect();

        let mut categories: HashMap<&str, usize> = HashMap::new();
        for item in menu {
            let category = if item.category.is_empty() {
                "Uncategorized"
            } else {
                item.category.as_str()
            };
            *categories.entry(category).or_insert(0) += 1;
            if item.is_active {
                stats.active_menu_items += 1;
            }
        }
        let mut categories: Vec<(String, usize)> = categories
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.menu_categories = categories;

        let mut recent: Vec<&Order> = orders.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        stats.recent_orders = recent.into_iter().take(RECENT_ORDERS).cloned().collect();

        stats
    }
}

pub struct DashboardService<'a, C, N: ?Sized> {
    api: &'a CanteenApi<C>,
    session: &'a Session,
    notifier: &'a N,
}

impl<'a, C, N> DashboardService<'a, C, N>
where
    C: HttpClient,
    N: Notifier + ?Sized,
{
    pub fn new(api: &'a CanteenApi<C>, session: &'a Session, notifier: &'a N) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    /// 订单与菜单并发请求；任一失败都只提示一次
    pub async fn load(&self) -> AdminResult<(Vec<Order>, Vec<FoodItem>)> {
        let (orders, menu) =
            futures::join!(self.api.orders(self.session), self.api.menu(self.session));
        let result = orders.and_then(|orders| menu.map(|menu| (orders, menu)));
        report(self.notifier, "dashboard.load", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeKind;
    use crate::notify::mock::RecordingNotifier;
    use crate::request::HttpMethod;
    use crate::screens::fixtures::{api, food, now, order, session};
    use serde_json::json;

    #[test]
    fn test_today_cards_and_trend() {
        let mut delivered = order("o3", (2024, 5, 16, 13), 40.0, &[("Tea", 1)], "Ravi");
        delivered.status = OrderStatus::Delivered;
        let orders = vec![
            order("o1", (2024, 5, 16, 7), 100.0, &[("Dosa", 2), ("Tea", 1)], "Ravi"),
            order("o2", (2024, 5, 16, 10), 60.0, &[("Dosa", 1)], "Meera"),
            delivered,
            order("o4", (2024, 5, 11, 10), 25.0, &[("Idli", 1)], "Kiran"),
            // 超出趋势窗口
            order("o5", (2024, 5, 1, 10), 500.0, &[("Idli", 5)], "Kiran"),
        ];
        let menu = vec![food("f1", 10.0, true), food("f2", 20.0, false)];

        let stats = DashboardStats::compute(&orders, &menu, &now());

        assert_eq!(stats.today_orders, 3);
        assert_eq!(stats.today_revenue, 200.0);
        assert_eq!(stats.customers_today, 2);
        assert_eq!(stats.top_food_today.as_deref(), Some("Dosa"));
        assert_eq!(stats.order_trend, vec![1, 0, 0, 0, 0, 3]);
        assert_eq!(stats.orders_by_daypart, [1, 1, 1, 0, 0, 0]);
        assert_eq!(
            stats.status_breakdown,
            vec![(OrderStatus::Delivered, 1), (OrderStatus::Pending, 4)]
        );
        assert_eq!(stats.menu_categories, vec![("Snacks".to_string(), 2)]);
        assert_eq!(stats.active_menu_items, 1);
        assert_eq!(stats.recent_orders[0].id, "o3");
        assert_eq!(stats.recent_orders.len(), 5);
    }

    #[test]
    fn test_empty_data() {
        let stats = DashboardStats::compute(&[], &[], &now());
        assert_eq!(stats.today_orders, 0);
        assert!(stats.top_food_today.is_none());
        assert_eq!(stats.order_trend.len(), TREND_DAYS);
    }

    #[tokio::test]
    async fn test_load_requests_orders_and_menu() {
        let api = api();
        let session = session();
        let notifier = RecordingNotifier::new();
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/orders/get-all-orders/a1",
            200,
            json!({"success": true, "orders": []}),
        );
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/foods/canteens-menu/a1",
            200,
            json!({"foodslist": []}),
        );

        let (orders, menu) = DashboardService::new(&api, &session, &notifier)
            .load()
            .await
            .unwrap();
        assert!(orders.is_empty() && menu.is_empty());
        assert_eq!(api.client().request_count(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_notifies_once() {
        let api = api();
        let session = session();
        let notifier = RecordingNotifier::new();

        let res = DashboardService::new(&api, &session, &notifier).load().await;
        assert!(res.is_err());
        assert_eq!(notifier.count(NoticeKind::Error), 1);
    }
}
