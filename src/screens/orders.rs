//! 订单管理 (Orders)

use super::report;
use crate::api::CanteenApi;
use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::session::Session;
use canteen_shared::date::{DateRange, start_of_day, start_of_month, start_of_year};
use canteen_shared::{Order, OrderStatus};
use chrono::{DateTime, FixedOffset};

// =========================================================
// 时间窗口
// =========================================================

/// 订单页的三个标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderWindow {
    #[default]
    Today,
    Month,
    Year,
}

impl OrderWindow {
    pub const ALL: [OrderWindow; 3] = [OrderWindow::Today, OrderWindow::Month, OrderWindow::Year];

    pub fn label(&self) -> &'static str {
        match self {
            OrderWindow::Today => "Today",
            OrderWindow::Month => "This Month",
            OrderWindow::Year => "This Year",
        }
    }

    /// 窗口的起点；"今年"包含全部订单
    fn start(&self, now: &DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            OrderWindow::Today => Some(start_of_day(now)),
            OrderWindow::Month => Some(start_of_month(now)),
            OrderWindow::Year => None,
        }
    }

    pub fn contains(&self, order: &Order, now: &DateTime<FixedOffset>) -> bool {
        match self.start(now) {
            Some(start) => order.created_at >= start,
            None => true,
        }
    }

    /// 日期筛选器的初始区间：窗口起始日到今天
    pub fn default_range(&self, now: &DateTime<FixedOffset>) -> DateRange {
        let start = match self {
            OrderWindow::Today => start_of_day(now),
            OrderWindow::Month => start_of_month(now),
            OrderWindow::Year => start_of_year(now),
        };
        DateRange::new(start.date_naive(), now.date_naive())
    }
}

/// 当前标签页、日期区间下的订单
pub fn visible_orders<'a>(
    orders: &'a [Order],
    window: OrderWindow,
    range: &DateRange,
    now: &DateTime<FixedOffset>,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| window.contains(o, now))
        .filter(|o| range.contains(&o.created_at, now.offset()))
        .collect()
}

// =========================================================
// 分页
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 0,
            per_page: per_page.max(1),
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// 当前页的切片；页码越界时返回空
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = (self.page * self.per_page).min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }

    /// 修改每页条数后回到第一页
    pub fn with_per_page(self, per_page: usize) -> Self {
        Self::new(per_page)
    }

    pub fn reset(self) -> Self {
        Self { page: 0, ..self }
    }
}

// =========================================================
// 指标
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderMetrics {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

impl OrderMetrics {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut metrics = OrderMetrics::default();
        for order in orders {
            metrics.total_orders += 1;
            metrics.total_revenue += order.total_price;
        }
        if metrics.total_orders > 0 {
            metrics.average_order_value = metrics.total_revenue / metrics.total_orders as f64;
        }
        metrics
    }

    /// 指标卡片只统计今天的订单
    pub fn today(orders: &[Order], now: &DateTime<FixedOffset>) -> Self {
        Self::from_orders(
            orders
                .iter()
                .filter(|o| OrderWindow::Today.contains(o, now)),
        )
    }
}

/// 订单内容摘要，如 "2 x Tea, 1 x Samosa"
pub fn items_summary(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|line| format!("{} x {}", line.quantity, line.food_name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn apply_status(orders: &mut [Order], order_id: &str, status: &OrderStatus) {
    if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
        order.status = status.clone();
    }
}

// =========================================================
// 远端操作
// =========================================================

pub struct OrdersService<'a, C, N: ?Sized> {
    api: &'a CanteenApi<C>,
    session: &'a Session,
    notifier: &'a N,
}

impl<'a, C, N> OrdersService<'a, C, N>
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

    pub async fn load(&self) -> AdminResult<Vec<Order>> {
        report(self.notifier, "orders.load", self.api.orders(self.session).await)
    }

    /// 只有响应报告 `success: true` 才算成功
    pub async fn update_status(&self, order_id: &str, status: OrderStatus) -> AdminResult<OrderStatus> {
        let result = self
            .api
            .update_order_status(self.session, order_id, status.clone())
            .await
            .and_then(|resp| {
                if resp.success {
                    Ok(())
                } else {
                    Err(AdminError::malformed("Failed to update status"))
                }
            });
        report(self.notifier, "orders.update_status", result)?;

        self.notifier
            .success(&format!("Order status updated to {}", status.as_str()));
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeKind;
    use crate::notify::mock::RecordingNotifier;
    use crate::request::HttpMethod;
    use crate::screens::fixtures::{api, now, order, session};
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample() -> Vec<Order> {
        vec![
            order("o1", (2024, 5, 16, 9), 120.0, &[("Tea", 2)], "Ravi"),
            order("o2", (2024, 5, 16, 12), 80.0, &[("Dosa", 1)], "Meera"),
            order("o3", (2024, 5, 2, 12), 50.0, &[("Tea", 1)], "Ravi"),
            order("o4", (2024, 2, 10, 12), 30.0, &[("Idli", 1)], "Kiran"),
        ]
    }

    #[test]
    fn test_windows_partition_by_local_boundaries() {
        let orders = sample();
        let now = now();
        let count = |w: OrderWindow| orders.iter().filter(|o| w.contains(o, &now)).count();
        assert_eq!(count(OrderWindow::Today), 2);
        assert_eq!(count(OrderWindow::Month), 3);
        assert_eq!(count(OrderWindow::Year), 4);
    }

    #[test]
    fn test_date_filter_is_inclusive() {
        let orders = sample();
        let now = now();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        );
        let visible = visible_orders(&orders, OrderWindow::Year, &range, &now);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "o3");

        let default = OrderWindow::Month.default_range(&now);
        assert_eq!(default.start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(
            visible_orders(&orders, OrderWindow::Month, &default, &now).len(),
            3
        );
    }

    #[test]
    fn test_pagination() {
        let items: Vec<u32> = (0..12).collect();
        let mut page = Pagination::new(5);
        assert_eq!(page.page_count(items.len()), 3);
        page.page = 2;
        assert_eq!(page.slice(&items), &[10, 11]);
        page.page = 7;
        assert!(page.slice(&items).is_empty());
        assert_eq!(page.with_per_page(10).page, 0);
        assert_eq!(Pagination::new(5).page_count(0), 0);
    }

    #[test]
    fn test_today_metrics() {
        let metrics = OrderMetrics::today(&sample(), &now());
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.total_revenue, 200.0);
        assert_eq!(metrics.average_order_value, 100.0);

        let empty = OrderMetrics::today(&[], &now());
        assert_eq!(crate::screens::format_money(empty.average_order_value), "0.00");
    }

    #[test]
    fn test_today_follows_the_supplied_clock() {
        let orders = sample();
        let next_day = now() + chrono::Duration::days(1);

        // 跨过午夜后昨天的订单不再属于"今天"
        assert_eq!(OrderMetrics::today(&orders, &next_day).total_orders, 0);
        let range = OrderWindow::Today.default_range(&next_day);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
        assert!(visible_orders(&orders, OrderWindow::Today, &range, &next_day).is_empty());
        let month = OrderWindow::Month.default_range(&next_day);
        assert_eq!(
            visible_orders(&orders, OrderWindow::Month, &month, &next_day).len(),
            3
        );
    }

    #[test]
    fn test_items_summary() {
        let o = order("o", (2024, 5, 16, 9), 0.0, &[("Tea", 2), ("Samosa", 1)], "A");
        assert_eq!(items_summary(&o), "2 x Tea, 1 x Samosa");
    }

    #[tokio::test]
    async fn test_status_applied_only_when_success_true() {
        let api = api();
        let session = session();
        let notifier = RecordingNotifier::new();
        let url = "http://api.test/api/v1/orders/admin-order-update/o1";
        let service = OrdersService::new(&api, &session, &notifier);
        let mut orders = sample();

        api.client()
            .mock_response(HttpMethod::Put, url, 200, json!({"success": false}));
        if let Ok(status) = service.update_status("o1", OrderStatus::Ready).await {
            apply_status(&mut orders, "o1", &status);
        }
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(notifier.count(NoticeKind::Error), 1);

        api.client()
            .mock_response(HttpMethod::Put, url, 200, json!({"success": true}));
        if let Ok(status) = service.update_status("o1", OrderStatus::Ready).await {
            apply_status(&mut orders, "o1", &status);
        }
        assert_eq!(orders[0].status, OrderStatus::Ready);
        assert_eq!(orders[1].status, OrderStatus::Pending);

        let reqs = api.client().requests_to(HttpMethod::Put, url);
        assert_eq!(reqs[1].json_body(), Some(json!({"status": "ready"})));
        assert_eq!(
            notifier.last().unwrap().message,
            "Order status updated to ready"
        );
    }
}
