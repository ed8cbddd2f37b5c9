//! 数据分析 (Analytics)
//!
//! 没有专门的统计接口，全部由订单列表推导。

use super::format_money;
use canteen_shared::Order;
use canteen_shared::date::{DateRange, start_of_month, start_of_week};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use std::collections::HashMap;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 高峰时段统计的起止小时（8 AM 到 4 PM）
const PEAK_FIRST_HOUR: u32 = 8;
const PEAK_LAST_HOUR: u32 = 16;
pub const PEAK_HOUR_LABELS: [&str; 8] = [
    "8-9 AM", "9-10 AM", "10-11 AM", "11-12 PM", "12-1 PM", "1-2 PM", "2-3 PM", "3-4 PM",
];

const TOP_FOODS: usize = 5;

/// 时间范围选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Today,
    #[default]
    Week,
    Month,
    Custom(DateRange),
}

impl TimeRange {
    pub fn value(&self) -> &'static str {
        match self {
            TimeRange::Today => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Custom(_) => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Today => "Today",
            TimeRange::Week => "This Week",
            TimeRange::Month => "This Month",
            TimeRange::Custom(_) => "Custom Range",
        }
    }

    /// 按天的闭区间
    pub fn resolve(&self, now: &DateTime<FixedOffset>) -> DateRange {
        let today = now.date_naive();
        match self {
            TimeRange::Today => DateRange::single(today),
            TimeRange::Week => DateRange::new(start_of_week(now).date_naive(), today),
            TimeRange::Month => DateRange::new(start_of_month(now).date_naive(), today),
            TimeRange::Custom(range) => *range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub range: DateRange,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub items_sold: u32,
    /// 周一到周日的营业额
    pub sales_by_weekday: [f64; 7],
    /// 按销量排序的前五个菜品
    pub top_foods: Vec<(String, u32)>,
    /// ("Week 1", revenue), ...
    pub weekly_revenue: Vec<(String, f64)>,
    pub peak_hours: [u32; 8],
}

impl AnalyticsSummary {
    pub fn compute(orders: &[Order], range: DateRange, offset: &FixedOffset) -> Self {
        let weeks = (range.days() as usize).div_ceil(7);
        let mut summary = AnalyticsSummary {
            range,
            total_orders: 0,
            total_revenue: 0.0,
            average_order_value: 0.0,
            items_sold: 0,
            sales_by_weekday: [0.0; 7],
            top_foods: Vec::new(),
            weekly_revenue: (1..=weeks).map(|i| (format!("Week {}", i), 0.0)).collect(),
            peak_hours: [0; 8],
        };
        let mut food_counts: HashMap<&str, u32> = HashMap::new();

        for order in orders.iter().filter(|o| range.contains(&o.created_at, offset)) {
            let local = order.created_at.with_timezone(offset);

            summary.total_orders += 1;
            summary.total_revenue += order.total_price;
            summary.sales_by_weekday[local.weekday().num_days_from_monday() as usize] +=
                order.total_price;

            let week = ((local.date_naive() - range.start).num_days() / 7) as usize;
            if let Some(slot) = summary.weekly_revenue.get_mut(week) {
                slot.1 += order.total_price;
            }

            let hour = local.hour();
            if (PEAK_FIRST_HOUR..PEAK_LAST_HOUR).contains(&hour) {
                summary.peak_hours[(hour - PEAK_FIRST_HOUR) as usize] += 1;
            }

            for line in &order.items {
                summary.items_sold += line.quantity;
                *food_counts.entry(line.food_name.as_str()).or_insert(0) += line.quantity;
            }
        }

        if summary.total_orders > 0 {
            summary.average_order_value = summary.total_revenue / summary.total_orders as f64;
        }

        let mut foods: Vec<(String, u32)> = food_counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        // 销量降序，同销量按名称排序保证稳定
        foods.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        foods.truncate(TOP_FOODS);
        summary.top_foods = foods;

        summary
    }

    /// 导出当前汇总为 CSV
    pub fn to_csv(&self) -> String {
        let mut rows: Vec<[String; 3]> = vec![
            ["Section".into(), "Label".into(), "Value".into()],
            [
                "Summary".into(),
                "Range".into(),
                format!("{} to {}", self.range.start, self.range.end),
            ],
            ["Summary".into(), "Total Orders".into(), self.total_orders.to_string()],
            ["Summary".into(), "Total Revenue".into(), format_money(self.total_revenue)],
            [
                "Summary".into(),
                "Average Order Value".into(),
                format_money(self.average_order_value),
            ],
            ["Summary".into(), "Items Sold".into(), self.items_sold.to_string()],
        ];

        for (label, value) in WEEKDAY_LABELS.iter().zip(self.sales_by_weekday) {
            rows.push(["Sales by Day".into(), label.to_string(), format_money(value)]);
        }
        for (name, count) in &self.top_foods {
            rows.push(["Popular Foods".into(), name.clone(), count.to_string()]);
        }
        for (label, value) in &self.weekly_revenue {
            rows.push(["Revenue Trend".into(), label.clone(), format_money(*value)]);
        }
        for (label, count) in PEAK_HOUR_LABELS.iter().zip(self.peak_hours) {
            rows.push(["Peak Hours".into(), label.to_string(), count.to_string()]);
        }

        let mut out = String::new();
        for row in rows {
            let line: Vec<String> = row.iter().map(|cell| csv_cell(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    pub fn csv_file_name(&self) -> String {
        format!("analytics-{}-to-{}.csv", self.range.start, self.range.end)
    }
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::fixtures::{now, order, utc};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_time_range_resolution() {
        let now = now();
        assert_eq!(TimeRange::Today.resolve(&now), DateRange::single(day(16)));
        assert_eq!(TimeRange::Week.resolve(&now), DateRange::new(day(13), day(16)));
        assert_eq!(TimeRange::Month.resolve(&now), DateRange::new(day(1), day(16)));
        let custom = DateRange::new(day(2), day(9));
        assert_eq!(TimeRange::Custom(custom).resolve(&now), custom);
    }

    #[test]
    fn test_summary_aggregates() {
        let orders = vec![
            // Monday 13th, 9 AM
            order("o1", (2024, 5, 13, 9), 100.0, &[("Tea", 3), ("Dosa", 1)], "A"),
            // Thursday 16th, 12 PM
            order("o2", (2024, 5, 16, 12), 60.0, &[("Tea", 1)], "B"),
            // Thursday 16th, 7 PM (outside peak hours)
            order("o3", (2024, 5, 16, 19), 40.0, &[("Idli", 2)], "C"),
            // outside range
            order("o4", (2024, 4, 30, 10), 999.0, &[("Tea", 9)], "D"),
        ];
        let range = DateRange::new(day(13), day(16));
        let s = AnalyticsSummary::compute(&orders, range, &utc());

        assert_eq!(s.total_orders, 3);
        assert_eq!(s.total_revenue, 200.0);
        assert_eq!(s.items_sold, 7);
        assert_eq!(s.sales_by_weekday[0], 100.0);
        assert_eq!(s.sales_by_weekday[3], 100.0);
        assert_eq!(s.top_foods[0], ("Tea".to_string(), 4));
        assert_eq!(s.top_foods[1], ("Idli".to_string(), 2));
        assert_eq!(s.weekly_revenue, vec![("Week 1".to_string(), 200.0)]);
        assert_eq!(s.peak_hours[1], 1);
        assert_eq!(s.peak_hours[4], 1);
        assert_eq!(s.peak_hours.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_weekly_trend_spans_range() {
        let orders = vec![
            order("o1", (2024, 5, 1, 9), 10.0, &[], "A"),
            order("o2", (2024, 5, 9, 9), 20.0, &[], "A"),
            order("o3", (2024, 5, 16, 9), 30.0, &[], "A"),
        ];
        let s = AnalyticsSummary::compute(&orders, DateRange::new(day(1), day(16)), &utc());
        let values: Vec<f64> = s.weekly_revenue.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_csv_export() {
        let orders = vec![order("o1", (2024, 5, 13, 9), 100.0, &[("Tea, masala", 1)], "A")];
        let s = AnalyticsSummary::compute(&orders, DateRange::new(day(13), day(16)), &utc());
        let csv = s.to_csv();

        assert!(csv.starts_with("Section,Label,Value\n"));
        assert!(csv.contains("Summary,Total Revenue,100.00\n"));
        assert!(csv.contains("Popular Foods,\"Tea, masala\",1\n"));
        assert!(csv.contains("Peak Hours,9-10 AM,1\n"));
        assert_eq!(s.csv_file_name(), "analytics-2024-05-13-to-2024-05-16.csv");
    }

    #[test]
    fn test_empty_range_has_zero_average() {
        let s = AnalyticsSummary::compute(&[], DateRange::single(day(16)), &utc());
        assert_eq!(s.average_order_value, 0.0);
        assert!(s.top_foods.is_empty());
        assert_eq!(s.weekly_revenue.len(), 1);
    }
}
