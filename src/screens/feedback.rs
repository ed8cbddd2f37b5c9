//! 用户评价 (Feedback)
//!
//! 后端没有评价接口，页面展示内置的示例数据。

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub id: u32,
    pub customer: String,
    pub order_id: u32,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl FeedbackEntry {
    fn seed(
        id: u32,
        customer: &str,
        order_id: u32,
        rating: u8,
        comment: &str,
        date: (i32, u32, u32),
        time: (u32, u32),
    ) -> Option<Self> {
        Some(Self {
            id,
            customer: customer.to_string(),
            order_id,
            rating,
            comment: comment.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
            time: NaiveTime::from_hms_opt(time.0, time.1, 0)?,
        })
    }

    pub fn is_critical(&self) -> bool {
        self.rating <= 2
    }
}

pub fn seed_feedback() -> Vec<FeedbackEntry> {
    [
        FeedbackEntry::seed(
            1,
            "John Doe",
            1001,
            4,
            "The burger was delicious but the fries were a bit cold. Delivery was faster than expected though!",
            (2023, 5, 14),
            (18, 30),
        ),
        FeedbackEntry::seed(
            2,
            "Jane Smith",
            1002,
            5,
            "Excellent pizza! Will definitely order again. The crust was perfectly crispy and toppings were fresh.",
            (2023, 5, 14),
            (12, 45),
        ),
        FeedbackEntry::seed(
            3,
            "Mike Johnson",
            1003,
            3,
            "Sandwich was okay, but the bread was a bit dry. The portion size was generous though.",
            (2023, 5, 13),
            (19, 15),
        ),
        FeedbackEntry::seed(
            4,
            "Sarah Williams",
            1004,
            2,
            "Pasta was overcooked and salad was not fresh. Disappointed with this order.",
            (2023, 5, 12),
            (13, 20),
        ),
        FeedbackEntry::seed(
            5,
            "David Brown",
            1005,
            5,
            "Best Caesar salad I've had in a long time! The dressing was perfect and the chicken was tender.",
            (2023, 5, 12),
            (11, 30),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Exactly(u8),
}

impl RatingFilter {
    /// 解析下拉框的值："all" 或 "1".."5"
    pub fn from_value(value: &str) -> Self {
        match value.parse::<u8>() {
            Ok(r @ 1..=5) => RatingFilter::Exactly(r),
            _ => RatingFilter::All,
        }
    }

    fn matches(&self, entry: &FeedbackEntry) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Exactly(r) => entry.rating == *r,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackTab {
    #[default]
    All,
    Today,
    Critical,
}

impl FeedbackTab {
    pub const ALL: [FeedbackTab; 3] = [FeedbackTab::All, FeedbackTab::Today, FeedbackTab::Critical];

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackTab::All => "All Feedback",
            FeedbackTab::Today => "Today",
            FeedbackTab::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedbackMetrics {
    pub total: usize,
    pub today: usize,
    pub average_rating: f64,
}

/// 示例数据是历史日期，"今天"取最新一条评价所在的日期
pub fn latest_day(list: &[FeedbackEntry]) -> Option<NaiveDate> {
    list.iter().map(|f| f.date).max()
}

impl FeedbackMetrics {
    pub fn from_entries(list: &[FeedbackEntry]) -> Self {
        let latest = latest_day(list);
        let total = list.len();
        let sum: u32 = list.iter().map(|f| f.rating as u32).sum();
        Self {
            total,
            today: list.iter().filter(|f| Some(f.date) == latest).count(),
            average_rating: if total == 0 {
                0.0
            } else {
                sum as f64 / total as f64
            },
        }
    }

    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

pub fn filter_feedback(
    list: &[FeedbackEntry],
    rating: RatingFilter,
    tab: FeedbackTab,
) -> Vec<FeedbackEntry> {
    let latest = latest_day(list);
    list.iter()
        .filter(|f| rating.matches(f))
        .filter(|f| match tab {
            FeedbackTab::All => true,
            FeedbackTab::Today => Some(f.date) == latest,
            FeedbackTab::Critical => f.is_critical(),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_metrics() {
        let list = seed_feedback();
        let metrics = FeedbackMetrics::from_entries(&list);
        assert_eq!(metrics.total, 5);
        assert_eq!(metrics.today, 2);
        assert_eq!(metrics.average_label(), "3.8");
    }

    #[test]
    fn test_filters_combine() {
        let list = seed_feedback();
        assert_eq!(filter_feedback(&list, RatingFilter::All, FeedbackTab::All).len(), 5);
        assert_eq!(
            filter_feedback(&list, RatingFilter::from_value("5"), FeedbackTab::All).len(),
            2
        );
        assert_eq!(
            filter_feedback(&list, RatingFilter::from_value("5"), FeedbackTab::Today).len(),
            1
        );
        let critical = filter_feedback(&list, RatingFilter::All, FeedbackTab::Critical);
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].customer, "Sarah Williams");
        assert_eq!(RatingFilter::from_value("all"), RatingFilter::All);
        assert_eq!(RatingFilter::from_value("9"), RatingFilter::All);
    }
}
