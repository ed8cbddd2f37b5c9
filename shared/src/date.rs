//! 时间工具模块
//!
//! 订单时间以 UTC 传输，但"今天"、"本月"等窗口需要按浏览器本地时区划分。
//! 所有函数都接收一个带偏移量的"当前时间"，而不是自己读取时钟，便于测试。

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc,
};

/// 将本地 naive 时间固定到给定偏移量
fn at_offset(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = naive - Duration::seconds(offset.local_minus_utc() as i64);
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// 当天本地零点
pub fn start_of_day(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    at_offset(now.date_naive().and_time(NaiveTime::MIN), *now.offset())
}

/// 本周一零点
pub fn start_of_week(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.date_naive();
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    at_offset(monday.and_time(NaiveTime::MIN), *now.offset())
}

/// 本月一日零点
pub fn start_of_month(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    at_offset(first.and_time(NaiveTime::MIN), *now.offset())
}

/// 本年一月一日零点
pub fn start_of_year(now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    at_offset(first.and_time(NaiveTime::MIN), *now.offset())
}

/// 按天计算的闭区间（起止日期都包含在内）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 单日区间
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// `instant` 换算到 `offset` 后的日期是否落在区间内
    pub fn contains(&self, instant: &DateTime<Utc>, offset: &FixedOffset) -> bool {
        let day = instant.with_timezone(offset).date_naive();
        day >= self.start && day <= self.end
    }

    /// 区间包含的天数（end 早于 start 时为 0）
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

/// `<input type="date">` 使用的格式
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_input_date(day: &NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// 订单列表中的时间，如 "May 14, 2024, 06:30 PM"
pub fn format_order_time(instant: &DateTime<Utc>, offset: &FixedOffset) -> String {
    instant
        .with_timezone(offset)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// 长日期，如 "January 5, 2024"
pub fn format_long_date(instant: &DateTime<Utc>, offset: &FixedOffset) -> String {
    instant
        .with_timezone(offset)
        .format("%B %-d, %Y")
        .to_string()
}

/// 短日期，如 "May 14, 2023"
pub fn format_short_date(day: &NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

/// 导航栏时钟
pub fn format_clock(now: &DateTime<FixedOffset>) -> String {
    now.format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn start_of_day_respects_offset() {
        // 2024-05-14 01:00 IST == 2024-05-13 19:30 UTC
        let now = ist().with_ymd_and_hms(2024, 5, 14, 1, 0, 0).unwrap();
        let midnight = start_of_day(&now);
        assert_eq!(
            midnight.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 5, 13, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn week_month_year_boundaries() {
        // Thursday
        let now = ist().with_ymd_and_hms(2024, 5, 16, 15, 0, 0).unwrap();
        assert_eq!(
            start_of_week(&now).date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
        );
        assert_eq!(
            start_of_month(&now).date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(
            start_of_year(&now).date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn range_is_inclusive_by_local_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let range = DateRange::single(day);
        // 23:00 IST on the 14th is still the 14th locally
        let late = Utc.with_ymd_and_hms(2024, 5, 14, 17, 30, 0).unwrap();
        // 00:30 IST on the 15th
        let next = Utc.with_ymd_and_hms(2024, 5, 14, 19, 0, 0).unwrap();
        assert!(range.contains(&late, &ist()));
        assert!(!range.contains(&next, &ist()));
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn formats_match_ui() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 13, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_long_date(&instant, &utc), "January 5, 2024");
        assert_eq!(format_order_time(&instant, &utc), "Jan 5, 2024, 01:00 PM");
        assert_eq!(
            parse_input_date("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }
}
