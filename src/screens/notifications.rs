//! 站内通知 (Notifications)
//!
//! 本地收件箱，没有后端接口。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxKind {
    Order,
    Stock,
    Feedback,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxItem {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub time_ago: String,
    pub read: bool,
    pub kind: InboxKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inbox {
    items: Vec<InboxItem>,
}

impl Inbox {
    pub fn new(items: Vec<InboxItem>) -> Self {
        Self { items }
    }

    pub fn seeded() -> Self {
        let item = |id, title: &str, message: &str, time_ago: &str, read, kind| InboxItem {
            id,
            title: title.to_string(),
            message: message.to_string(),
            time_ago: time_ago.to_string(),
            read,
            kind,
        };
        Self::new(vec![
            item(
                1,
                "New Order Received",
                "Order #1042 for 2 Cheese Burgers and Fries",
                "2 minutes ago",
                false,
                InboxKind::Order,
            ),
            item(
                2,
                "Low Stock Alert",
                "Only 3 Chicken Sandwiches left in stock",
                "1 hour ago",
                false,
                InboxKind::Stock,
            ),
            item(
                3,
                "Customer Feedback",
                "John Doe rated their order 4 stars",
                "3 hours ago",
                true,
                InboxKind::Feedback,
            ),
            item(
                4,
                "New Order Received",
                "Order #1041 for Veg Pizza and Garlic Bread",
                "5 hours ago",
                true,
                InboxKind::Order,
            ),
            item(
                5,
                "System Update Available",
                "New version v1.2.0 is ready to install",
                "1 day ago",
                true,
                InboxKind::System,
            ),
        ])
    }

    pub fn items(&self) -> &[InboxItem] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|i| !i.read).count()
    }

    pub fn mark_read(&mut self, id: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.read = true;
        }
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }
}
