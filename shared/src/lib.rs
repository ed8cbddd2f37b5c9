use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod date;
pub mod protocol;
pub mod serde_helper;

use serde_helper::{lenient_f64, lenient_opt_string, lenient_u32, null_as_default};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 菜单分类（后端不校验，前端下拉框使用固定列表）
pub const FOOD_CATEGORIES: [&str; 9] = [
    "Fast Food",
    "Italian",
    "Healthy",
    "Snacks",
    "Chinese",
    "Beverages",
    "Hot Drinks",
    "Icecream",
    "Cold Drinks",
];

// =========================================================
// 管理员与认证 (Admin & Auth)
// =========================================================

/// 登录响应中的 `adminInfo`，也是本地持久化的身份快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub admin_name: String,
    pub admin_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub admin_info: AdminInfo,
    pub admin_id: String,
    pub admin_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "superadmin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRole::Admin => "Admin",
            AdminRole::SuperAdmin => "Super Admin",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "superadmin" => AdminRole::SuperAdmin,
            _ => AdminRole::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub admin_name: String,
    pub admin_email: String,
    pub college_name: String,
    pub phone_number: String,
    pub admin_password: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[serde(default)]
    pub admin_info: Option<AdminInfo>,
}

/// 失败响应体 `{message}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 学院 (Colleges)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub college_name: String,
}

/// 学院列表接口会返回裸数组或 `{colleges: [...]}` 两种形态
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollegeList {
    Bare(Vec<College>),
    Wrapped {
        #[serde(default)]
        colleges: Vec<College>,
    },
}

impl CollegeList {
    pub fn into_vec(self) -> Vec<College> {
        match self {
            CollegeList::Bare(list) => list,
            CollegeList::Wrapped { colleges } => colleges,
        }
    }
}

// =========================================================
// 个人资料 (Profile)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub admin_name: String,
    pub admin_email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub college_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEnvelope {
    pub admin_profile: AdminProfile,
}

/// `PUT /admin/update-profile/:id` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub admin_name: String,
    pub admin_email: String,
    pub phone_number: String,
    pub college_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfileEnvelope {
    pub updated_user_data: AdminProfile,
}

// =========================================================
// 菜单 (Menu)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "foodName", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "foodPrice", default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(rename = "foodCategory", default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "foodDescription", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "isVeg", default, deserialize_with = "null_as_default")]
    pub is_veg: bool,
    #[serde(rename = "isActive", default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(rename = "foodImage", default, deserialize_with = "null_as_default")]
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuEnvelope {
    pub foodslist: Vec<FoodItem>,
}

/// 新建/编辑菜品时的表单字段（multipart 文本部分）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodDraft {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub is_veg: bool,
    pub is_active: bool,
}

impl FoodDraft {
    /// multipart 文本字段，键名与后端约定一致
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("foodName", self.name.clone()),
            ("foodPrice", self.price.to_string()),
            ("foodCategory", self.category.clone()),
            ("foodDescription", self.description.clone()),
            ("isVeg", self.is_veg.to_string()),
            ("isActive", self.is_active.to_string()),
        ]
    }
}

impl From<&FoodItem> for FoodDraft {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            description: item.description.clone(),
            is_veg: item.is_veg,
            is_active: item.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFoodResponse {
    #[serde(rename = "foodImage", default)]
    pub food_image: Option<String>,
}

// =========================================================
// 订单 (Orders)
// =========================================================

/// 订单状态
///
/// 后端大小写不统一，解析时忽略大小写；未知状态原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// 管理端下拉框可选的状态
    pub const SELECTABLE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// 首字母大写的展示文本
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "foodName", default)]
    pub food_name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderNumber", default, deserialize_with = "lenient_opt_string")]
    pub order_number: Option<String>,
    #[serde(rename = "userInfo", default)]
    pub customer: Option<CustomerInfo>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(rename = "totalPrice", default, deserialize_with = "lenient_f64")]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// 展示用订单号，缺失时退化为 id 尾部
    pub fn display_number(&self) -> String {
        match &self.order_number {
            Some(number) => number.clone(),
            None => {
                let tail = self.id.len().saturating_sub(6);
                self.id.get(tail..).unwrap_or(&self.id).to_string()
            }
        }
    }

    pub fn customer_name(&self) -> &str {
        self.customer
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("N/A")
    }

    pub fn customer_email(&self) -> &str {
        self.customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_item_accepts_string_prices_and_missing_optionals() {
        let item: FoodItem = serde_json::from_str(
            r#"{"_id":"f1","foodName":"Dosa","foodPrice":"45.5","isActive":true}"#,
        )
        .unwrap();
        assert_eq!(item.price, 45.5);
        assert!(item.is_active);
        assert!(!item.is_veg);
        assert_eq!(item.category, "");
    }

    #[test]
    fn menu_with_null_fields_still_parses() {
        let menu: MenuEnvelope = serde_json::from_str(
            r#"{"foodslist":[
                {"_id":"f1","foodName":"Dosa","foodPrice":40,"foodImage":"https://img/dosa.png","isActive":true},
                {"_id":"f2","foodName":"Tea","foodPrice":10,"foodImage":null,"foodDescription":null,"foodCategory":null,"isVeg":null,"isActive":null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(menu.foodslist.len(), 2);
        let tea = &menu.foodslist[1];
        assert_eq!(tea.image, "");
        assert_eq!(tea.description, "");
        assert_eq!(tea.category, "");
        assert!(!tea.is_veg);
        assert!(!tea.is_active);
        assert_eq!(menu.foodslist[0].image, "https://img/dosa.png");
    }

    #[test]
    fn food_item_without_id_is_rejected() {
        let res: Result<FoodItem, _> = serde_json::from_str(r#"{"foodName":"Dosa"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn order_status_is_case_insensitive_and_keeps_unknowns() {
        let order: Order = serde_json::from_str(
            r#"{"_id":"o1","orderNumber":1042,"items":[{"foodName":"Tea","quantity":"2"}],
                "totalPrice":"30","status":"Ready","createdAt":"2024-05-14T12:30:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
        assert_eq!(order.order_number.as_deref(), Some("1042"));
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.total_price, 30.0);

        assert_eq!(
            OrderStatus::parse("cancelled"),
            OrderStatus::Other("cancelled".to_string())
        );
        assert_eq!(OrderStatus::Preparing.label(), "Preparing");
    }

    #[test]
    fn college_list_accepts_both_shapes() {
        let bare: CollegeList =
            serde_json::from_str(r#"[{"_id":"c1","collegeName":"MIT"}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: CollegeList =
            serde_json::from_str(r#"{"colleges":[{"collegeName":"IIT"}]}"#).unwrap();
        assert_eq!(wrapped.into_vec()[0].college_name, "IIT");

        let empty: CollegeList = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(empty.into_vec().is_empty());
    }

    #[test]
    fn signup_request_uses_backend_field_names() {
        let req = SignupRequest {
            admin_name: "Asha".into(),
            admin_email: "asha@example.com".into(),
            college_name: "MIT".into(),
            phone_number: "99999".into(),
            admin_password: "secret".into(),
            role: AdminRole::SuperAdmin,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["adminEmail"], "asha@example.com");
        assert_eq!(value["role"], "superadmin");
    }
}
