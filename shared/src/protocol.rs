use crate::{
    CollegeList, LoginRequest, LoginResponse, MenuEnvelope, OrderStatus, OrdersEnvelope,
    ProfileEnvelope, ProfileUpdate, SignupRequest, SignupResponse, StatusUpdateResponse,
    UpdatedProfileEnvelope,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Fields that only feed the URL are `#[serde(skip)]`, so the serialized value is the body.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    /// `IgnoredAny` marks endpoints whose body is not read.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached.
    const AUTHENTICATED: bool = true;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/admin/login".to_string()
    }
}

/// Cookie based logout, no body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/admin/logout".to_string()
    }
}

impl ApiRequest for SignupRequest {
    type Response = SignupResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/admin/signup".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCollegesRequest;

impl ApiRequest for ListCollegesRequest {
    type Response = CollegeList;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        "/colleges/all-colleges".to_string()
    }
}

// =========================================================
// Profile
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct GetProfileRequest {
    #[serde(skip)]
    pub admin_id: String,
}

impl ApiRequest for GetProfileRequest {
    type Response = ProfileEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/admin/profile/{}", self.admin_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip)]
    pub admin_id: String,
    #[serde(flatten)]
    pub profile: ProfileUpdate,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = UpdatedProfileEnvelope;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/admin/update-profile/{}", self.admin_id)
    }
}

// =========================================================
// Menu
// =========================================================

/// Multipart endpoint, not an `ApiRequest`.
pub const CREATE_FOOD_PATH: &str = "/foods/create";

/// Multipart endpoint, not an `ApiRequest`.
pub fn update_food_path(food_id: &str) -> String {
    format!("/foods/update/{}", food_id)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MenuRequest {
    #[serde(skip)]
    pub admin_id: String,
}

impl ApiRequest for MenuRequest {
    type Response = MenuEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/foods/canteens-menu/{}", self.admin_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFoodRequest {
    #[serde(skip)]
    pub food_id: String,
}

impl ApiRequest for DeleteFoodRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/foods/delete/{}", self.food_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFoodRequest {
    #[serde(skip)]
    pub food_id: String,
    pub is_active: bool,
}

impl ApiRequest for ToggleFoodRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/foods/toggle-active/{}", self.food_id)
    }
}

// =========================================================
// Orders
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct OrdersRequest {
    #[serde(skip)]
    pub admin_id: String,
}

impl ApiRequest for OrdersRequest {
    type Response = OrdersEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/orders/get-all-orders/{}", self.admin_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(skip)]
    pub order_id: String,
    pub status: OrderStatus,
}

impl ApiRequest for UpdateOrderStatusRequest {
    type Response = StatusUpdateResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/orders/admin-order-update/{}", self.order_id)
    }
}
