//! 类型化的后端 API 客户端
//!
//! 每个接口由 `canteen_shared::protocol` 中的 `ApiRequest` 描述，
//! 这里负责拼接 URL、附加 Bearer Token、把非 2xx 响应归一化为 `AdminError`。

use crate::error::{AdminError, AdminErrorKind, AdminResult};
use crate::request::{FormPart, HttpClient, HttpRequest, HttpResponse};
use crate::session::Session;
use canteen_shared::protocol::{
    ApiRequest, CREATE_FOOD_PATH, DeleteFoodRequest, GetProfileRequest, HttpMethod,
    ListCollegesRequest, LogoutRequest, MenuRequest, OrdersRequest, ToggleFoodRequest,
    UpdateOrderStatusRequest, UpdateProfileRequest, update_food_path,
};
use canteen_shared::{
    AdminProfile, ApiMessage, College, FoodDraft, FoodItem, HEADER_AUTHORIZATION, LoginRequest,
    LoginResponse, Order, OrderStatus, ProfileUpdate, SignupRequest, SignupResponse,
    StatusUpdateResponse, UpdateFoodResponse,
};
use std::rc::Rc;

/// 上传的菜品图片
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 管理端 API 客户端
///
/// 内部以 `Rc` 持有 HTTP 客户端，可以廉价克隆给各个页面使用。
pub struct CanteenApi<C> {
    client: Rc<C>,
    base_url: String,
}

impl<C> Clone for CanteenApi<C> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: HttpClient> CanteenApi<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self::with_client(Rc::new(client), base_url)
    }

    pub fn with_client(client: Rc<C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(req: HttpRequest, token: Option<&str>) -> HttpRequest {
        match token {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    // =========================================================
    // 请求分发
    // =========================================================

    /// 发送请求并把非 2xx 响应转为错误
    ///
    /// 错误消息优先取响应体中的 `message`，否则使用 `fallback`。
    /// 传输层与解析失败一律以 `fallback` 作为用户可见消息。
    async fn dispatch(&self, req: HttpRequest, fallback: &str) -> AdminResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();

        let resp = self.client.send(req).await.map_err(|e| {
            log::warn!("[Api] {} {} failed: {}", method.as_str(), url, e);
            e.in_op_with("api.send", url.as_str()).or_message(fallback)
        })?;

        if !resp.ok() {
            let message = serde_json::from_str::<ApiMessage>(&resp.body)
                .ok()
                .and_then(|m| m.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            log::warn!(
                "[Api] {} {} -> {}: {}",
                method.as_str(),
                url,
                resp.status,
                message
            );
            return Err(AdminError::http(resp.status, message).in_op_with("api.dispatch", url));
        }

        Ok(resp)
    }

    /// 按 `ApiRequest` 描述发送请求并解析响应
    ///
    /// 只有 `R::AUTHENTICATED` 的接口才附加会话的 Bearer Token。
    pub async fn call<R: ApiRequest>(
        &self,
        req: &R,
        session: Option<&Session>,
        fallback: &str,
    ) -> AdminResult<R::Response> {
        let url = self.url(&req.path());
        let token = session
            .filter(|_| R::AUTHENTICATED)
            .map(|s| s.token.as_str());
        let mut http = Self::authorize(HttpRequest::new(&url, R::METHOD), token);

        if R::METHOD.has_body() {
            let body = serde_json::to_value(req)?;
            // 单元结构体序列化为 null，表示无请求体
            if !body.is_null() {
                http = http.with_json(body);
            }
        }

        let resp = self.dispatch(http, fallback).await?;

        // 空响应体按 null 处理，忽略响应体的接口也能通过
        let raw = if resp.body.trim().is_empty() {
            "null"
        } else {
            resp.body.as_str()
        };
        serde_json::from_str::<R::Response>(raw).map_err(|e| {
            log::error!("[Api] malformed response from {}: {}", url, e);
            AdminError::from(e).in_op_with("api.parse", url).or_message(fallback)
        })
    }

    /// multipart 请求（菜品新建/编辑）
    async fn send_form(
        &self,
        method: HttpMethod,
        path: &str,
        token: &str,
        parts: Vec<FormPart>,
        fallback: &str,
    ) -> AdminResult<HttpResponse> {
        let http = Self::authorize(HttpRequest::new(&self.url(path), method), Some(token))
            .with_form(parts);
        self.dispatch(http, fallback).await
    }

    fn food_form(draft: &FoodDraft, image: Option<ImageUpload>) -> Vec<FormPart> {
        let mut parts: Vec<FormPart> = draft
            .form_fields()
            .into_iter()
            .map(|(name, value)| FormPart::Text {
                name: name.to_string(),
                value,
            })
            .collect();

        if let Some(image) = image {
            parts.push(FormPart::File {
                name: "foodImage".to_string(),
                file_name: image.file_name,
                content_type: image.content_type,
                bytes: image.bytes,
            });
        }
        parts
    }

    // =========================================================
    // Auth
    // =========================================================

    pub async fn login(&self, req: &LoginRequest) -> AdminResult<LoginResponse> {
        self.call(req, None, "Login failed").await
    }

    pub async fn logout(&self) -> AdminResult<()> {
        self.call(&LogoutRequest, None, "Logout failed").await?;
        Ok(())
    }

    pub async fn signup(&self, req: &SignupRequest) -> AdminResult<SignupResponse> {
        self.call(req, None, "Registration failed. Please try again.")
            .await
    }

    pub async fn colleges(&self) -> AdminResult<Vec<College>> {
        let list = self
            .call(
                &ListCollegesRequest,
                None,
                "Failed to load colleges. Please try again later.",
            )
            .await?;
        Ok(list.into_vec())
    }

    // =========================================================
    // Profile
    // =========================================================

    pub async fn profile(&self, session: &Session) -> AdminResult<AdminProfile> {
        let req = GetProfileRequest {
            admin_id: session.admin_id.clone(),
        };
        let envelope = self
            .call(&req, Some(session), "Failed to load profile data")
            .await?;
        Ok(envelope.admin_profile)
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        profile: ProfileUpdate,
    ) -> AdminResult<AdminProfile> {
        let req = UpdateProfileRequest {
            admin_id: session.admin_id.clone(),
            profile,
        };
        let envelope = self
            .call(&req, Some(session), "Failed to update profile")
            .await?;
        Ok(envelope.updated_user_data)
    }

    // =========================================================
    // Menu
    // =========================================================

    pub async fn menu(&self, session: &Session) -> AdminResult<Vec<FoodItem>> {
        let req = MenuRequest {
            admin_id: session.admin_id.clone(),
        };
        let envelope = self
            .call(&req, Some(session), "Failed to load food items.")
            .await?;
        Ok(envelope.foodslist)
    }

    pub async fn create_food(
        &self,
        session: &Session,
        draft: &FoodDraft,
        image: Option<ImageUpload>,
    ) -> AdminResult<()> {
        self.send_form(
            HttpMethod::Post,
            CREATE_FOOD_PATH,
            &session.token,
            Self::food_form(draft, image),
            "Failed to add new foods",
        )
        .await?;
        Ok(())
    }

    pub async fn update_food(
        &self,
        session: &Session,
        food_id: &str,
        draft: &FoodDraft,
        image: Option<ImageUpload>,
    ) -> AdminResult<UpdateFoodResponse> {
        let resp = self
            .send_form(
                HttpMethod::Put,
                &update_food_path(food_id),
                &session.token,
                Self::food_form(draft, image),
                "Error on editing food",
            )
            .await?;
        // 更新成功但响应体不是 JSON 时，视为没有新图片
        Ok(resp.json().unwrap_or_default())
    }

    pub async fn delete_food(&self, session: &Session, food_id: &str) -> AdminResult<()> {
        let req = DeleteFoodRequest {
            food_id: food_id.to_string(),
        };
        self.call(&req, Some(session), "Failed to delete food item")
            .await?;
        Ok(())
    }

    pub async fn toggle_food(
        &self,
        session: &Session,
        food_id: &str,
        is_active: bool,
    ) -> AdminResult<()> {
        let req = ToggleFoodRequest {
            food_id: food_id.to_string(),
            is_active,
        };
        self.call(&req, Some(session), "Failed to update item status")
            .await?;
        Ok(())
    }

    // =========================================================
    // Orders
    // =========================================================

    /// `success: false` 视为失败，不返回部分数据
    pub async fn orders(&self, session: &Session) -> AdminResult<Vec<Order>> {
        let req = OrdersRequest {
            admin_id: session.admin_id.clone(),
        };
        let envelope = self
            .call(&req, Some(session), "Failed to fetch orders")
            .await?;
        if !envelope.success {
            return Err(AdminError::new(AdminErrorKind::Malformed, "Failed to fetch orders")
                .in_op_with("api.orders", session.admin_id.as_str()));
        }
        Ok(envelope.orders.unwrap_or_default())
    }

    pub async fn update_order_status(
        &self,
        session: &Session,
        order_id: &str,
        status: OrderStatus,
    ) -> AdminResult<StatusUpdateResponse> {
        let req = UpdateOrderStatusRequest {
            order_id: order_id.to_string(),
            status,
        };
        self.call(&req, Some(session), "Failed to update order status")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBody;
    use crate::request::mock::MockHttpClient;
    use canteen_shared::AdminInfo;
    use serde_json::json;

    const BASE: &str = "http://api.test/api/v1";

    fn session() -> Session {
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

    #[tokio::test]
    async fn authenticated_calls_carry_bearer_token() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/foods/canteens-menu/a1",
            200,
            json!({"foodslist": [{"_id": "f1", "foodName": "Dosa", "foodPrice": 40}]}),
        );

        let menu = api.menu(&session()).await.unwrap();
        assert_eq!(menu.len(), 1);

        let reqs = api.client().requests.borrow();
        assert_eq!(reqs[0].header("Authorization"), Some("Bearer tok"));
        // GET 不带请求体
        assert_eq!(reqs[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn login_is_unauthenticated_json_post() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client().mock_response(
            HttpMethod::Post,
            "http://api.test/api/v1/admin/login",
            200,
            json!({"adminInfo": {"adminName": "A", "adminEmail": "a@x"}, "adminId": "a1", "adminToken": "t"}),
        );

        let req = LoginRequest {
            admin_email: "a@x".into(),
            admin_password: "pw".into(),
        };
        api.login(&req).await.unwrap();

        let reqs = api.client().requests.borrow();
        assert_eq!(reqs[0].header("Authorization"), None);
        assert_eq!(
            reqs[0].json_body(),
            Some(json!({"adminEmail": "a@x", "adminPassword": "pw"}))
        );
    }

    #[tokio::test]
    async fn token_follows_request_authentication_flag() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/colleges/all-colleges",
            200,
            json!([]),
        );
        api.client().mock_response(
            HttpMethod::Delete,
            "http://api.test/api/v1/foods/delete/f1",
            200,
            json!({}),
        );

        // 公开接口即使持有会话也不带 Token
        api.call(&ListCollegesRequest, Some(&session()), "Failed")
            .await
            .unwrap();
        // 受保护接口没有会话时不带 Token
        let req = DeleteFoodRequest {
            food_id: "f1".into(),
        };
        api.call(&req, None, "Failed").await.unwrap();
        api.call(&req, Some(&session()), "Failed").await.unwrap();

        let reqs = api.client().requests.borrow();
        assert_eq!(reqs[0].header("Authorization"), None);
        assert_eq!(reqs[1].header("Authorization"), None);
        assert_eq!(reqs[2].header("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn non_2xx_uses_server_message_or_fallback() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client().mock_response(
            HttpMethod::Post,
            "http://api.test/api/v1/admin/login",
            401,
            json!({"message": "Invalid credentials"}),
        );
        let req = LoginRequest {
            admin_email: "a@x".into(),
            admin_password: "bad".into(),
        };
        let err = api.login(&req).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "Invalid credentials");

        api.client().mock_raw(
            HttpMethod::Post,
            "http://api.test/api/v1/admin/login",
            500,
            "<html>oops</html>",
        );
        let err = api.login(&req).await.unwrap_err();
        assert_eq!(err.user_message(), "Login failed");
    }

    #[tokio::test]
    async fn logout_sends_no_body_and_ignores_response() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client()
            .mock_raw(HttpMethod::Post, "http://api.test/api/v1/admin/logout", 200, "");
        api.logout().await.unwrap();

        let reqs = api.client().requests.borrow();
        assert_eq!(reqs[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn malformed_body_is_reported_as_malformed() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/foods/canteens-menu/a1",
            200,
            json!({"items": []}),
        );
        let err = api.menu(&session()).await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Malformed);
        assert_eq!(err.user_message(), "Failed to load food items.");
    }

    #[tokio::test]
    async fn orders_with_success_false_fail() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        let url = "http://api.test/api/v1/orders/get-all-orders/a1";
        api.client()
            .mock_response(HttpMethod::Get, url, 200, json!({"success": false}));
        assert!(api.orders(&session()).await.is_err());

        api.client()
            .mock_response(HttpMethod::Get, url, 200, json!({"success": true}));
        assert!(api.orders(&session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn food_form_contains_image_only_when_given() {
        let api = CanteenApi::new(MockHttpClient::new(), BASE);
        let url = "http://api.test/api/v1/foods/update/f1";
        api.client()
            .mock_response(HttpMethod::Put, url, 200, json!({"foodImage": "https://img/new.png"}));

        let draft = FoodDraft {
            name: "Dosa".into(),
            price: 45.0,
            category: "Snacks".into(),
            ..Default::default()
        };
        let resp = api.update_food(&session(), "f1", &draft, None).await.unwrap();
        assert_eq!(resp.food_image.as_deref(), Some("https://img/new.png"));

        let image = ImageUpload {
            file_name: "dosa.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        api.update_food(&session(), "f1", &draft, Some(image))
            .await
            .unwrap();

        let reqs = api.client().requests_to(HttpMethod::Put, url);
        let count_files = |body: &RequestBody| match body {
            RequestBody::Multipart(parts) => parts
                .iter()
                .filter(|p| matches!(p, FormPart::File { .. }))
                .count(),
            _ => usize::MAX,
        };
        assert_eq!(count_files(&reqs[0].body), 0);
        assert_eq!(count_files(&reqs[1].body), 1);
    }
}
