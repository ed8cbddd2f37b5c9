//! 管理员注册 (Sign Up)
//!
//! 注册成功不会建立会话，只有登录才会。

use super::report;
use crate::api::CanteenApi;
use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;
use crate::request::HttpClient;
use canteen_shared::{AdminRole, College, SignupRequest};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    pub admin_name: String,
    pub admin_email: String,
    pub college_name: String,
    pub phone_number: String,
    pub admin_password: String,
    pub confirm_password: String,
    pub role: AdminRole,
}

impl SignupForm {
    pub fn validate(&self) -> AdminResult<SignupRequest> {
        let required = [
            &self.admin_name,
            &self.admin_email,
            &self.phone_number,
            &self.admin_password,
            &self.confirm_password,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(AdminError::invalid_input("Please fill in all fields"));
        }
        if self.admin_password != self.confirm_password {
            return Err(AdminError::invalid_input("Passwords don't match"));
        }
        if self.college_name.trim().is_empty() {
            return Err(AdminError::invalid_input("Please select a college"));
        }

        Ok(SignupRequest {
            admin_name: self.admin_name.trim().to_string(),
            admin_email: self.admin_email.trim().to_string(),
            college_name: self.college_name.clone(),
            phone_number: self.phone_number.trim().to_string(),
            admin_password: self.admin_password.clone(),
            role: self.role,
        })
    }
}

pub struct SignupService<'a, C, N: ?Sized> {
    api: &'a CanteenApi<C>,
    notifier: &'a N,
}

impl<'a, C, N> SignupService<'a, C, N>
where
    C: HttpClient,
    N: Notifier + ?Sized,
{
    pub fn new(api: &'a CanteenApi<C>, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    pub async fn colleges(&self) -> AdminResult<Vec<College>> {
        report(self.notifier, "signup.colleges", self.api.colleges().await)
    }

    /// 成功后调用方跳转到登录页
    pub async fn submit(&self, form: &SignupForm) -> AdminResult<()> {
        let req = report(self.notifier, "signup.validate", form.validate())?;
        report(self.notifier, "signup.submit", self.api.signup(&req).await)?;
        log::info!("[Signup] account created for {}", req.admin_email);
        self.notifier.success("Account created successfully!");
        Ok(())
    }
}
