//! 个人资料 (Profile)

use super::report;
use crate::api::CanteenApi;
use crate::error::AdminResult;
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::session::Session;
use canteen_shared::date::format_long_date;
use canteen_shared::{AdminProfile, AdminRole, ProfileUpdate};
use chrono::FixedOffset;

/// 展示用的资料
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub join_date: String,
    pub role: String,
}

impl ProfileView {
    /// 加入日期按本地时区显示为 "Month D, YYYY"
    pub fn from_profile(profile: &AdminProfile, offset: &FixedOffset) -> Self {
        Self {
            name: profile.admin_name.clone(),
            email: profile.admin_email.clone(),
            phone: profile.phone_number.clone(),
            college: profile.college_name.clone(),
            join_date: profile
                .created_at
                .map(|t| format_long_date(&t, offset))
                .unwrap_or_default(),
            // 资料接口不返回角色，沿用固定展示
            role: AdminRole::SuperAdmin.label().to_string(),
        }
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// 编辑状态
///
/// `saved` 是最近一次从服务端得到的值，取消编辑时恢复为它。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileEditor {
    saved: ProfileUpdate,
    pub draft: ProfileUpdate,
    pub editing: bool,
}

impl ProfileEditor {
    pub fn from_profile(profile: &AdminProfile) -> Self {
        let saved = ProfileUpdate {
            admin_name: profile.admin_name.clone(),
            admin_email: profile.admin_email.clone(),
            phone_number: profile.phone_number.clone(),
            college_name: profile.college_name.clone(),
        };
        Self {
            draft: saved.clone(),
            saved,
            editing: false,
        }
    }

    pub fn begin_edit(&mut self) {
        self.draft = self.saved.clone();
        self.editing = true;
    }

    pub fn cancel(&mut self) {
        self.draft = self.saved.clone();
        self.editing = false;
    }

    /// 保存成功后以服务端返回的数据为准
    pub fn apply_saved(&mut self, profile: &AdminProfile) {
        *self = Self::from_profile(profile);
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }
}

pub struct ProfileService<'a, C, N: ?Sized> {
    api: &'a CanteenApi<C>,
    session: &'a Session,
    notifier: &'a N,
}

impl<'a, C, N> ProfileService<'a, C, N>
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

    pub async fn load(&self) -> AdminResult<AdminProfile> {
        report(
            self.notifier,
            "profile.load",
            self.api.profile(self.session).await,
        )
    }

    pub async fn save(&self, update: ProfileUpdate) -> AdminResult<AdminProfile> {
        let saved = report(
            self.notifier,
            "profile.save",
            self.api
                .update_profile(self.session, update)
                .await
                .map_err(|e| e.or_message("Failed to update profile")),
        )?;
        self.notifier.success("Profile updated successfully");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeKind;
    use crate::notify::mock::RecordingNotifier;
    use crate::request::HttpMethod;
    use crate::screens::fixtures::{api, session, utc};
    use serde_json::json;

    fn profile_json(name: &str) -> serde_json::Value {
        json!({
            "adminName": name,
            "adminEmail": "asha@example.com",
            "phoneNumber": "9999999999",
            "collegeName": "MIT",
            "createdAt": "2024-01-05T10:00:00.000Z"
        })
    }

    #[test]
    fn test_view_formats_join_date_and_role() {
        let profile: AdminProfile = serde_json::from_value(profile_json("asha rao")).unwrap();
        let view = ProfileView::from_profile(&profile, &utc());
        assert_eq!(view.join_date, "January 5, 2024");
        assert_eq!(view.role, "Super Admin");
        assert_eq!(view.initials(), "AR");
    }

    #[test]
    fn test_cancel_restores_saved_values() {
        let profile: AdminProfile = serde_json::from_value(profile_json("Asha")).unwrap();
        let mut editor = ProfileEditor::from_profile(&profile);
        editor.begin_edit();
        editor.draft.admin_name = "Changed".into();
        assert!(editor.is_dirty());

        editor.cancel();
        assert!(!editor.editing);
        assert_eq!(editor.draft.admin_name, "Asha");
    }

    #[tokio::test]
    async fn test_save_replaces_with_server_data() {
        let api = api();
        let session = session();
        let notifier = RecordingNotifier::new();
        let url = "http://api.test/api/v1/admin/update-profile/a1";
        api.client().mock_response(
            HttpMethod::Put,
            url,
            200,
            json!({"updatedUserData": profile_json("Asha R")}),
        );

        let profile: AdminProfile = serde_json::from_value(profile_json("Asha")).unwrap();
        let mut editor = ProfileEditor::from_profile(&profile);
        editor.begin_edit();
        editor.draft.admin_name = "Asha R".into();

        let saved = ProfileService::new(&api, &session, &notifier)
            .save(editor.draft.clone())
            .await
            .unwrap();
        editor.apply_saved(&saved);

        assert!(!editor.editing);
        assert_eq!(editor.draft.admin_name, "Asha R");
        let reqs = api.client().requests_to(HttpMethod::Put, url);
        assert_eq!(reqs[0].json_body().unwrap()["adminName"], "Asha R");
        assert_eq!(reqs[0].header("Authorization"), Some("Bearer tok"));
        assert_eq!(notifier.count(NoticeKind::Success), 1);
    }

    #[tokio::test]
    async fn test_load_failure_notifies() {
        let api = api();
        let session = session();
        let notifier = RecordingNotifier::new();
        api.client().mock_response(
            HttpMethod::Get,
            "http://api.test/api/v1/admin/profile/a1",
            200,
            json!({"profile": {}}),
        );

        assert!(
            ProfileService::new(&api, &session, &notifier)
                .load()
                .await
                .is_err()
        );
        assert_eq!(
            notifier.last().unwrap().message,
            "Failed to load profile data"
        );
        assert_eq!(notifier.count(NoticeKind::Error), 1);
    }
}
