//! 菜单管理 (Food)

use super::report;
use crate::api::{CanteenApi, ImageUpload};
use crate::error::{AdminError, AdminResult};
use crate::notify::Notifier;
use crate::request::HttpClient;
use crate::session::Session;
use canteen_shared::{FOOD_CATEGORIES, FoodDraft, FoodItem};

// =========================================================
// 统计
// =========================================================

/// 价格区间标签，上界包含在内
pub const PRICE_BUCKETS: [&str; 4] = ["₹0-50", "₹51-100", "₹101-200", "₹200+"];

pub fn price_bucket(price: f64) -> usize {
    if price <= 50.0 {
        0
    } else if price <= 100.0 {
        1
    } else if price <= 200.0 {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuStats {
    pub total_items: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub total_value: f64,
    pub price_distribution: [usize; 4],
}

impl MenuStats {
    pub fn from_items(items: &[FoodItem]) -> Self {
        let mut stats = MenuStats {
            total_items: items.len(),
            ..Default::default()
        };
        for item in items {
            if item.is_active {
                stats.active_count += 1;
            }
            stats.total_value += item.price;
            stats.price_distribution[price_bucket(item.price)] += 1;
        }
        stats.inactive_count = stats.total_items - stats.active_count;
        stats
    }

    /// 可用/下架占比（百分比），空菜单返回 (0, 0)
    pub fn availability_percent(&self) -> (f64, f64) {
        if self.total_items == 0 {
            return (0.0, 0.0);
        }
        let total = self.total_items as f64;
        (
            self.active_count as f64 * 100.0 / total,
            self.inactive_count as f64 * 100.0 / total,
        )
    }
}

// =========================================================
// 本地状态变更（服务端确认后调用）
// =========================================================

pub fn apply_toggle(items: &mut [FoodItem], food_id: &str, is_active: bool) {
    if let Some(item) = items.iter_mut().find(|i| i.id == food_id) {
        item.is_active = is_active;
    }
}

/// 用表单内容修补一行；`image` 为服务端返回的新图片地址
pub fn apply_update(items: &mut [FoodItem], food_id: &str, draft: &FoodDraft, image: Option<String>) {
    if let Some(item) = items.iter_mut().find(|i| i.id == food_id) {
        item.name = draft.name.clone();
        item.price = draft.price;
        item.category = draft.category.clone();
        item.description = draft.description.clone();
        item.is_veg = draft.is_veg;
        item.is_active = draft.is_active;
        if let Some(image) = image.filter(|i| !i.is_empty()) {
            item.image = image;
        }
    }
}

pub fn apply_delete(items: &mut Vec<FoodItem>, food_id: &str) {
    items.retain(|i| i.id != food_id);
}

// =========================================================
// 表单
// =========================================================

/// 新建/编辑菜品的原始输入
#[derive(Debug, Clone, PartialEq)]
pub struct FoodForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub is_veg: bool,
    pub is_active: bool,
}

impl Default for FoodForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            category: String::new(),
            description: String::new(),
            is_veg: false,
            // 新菜品默认上架
            is_active: true,
        }
    }
}

impl From<&FoodItem> for FoodForm {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            price: format!("{}", item.price),
            category: item.category.clone(),
            description: item.description.clone(),
            is_veg: item.is_veg,
            is_active: item.is_active,
        }
    }
}

impl FoodForm {
    pub fn validate(&self) -> AdminResult<FoodDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::invalid_input("Please enter a food name"));
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| AdminError::invalid_input("Please enter a valid price"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AdminError::invalid_input("Please enter a valid price"));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(AdminError::invalid_input("Please select a category"));
        }
        if !FOOD_CATEGORIES.contains(&category) {
            log::debug!("[Menu] category '{}' is not in the fixed list", category);
        }

        Ok(FoodDraft {
            name: name.to_string(),
            price,
            category: category.to_string(),
            description: self.description.trim().to_string(),
            is_veg: self.is_veg,
            is_active: self.is_active,
        })
    }
}

// =========================================================
// 远端操作
// =========================================================

pub struct MenuService<'a, C, N: ?Sized> {
    api: &'a CanteenApi<C>,
    session: &'a Session,
    notifier: &'a N,
}

impl<'a, C, N> MenuService<'a, C, N>
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

    pub async fn load(&self) -> AdminResult<Vec<FoodItem>> {
        report(self.notifier, "menu.load", self.api.menu(self.session).await)
    }

    /// 新建成功后重新拉取整个列表
    pub async fn create(
        &self,
        form: &FoodForm,
        image: Option<ImageUpload>,
    ) -> AdminResult<Vec<FoodItem>> {
        let draft = report(self.notifier, "menu.create", form.validate())?;
        report(
            self.notifier,
            "menu.create",
            self.api.create_food(self.session, &draft, image).await,
        )?;
        self.notifier.success("Food item added successfully");
        self.load().await
    }

    /// 返回确认后的草稿与新图片地址，调用方用 `apply_update` 修补本地行
    pub async fn update(
        &self,
        food_id: &str,
        form: &FoodForm,
        image: Option<ImageUpload>,
    ) -> AdminResult<(FoodDraft, Option<String>)> {
        let draft = report(self.notifier, "menu.update", form.validate())?;
        let resp = report(
            self.notifier,
            "menu.update",
            self.api
                .update_food(self.session, food_id, &draft, image)
                .await,
        )?;
        self.notifier.success("Food item updated successfully");
        Ok((draft, resp.food_image))
    }

    pub async fn delete(&self, food_id: &str) -> AdminResult<()> {
        report(
            self.notifier,
            "menu.delete",
            self.api.delete_food(self.session, food_id).await,
        )?;
        self.notifier.success("Food item deleted successfully");
        Ok(())
    }

    /// 切换上架状态，返回服务端确认后的新状态
    pub async fn toggle(&self, item: &FoodItem) -> AdminResult<bool> {
        let next = !item.is_active;
        report(
            self.notifier,
            "menu.toggle",
            self.api.toggle_food(self.session, &item.id, next).await,
        )?;
        let label = if next { "active" } else { "inactive" };
        self.notifier
            .success(&format!("Item marked as {}", label));
        Ok(next)
    }
}
