use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Declared category kind. Advisory only: reports classify by amount sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(CategoryType::Income),
            "expense" => Some(CategoryType::Expense),
            _ => None,
        }
    }
}

/// Database entity for categories
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn get_type(&self) -> CategoryType {
        // The column carries a CHECK constraint; anything else is treated as expense
        CategoryType::parse(&self.category_type).unwrap_or(CategoryType::Expense)
    }
}

/// Category information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Unique category identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Category name
    #[schema(example = "Food")]
    pub name: String,
    /// income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(cat: Category) -> Self {
        Self {
            category_type: cat.get_type(),
            id: cat.id,
            user_id: cat.user_id,
            name: cat.name,
            created_at: cat.created_at,
            updated_at: cat.updated_at,
        }
    }
}

/// Request body for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Category name (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Food")]
    pub name: String,

    /// income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// Request body for updating a category (PATCH - all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Groceries")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// Path parameters for category ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryIdPath {
    /// Category UUID
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_type_parse_roundtrip() {
        for t in [CategoryType::Income, CategoryType::Expense] {
            assert_eq!(CategoryType::parse(t.as_str()), Some(t));
        }
        assert_eq!(CategoryType::parse("transfer"), None);
    }

    #[test]
    fn test_create_dto_uses_type_key() {
        let dto: CreateCategoryDto =
            serde_json::from_value(json!({"name": "Food", "type": "expense"})).unwrap();
        assert_eq!(dto.category_type, CategoryType::Expense);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_unknown_type() {
        let result: Result<CreateCategoryDto, _> =
            serde_json::from_value(json!({"name": "Food", "type": "savings"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let dto = CreateCategoryDto {
            name: String::new(),
            category_type: CategoryType::Income,
        };
        assert!(dto.validate().is_err());
    }
}
