//! Prize Catalog Model

use serde::{Deserialize, Serialize};

/// Prize category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PrizeCategory {
    Vehicle,
    Tech,
    Cash,
    Accessory,
    Service,
}

/// Prize rarity tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PrizeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Catalog entry used to seed daily raffles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Prize {
    pub id: i64,
    pub name: String,
    /// Formatted currency string as shown on the site, e.g. `$28,000`
    pub value: String,
    pub image: String,
    pub description: String,
    pub category: PrizeCategory,
    pub rarity: PrizeRarity,
    pub is_active: bool,
}

/// Prize data copied onto a raffle when it is created.
///
/// Catalog edits never rewrite past raffles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrizeSnapshot {
    #[cfg_attr(feature = "db", sqlx(rename = "prize_name"))]
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(rename = "prize_value"))]
    pub value: String,
    #[cfg_attr(feature = "db", sqlx(rename = "prize_image"))]
    pub image: String,
    #[cfg_attr(feature = "db", sqlx(rename = "prize_description"))]
    pub description: String,
}

impl From<&Prize> for PrizeSnapshot {
    fn from(prize: &Prize) -> Self {
        Self {
            name: prize.name.clone(),
            value: prize.value.clone(),
            image: prize.image.clone(),
            description: prize.description.clone(),
        }
    }
}
