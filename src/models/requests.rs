//! Request DTOs for the auction API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::auction::{NewAuction, ProductCondition};

/// Request body for POST /auctions
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

impl CreateAuctionRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.product_name.chars().count() <= 1 {
            return Some("Product name must be longer than 1 character".to_string());
        }
        if self.category.chars().count() <= 2 {
            return Some("Category must be longer than 2 characters".to_string());
        }
        let description_len = self.description.chars().count();
        if description_len <= 10 || description_len > 200 {
            return Some("Description must be between 11 and 200 characters".to_string());
        }
        None
    }

    pub fn into_new_auction(self) -> NewAuction {
        NewAuction {
            product_name: self.product_name,
            category: self.category,
            description: self.description,
            condition: self.condition,
        }
    }
}

/// Query string for GET /auctions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAuctionsQuery {
    /// `active` or `completed`; all auctions when absent
    #[serde(default)]
    pub status: Option<String>,
}
