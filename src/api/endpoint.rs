use serde_json::{json, Value};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Structured request descriptor: one variant per logical backend
/// operation. Transports dispatch on the variant, never on path
/// substrings.
#[derive(Clone, PartialEq, Debug)]
pub enum Endpoint {
    GetPurchases {
        date: String,
    },
    GetSummary {
        year: i32,
        month: Option<u32>,
    },
    UpdateItem {
        item_id: String,
        item_name: String,
        item_cost: f64,
    },
    DeleteItem {
        item_id: String,
    },
    UpdateReceiptDate {
        receipt_id: String,
        new_date: String,
    },
    DeleteReceipt {
        receipt_id: String,
        purchase_date: Option<String>,
    },
    GetUserItemStats {
        limit: u32,
        next_token: Option<String>,
        period: Option<String>,
        category: Option<String>,
    },
    GetUserSummaryStats {
        period: Option<String>,
    },
    GetUserCategoryStats {
        period: Option<String>,
    },
    GetGlobalItemStats {
        item_name: String,
    },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::GetPurchases { .. }
            | Endpoint::GetSummary { .. }
            | Endpoint::GetUserItemStats { .. }
            | Endpoint::GetUserSummaryStats { .. }
            | Endpoint::GetUserCategoryStats { .. }
            | Endpoint::GetGlobalItemStats { .. } => Method::Get,
            Endpoint::UpdateItem { .. } | Endpoint::UpdateReceiptDate { .. } => Method::Put,
            Endpoint::DeleteItem { .. } | Endpoint::DeleteReceipt { .. } => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::GetPurchases { .. } => "/purchases".to_string(),
            Endpoint::GetSummary { .. } => "/purchases/summary".to_string(),
            Endpoint::UpdateItem { .. } | Endpoint::DeleteItem { .. } => "/items".to_string(),
            Endpoint::UpdateReceiptDate { receipt_id, .. } => {
                format!("/receipts/{}/date", receipt_id)
            }
            Endpoint::DeleteReceipt { receipt_id, .. } => format!("/receipts/{}", receipt_id),
            Endpoint::GetUserItemStats { .. } => "/user-stats/items".to_string(),
            Endpoint::GetUserSummaryStats { .. } => "/user-stats/summary".to_string(),
            Endpoint::GetUserCategoryStats { .. } => "/user-stats/categories".to_string(),
            Endpoint::GetGlobalItemStats { .. } => "/item-stats".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::GetPurchases { date } => vec![("date", date.clone())],
            Endpoint::GetSummary { year, month } => {
                let mut query = vec![("year", year.to_string())];
                if let Some(month) = month {
                    query.push(("month", month.to_string()));
                }
                query
            }
            Endpoint::GetUserItemStats {
                limit,
                next_token,
                period,
                category,
            } => {
                let mut query = vec![("limit", limit.to_string())];
                if let Some(token) = next_token {
                    query.push(("nextToken", token.clone()));
                }
                if let Some(period) = period {
                    query.push(("period", period.clone()));
                }
                if let Some(category) = category {
                    query.push(("category", category.clone()));
                }
                query
            }
            Endpoint::GetUserSummaryStats { period }
            | Endpoint::GetUserCategoryStats { period } => period
                .as_ref()
                .map(|p| vec![("period", p.clone())])
                .unwrap_or_default(),
            Endpoint::GetGlobalItemStats { item_name } => {
                vec![("itemName", item_name.clone())]
            }
            _ => Vec::new(),
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Endpoint::UpdateItem {
                item_id,
                item_name,
                item_cost,
            } => Some(json!({
                "itemId": item_id,
                "itemName": item_name,
                "itemCost": item_cost,
            })),
            Endpoint::DeleteItem { item_id } => Some(json!({ "itemId": item_id })),
            Endpoint::UpdateReceiptDate { new_date, .. } => {
                Some(json!({ "newDate": new_date }))
            }
            Endpoint::DeleteReceipt { purchase_date, .. } => purchase_date
                .as_ref()
                .map(|date| json!({ "purchaseDate": date })),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchases_descriptor() {
        let endpoint = Endpoint::GetPurchases {
            date: "2025-11-01".to_string(),
        };
        assert_eq!(endpoint.method(), Method::Get);
        assert_eq!(endpoint.path(), "/purchases");
        assert_eq!(endpoint.query(), vec![("date", "2025-11-01".to_string())]);
        assert_eq!(endpoint.body(), None);
    }

    #[test]
    fn summary_month_is_optional() {
        let yearly = Endpoint::GetSummary {
            year: 2025,
            month: None,
        };
        assert_eq!(yearly.path(), "/purchases/summary");
        assert_eq!(yearly.query(), vec![("year", "2025".to_string())]);

        let monthly = Endpoint::GetSummary {
            year: 2025,
            month: Some(11),
        };
        assert_eq!(
            monthly.query(),
            vec![("year", "2025".to_string()), ("month", "11".to_string())]
        );
    }

    #[test]
    fn item_mutations() {
        let update = Endpoint::UpdateItem {
            item_id: "i-1".to_string(),
            item_name: "Coffee".to_string(),
            item_cost: 6.5,
        };
        assert_eq!(update.method(), Method::Put);
        assert_eq!(update.path(), "/items");
        assert_eq!(
            update.body(),
            Some(json!({ "itemId": "i-1", "itemName": "Coffee", "itemCost": 6.5 }))
        );

        let delete = Endpoint::DeleteItem {
            item_id: "i-1".to_string(),
        };
        assert_eq!(delete.method(), Method::Delete);
        assert_eq!(delete.body(), Some(json!({ "itemId": "i-1" })));
    }

    #[test]
    fn receipt_mutations() {
        let update = Endpoint::UpdateReceiptDate {
            receipt_id: "r-9".to_string(),
            new_date: "2025-11-05".to_string(),
        };
        assert_eq!(update.path(), "/receipts/r-9/date");
        assert_eq!(update.body(), Some(json!({ "newDate": "2025-11-05" })));

        let delete = Endpoint::DeleteReceipt {
            receipt_id: "r-9".to_string(),
            purchase_date: Some("2025-11-01".to_string()),
        };
        assert_eq!(delete.path(), "/receipts/r-9");
        assert_eq!(delete.body(), Some(json!({ "purchaseDate": "2025-11-01" })));

        let delete_no_date = Endpoint::DeleteReceipt {
            receipt_id: "r-9".to_string(),
            purchase_date: None,
        };
        assert_eq!(delete_no_date.body(), None);
    }

    #[test]
    fn stats_descriptors() {
        let items = Endpoint::GetUserItemStats {
            limit: 20,
            next_token: Some("abc".to_string()),
            period: Some("2024-03".to_string()),
            category: Some("Dairy".to_string()),
        };
        assert_eq!(items.path(), "/user-stats/items");
        assert_eq!(
            items.query(),
            vec![
                ("limit", "20".to_string()),
                ("nextToken", "abc".to_string()),
                ("period", "2024-03".to_string()),
                ("category", "Dairy".to_string()),
            ]
        );

        let summary = Endpoint::GetUserSummaryStats { period: None };
        assert_eq!(summary.path(), "/user-stats/summary");
        assert!(summary.query().is_empty());

        let categories = Endpoint::GetUserCategoryStats {
            period: Some("current-year".to_string()),
        };
        assert_eq!(categories.path(), "/user-stats/categories");
        assert_eq!(
            categories.query(),
            vec![("period", "current-year".to_string())]
        );

        let global = Endpoint::GetGlobalItemStats {
            item_name: "Coffee Beans".to_string(),
        };
        assert_eq!(global.path(), "/item-stats");
        assert_eq!(
            global.query(),
            vec![("itemName", "Coffee Beans".to_string())]
        );
    }
}
