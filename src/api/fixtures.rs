use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};

use crate::api::endpoint::Endpoint;
use crate::api::{ApiError, Transport};

/// Offline transport: canned payloads keyed by request descriptor.
/// Mutations only log; the page's optimistic copy is the sole source of
/// truth in fixture mode.
pub struct FixtureTransport {
    delay_ms: u32,
}

impl FixtureTransport {
    pub fn new(delay_ms: u32) -> Self {
        FixtureTransport { delay_ms }
    }

    async fn settle(&self) {
        if self.delay_ms > 0 {
            TimeoutFuture::new(self.delay_ms).await;
        }
    }

    pub(crate) fn dispatch(&self, endpoint: &Endpoint) -> Value {
        match endpoint {
            Endpoint::GetPurchases { .. } => weekly_purchases(),
            Endpoint::GetSummary { month: None, .. } => yearly_summary(),
            Endpoint::GetSummary { month: Some(_), .. } => monthly_summary(),
            Endpoint::UpdateItem { item_id, .. } => {
                log::info!("fixture: update item {}", item_id);
                json!({})
            }
            Endpoint::DeleteItem { item_id } => {
                log::info!("fixture: delete item {}", item_id);
                json!({})
            }
            Endpoint::UpdateReceiptDate {
                receipt_id,
                new_date,
            } => {
                log::info!("fixture: move receipt {} to {}", receipt_id, new_date);
                json!({})
            }
            Endpoint::DeleteReceipt { receipt_id, .. } => {
                log::info!("fixture: delete receipt {}", receipt_id);
                json!({})
            }
            Endpoint::GetUserItemStats {
                limit,
                next_token,
                category,
                ..
            } => item_stats_page(*limit, next_token.as_deref(), category.as_deref()),
            Endpoint::GetUserSummaryStats { .. } => summary_stats(),
            Endpoint::GetUserCategoryStats { .. } => category_stats(),
            Endpoint::GetGlobalItemStats { item_name } => global_item_stats(item_name),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FixtureTransport {
    async fn send(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
        self.settle().await;
        Ok(self.dispatch(endpoint))
    }

    async fn upload(&self, _file: web_sys::File, doc_type: String) -> Result<Value, ApiError> {
        log::info!("fixture: upload of a {}", doc_type);
        self.settle().await;
        Ok(upload_response())
    }
}

fn weekly_purchases() -> Value {
    json!({
        "weekStart": "2025-11-01",
        "weekEnd": "2025-11-07",
        "totalAmount": 120.87,
        "daysWithPurchases": 3,
        "totalDays": 7,
        "purchases": {
            "2025-11-01": [{
                "receiptId": "fixture-receipt-0",
                "merchant": "Weekend Store",
                "total": 45.67,
                "timestamp": "2025-11-01T09:00:00.000Z",
                "items": [
                    { "itemId": "fixture-item-0-1", "itemName": "Weekend Special", "itemCost": 25.67 },
                    { "itemId": "fixture-item-0-2", "itemName": "Fresh Produce", "itemCost": 20.00 }
                ]
            }],
            "2025-11-03": [{
                "receiptId": "fixture-receipt-1",
                "merchant": "Woolworths",
                "total": 85.20,
                "timestamp": "2025-11-03T10:00:00.000Z",
                "items": [
                    { "itemId": "fixture-item-1-1", "itemName": "Spicy Chicken Drumsticks 3pk", "itemCost": 12.50 },
                    { "itemId": "fixture-item-1-2", "itemName": "Paseo 3 Ply T/tissue 24pk Value", "itemCost": 8.00 },
                    { "itemId": "fixture-item-1-3", "itemName": "S/Magnum Honeycomb Crunch 4pk", "itemCost": 9.70 }
                ]
            }],
            "2025-11-06": [{
                "receiptId": "fixture-receipt-2",
                "merchant": "Weekend Store",
                "total": -10.00,
                "timestamp": "2025-11-06T15:30:00.000Z",
                "items": [
                    { "itemId": "fixture-item-2-1", "itemName": "Returned Kettle", "itemCost": -10.00 }
                ]
            }]
        }
    })
}

fn yearly_summary() -> Value {
    json!({
        "year": 2025,
        "summaries": [
            { "month": 1, "monthName": "January", "totalAmount": 1234.56, "receiptCount": 45, "itemCount": 234 },
            { "month": 2, "monthName": "February", "totalAmount": 987.43, "receiptCount": 32, "itemCount": 189 },
            { "month": 3, "monthName": "March", "totalAmount": 1500.00, "receiptCount": 50, "itemCount": 300 },
            { "month": 10, "monthName": "October", "totalAmount": -50.00, "receiptCount": 2, "itemCount": 2 },
            { "month": 11, "monthName": "November", "totalAmount": 250.75, "receiptCount": 10, "itemCount": 45 }
        ]
    })
}

fn monthly_summary() -> Value {
    json!({
        "year": 2025,
        "month": 11,
        "dailySummaries": [
            { "date": "2025-11-01", "dayName": "Saturday", "totalAmount": 45.67, "receiptCount": 2, "itemCount": 8 },
            { "date": "2025-11-02", "dayName": "Sunday", "totalAmount": 0, "receiptCount": 0, "itemCount": 0 },
            { "date": "2025-11-03", "dayName": "Monday", "totalAmount": 85.20, "receiptCount": 1, "itemCount": 3 },
            { "date": "2025-11-04", "dayName": "Tuesday", "totalAmount": 0, "receiptCount": 0, "itemCount": 0 },
            { "date": "2025-11-05", "dayName": "Wednesday", "totalAmount": 38.25, "receiptCount": 2, "itemCount": 5 },
            { "date": "2025-11-06", "dayName": "Thursday", "totalAmount": -15.50, "receiptCount": 1, "itemCount": 1 }
        ]
    })
}

fn all_item_stats() -> Vec<Value> {
    vec![
        json!({ "itemName": "Coffee Beans", "shortLabel": "Coffee Beans", "category": "Beverages", "totalSpent": 156.78, "purchaseCount": 23, "avgCost": 6.82, "lastPurchase": "2024-01-15T10:30:00" }),
        json!({ "itemName": "Milk", "shortLabel": "Milk", "category": "Dairy", "totalSpent": 89.45, "purchaseCount": 15, "avgCost": 5.96, "lastPurchase": "2024-01-14T08:20:00" }),
        json!({ "itemName": "Bread", "shortLabel": "Bread", "category": "Bakery", "totalSpent": 67.20, "purchaseCount": 12, "avgCost": 5.60, "lastPurchase": "2024-01-13T16:45:00" }),
        json!({ "itemName": "Eggs", "shortLabel": "Eggs", "category": "Dairy", "totalSpent": 45.30, "purchaseCount": 8, "avgCost": 5.66, "lastPurchase": "2024-01-12T11:15:00" }),
        json!({ "itemName": "Bananas", "shortLabel": "Bananas", "category": "Fruits", "totalSpent": 34.80, "purchaseCount": 10, "avgCost": 3.48, "lastPurchase": "2024-01-11T14:30:00" }),
        json!({ "itemName": "Greek Yoghurt", "shortLabel": "Greek Yoghurt", "category": "Dairy", "totalSpent": 31.50, "purchaseCount": 7, "avgCost": 4.50, "lastPurchase": "2024-01-10T09:05:00" }),
        json!({ "itemName": "Sparkling Water", "shortLabel": "Sparkling Water", "category": "Beverages", "totalSpent": 24.00, "purchaseCount": 12, "avgCost": 2.00, "lastPurchase": "2024-01-09T18:40:00" }),
        json!({ "itemName": "Sourdough Loaf", "shortLabel": "Sourdough Loaf", "category": "Bakery", "totalSpent": 19.60, "purchaseCount": 4, "avgCost": 4.90, "lastPurchase": "2024-01-08T12:10:00" }),
    ]
}

/// Item stats are served page-wise so fixture mode exercises the real
/// pagination protocol; the token is a numeric offset kept opaque to
/// the caller.
fn item_stats_page(limit: u32, next_token: Option<&str>, category: Option<&str>) -> Value {
    let all: Vec<Value> = all_item_stats()
        .into_iter()
        .filter(|item| match category {
            Some(category) => item["category"] == category,
            None => true,
        })
        .collect();
    let offset: usize = next_token.and_then(|t| t.parse().ok()).unwrap_or(0);
    let offset = offset.min(all.len());
    let end = offset.saturating_add(limit.max(1) as usize).min(all.len());
    let has_more = end < all.len();
    let mut page = json!({
        "items": all[offset..end].to_vec(),
        "hasMore": has_more,
    });
    if has_more {
        page["nextToken"] = json!(end.to_string());
    }
    page
}

fn summary_stats() -> Value {
    json!({
        "totalSpent": 468.63,
        "totalUniqueItems": 8,
        "avgSpentPerItem": 58.58,
        "topItems": [
            { "shortLabel": "Coffee Beans", "purchaseCount": 23, "totalSpent": 156.78 },
            { "shortLabel": "Milk", "purchaseCount": 15, "totalSpent": 89.45 },
            { "shortLabel": "Bread", "purchaseCount": 12, "totalSpent": 67.20 },
            { "shortLabel": "Eggs", "purchaseCount": 8, "totalSpent": 45.30 },
            { "shortLabel": "Bananas", "purchaseCount": 10, "totalSpent": 34.80 }
        ]
    })
}

fn category_stats() -> Value {
    json!({
        "totalSpent": 468.63,
        "categories": [
            {
                "category": "Dairy",
                "totalSpent": 166.25,
                "itemCount": 3,
                "avgSpentPerItem": 55.42,
                "topItems": [
                    { "shortLabel": "Milk", "totalSpent": 89.45 },
                    { "shortLabel": "Eggs", "totalSpent": 45.30 },
                    { "shortLabel": "Greek Yoghurt", "totalSpent": 31.50 }
                ]
            },
            {
                "category": "Beverages",
                "totalSpent": 180.78,
                "itemCount": 2,
                "avgSpentPerItem": 90.39,
                "topItems": [
                    { "shortLabel": "Coffee Beans", "totalSpent": 156.78 },
                    { "shortLabel": "Sparkling Water", "totalSpent": 24.00 }
                ]
            },
            {
                "category": "Bakery",
                "totalSpent": 86.80,
                "itemCount": 2,
                "avgSpentPerItem": 43.40,
                "topItems": [
                    { "shortLabel": "Bread", "totalSpent": 67.20 },
                    { "shortLabel": "Sourdough Loaf", "totalSpent": 19.60 }
                ]
            }
        ]
    })
}

fn global_item_stats(item_name: &str) -> Value {
    json!({
        "itemName": item_name,
        "totalSpent": 48212.40,
        "totalPurchases": 7083,
        "avgCost": 6.81,
        "lastUpdated": "2025-11-05T21:00:00Z"
    })
}

pub(crate) fn upload_response() -> Value {
    json!({
        "merchant": "Corner Grocer",
        "purchaseDate": "2024-01-15",
        "items": [
            { "itemName": "House Blend Beans", "itemCost": 10.99 },
            { "itemName": "Oat Milk", "itemCost": 5.00 }
        ],
        "totalItems": 2,
        "processingTimeMs": 1200
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Paginated, UserItemStats, WeeklyPurchases};

    #[test]
    fn fixture_pages_chain_through_tokens_without_repeats() {
        let transport = FixtureTransport::new(0);
        let mut seen: Vec<String> = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page: Paginated<UserItemStats> = serde_json::from_value(transport.dispatch(
                &Endpoint::GetUserItemStats {
                    limit: 3,
                    next_token: token.clone(),
                    period: None,
                    category: None,
                },
            ))
            .expect("page parses");
            for item in &page.items {
                assert!(
                    !seen.contains(&item.item_name),
                    "item {} repeated across pages",
                    item.item_name
                );
                seen.push(item.item_name.clone());
            }
            if !page.has_more {
                assert_eq!(page.next_token, None);
                break;
            }
            token = page.next_token;
            assert!(token.is_some(), "hasMore without a continuation token");
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn category_scopes_the_fixture_pages() {
        let transport = FixtureTransport::new(0);
        let page: Paginated<UserItemStats> = serde_json::from_value(transport.dispatch(
            &Endpoint::GetUserItemStats {
                limit: 10,
                next_token: None,
                period: None,
                category: Some("Dairy".to_string()),
            },
        ))
        .expect("page parses");
        assert_eq!(page.items.len(), 3);
        assert!(page.items.iter().all(|i| i.category == "Dairy"));
        assert!(!page.has_more);
    }

    #[test]
    fn summary_dispatch_follows_the_month_argument() {
        let transport = FixtureTransport::new(0);
        let yearly = transport.dispatch(&Endpoint::GetSummary {
            year: 2025,
            month: None,
        });
        assert!(yearly.get("summaries").is_some());
        let monthly = transport.dispatch(&Endpoint::GetSummary {
            year: 2025,
            month: Some(11),
        });
        assert!(monthly.get("dailySummaries").is_some());
    }

    #[test]
    fn weekly_fixture_matches_the_wire_shape() {
        let transport = FixtureTransport::new(0);
        let week: WeeklyPurchases = serde_json::from_value(transport.dispatch(
            &Endpoint::GetPurchases {
                date: "2025-11-01".to_string(),
            },
        ))
        .expect("weekly purchases parse");
        assert_eq!(week.receipt_count(), 3);
        // the refund receipt keeps its negative total
        assert!(week.purchases["2025-11-06"][0].total < 0.0);
    }

    #[test]
    fn mutations_return_empty_objects() {
        let transport = FixtureTransport::new(0);
        let value = transport.dispatch(&Endpoint::DeleteItem {
            item_id: "fixture-item-0-1".to_string(),
        });
        assert_eq!(value, serde_json::json!({}));
    }
}
