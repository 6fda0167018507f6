use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    pub item_name: String,
    /// Negative costs are refunds/discounts and render in the refund style.
    pub item_cost: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub receipt_id: String,
    pub merchant: String,
    pub total: f64,
    pub timestamp: String,
    pub items: Vec<Item>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPurchases {
    pub week_start: String,
    pub week_end: String,
    pub total_days: u32,
    pub days_with_purchases: u32,
    pub total_amount: f64,
    pub purchases: BTreeMap<String, Vec<Purchase>>,
}

impl WeeklyPurchases {
    pub fn receipt_count(&self) -> usize {
        self.purchases.values().map(|day| day.len()).sum()
    }

    /// Optimistic rename/reprice of a single item. Adjusts the owning
    /// receipt total and the week total by the cost delta.
    pub fn apply_item_edit(&mut self, item_id: &str, item_name: &str, item_cost: f64) -> bool {
        for day in self.purchases.values_mut() {
            for purchase in day.iter_mut() {
                if let Some(item) = purchase.items.iter_mut().find(|i| i.item_id == item_id) {
                    let delta = item_cost - item.item_cost;
                    item.item_name = item_name.to_string();
                    item.item_cost = item_cost;
                    purchase.total += delta;
                    self.total_amount += delta;
                    return true;
                }
            }
        }
        false
    }

    /// Optimistic removal of a single item, adjusting derived totals.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        for day in self.purchases.values_mut() {
            for purchase in day.iter_mut() {
                if let Some(pos) = purchase.items.iter().position(|i| i.item_id == item_id) {
                    let removed = purchase.items.remove(pos);
                    purchase.total -= removed.item_cost;
                    self.total_amount -= removed.item_cost;
                    return true;
                }
            }
        }
        false
    }

    /// Optimistic removal of a whole receipt. A date bucket left empty
    /// no longer counts as a day with purchases.
    pub fn remove_receipt(&mut self, receipt_id: &str) -> bool {
        for day in self.purchases.values_mut() {
            if let Some(pos) = day.iter().position(|p| p.receipt_id == receipt_id) {
                let removed = day.remove(pos);
                self.total_amount -= removed.total;
                if day.is_empty() {
                    self.days_with_purchases = self.days_with_purchases.saturating_sub(1);
                }
                return true;
            }
        }
        false
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: u32,
    pub month_name: String,
    pub total_amount: f64,
    pub receipt_count: u32,
    pub item_count: u32,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: i32,
    pub summaries: Vec<MonthSummary>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    pub day_name: String,
    pub total_amount: f64,
    pub receipt_count: u32,
    pub item_count: u32,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub daily_summaries: Vec<DaySummary>,
}

/// Yearly and monthly rollups share one endpoint; the payloads are told
/// apart by which summary list they carry.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Monthly(MonthlySummary),
    Yearly(YearlySummary),
}

/// Pagination envelope. `next_token` is opaque and echoed back
/// unmodified; its absence together with `has_more == false` ends the
/// sequence.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItemStats {
    pub item_name: String,
    pub short_label: String,
    pub category: String,
    pub total_spent: f64,
    pub purchase_count: u32,
    pub avg_cost: f64,
    pub last_purchase: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTopItem {
    pub short_label: String,
    pub purchase_count: u32,
    pub total_spent: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryStats {
    pub total_spent: f64,
    pub total_unique_items: u32,
    pub avg_spent_per_item: f64,
    pub top_items: Vec<SummaryTopItem>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTopItem {
    pub short_label: String,
    pub total_spent: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub total_spent: f64,
    pub item_count: u32,
    pub avg_spent_per_item: f64,
    pub top_items: Vec<CategoryTopItem>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCategoryStats {
    pub total_spent: f64,
    pub categories: Vec<CategoryStats>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalItemStats {
    pub item_name: String,
    pub total_spent: f64,
    pub total_purchases: u32,
    pub avg_cost: f64,
    pub last_updated: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadItem {
    pub item_name: String,
    pub item_cost: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub purchase_time: Option<String>,
    #[serde(default)]
    pub items: Vec<UploadItem>,
    #[serde(default)]
    pub total_items: Option<u32>,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
}

impl UploadResponse {
    /// The server does not send a total; it is derived locally.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|item| item.item_cost).sum()
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_amount_abs(amount: f64) -> String {
    format!("${:.0}", amount.abs())
}

/// Tailwind text class for a signed amount; refunds render red.
pub fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-400"
    } else {
        "text-green-400"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> WeeklyPurchases {
        serde_json::from_value(serde_json::json!({
            "weekStart": "2025-10-26",
            "weekEnd": "2025-11-01",
            "totalDays": 7,
            "daysWithPurchases": 2,
            "totalAmount": 130.87,
            "purchases": {
                "2025-11-01": [{
                    "receiptId": "r-1",
                    "merchant": "Weekend Store",
                    "total": 45.67,
                    "timestamp": "2025-11-01T09:00:00.000Z",
                    "items": [
                        { "itemId": "i-1", "itemName": "Weekend Special", "itemCost": 25.67 },
                        { "itemId": "i-2", "itemName": "Fresh Produce", "itemCost": 20.00 }
                    ]
                }],
                "2025-11-03": [{
                    "receiptId": "r-2",
                    "merchant": "Woolworths",
                    "total": 85.20,
                    "timestamp": "2025-11-03T10:00:00.000Z",
                    "items": [
                        { "itemId": "i-3", "itemName": "Drumsticks", "itemCost": 85.20 }
                    ]
                }]
            }
        }))
        .expect("fixture week deserializes")
    }

    #[test]
    fn camel_case_round_trip() {
        let w = week();
        assert_eq!(w.week_start, "2025-10-26");
        assert_eq!(w.receipt_count(), 2);
        let value = serde_json::to_value(&w).expect("serializes");
        assert!(value.get("daysWithPurchases").is_some());
        assert!(value.get("days_with_purchases").is_none());
    }

    #[test]
    fn item_edit_adjusts_receipt_and_week_totals() {
        let mut w = week();
        assert!(w.apply_item_edit("i-2", "Produce Box", 25.00));
        let purchase = &w.purchases["2025-11-01"][0];
        assert_eq!(purchase.items[1].item_name, "Produce Box");
        assert!((purchase.total - 50.67).abs() < 1e-9);
        assert!((w.total_amount - 135.87).abs() < 1e-9);
        assert!(!w.apply_item_edit("missing", "x", 1.0));
    }

    #[test]
    fn remove_item_targets_exactly_one_item() {
        let mut w = week();
        assert!(w.remove_item("i-1"));
        let purchase = &w.purchases["2025-11-01"][0];
        assert_eq!(purchase.items.len(), 1);
        assert_eq!(purchase.items[0].item_id, "i-2");
        assert!((purchase.total - 20.00).abs() < 1e-9);
        assert!((w.total_amount - 105.20).abs() < 1e-9);
    }

    #[test]
    fn remove_receipt_updates_day_count() {
        let mut w = week();
        assert!(w.remove_receipt("r-2"));
        assert_eq!(w.days_with_purchases, 1);
        assert!((w.total_amount - 45.67).abs() < 1e-9);
        assert!(w.purchases["2025-11-03"].is_empty());
        assert!(!w.remove_receipt("r-2"));
    }

    #[test]
    fn summary_payloads_discriminate_structurally() {
        let yearly: Summary = serde_json::from_value(serde_json::json!({
            "year": 2025,
            "summaries": [
                { "month": 11, "monthName": "November", "totalAmount": 250.75, "receiptCount": 10, "itemCount": 45 }
            ]
        }))
        .expect("yearly parses");
        assert!(matches!(yearly, Summary::Yearly(_)));

        let monthly: Summary = serde_json::from_value(serde_json::json!({
            "year": 2025,
            "month": 11,
            "dailySummaries": [
                { "date": "2025-11-06", "dayName": "Thursday", "totalAmount": -15.50, "receiptCount": 1, "itemCount": 1 }
            ]
        }))
        .expect("monthly parses");
        match monthly {
            Summary::Monthly(m) => assert_eq!(m.daily_summaries.len(), 1),
            Summary::Yearly(_) => panic!("monthly payload classified as yearly"),
        }
    }

    #[test]
    fn upload_total_cost_is_derived_from_items() {
        let response: UploadResponse = serde_json::from_value(serde_json::json!({
            "merchant": "Mock Store",
            "purchaseDate": "2024-01-15",
            "items": [
                { "itemName": "A", "itemCost": 10.99 },
                { "itemName": "B", "itemCost": 5.00 }
            ],
            "totalItems": 2,
            "processingTimeMs": 1200
        }))
        .expect("upload response parses");
        assert!((response.total_cost() - 15.99).abs() < 1e-9);
    }

    #[test]
    fn negative_amounts_classify_as_refunds() {
        assert_eq!(amount_class(-10.00), "text-red-400");
        assert_eq!(amount_class(0.0), "text-green-400");
        assert_eq!(amount_class(12.34), "text-green-400");
        assert_eq!(format_amount(-10.0), "$-10.00");
        assert_eq!(format_amount_abs(-50.0), "$50");
    }
}
