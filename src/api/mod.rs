pub mod endpoint;
pub mod fixtures;
pub mod transport;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use endpoint::{Endpoint, Method};
pub use fixtures::FixtureTransport;
pub use transport::{HttpTransport, Transport};

use crate::period::PeriodFilter;
use crate::types::{
    GlobalItemStats, Paginated, Summary, UploadResponse, UserCategoryStats, UserItemStats,
    UserSummaryStats, WeeklyPurchases,
};

#[derive(Clone, PartialEq, Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; the display string is what pages surface.
    #[error("API Error: {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Typed client over an injected transport. Constructed once in the app
/// root and handed to pages through context; tests substitute a fake
/// transport at the same seam.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        ApiClient { transport }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let value = self.transport.send(&endpoint).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn mutate(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.transport.send(&endpoint).await.map(|_| ())
    }

    pub async fn get_purchases(&self, date: &str) -> Result<WeeklyPurchases, ApiError> {
        self.fetch(Endpoint::GetPurchases {
            date: date.to_string(),
        })
        .await
    }

    pub async fn get_summary(&self, year: i32, month: Option<u32>) -> Result<Summary, ApiError> {
        self.fetch(Endpoint::GetSummary { year, month }).await
    }

    pub async fn update_item(
        &self,
        item_id: &str,
        item_name: &str,
        item_cost: f64,
    ) -> Result<(), ApiError> {
        self.mutate(Endpoint::UpdateItem {
            item_id: item_id.to_string(),
            item_name: item_name.to_string(),
            item_cost,
        })
        .await
    }

    pub async fn delete_item(&self, item_id: &str) -> Result<(), ApiError> {
        self.mutate(Endpoint::DeleteItem {
            item_id: item_id.to_string(),
        })
        .await
    }

    pub async fn update_receipt_date(
        &self,
        receipt_id: &str,
        new_date: &str,
    ) -> Result<(), ApiError> {
        self.mutate(Endpoint::UpdateReceiptDate {
            receipt_id: receipt_id.to_string(),
            new_date: new_date.to_string(),
        })
        .await
    }

    pub async fn delete_receipt(
        &self,
        receipt_id: &str,
        purchase_date: Option<&str>,
    ) -> Result<(), ApiError> {
        self.mutate(Endpoint::DeleteReceipt {
            receipt_id: receipt_id.to_string(),
            purchase_date: purchase_date.map(str::to_string),
        })
        .await
    }

    pub async fn get_user_item_stats(
        &self,
        limit: u32,
        next_token: Option<String>,
        period: Option<PeriodFilter>,
        category: Option<String>,
    ) -> Result<Paginated<UserItemStats>, ApiError> {
        self.fetch(Endpoint::GetUserItemStats {
            limit,
            next_token,
            period: period.map(|p| p.encode()),
            category,
        })
        .await
    }

    pub async fn get_user_summary_stats(
        &self,
        period: Option<PeriodFilter>,
    ) -> Result<UserSummaryStats, ApiError> {
        self.fetch(Endpoint::GetUserSummaryStats {
            period: period.map(|p| p.encode()),
        })
        .await
    }

    pub async fn get_user_category_stats(
        &self,
        period: Option<PeriodFilter>,
    ) -> Result<UserCategoryStats, ApiError> {
        self.fetch(Endpoint::GetUserCategoryStats {
            period: period.map(|p| p.encode()),
        })
        .await
    }

    pub async fn get_global_item_stats(&self, item_name: &str) -> Result<GlobalItemStats, ApiError> {
        self.fetch(Endpoint::GetGlobalItemStats {
            item_name: item_name.to_string(),
        })
        .await
    }

    pub async fn upload_document(
        &self,
        file: web_sys::File,
        doc_type: &str,
    ) -> Result<UploadResponse, ApiError> {
        let value = self.transport.upload(file, doc_type.to_string()).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    use super::*;

    /// Fake transport that records every descriptor it is handed.
    struct RecordingTransport {
        sent: RefCell<Vec<Endpoint>>,
        response: Value,
    }

    impl RecordingTransport {
        fn new(response: Value) -> Rc<Self> {
            Rc::new(RecordingTransport {
                sent: RefCell::new(Vec::new()),
                response,
            })
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, endpoint: &Endpoint) -> Result<Value, ApiError> {
            self.sent.borrow_mut().push(endpoint.clone());
            Ok(self.response.clone())
        }

        async fn upload(
            &self,
            _file: web_sys::File,
            _doc_type: String,
        ) -> Result<Value, ApiError> {
            Ok(self.response.clone())
        }
    }

    #[test]
    fn confirm_delete_issues_exactly_one_delete_with_the_target_id() {
        let transport = RecordingTransport::new(json!({}));
        let client = ApiClient::new(transport.clone());
        block_on(client.delete_item("fixture-item-0-2")).expect("delete succeeds");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Endpoint::DeleteItem {
                item_id: "fixture-item-0-2".to_string()
            }
        );
    }

    #[test]
    fn receipt_delete_carries_its_date_bucket() {
        let transport = RecordingTransport::new(json!({}));
        let client = ApiClient::new(transport.clone());
        block_on(client.delete_receipt("r-1", Some("2025-11-01"))).expect("delete succeeds");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Endpoint::DeleteReceipt {
                receipt_id: "r-1".to_string(),
                purchase_date: Some("2025-11-01".to_string()),
            }
        );
    }

    #[test]
    fn period_filters_pass_through_unreinterpreted() {
        let transport = RecordingTransport::new(json!({ "items": [], "hasMore": false }));
        let client = ApiClient::new(transport.clone());
        block_on(client.get_user_item_stats(
            20,
            Some("opaque-token".to_string()),
            Some(PeriodFilter::Month {
                year: 2024,
                month: 3,
            }),
            Some("Dairy".to_string()),
        ))
        .expect("stats fetch succeeds");

        let sent = transport.sent.borrow();
        assert_eq!(
            sent[0],
            Endpoint::GetUserItemStats {
                limit: 20,
                next_token: Some("opaque-token".to_string()),
                period: Some("2024-03".to_string()),
                category: Some("Dairy".to_string()),
            }
        );
    }

    #[test]
    fn status_errors_surface_with_their_code() {
        struct FailingTransport;

        #[async_trait(?Send)]
        impl Transport for FailingTransport {
            async fn send(&self, _endpoint: &Endpoint) -> Result<Value, ApiError> {
                Err(ApiError::Status(503))
            }
            async fn upload(
                &self,
                _file: web_sys::File,
                _doc_type: String,
            ) -> Result<Value, ApiError> {
                Err(ApiError::Status(503))
            }
        }

        let client = ApiClient::new(Rc::new(FailingTransport));
        let err = block_on(client.get_purchases("2025-11-01")).expect_err("must fail");
        assert_eq!(err, ApiError::Status(503));
        assert_eq!(err.to_string(), "API Error: 503");
    }

    #[test]
    fn typed_decoding_of_fixture_payloads() {
        let client = ApiClient::new(Rc::new(FixtureTransport::new(0)));

        let week = block_on(client.get_purchases("2025-11-01")).expect("week parses");
        assert_eq!(week.week_start, "2025-11-01");
        assert!((week.total_amount - 120.87).abs() < 1e-9);

        match block_on(client.get_summary(2025, None)).expect("yearly parses") {
            Summary::Yearly(y) => assert_eq!(y.summaries.len(), 5),
            Summary::Monthly(_) => panic!("yearly payload classified as monthly"),
        }
        match block_on(client.get_summary(2025, Some(11))).expect("monthly parses") {
            Summary::Monthly(m) => assert_eq!(m.month, 11),
            Summary::Yearly(_) => panic!("monthly payload classified as yearly"),
        }

        let stats = block_on(client.get_user_summary_stats(None)).expect("summary stats parse");
        assert_eq!(stats.top_items.len(), 5);

        let categories =
            block_on(client.get_user_category_stats(Some(PeriodFilter::CurrentYear)))
                .expect("category stats parse");
        assert_eq!(categories.categories.len(), 3);

        let global = block_on(client.get_global_item_stats("Coffee Beans")).expect("global parses");
        assert_eq!(global.item_name, "Coffee Beans");
    }

    #[test]
    fn fixture_upload_payload_derives_the_documented_total() {
        let response: crate::types::UploadResponse =
            serde_json::from_value(fixtures::upload_response()).expect("upload fixture parses");
        assert!((response.total_cost() - 15.99).abs() < 1e-9);
    }
}
