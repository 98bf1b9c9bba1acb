//! Simulated REST ledger serving vouchers one page at a time.

use std::sync::Arc;
use std::time::Duration;

use datacard::pagination::total_pages;
use datacard::Row;

use crate::farm::{to_row, Voucher, VoucherStatus};

/// One page of the ledger as the server returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherPage {
    /// The page actually served; out-of-range requests are clamped.
    pub page: usize,
    pub rows: Vec<Row>,
    pub total_records: usize,
}

#[derive(Debug, Clone)]
pub struct VoucherApi {
    ledger: Arc<Vec<Voucher>>,
    latency: Duration,
}

impl VoucherApi {
    pub fn new(ledger: Vec<Voucher>, latency: Duration) -> Self {
        Self {
            ledger: Arc::new(ledger),
            latency,
        }
    }

    /// Fetch `page` (1-based) of `per_page` vouchers, optionally filtered by
    /// status.
    pub async fn fetch_page(
        &self,
        page: usize,
        per_page: usize,
        status: Option<VoucherStatus>,
    ) -> VoucherPage {
        tokio::time::sleep(self.latency).await;

        let matching: Vec<&Voucher> = self
            .ledger
            .iter()
            .filter(|v| status.is_none_or(|s| v.status == s))
            .collect();
        let total_records = matching.len();
        let page = page.clamp(1, total_pages(total_records, per_page));

        let rows = matching
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .map(|v| to_row(*v))
            .collect::<Vec<_>>();

        log::debug!(
            "served voucher page {} ({} rows, {} total, filter {:?})",
            page,
            rows.len(),
            total_records,
            status
        );

        VoucherPage {
            page,
            rows,
            total_records,
        }
    }
}
