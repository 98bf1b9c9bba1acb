//! Sample farm records: the flock register and the voucher ledger.
//!
//! Records are generated deterministically so every run shows the same data.

use chrono::{Days, NaiveDate};
use datacard::Row;
use serde::Serialize;
use serde_json::Value;

const HOUSES: [&str; 6] = ["North", "South", "East", "West", "Hillside", "Creek"];
const BREEDS: [&str; 5] = ["Ross 308", "Cobb 500", "Hubbard", "Lohmann Brown", "ISA Brown"];
const SUPPLIERS: [&str; 5] = [
    "Prairie Feed Co",
    "AgriVet Supplies",
    "Coastal Hatchery",
    "Greenfield Litter",
    "Valley Power & Gas",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlockStatus {
    Active,
    Quarantine,
    Sold,
}

impl FlockStatus {
    pub const ALL: [FlockStatus; 3] = [FlockStatus::Active, FlockStatus::Quarantine, FlockStatus::Sold];

    pub fn label(self) -> &'static str {
        match self {
            FlockStatus::Active => "active",
            FlockStatus::Quarantine => "quarantine",
            FlockStatus::Sold => "sold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flock {
    pub id: u32,
    pub name: String,
    pub house: String,
    pub breed: String,
    pub birds: u32,
    pub age_weeks: u32,
    pub status: FlockStatus,
    pub mortality_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    Pending,
    Approved,
    Paid,
    Void,
}

impl VoucherStatus {
    pub const ALL: [VoucherStatus; 4] = [
        VoucherStatus::Pending,
        VoucherStatus::Approved,
        VoucherStatus::Paid,
        VoucherStatus::Void,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VoucherStatus::Pending => "pending",
            VoucherStatus::Approved => "approved",
            VoucherStatus::Paid => "paid",
            VoucherStatus::Void => "void",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voucher {
    pub id: u32,
    pub number: String,
    pub supplier: String,
    pub issued: String,
    pub amount: f64,
    pub status: VoucherStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Generate `count` flocks.
pub fn flocks(count: usize) -> Vec<Flock> {
    (0..count)
        .map(|i| {
            let id = i as u32 + 1;
            let status = match i % 7 {
                3 => FlockStatus::Quarantine,
                5 | 6 => FlockStatus::Sold,
                _ => FlockStatus::Active,
            };
            Flock {
                id,
                name: format!("Flock {:03}", id),
                house: format!("{} {}", HOUSES[i % HOUSES.len()], i / HOUSES.len() + 1),
                breed: BREEDS[i % BREEDS.len()].to_string(),
                birds: 4_000 + (id * 1_237) % 18_000,
                age_weeks: 1 + (id * 5) % 70,
                status,
                mortality_pct: f64::from((id * 37) % 90) / 10.0,
                notes: (i % 4 == 0).then(|| format!("Vaccinated week {}", 1 + i % 3)),
            }
        })
        .collect()
}

/// Generate `count` vouchers, issued one per day.
pub fn vouchers(count: usize) -> Vec<Voucher> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 6);
    (0..count)
        .map(|i| {
            let id = i as u32 + 1;
            let issued = start
                .and_then(|d| d.checked_add_days(Days::new(i as u64)))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            Voucher {
                id,
                number: format!("VCH-{:04}", id),
                supplier: SUPPLIERS[i % SUPPLIERS.len()].to_string(),
                issued,
                amount: f64::from((id * 7_919) % 500_000) / 100.0,
                status: VoucherStatus::ALL[(i * 3 + i / 5) % VoucherStatus::ALL.len()],
                reference: (i % 3 != 2).then(|| format!("https://ledger.example/vch/{}", id)),
            }
        })
        .collect()
}

/// Convert a record to a table row through its serde form.
pub fn to_row<T: Serialize>(record: &T) -> Row {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Row::from(map),
        Ok(other) => {
            log::warn!("record serialized to a non-object: {}", other);
            Row::new()
        }
        Err(e) => {
            log::error!("failed to serialize record: {}", e);
            Row::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(flocks(20), flocks(20));
        assert_eq!(vouchers(20), vouchers(20));
    }

    #[test]
    fn test_flock_row_fields() {
        let flock = &flocks(1)[0];
        let row = to_row(flock);
        assert_eq!(row.display("name"), "Flock 001");
        assert_eq!(row.display("status"), "active");
        assert_eq!(row.display("notes"), "Vaccinated week 1");
    }

    #[test]
    fn test_missing_optional_field_is_absent() {
        let flock = &flocks(2)[1];
        let row = to_row(flock);
        assert!(row.get("notes").is_none());
        assert_eq!(row.display("notes"), datacard::PLACEHOLDER);
    }

    #[test]
    fn test_vouchers_issued_daily() {
        let ledger = vouchers(3);
        assert_eq!(ledger[0].issued, "2025-01-06");
        assert_eq!(ledger[2].issued, "2025-01-08");
        assert_eq!(ledger[2].reference, None);
    }

    #[test]
    fn test_every_status_appears() {
        let ledger = vouchers(40);
        for status in VoucherStatus::ALL {
            assert!(ledger.iter().any(|v| v.status == status), "{:?}", status);
        }
        let register = flocks(14);
        for status in FlockStatus::ALL {
            assert!(register.iter().any(|f| f.status == status), "{:?}", status);
        }
    }
}
