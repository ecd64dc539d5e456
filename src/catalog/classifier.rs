//! Static tagging of courier service codes.
//!
//! Service codes are matched against fixed substrings and exact values. A code
//! can raise several tags at once; derived fields resolve overlaps with the
//! precedence instant > next day > cargo > document > economy.

use serde::{Deserialize, Serialize};

/// Full `courier.service` codes that accept cash on delivery
pub const CASH_ON_DELIVERY_SERVICES: &[&str] = &[
    "jne.reg",
    "sicepat.reg",
    "jnt.ez",
    "idexpress.reg",
    "anteraja.reg",
    "sap.reg",
    "jdl.reg",
];

const INSTANT_CONTAINS: &[&str] = &["instant", "same_day"];
const INSTANT_EXACT: &[&str] = &["q9_same_day", "sds", "sdp"];
const NEXT_DAY_CONTAINS: &[&str] = &["next_day"];
const NEXT_DAY_EXACT: &[&str] = &["yes", "ons", "best", "one_pack", "ndp", "mdp"];
const CARGO_CONTAINS: &[&str] = &[
    "trucking", "jtr", "gokil", "big_pack", "idtruck", "cargo", "tronton", "fuso", "cdd", "engkel",
];
const CARGO_EXACT: &[&str] = &["paxel_big"];
const DOCUMENT_EXACT: &[&str] = &["docu_pack"];
const ECONOMY_EXACT: &[&str] = &["oke", "eko", "economy", "jumbo_ekonomi", "ecp", "hwp"];

/// Raw predicate results for one service code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceTags {
    pub instant: bool,
    pub next_day: bool,
    pub cargo: bool,
    pub document: bool,
    pub economy: bool,
}

impl ServiceTags {
    pub fn from_service_code(service_code: &str) -> Self {
        let code = service_code.to_lowercase();
        let contains = |needles: &[&str]| needles.iter().any(|n| code.contains(n));
        let exact = |values: &[&str]| values.iter().any(|v| code == *v);

        Self {
            instant: contains(INSTANT_CONTAINS) || exact(INSTANT_EXACT),
            next_day: contains(NEXT_DAY_CONTAINS) || exact(NEXT_DAY_EXACT),
            cargo: contains(CARGO_CONTAINS) || exact(CARGO_EXACT),
            document: exact(DOCUMENT_EXACT),
            economy: exact(ECONOMY_EXACT),
        }
    }

    /// Single category after applying precedence
    pub fn category(&self) -> ServiceCategory {
        if self.instant {
            ServiceCategory::Instant
        } else if self.next_day {
            ServiceCategory::NextDay
        } else if self.cargo {
            ServiceCategory::Cargo
        } else if self.document {
            ServiceCategory::Document
        } else if self.economy {
            ServiceCategory::Economy
        } else {
            ServiceCategory::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    Instant,
    NextDay,
    Cargo,
    Document,
    Economy,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Premium,
    Cargo,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    SameDay,
    NextDay,
    Cargo,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingType {
    Document,
    Cargo,
    Parcel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Hours,
    Days,
}

/// Descriptive metadata derived from a service code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    pub category: ServiceCategory,
    pub cash_on_delivery: bool,
    pub proof_of_delivery: bool,
    pub instant_waybill_id: bool,
    pub tier: Tier,
    pub service_type: ServiceType,
    pub shipping_type: ShippingType,
    pub duration_range: &'static str,
    pub duration_unit: DurationUnit,
}

/// Classify a service. Unknown codes get the regular/standard defaults.
pub fn classify(courier_code: &str, service_code: &str) -> ServiceProfile {
    let courier_code = courier_code.to_lowercase();
    let service_code = service_code.to_lowercase();
    let tags = ServiceTags::from_service_code(&service_code);
    let full_code = format!("{}.{}", courier_code, service_code);

    let tier = if tags.instant {
        Tier::Premium
    } else if tags.cargo {
        Tier::Cargo
    } else {
        Tier::Standard
    };

    let service_type = if tags.instant {
        ServiceType::SameDay
    } else if tags.next_day {
        ServiceType::NextDay
    } else if tags.cargo {
        ServiceType::Cargo
    } else {
        ServiceType::Regular
    };

    let shipping_type = if tags.document {
        ShippingType::Document
    } else if tags.cargo {
        ShippingType::Cargo
    } else {
        ShippingType::Parcel
    };

    let duration_range = match tags.category() {
        ServiceCategory::Instant => "1 - 3",
        ServiceCategory::NextDay => "1 - 1",
        ServiceCategory::Cargo => "2 - 7",
        ServiceCategory::Document => "1 - 3",
        ServiceCategory::Economy => "3 - 7",
        ServiceCategory::Regular => "1 - 3",
    };

    ServiceProfile {
        category: tags.category(),
        cash_on_delivery: CASH_ON_DELIVERY_SERVICES.contains(&full_code.as_str()),
        proof_of_delivery: tags.next_day || tags.instant,
        instant_waybill_id: tags.instant,
        tier,
        service_type,
        shipping_type,
        duration_range,
        duration_unit: if tags.instant {
            DurationUnit::Hours
        } else {
            DurationUnit::Days
        },
    }
}
