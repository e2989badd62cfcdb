//! Fixed demo datasets served when the store is unconfigured, unreachable,
//! or empty.
//!
//! All data in this module is hardcoded and illustrative. The constructors
//! return fresh values on every call but always the same values, so two
//! degraded responses are deep-equal and the dashboard may cache or diff
//! them freely.

use indexmap::IndexMap;

use super::types::{
    CompetitorShare, Drug, MarketStats, PricePoint, PricePrediction, RegulatoryUpdate,
};

/// The demo drug catalog: one representative product per headline category.
pub fn demo_catalog() -> Vec<Drug> {
    vec![
        demo_drug(
            "1",
            "Paracetamol 500mg",
            "Acetaminophen",
            "Cipla Ltd",
            "Analgesic",
            "Non-opioid analgesic",
            "500mg",
            DemoPricing {
                current: 2.50,
                launch: 2.00,
                mrp: 25.00,
                retail: 22.50,
                wholesale: 20.00,
                cost: 15.00,
            },
            15.2,
            50_000,
            &["USA", "UK", "Germany", "Australia"],
            &[
                ("2020-01", 2.00, 45_000),
                ("2020-06", 2.10, 46_000),
                ("2021-01", 2.20, 47_000),
                ("2021-06", 2.30, 48_000),
                ("2022-01", 2.40, 49_000),
                ("2022-06", 2.50, 50_000),
            ],
            &[
                ("2025-01", 2.60, 0.95),
                ("2025-06", 2.70, 0.92),
                ("2026-01", 2.80, 0.88),
            ],
            &[
                ("Sun Pharma", 12.5, 2.45),
                ("Dr. Reddy's", 10.8, 2.55),
                ("Lupin", 8.3, 2.40),
            ],
        ),
        demo_drug(
            "2",
            "Metformin 500mg",
            "Metformin Hydrochloride",
            "Sun Pharma",
            "Antidiabetic",
            "Biguanide",
            "500mg",
            DemoPricing {
                current: 3.20,
                launch: 2.80,
                mrp: 32.00,
                retail: 29.00,
                wholesale: 26.00,
                cost: 18.00,
            },
            18.7,
            82_000,
            &["USA", "Brazil", "South Africa", "UK"],
            &[
                ("2020-01", 2.80, 70_000),
                ("2021-01", 2.95, 74_000),
                ("2022-01", 3.05, 78_000),
                ("2023-01", 3.20, 82_000),
            ],
            &[
                ("2025-01", 3.35, 0.94),
                ("2025-06", 3.45, 0.91),
                ("2026-01", 3.60, 0.87),
            ],
            &[
                ("USV Ltd", 14.2, 3.10),
                ("Cipla Ltd", 11.6, 3.30),
                ("Zydus Lifesciences", 9.1, 3.15),
            ],
        ),
        demo_drug(
            "3",
            "Atorvastatin 10mg",
            "Atorvastatin Calcium",
            "Dr. Reddy's Laboratories",
            "Cardiovascular",
            "HMG-CoA reductase inhibitor",
            "10mg",
            DemoPricing {
                current: 5.80,
                launch: 5.00,
                mrp: 58.00,
                retail: 52.00,
                wholesale: 47.00,
                cost: 31.00,
            },
            11.4,
            64_000,
            &["USA", "Germany", "Japan"],
            &[
                ("2020-01", 5.00, 55_000),
                ("2021-01", 5.25, 58_000),
                ("2022-01", 5.55, 61_000),
                ("2023-01", 5.80, 64_000),
            ],
            &[
                ("2025-01", 6.05, 0.93),
                ("2025-06", 6.25, 0.90),
                ("2026-01", 6.50, 0.86),
            ],
            &[
                ("Ranbaxy", 13.8, 5.65),
                ("Lupin", 10.2, 5.95),
                ("Torrent Pharma", 7.9, 5.60),
            ],
        ),
        demo_drug(
            "4",
            "Pantoprazole 40mg",
            "Pantoprazole Sodium",
            "Lupin Ltd",
            "Gastrointestinal",
            "Proton pump inhibitor",
            "40mg",
            DemoPricing {
                current: 4.10,
                launch: 3.60,
                mrp: 41.00,
                retail: 37.00,
                wholesale: 33.00,
                cost: 22.00,
            },
            9.6,
            38_000,
            &["UK", "Australia", "Kenya"],
            &[
                ("2020-01", 3.60, 31_000),
                ("2021-01", 3.75, 33_000),
                ("2022-01", 3.95, 36_000),
                ("2023-01", 4.10, 38_000),
            ],
            &[
                ("2025-01", 4.30, 0.95),
                ("2025-06", 4.45, 0.92),
                ("2026-01", 4.60, 0.88),
            ],
            &[
                ("Alkem Labs", 12.1, 4.00),
                ("Cadila", 9.4, 4.20),
                ("Mankind Pharma", 8.0, 3.95),
            ],
        ),
    ]
}

/// The demo market statistics mapping, keyed like store-derived stats.
pub fn demo_market_stats() -> MarketStats {
    let entries = [
        ("total_market_size", "50.7 Billion USD"),
        ("growth_rate", "12.3%"),
        ("export_value", "24.4 Billion USD"),
        ("total_drugs", "3,000+"),
        ("foreign_investment", "8.2 Billion USD"),
        ("regulatory_approvals", "450+"),
        ("manufacturing_units", "3,000+"),
        ("employment_generated", "4.7 Million"),
        ("global_ranking", "3rd Largest"),
        ("generic_market_share", "71%"),
    ];
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<IndexMap<_, _>>()
}

/// The demo regulatory bulletins.
pub fn demo_regulatory_updates() -> Vec<RegulatoryUpdate> {
    vec![
        RegulatoryUpdate {
            title: "Drug Price Control Order (DPCO) 2013".to_string(),
            description: "Regulates prices of essential medicines in India".to_string(),
            link: "https://cdsco.gov.in/opencms/opencms/en/Drugs/".to_string(),
            category: "Pricing".to_string(),
            last_updated: "2024-03-01".to_string(),
            impact: "High".to_string(),
            applicability: "All pharmaceutical companies".to_string(),
        },
        RegulatoryUpdate {
            title: "Foreign Direct Investment (FDI) Policy".to_string(),
            description: "100% FDI allowed in pharmaceutical sector under automatic route"
                .to_string(),
            link: "https://dpiit.gov.in/".to_string(),
            category: "Investment".to_string(),
            last_updated: "2023-11-20".to_string(),
            impact: "Medium".to_string(),
            applicability: "All pharmaceutical companies".to_string(),
        },
        RegulatoryUpdate {
            title: "Central Drugs Standard Control Organization (CDSCO)".to_string(),
            description: "National regulatory authority for pharmaceuticals".to_string(),
            link: "https://cdsco.gov.in/".to_string(),
            category: "Regulatory".to_string(),
            last_updated: "2024-01-15".to_string(),
            impact: "High".to_string(),
            applicability: "All pharmaceutical companies".to_string(),
        },
    ]
}

/// The demo category list.
pub fn demo_categories() -> Vec<String> {
    ["Analgesic", "Antidiabetic", "Cardiovascular", "Gastrointestinal"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

struct DemoPricing {
    current: f64,
    launch: f64,
    mrp: f64,
    retail: f64,
    wholesale: f64,
    cost: f64,
}

#[allow(clippy::too_many_arguments)]
fn demo_drug(
    id: &str,
    name: &str,
    generic_name: &str,
    manufacturer: &str,
    category: &str,
    therapeutic_class: &str,
    strength: &str,
    pricing: DemoPricing,
    market_share: f64,
    monthly_volume: u64,
    export_markets: &[&str],
    history: &[(&str, f64, u64)],
    predictions: &[(&str, f64, f64)],
    competitors: &[(&str, f64, f64)],
) -> Drug {
    Drug {
        id: id.to_string(),
        name: name.to_string(),
        generic_name: generic_name.to_string(),
        manufacturer: manufacturer.to_string(),
        category: category.to_string(),
        therapeutic_class: therapeutic_class.to_string(),
        dosage_form: "Tablet".to_string(),
        strength: strength.to_string(),
        pack_size: "10 tablets".to_string(),
        approval_date: "2020-01-15".to_string(),
        current_price: pricing.current,
        launch_price: pricing.launch,
        mrp: pricing.mrp,
        retail_price: pricing.retail,
        wholesale_price: pricing.wholesale,
        manufacturing_cost: pricing.cost,
        market_share,
        monthly_volume,
        regulatory_status: "Approved".to_string(),
        patent_status: "Generic".to_string(),
        export_markets: export_markets.iter().map(|m| m.to_string()).collect(),
        price_history: history
            .iter()
            .map(|(date, price, volume)| PricePoint {
                date: date.to_string(),
                price: *price,
                volume: *volume,
            })
            .collect(),
        predicted_prices: predictions
            .iter()
            .map(|(date, price, confidence)| PricePrediction {
                date: date.to_string(),
                price: *price,
                confidence: *confidence,
            })
            .collect(),
        competitor_analysis: competitors
            .iter()
            .map(|(company, market_share, price)| CompetitorShare {
                company: company.to_string(),
                market_share: *market_share,
                price: *price,
            })
            .collect(),
    }
}
