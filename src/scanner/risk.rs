//! Pair risk heuristic.
//!
//! A pure, stateless mapping from one pair record to qualitative flags
//! and an overall severity bucket. This is a presentation heuristic,
//! not a statistically grounded risk model: independent boolean
//! predicates, combined by simple counting. Any danger-level predicate
//! makes the overall severity high; otherwise two or more
//! non-informational predicates make it medium; otherwise low.

use serde::Serialize;

use crate::config::RiskThresholds;
use crate::scanner::types::DexPair;

/// Label substrings that mark a pair as flagged outright.
const FLAGGED_LABEL_TERMS: [&str; 4] = ["honeypot", "scam", "rug", "blacklist"];

/// Severity of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagLevel {
    Danger,
    Warn,
    Info,
}

/// Overall severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One triggered flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskItem {
    pub level: FlagLevel,
    pub text: &'static str,
}

/// The full heuristic result for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub items: Vec<RiskItem>,
    pub overall: RiskLevel,
}

/// Evaluate the heuristic for one pair.
///
/// `now_ms` is passed in (milliseconds since the epoch) so the function
/// stays pure and testable.
pub fn compute_risk(pair: &DexPair, thresholds: &RiskThresholds, now_ms: u64) -> RiskReport {
    let mut items = Vec::new();

    let labels = pair
        .labels
        .as_deref()
        .unwrap_or_default()
        .join(" ")
        .to_lowercase();
    if FLAGGED_LABEL_TERMS.iter().any(|term| labels.contains(term)) {
        items.push(RiskItem {
            level: FlagLevel::Danger,
            text: "Flagged label (honeypot/scam)",
        });
    }

    let liquidity = pair
        .liquidity
        .as_ref()
        .and_then(|l| l.usd)
        .unwrap_or(0.0);
    if liquidity > 0.0 && liquidity < thresholds.min_liquidity_usd {
        items.push(RiskItem {
            level: FlagLevel::Danger,
            text: "Very low liquidity",
        });
    }

    if let Some(created_ms) = pair.pair_created_at {
        let age_hours = now_ms.saturating_sub(created_ms) as f64 / 3.6e6;
        if age_hours < thresholds.new_pair_age_hours {
            items.push(RiskItem {
                level: FlagLevel::Warn,
                text: "New pair",
            });
        }
    }

    let h24 = pair.txns.as_ref().and_then(|t| t.get("h24"));
    let buys = h24.and_then(|c| c.buys).unwrap_or(0);
    let sells = h24.and_then(|c| c.sells).unwrap_or(0);
    if sells as f64 > buys as f64 * thresholds.sell_buy_ratio && sells >= thresholds.min_sells {
        items.push(RiskItem {
            level: FlagLevel::Warn,
            text: "Heavy sell pressure (24h)",
        });
    }

    let change_24h = pair
        .price_change
        .as_ref()
        .and_then(|c| c.get("h24"))
        .copied()
        .unwrap_or(0.0);
    if change_24h.abs() >= thresholds.volatility_pct {
        items.push(RiskItem {
            level: FlagLevel::Warn,
            text: "Extreme 24h volatility",
        });
    }

    let no_website = !pair
        .info
        .as_ref()
        .and_then(|i| i.websites.as_ref())
        .is_some_and(|w| !w.is_empty());
    let no_socials = !pair
        .info
        .as_ref()
        .and_then(|i| i.socials.as_ref())
        .is_some_and(|s| !s.is_empty());
    if no_website && no_socials {
        items.push(RiskItem {
            level: FlagLevel::Info,
            text: "No website/socials",
        });
    }

    let has_danger = items.iter().any(|i| i.level == FlagLevel::Danger);
    let warning_count = items.iter().filter(|i| i.level != FlagLevel::Info).count();
    let overall = if has_danger {
        RiskLevel::High
    } else if warning_count >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskReport { items, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::types::{Liquidity, PairInfo, Social, TxnCounts, Website};
    use std::collections::BTreeMap;

    const NOW_MS: u64 = 1_700_000_000_000;

    fn thresholds() -> RiskThresholds {
        RiskThresholds::default()
    }

    fn with_presence(mut pair: DexPair) -> DexPair {
        // Website and socials so the info flag stays quiet.
        pair.info = Some(PairInfo {
            image_url: None,
            websites: Some(vec![Website {
                url: Some("https://example.org".into()),
            }]),
            socials: Some(vec![Social {
                platform: Some("x".into()),
                handle: Some("team".into()),
            }]),
        });
        pair
    }

    #[test]
    fn rug_label_is_high_regardless_of_other_fields() {
        let mut pair = with_presence(DexPair::default());
        pair.labels = Some(vec!["Verified".into(), "RUG".into()]);
        pair.liquidity = Some(Liquidity {
            usd: Some(1_000_000.0),
            ..Liquidity::default()
        });
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::High);
    }

    #[test]
    fn low_liquidity_is_danger_but_zero_is_not() {
        let mut pair = with_presence(DexPair::default());
        pair.liquidity = Some(Liquidity {
            usd: Some(1_999.0),
            ..Liquidity::default()
        });
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::High);

        pair.liquidity = Some(Liquidity {
            usd: Some(0.0),
            ..Liquidity::default()
        });
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::Low);
    }

    #[test]
    fn two_warnings_are_medium() {
        let mut pair = with_presence(DexPair::default());
        // New pair + extreme volatility, no danger.
        pair.pair_created_at = Some(NOW_MS - 3_600_000);
        let mut change = BTreeMap::new();
        change.insert("h24".to_string(), 75.0);
        pair.price_change = Some(change);
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::Medium);
        assert_eq!(report.items.len(), 2);
    }

    #[test]
    fn one_warning_is_low() {
        let mut pair = with_presence(DexPair::default());
        pair.pair_created_at = Some(NOW_MS - 3_600_000);
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::Low);
    }

    #[test]
    fn info_flag_does_not_count_toward_medium() {
        // No website/socials plus one warning: still low.
        let mut pair = DexPair::default();
        pair.pair_created_at = Some(NOW_MS - 3_600_000);
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.overall, RiskLevel::Low);
        assert!(report
            .items
            .iter()
            .any(|i| i.level == FlagLevel::Info));
    }

    #[test]
    fn sell_pressure_needs_minimum_sells() {
        let mut pair = with_presence(DexPair::default());
        let mut txns = BTreeMap::new();
        txns.insert(
            "h24".to_string(),
            TxnCounts {
                buys: Some(2),
                sells: Some(9),
            },
        );
        pair.txns = Some(txns.clone());
        // 9 sells is below the minimum even though ratio is exceeded.
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert!(report.items.is_empty());

        txns.insert(
            "h24".to_string(),
            TxnCounts {
                buys: Some(2),
                sells: Some(10),
            },
        );
        pair.txns = Some(txns);
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].level, FlagLevel::Warn);
    }

    #[test]
    fn future_created_at_counts_as_new() {
        let mut pair = with_presence(DexPair::default());
        pair.pair_created_at = Some(NOW_MS + 10_000);
        let report = compute_risk(&pair, &thresholds(), NOW_MS);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].text, "New pair");
    }
}
