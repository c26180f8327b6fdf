//! Airdrop planning.
//!
//! Turns a pasted recipient list into a distribution plan: parsed rows,
//! a skip count for malformed lines, the grand total, and the grouped
//! transfer transactions ready for signing. Parsing is tolerant about
//! separators since lists arrive from spreadsheets and chat messages.

use serde::Serialize;

use crate::ledger::types::{Address, AssetId};
use crate::ledger::client::SuggestedParams;
use crate::txn::{AtomicGroup, GroupError, Transaction, MAX_GROUP_SIZE};

/// One parsed recipient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirdropRow {
    pub address: Address,
    /// Amount in base units.
    pub amount: u64,
}

/// The parsed distribution list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AirdropPlan {
    pub rows: Vec<AirdropRow>,
    /// Lines that failed to parse and were dropped.
    pub skipped: usize,
    /// Sum of all row amounts in base units.
    pub total: u64,
    /// Number of atomic groups the transfers will occupy.
    pub group_count: usize,
}

/// Parse a recipient list, one `address amount` pair per line.
///
/// Commas, semicolons, and whitespace all separate the two fields.
/// Malformed lines (bad address, bad amount, zero amount, missing
/// field) are skipped and counted rather than failing the whole list.
pub fn parse_rows(input: &str) -> AirdropPlan {
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    let mut total = 0u64;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let parsed = match (fields.next(), fields.next()) {
            (Some(addr), Some(amount)) => addr
                .parse::<Address>()
                .ok()
                .zip(amount.parse::<u64>().ok()),
            _ => None,
        };
        match parsed {
            Some((address, amount)) if amount > 0 => {
                total = total.saturating_add(amount);
                rows.push(AirdropRow { address, amount });
            }
            _ => skipped += 1,
        }
    }

    let group_count = rows.len().div_ceil(MAX_GROUP_SIZE);
    AirdropPlan {
        rows,
        skipped,
        total,
        group_count,
    }
}

/// Build the transfer groups for a plan.
///
/// Transfers are chunked into maximal atomic groups; each group settles
/// all-or-nothing, independently of the others.
pub fn build_transfers(
    sender: Address,
    asset: AssetId,
    rows: &[AirdropRow],
    params: &SuggestedParams,
    flat_fee: u64,
) -> Result<Vec<Vec<Transaction>>, GroupError> {
    let mut groups = Vec::with_capacity(rows.len().div_ceil(MAX_GROUP_SIZE));
    for chunk in rows.chunks(MAX_GROUP_SIZE) {
        let mut group = AtomicGroup::new();
        for row in chunk {
            group.add(Transaction::asset_transfer(
                sender,
                row.address,
                row.amount,
                asset,
                params,
                flat_fee,
            ))?;
        }
        groups.push(group.seal()?);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> String {
        Address([byte; 32]).to_string()
    }

    fn params() -> SuggestedParams {
        SuggestedParams {
            fee: 0,
            min_fee: 1_000,
            genesis_id: "localnet-v1".to_string(),
            genesis_hash: "Z2VuZXNpcw==".to_string(),
            last_round: 500,
        }
    }

    #[test]
    fn separators_are_interchangeable() {
        let input = format!(
            "{} 100\n{},200\n{}  ;  300\n",
            addr(1),
            addr(2),
            addr(3)
        );
        let plan = parse_rows(&input);
        assert_eq!(plan.rows.len(), 3);
        assert_eq!(plan.skipped, 0);
        assert_eq!(plan.total, 600);
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let input = format!(
            "{} 100\nnot-an-address 50\n{} zero\n{} 0\n\n{} 25",
            addr(1),
            addr(2),
            addr(3),
            addr(4)
        );
        let plan = parse_rows(&input);
        assert_eq!(plan.rows.len(), 2);
        assert_eq!(plan.skipped, 3);
        assert_eq!(plan.total, 125);
    }

    #[test]
    fn empty_input_is_an_empty_plan() {
        let plan = parse_rows("\n  \n");
        assert!(plan.rows.is_empty());
        assert_eq!(plan.skipped, 0);
        assert_eq!(plan.group_count, 0);
    }

    #[test]
    fn transfers_are_chunked_into_atomic_groups() {
        let rows: Vec<AirdropRow> = (0..MAX_GROUP_SIZE as u8 + 3)
            .map(|i| AirdropRow {
                address: Address([i + 1; 32]),
                amount: 10,
            })
            .collect();
        let groups =
            build_transfers(Address([99; 32]), AssetId(7), &rows, &params(), 1_000).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), MAX_GROUP_SIZE);
        assert_eq!(groups[1].len(), 3);
        // Full group stamped, each group independently.
        assert!(groups[0].iter().all(|t| t.group.is_some()));
        assert_ne!(groups[0][0].group, groups[1][0].group);
    }

    #[test]
    fn group_count_matches_chunking() {
        let input: String = (1..=17u8)
            .map(|i| format!("{} 5\n", addr(i)))
            .collect();
        let plan = parse_rows(&input);
        assert_eq!(plan.rows.len(), 17);
        assert_eq!(plan.group_count, 2);
    }
}
