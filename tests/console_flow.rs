//! Console flows against a scriptable ledger node.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use algoforge::config::AlgodConfig;
use algoforge::console::{AssetCreateRequest, AssetCreator, BurnConsole, ConsoleError};
use algoforge::ledger::client::AlgodClient;
use algoforge::ledger::types::{AppId, AssetId, LedgerError};
use algoforge::wallet::{LocalSigner, WalletError, WalletSession};

use common::{bytes_entry, return_log, start_mock_node, uint_entry, NodeScript, TEST_SEED};

const APP_ID: u64 = 1013;
const ASSET_ID: u64 = 7;

async fn console_against(script: &Arc<NodeScript>, connect: bool) -> BurnConsole {
    let url = start_mock_node(Arc::clone(script)).await;
    let client = AlgodClient::new(&AlgodConfig {
        url,
        ..AlgodConfig::default()
    })
    .unwrap();
    let session = Arc::new(WalletSession::new());
    if connect {
        session.connect(Arc::new(LocalSigner::from_hex_seed(TEST_SEED).unwrap()));
    }
    BurnConsole::new(client, session, AppId(APP_ID), AssetId(ASSET_ID), 1_000, 4)
}

fn seed_global(script: &NodeScript) {
    *script.global.lock().unwrap() = vec![
        uint_entry("is_initialized", 1),
        uint_entry("burn_asset", ASSET_ID),
        uint_entry("total_burned", 900),
        uint_entry("total_shares", 450),
        uint_entry("reward_pool", 100_000),
        bytes_entry("admin", &[5u8; 32]),
    ];
}

#[tokio::test]
async fn burn_settles_and_refreshes_exactly_once() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.local.lock().unwrap() = Some(vec![uint_entry("shares", 455)]);
    *script.logs.lock().unwrap() = vec![return_log(455)];

    let console = console_against(&script, true).await;
    let outcome = console.burn("5", None).await.unwrap();

    assert_eq!(outcome.returned, Some(455));
    assert_eq!(outcome.state.app.total_burned, 900);
    assert_eq!(outcome.state.position.as_ref().unwrap().shares, 455);
    assert_eq!(script.submissions.load(Ordering::SeqCst), 1);
    // One settled action means one refresh: one global read, one
    // position read, nothing more.
    assert_eq!(script.state_reads.load(Ordering::SeqCst), 1);
    assert_eq!(script.position_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_amounts_never_touch_the_node() {
    let script = NodeScript::new();
    let console = console_against(&script, true).await;

    for bad in ["", "  ", "0", "nope"] {
        assert!(matches!(
            console.burn(bad, None).await.unwrap_err(),
            ConsoleError::Validation(_)
        ));
        assert!(matches!(
            console.fund(bad).await.unwrap_err(),
            ConsoleError::Validation(_)
        ));
    }
    assert_eq!(script.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn claim_with_zero_shares_rejects_after_the_position_read() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.local.lock().unwrap() = Some(vec![uint_entry("shares", 0)]);

    let console = console_against(&script, true).await;
    assert!(matches!(
        console.claim().await.unwrap_err(),
        ConsoleError::NoShares
    ));
    // The ledger, not cached state, decided: exactly one position read
    // and no submission.
    assert_eq!(script.position_reads.load(Ordering::SeqCst), 1);
    assert_eq!(script.submissions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn not_opted_in_reads_as_absence() {
    let script = NodeScript::new();
    seed_global(&script);
    // local = None answers 404.

    let console = console_against(&script, true).await;
    let state = console.refresh().await.unwrap();
    let position = state.position.unwrap();
    assert!(!position.opted_in);
    assert_eq!(position.shares, 0);
}

#[tokio::test]
async fn claim_succeeds_with_shares() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.local.lock().unwrap() = Some(vec![uint_entry("shares", 450)]);
    *script.logs.lock().unwrap() = vec![return_log(100_000)];

    let console = console_against(&script, true).await;
    let outcome = console.claim().await.unwrap();
    assert_eq!(outcome.returned, Some(100_000));
    assert_eq!(script.submissions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ledger_rejection_carries_the_node_message_verbatim() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.reject.lock().unwrap() = Some("logic eval error: assert failed pc=42".to_string());

    let console = console_against(&script, true).await;
    let err = console.fund("1000").await.unwrap_err();
    match err {
        ConsoleError::Ledger(LedgerError::Rejected(message)) => {
            assert_eq!(message, "logic eval error: assert failed pc=42");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(script.submissions.load(Ordering::SeqCst), 0);
    // A submit-time failure also refreshes the view once.
    assert_eq!(script.state_reads.load(Ordering::SeqCst), 1);
    assert_eq!(script.position_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exhausted_round_budget_is_a_timeout_and_still_refreshes() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.local.lock().unwrap() = Some(vec![uint_entry("shares", 5)]);
    // The node accepts the submission but never confirms it.
    *script.confirmed.lock().unwrap() = None;

    let console = console_against(&script, true).await;
    let err = console.fund("1000").await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Ledger(LedgerError::SettlementTimeout(4))
    ));
    assert_eq!(script.submissions.load(Ordering::SeqCst), 1);
    // The failed settlement still triggers exactly one refresh.
    assert_eq!(script.state_reads.load(Ordering::SeqCst), 1);
    assert_eq!(script.position_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn actions_without_a_wallet_fail_before_the_node() {
    let script = NodeScript::new();
    let console = console_against(&script, false).await;

    assert!(matches!(
        console.burn("5", None).await.unwrap_err(),
        ConsoleError::Wallet(WalletError::NotConnected)
    ));
    assert_eq!(script.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn opt_in_is_a_noop_when_already_opted_in() {
    let script = NodeScript::new();
    seed_global(&script);
    *script.local.lock().unwrap() = Some(vec![uint_entry("shares", 1)]);

    let console = console_against(&script, true).await;
    let outcome = console.opt_in().await.unwrap();
    assert!(outcome.txid.is_none());
    assert_eq!(script.submissions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn asset_creation_reports_the_new_asset_id() {
    let script = NodeScript::new();
    *script.asset_index.lock().unwrap() = Some(4242);

    let url = start_mock_node(Arc::clone(&script)).await;
    let client = AlgodClient::new(&AlgodConfig {
        url,
        ..AlgodConfig::default()
    })
    .unwrap();
    let session = Arc::new(WalletSession::new());
    session.connect(Arc::new(LocalSigner::from_hex_seed(TEST_SEED).unwrap()));

    let creator = AssetCreator::new(client, 1_000, 4);
    let created = creator
        .create(
            &session,
            AssetCreateRequest {
                asset_name: "My Token".to_string(),
                unit_name: "MTK".to_string(),
                supply: 1_000_000,
                decimals: 6,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.asset_id, Some(4242));
    assert_eq!(script.submissions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn asset_creation_validates_before_the_node() {
    let script = NodeScript::new();
    let url = start_mock_node(Arc::clone(&script)).await;
    let client = AlgodClient::new(&AlgodConfig {
        url,
        ..AlgodConfig::default()
    })
    .unwrap();
    let session = Arc::new(WalletSession::new());
    session.connect(Arc::new(LocalSigner::from_hex_seed(TEST_SEED).unwrap()));

    let creator = AssetCreator::new(client, 1_000, 4);
    let err = creator
        .create(
            &session,
            AssetCreateRequest {
                asset_name: "My Token".to_string(),
                unit_name: "WAYTOOLONG".to_string(),
                supply: 1,
                decimals: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert_eq!(script.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn opt_in_submits_when_not_yet_opted_in() {
    let script = NodeScript::new();
    seed_global(&script);
    // Not opted in for the guard read; the settled refresh then reads
    // whatever the node reports, still absent here.
    let console = console_against(&script, true).await;
    let outcome = console.opt_in().await.unwrap();
    assert!(outcome.txid.is_some());
    assert_eq!(script.submissions.load(Ordering::SeqCst), 1);
}
