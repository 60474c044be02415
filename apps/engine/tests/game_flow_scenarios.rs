//! End-to-end scenarios through the public engine API, backed by the
//! in-memory store.

use std::sync::Arc;
use std::time::Duration;

use engine::domain::{ActionKind, GameStatus, Phase, PlayerStatus};
use engine::repos::GameStore;
use engine::{
    BotSettings, EngineError, GameConfig, GameFlowService, GameVisibility, InMemoryStore,
    NoopNotifier,
};

fn test_service(store: Arc<InMemoryStore>) -> GameFlowService {
    GameFlowService::new(store, Arc::new(NoopNotifier)).with_bot_settings(BotSettings {
        think_delay: Duration::ZERO,
        decision_timeout: Duration::from_secs(5),
    })
}

fn config(max_hands: Option<u32>) -> GameConfig {
    GameConfig {
        max_players: 6,
        small_blind: 10,
        big_blind: 20,
        max_hands,
        rng_seed: Some(7),
        ..GameConfig::default()
    }
}

#[tokio::test]
async fn heads_up_fold_preflop_awards_blinds() {
    // Two players, stacks 1000/1000, blinds 10/20. The dealer posts the
    // small blind heads-up, folds preflop, and the big blind wins 30.
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    store.seed_user(2, 1000);
    let service = test_service(store.clone());

    let game = service
        .create_game(config(Some(1)), 1, None)
        .await
        .unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let players = store.players_by_game(game.id).await.unwrap();
    let dealer = players.iter().find(|p| p.seat == 0).unwrap();
    let big_blind = players.iter().find(|p| p.seat == 1).unwrap();
    assert_eq!(dealer.current_bet, 10, "dealer posts the small blind heads-up");
    assert_eq!(big_blind.current_bet, 20);

    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.phase, Phase::Preflop);
    assert_eq!(loaded.pot, 30);
    assert_eq!(
        loaded.current_turn,
        Some(dealer.id),
        "dealer acts first heads-up preflop"
    );

    service
        .perform_action(game.id, dealer.id, ActionKind::Fold, 0)
        .await
        .unwrap();

    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.status, GameStatus::Finished);
    assert_eq!(loaded.pot, 0);
    assert_eq!(loaded.winners.len(), 1);
    assert_eq!(loaded.winners[0].player_id, big_blind.id);
    assert_eq!(loaded.winners[0].amount, 30);

    let players = store.players_by_game(game.id).await.unwrap();
    let dealer = players.iter().find(|p| p.seat == 0).unwrap();
    let winner = players.iter().find(|p| p.seat == 1).unwrap();
    assert_eq!(dealer.chips, 990);
    assert_eq!(winner.chips, 1010);
}

#[tokio::test]
async fn short_call_converts_to_all_in_and_pays_only_the_stack() {
    // The caller owes more than their stack: they go all-in for exactly
    // what they have left, never erroring.
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    store.seed_user(2, 100);
    let service = test_service(store.clone());

    let game = service
        .create_game(config(Some(1)), 1, None)
        .await
        .unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let players = store.players_by_game(game.id).await.unwrap();
    let raiser = players.iter().find(|p| p.seat == 0).unwrap();
    let short = players.iter().find(|p| p.seat == 1).unwrap();
    assert_eq!(short.chips, 80, "big blind already posted");

    service
        .perform_action(game.id, raiser.id, ActionKind::Raise, 170)
        .await
        .unwrap();
    service
        .perform_action(game.id, short.id, ActionKind::Call, 0)
        .await
        .unwrap();

    let players = store.players_by_game(game.id).await.unwrap();
    let short = players.iter().find(|p| p.seat == 1).unwrap();
    assert_eq!(short.status, PlayerStatus::AllIn);
    assert_eq!(short.chips, 0);
    assert_eq!(short.committed, 100, "deducted exactly the stack, not the owed amount");

    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.pot, 170 + 100);

    let log = store.actions_for_hand(game.id, 1).await.unwrap();
    let call_entry = log.last().unwrap();
    assert_eq!(call_entry.kind, ActionKind::AllIn);
    assert_eq!(call_entry.amount, 80);
}

#[tokio::test]
async fn preflop_round_waits_for_the_big_blind_check() {
    // Equal bets alone must not complete preflop: the big blind gets an
    // explicit option, and their check closes the round.
    let store = Arc::new(InMemoryStore::new());
    for user in 1..=3 {
        store.seed_user(user, 1000);
    }
    let service = test_service(store.clone());

    let game = service
        .create_game(config(None), 1, None)
        .await
        .unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.join_game(game.id, 3).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let players = store.players_by_game(game.id).await.unwrap();
    let by_seat = |s: u8| players.iter().find(|p| p.seat == s).unwrap();
    // Dealer seat 0: small blind seat 1, big blind seat 2, dealer opens.
    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.current_turn, Some(by_seat(0).id));

    service
        .perform_action(game.id, by_seat(0).id, ActionKind::Call, 0)
        .await
        .unwrap();
    service
        .perform_action(game.id, by_seat(1).id, ActionKind::Call, 0)
        .await
        .unwrap();

    // All bets are level at 20, but the big blind has not acted.
    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.phase, Phase::Preflop);
    assert_eq!(loaded.current_turn, Some(by_seat(2).id));

    service
        .perform_action(game.id, by_seat(2).id, ActionKind::Check, 0)
        .await
        .unwrap();

    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.phase, Phase::Flop);
    assert_eq!(loaded.community_cards.len(), 3);
    // Bets reset and the first active seat opens the street.
    let players = store.players_by_game(game.id).await.unwrap();
    assert!(players.iter().all(|p| p.current_bet == 0));
    let first = players.iter().find(|p| p.seat == 0).unwrap();
    assert_eq!(loaded.current_turn, Some(first.id));
}

#[tokio::test]
async fn join_validation_rejects_started_full_duplicate_and_uninvited() {
    let store = Arc::new(InMemoryStore::new());
    for user in 1..=5 {
        store.seed_user(user, 1000);
    }
    let service = test_service(store.clone());

    // Private game: only the host and invitees may join.
    let mut cfg = config(None);
    cfg.max_players = 3;
    cfg.visibility = GameVisibility::Private;
    cfg.invited_users = vec![2, 3, 4];
    let game = service.create_game(cfg, 1, None).await.unwrap();

    let err = service.join_game(game.id, 5).await.unwrap_err();
    assert_eq!(err.code(), "NOT_INVITED");

    service.join_game(game.id, 2).await.unwrap();
    let err = service.join_game(game.id, 2).await.unwrap_err();
    assert_eq!(err.code(), "ALREADY_JOINED");

    service.join_game(game.id, 3).await.unwrap();
    let err = service.join_game(game.id, 4).await.unwrap_err();
    assert_eq!(err.code(), "GAME_FULL");

    service.start_game(game.id).await.unwrap();
    let err = service.join_game(game.id, 4).await.unwrap_err();
    assert_eq!(err.code(), "GAME_ALREADY_STARTED");

    let err = service.join_game(game.id + 999, 4).await.unwrap_err();
    assert_eq!(err.code(), "GAME_NOT_FOUND");
}

#[tokio::test]
async fn acting_out_of_turn_and_illegal_actions_are_rejected() {
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    store.seed_user(2, 1000);
    let service = test_service(store.clone());

    let game = service.create_game(config(None), 1, None).await.unwrap();
    service.join_game(game.id, 2).await.unwrap();

    // Acting before the game starts.
    let err = service
        .perform_action(game.id, 1, ActionKind::Check, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "PHASE_MISMATCH");

    service.start_game(game.id).await.unwrap();
    let players = store.players_by_game(game.id).await.unwrap();
    let dealer = players.iter().find(|p| p.seat == 0).unwrap();
    let other = players.iter().find(|p| p.seat == 1).unwrap();

    let err = service
        .perform_action(game.id, other.id, ActionKind::Call, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "OUT_OF_TURN");

    // Dealer owes 10 into the big blind: checking is illegal.
    let err = service
        .perform_action(game.id, dealer.id, ActionKind::Check, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_ACTION");

    // Raise below table max + big blind is rejected.
    let err = service
        .perform_action(game.id, dealer.id, ActionKind::Raise, 30)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "RAISE_BELOW_MINIMUM");

    // A failed action mutated nothing.
    let loaded = store.require_game(game.id).await.unwrap();
    assert_eq!(loaded.pot, 30);
    assert_eq!(loaded.current_turn, Some(dealer.id));
}

#[tokio::test]
async fn insufficient_players_cannot_start() {
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    let service = test_service(store.clone());
    let game = service.create_game(config(None), 1, None).await.unwrap();
    let err = service.start_game(game.id).await.unwrap_err();
    assert_eq!(err.code(), "INSUFFICIENT_PLAYERS");
    assert!(matches!(err, EngineError::Validation { .. }));
}

#[tokio::test]
async fn snapshots_redact_other_hole_cards_until_showdown() {
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    store.seed_user(2, 1000);
    let service = test_service(store.clone());

    let game = service.create_game(config(Some(1)), 1, None).await.unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let snapshot = service.player_state(game.id, 1).await.unwrap();
    let own = snapshot
        .players
        .iter()
        .find(|p| p.user_id == Some(1))
        .unwrap();
    let other = snapshot
        .players
        .iter()
        .find(|p| p.user_id == Some(2))
        .unwrap();
    let own_json = serde_json::to_string(&own.hole_cards).unwrap();
    let other_json = serde_json::to_string(&other.hole_cards).unwrap();
    assert!(!own_json.contains("XX"), "viewer sees their own cards");
    assert_eq!(other_json, r#"["XX","XX"]"#, "opponent cards are hidden");

    // The deck is never part of the player snapshot type; the admin view
    // carries it and sees every hole card.
    let admin = service.admin_state(game.id).await.unwrap();
    assert_eq!(
        admin.remaining_deck.len() + 4 + admin.game.community_cards.len(),
        52
    );
    for p in &admin.game.players {
        let json = serde_json::to_string(&p.hole_cards).unwrap();
        assert!(!json.contains("XX"));
    }
    assert_eq!(admin.next_cards.len(), 5);
}

#[tokio::test]
async fn reading_state_twice_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    store.seed_user(1, 1000);
    store.seed_user(2, 1000);
    let service = test_service(store.clone());

    let game = service.create_game(config(None), 1, None).await.unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let a = service.player_state(game.id, 1).await.unwrap();
    let b = service.player_state(game.id, 1).await.unwrap();
    assert_eq!(a.current_turn, b.current_turn);
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.pot, b.pot);
}

#[tokio::test]
async fn deck_integrity_holds_mid_hand() {
    let store = Arc::new(InMemoryStore::new());
    for user in 1..=3 {
        store.seed_user(user, 1000);
    }
    let service = test_service(store.clone());

    let game = service.create_game(config(None), 1, None).await.unwrap();
    service.join_game(game.id, 2).await.unwrap();
    service.join_game(game.id, 3).await.unwrap();
    service.start_game(game.id).await.unwrap();

    let loaded = store.require_game(game.id).await.unwrap();
    let players = store.players_by_game(game.id).await.unwrap();
    let mut all: Vec<engine::Card> = loaded.deck.remaining().to_vec();
    all.extend(loaded.community_cards.iter().copied());
    for p in &players {
        all.extend(p.hole_cards.iter().copied());
    }
    all.sort();
    let unique = all.len();
    all.dedup();
    assert_eq!(unique, 52);
    assert_eq!(all.len(), 52, "no duplicate cards across deck, board, and hands");
}
