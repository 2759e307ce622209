//! Integration tests for the placement engine and game flow.
//!
//! These tests drive the public API only: board snapshots, the placement
//! rules, and complete games played out by bots.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use saboteur_core::*;

fn card(id: &str, paths: &[&[u8]]) -> Card {
    Card::from_paths(id, paths).unwrap()
}

fn seeded_game(names: &[&str], seed: u64) -> GameState {
    let config = GameConfig::with_players(names.iter().copied());
    GameState::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Play bots against each other until the game ends
fn play_out(game: &mut GameState, difficulty: BotDifficulty, seed: u64) -> usize {
    let mut bots: Vec<Bot> = (0..game.player_count())
        .map(|i| Bot::with_seed(i as PlayerId, difficulty, seed + i as u64))
        .collect();

    let mut turns = 0;
    let max_turns = 500;
    while !game.is_finished() && turns < max_turns {
        let player = game.current_player;
        let action = bots[player as usize]
            .choose_action(game)
            .expect("current player always has an action while holding cards");
        game.apply_action(player, action).unwrap();
        turns += 1;
    }

    assert!(game.is_finished(), "Game should end within {} turns", max_turns);
    turns
}

// ==================== Compatibility ====================

#[test]
fn test_connect_requires_both_sides() {
    let shapes: &[&[&[u8]]] = &[&[&[0]], &[&[1, 3]], &[&[0, 1, 2]], &[&[2], &[3]]];
    for a in shapes {
        for b in shapes {
            let a = card("a", a);
            let b = card("b", b);
            for d in Direction::ALL {
                assert_eq!(
                    segments_connect(&a, &b, d),
                    a.exposes(d) && b.exposes(d.opposite())
                );
            }
        }
    }
}

#[test]
fn test_destination_accepts_anything() {
    let dest = Card::destination(2).unwrap();
    let others = [
        card("a", &[&[0]]),
        Card::path("blank", vec![]).unwrap(),
        Card::start(),
        Card::action("x", ActionKind::ViewDestination).unwrap(),
    ];
    for other in &others {
        for d in Direction::ALL {
            assert!(segments_connect(other, &dest, d));
        }
    }
}

// ==================== Connectivity ====================

#[test]
fn test_route_next_to_start() {
    let board = Board::standard();
    assert!(has_route_to_start(&board, Position::new(7, 5), &card("a", &[&[3]])));
}

#[test]
fn test_perpendicular_neighbor_has_no_route() {
    let mut board = Board::standard();
    board.place(Position::new(7, 5), card("v", &[&[0, 2]])).unwrap();
    assert!(!has_route_to_start(
        &board,
        Position::new(7, 6),
        &card("h", &[&[1, 3]])
    ));
}

#[test]
fn test_no_route_through_destination_from_blank_edge() {
    let layout = BoardLayout {
        size: 9,
        start: Position::new(7, 4),
        destinations: vec![Position::new(6, 4)],
    };
    let mut board = Board::with_layout(&layout).unwrap();
    board.place(Position::new(5, 3), card("anchor", &[&[0]])).unwrap();

    let away = card("away", &[&[0]]);
    assert!(!has_route_to_start(&board, Position::new(5, 4), &away));
    assert!(!is_legal_placement(&board, Position::new(5, 4), &away));

    let toward = card("toward", &[&[2]]);
    assert!(has_route_to_start(&board, Position::new(5, 4), &toward));
    assert!(is_legal_placement(&board, Position::new(5, 4), &toward));
}

// ==================== Placement ====================

#[test]
fn test_concrete_scenarios() {
    let board = Board::standard();
    assert!(is_legal_placement(&board, Position::new(7, 5), &card("l", &[&[3]])));
    assert!(!is_legal_placement(&board, Position::new(7, 5), &card("r", &[&[1]])));
    // Two cells above the start, nothing in between
    assert!(!is_legal_placement(&board, Position::new(5, 4), &card("v", &[&[0, 2]])));
}

#[test]
fn test_occupied_is_never_legal() {
    let board = Board::standard();
    let cross = card("x", &[&[0, 1, 2, 3]]);
    for (pos, _) in board.occupied() {
        assert!(!is_legal_placement(&board, pos, &cross));
    }
}

#[test]
fn test_chain_and_broken_chain() {
    let mut board = Board::standard();
    let x = card("x", &[&[1, 3]]);
    assert!(is_legal_placement(&board, Position::new(7, 5), &x));
    board.place(Position::new(7, 5), x).unwrap();

    let y = card("y", &[&[3, 1]]);
    assert!(is_legal_placement(&board, Position::new(7, 6), &y));
    board.place(Position::new(7, 6), y).unwrap();

    let z = card("z", &[&[3]]);
    assert!(has_route_to_start(&board, Position::new(7, 7), &z));
    assert_eq!(
        route_to_start(&board, Position::new(7, 7), &z).map(|r| r.len()),
        Some(4)
    );

    // The left branch turns upward and cannot be continued sideways
    let bend = card("bend", &[&[1, 0]]);
    assert!(is_legal_placement(&board, Position::new(7, 3), &bend));
    board.place(Position::new(7, 3), bend).unwrap();
    assert!(!is_legal_placement(&board, Position::new(7, 2), &card("w", &[&[1]])));
}

#[test]
fn test_no_card_selected() {
    let board = Board::standard();
    assert!(enumerate_legal_positions(&board, None).is_empty());
}

#[test]
fn test_rejection_reasons_serialize() {
    let board = Board::standard();
    let err = check_placement(&board, Position::new(7, 5), &card("r", &[&[1]])).unwrap_err();
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(json, r#"{"PathMismatch":{"direction":3}}"#);
}

#[test]
fn test_board_json_snapshot() {
    let mut board = Board::standard();
    board.place(Position::new(7, 5), card("a", &[&[3]])).unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
    assert_eq!(back.to_json_friendly().cells.len(), 5);
}

// ==================== Game flow ====================

#[test]
fn test_full_game_easy_bots() {
    let mut game = seeded_game(&["A", "B", "C"], 1);
    let turns = play_out(&mut game, BotDifficulty::Easy, 100);
    assert!(turns > 0);

    // Every card on the board besides the fixed ones is still linked
    for (pos, card) in game.board.occupied() {
        if card.is_path() {
            assert!(route_to_start(&game.board, pos, card).is_some());
        }
    }
}

#[test]
fn test_full_game_medium_bots() {
    for seed in 0..5 {
        let mut game = seeded_game(&["A", "B"], seed);
        play_out(&mut game, BotDifficulty::Medium, seed * 10);

        match game.phase {
            GamePhase::Finished {
                outcome: GameOutcome::DestinationReached { winner, position },
            } => {
                assert!(game.reached().contains(&position));
                assert!((winner as usize) < game.player_count());
            }
            GamePhase::Finished {
                outcome: GameOutcome::Exhausted,
            } => {
                assert!(game.deck.is_empty());
                assert!(game.players.iter().all(|p| p.hand.is_empty()));
            }
            GamePhase::InProgress => panic!("game should be over"),
        }
    }
}

#[test]
fn test_cards_are_conserved() {
    let mut game = seeded_game(&["A", "B", "C", "D"], 9);
    play_out(&mut game, BotDifficulty::Easy, 4);

    let on_board = game.board.occupied().filter(|(_, c)| c.is_path()).count();
    let in_hands: usize = game.players.iter().map(|p| p.hand_size()).sum();
    let total = on_board + in_hands + game.deck.len() + game.discard_pile.len();
    assert_eq!(total, standard_deck().len());
}

#[test]
fn test_custom_layout_game() {
    let config = GameConfig {
        player_names: vec!["A".into(), "B".into()],
        hand_size: 3,
        layout: BoardLayout {
            size: 5,
            start: Position::new(4, 2),
            destinations: vec![Position::new(0, 2)],
        },
        include_action_cards: true,
    };
    let mut game = GameState::with_rng(config, &mut StdRng::seed_from_u64(12)).unwrap();
    assert_eq!(game.board.size(), 5);
    assert!(game.players.iter().all(|p| p.hand_size() == 3));

    play_out(&mut game, BotDifficulty::Medium, 1);
    assert!(game.is_finished());
}

#[test]
fn test_config_from_json_uses_defaults() {
    let config: GameConfig = serde_json::from_str(r#"{"player_names":["x","y","z"]}"#).unwrap();
    assert_eq!(config.hand_size, 5);
    assert_eq!(config.layout, BoardLayout::default());

    let game = GameState::new(config).unwrap();
    assert_eq!(game.player_count(), 3);
}
