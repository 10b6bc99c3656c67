use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

use scopa::game::{scoring::Award, Card, Game, Move, MoveError, Suit, HAND_SIZE, TABLE_SIZE};
use scopa::stats::match_points;

mod utils;

use utils::*;

fn names() -> Vec<String> {
    vec!["alice".to_string(), "bob".to_string()]
}

fn seeded_game(seed: u64) -> Game {
    Game::new_game(&names(), &mut StdRng::seed_from_u64(seed))
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(7)]
#[case(42)]
#[case(1234)]
fn test_bot_plays_a_whole_game(#[case] seed: u64) {
    let mut game = seeded_game(seed);
    assert_eq!(game.table().len(), TABLE_SIZE);
    assert!(game.players().iter().all(|p| p.hand.len() == HAND_SIZE));

    let moves = play_out(&mut game);

    // Every card that wasn't dealt to the table is played exactly once.
    assert_eq!(moves, 36);
    assert!(game.ended());
    assert!(game.deck().is_empty());
    game.check_invariants().unwrap();

    if game.last_capturer().is_some() {
        assert!(game.table().is_empty());

        let settebellos = game
            .players()
            .iter()
            .flat_map(|p| p.awards.iter())
            .filter(|a| **a == Award::SetteBello)
            .count();
        assert_eq!(settebellos, 1);
    }
}

#[rstest]
#[case(3)]
#[case(99)]
fn test_awards_match_the_grabbed_piles(#[case] seed: u64) {
    let mut game = seeded_game(seed);
    play_out(&mut game);

    let players = game.players();
    let (a, b) = (&players[0], &players[1]);

    let cards_winner = match a.grabbed.len().cmp(&b.grabbed.len()) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    };
    for (i, p) in players.iter().enumerate() {
        assert_eq!(p.awards.contains(&Award::Cards), cards_winner == Some(i));
        assert_eq!(
            p.awards.contains(&Award::SetteBello),
            p.grabbed.contains(&Card::SETTEBELLO)
        );
    }

    let total_awards: usize = players.iter().map(|p| p.awards.len()).sum();
    assert!(total_awards <= 4);
}

#[test]
fn test_same_seed_same_game() {
    let mut first = seeded_game(5);
    let mut second = seeded_game(5);
    assert_eq!(first, second);

    play_out(&mut first);
    play_out(&mut second);
    assert_eq!(first, second);
}

#[test]
fn test_drop_only_game_leaves_everything_on_the_table() {
    let mut game = seeded_game(11);
    while !game.ended() {
        let card = game.current_player().hand[0];
        game.drop(card).unwrap();
        game.check_invariants().unwrap();
    }

    assert_eq!(game.table().len(), 40);
    assert!(game.last_capturer().is_none());
    assert!(game.players().iter().all(|p| p.awards.is_empty()));
    assert!(game.players().iter().all(|p| match_points(p) == 0));
}

#[test]
fn test_rejected_moves_leave_the_game_untouched() {
    let mut game = seeded_game(8);
    let before = game.clone();
    let hand = game.current_player().hand.clone();
    let opponent_card = game.players()[1].hand[0];

    // Capturing nothing never adds up.
    assert!(matches!(
        game.take(hand[0], &[]),
        Err(MoveError::BadMath { .. })
    ));
    // A card from the other player's hand.
    assert!(matches!(
        game.drop(opponent_card),
        Err(MoveError::CardNotHeld { .. })
    ));
    // A card that is neither on the table nor anywhere visible.
    let missing = game.deck()[0];
    assert!(matches!(
        game.take(missing, &[missing]),
        Err(MoveError::NotOnTable { .. })
    ));

    assert_eq!(game, before);
}

#[test]
fn test_last_move_and_turn_follow_the_bot() {
    let mut game = seeded_game(21);
    let player = game.current_player().name.clone();
    let mv = choose(&player, &game.current_player().hand.clone(), game.table());

    apply(&mut game, &mv).unwrap();

    assert_eq!(game.last_move(), Some(&mv));
    assert_ne!(game.current_player().name, player);
}

#[test]
fn test_face_card_must_take_matching_face() {
    let mut alice = scopa::game::Player::new("alice");
    alice.hand = vec![Card::new(Suit::Spade, 10)];
    let mut game = Game::new(
        vec![alice, scopa::game::Player::new("bob")],
        0,
        vec![],
        vec![
            Card::new(Suit::Coppe, 10),
            Card::new(Suit::Coppe, 3),
            Card::new(Suit::Denari, 7),
        ],
    );

    let err = game
        .take(
            Card::new(Suit::Spade, 10),
            &[Card::new(Suit::Coppe, 3), Card::new(Suit::Denari, 7)],
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "You gotta take Re di Coppe");

    game.take(Card::new(Suit::Spade, 10), &[Card::new(Suit::Coppe, 10)])
        .unwrap();
    assert!(matches!(game.last_move(), Some(Move::Take { .. })));
}
