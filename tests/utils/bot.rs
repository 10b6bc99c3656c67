use scopa::game::{Card, Game, Move, MoveError};

// ============================================================================
// A player that only makes legal moves
// ============================================================================

/// Takes a single table card of equal value when there is one, otherwise drops the first
/// card in hand. Both are always legal.
pub fn choose(player: &str, hand: &[Card], table: &[Card]) -> Move {
    for card in hand {
        if let Some(target) = table.iter().find(|t| t.value == card.value) {
            return Move::Take {
                player: player.to_string(),
                card: *card,
                table: vec![*target],
            };
        }
    }

    Move::Drop {
        player: player.to_string(),
        card: hand[0],
    }
}

pub fn apply(game: &mut Game, mv: &Move) -> Result<(), MoveError> {
    match mv {
        Move::Take { card, table, .. } => game.take(*card, table),
        Move::Drop { card, .. } => game.drop(*card),
    }
}

/// Plays `game` to the end with [`choose`], checking that no card is lost or duplicated
/// after every move. Returns how many moves were made.
#[allow(dead_code)]
pub fn play_out(game: &mut Game) -> usize {
    let mut moves = 0;
    while !game.ended() {
        let player = game.current_player();
        let mv = choose(&player.name, &player.hand, game.table());
        apply(game, &mv).unwrap_or_else(|e| panic!("bot made an illegal move {:?}: {}", mv, e));
        game.check_invariants()
            .unwrap_or_else(|e| panic!("after move {}: {}", moves, e));
        moves += 1;
    }
    moves
}
