use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use super::cards::{Card, Suit};
use super::logic::Player;

/// The four end-of-game awards. Each is worth one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Award {
    /// Most cards captured.
    Cards,
    /// Most coins captured.
    Denari,
    /// Captured the seven of coins.
    SetteBello,
    /// Best primera.
    Primera,
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Award::Cards => "Cards",
                Award::Denari => "Denari",
                Award::SetteBello => "SetteBello",
                Award::Primera => "Primera",
            }
        )
    }
}

/// Primera points for a single card. Fante and Cavallo are worth nothing.
pub fn primera_points(value: u8) -> u32 {
    match value {
        7 => 21,
        6 => 18,
        1 => 16,
        5 => 15,
        4 => 14,
        3 => 13,
        2 => 12,
        10 => 10,
        _ => 0,
    }
}

/// Sum over the suits of the best card captured in that suit.
pub fn primera_total(grabbed: &[Card]) -> u32 {
    Suit::iter()
        .map(|suit| {
            grabbed
                .iter()
                .filter(|c| c.suit == suit)
                .map(|c| primera_points(c.value))
                .max()
                .unwrap_or(0)
        })
        .sum()
}

fn coins(grabbed: &[Card]) -> usize {
    grabbed.iter().filter(|c| c.suit == Suit::Denari).count()
}

/// Index of the player whose metric is strictly greater than everyone else's.
/// Ties at the top award nobody.
fn strict_leader<F>(players: &[Player], metric: F) -> Option<usize>
where
    F: Fn(&Player) -> u32,
{
    let scores: Vec<u32> = players.iter().map(metric).collect();
    let best = *scores.iter().max()?;
    let mut leaders = scores.iter().enumerate().filter(|(_, s)| **s == best);
    let (index, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(index)
}

/// Works out who wins each award. Pure function of the grabbed piles.
pub fn compute_awards(players: &[Player]) -> Vec<(usize, Award)> {
    let mut awards = Vec::new();

    if let Some(i) = strict_leader(players, |p| p.grabbed.len() as u32) {
        awards.push((i, Award::Cards));
    }

    if let Some(i) = strict_leader(players, |p| coins(&p.grabbed) as u32) {
        awards.push((i, Award::Denari));
    }

    if let Some(i) = players
        .iter()
        .position(|p| p.grabbed.contains(&Card::SETTEBELLO))
    {
        awards.push((i, Award::SetteBello));
    }

    if let Some(i) = strict_leader(players, |p| primera_total(&p.grabbed)) {
        awards.push((i, Award::Primera));
    }

    awards
}

/// Appends each award to its winner.
pub fn apply_awards(players: &mut [Player]) {
    for (index, award) in compute_awards(players) {
        players[index].awards.push(award);
    }
}
