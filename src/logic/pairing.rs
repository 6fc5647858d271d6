//! Pairing: order a player pool and slice it into the games of one format.

use crate::models::{Game, GameFormat, Player, PlayerSnapshot};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Generate `games_count` games of `format` from `pool`.
///
/// 1. Order the pool: fair roll buckets players by combined rating, shuffles each bucket
///    and interleaves the buckets from the highest rating down; otherwise a plain shuffle.
/// 2. Game `i` takes ordered players `[i*2p, i*2p+p)` as team A and the next `p` as team B.
/// 3. Players beyond `p * 2 * games_count` become substitutes of every game, the first
///    half (rounded up) on side A.
///
/// A short pool leaves later teams partially filled or empty; that is not an error.
/// Callers pass only the players eligible for this format.
pub fn generate_games<R: Rng + ?Sized>(
    pool: &[Player],
    players_per_team: usize,
    games_count: usize,
    format: GameFormat,
    fair: bool,
    rng: &mut R,
) -> Vec<Game> {
    let ordered = order_pool(pool, fair, rng);
    let block = players_per_team * 2;
    let needed = block * games_count;

    let remaining = ordered.get(needed..).unwrap_or(&[]);
    let half = remaining.len().div_ceil(2);
    let substitutes_a: Vec<_> = remaining[..half].iter().map(|p| p.snapshot()).collect();
    let substitutes_b: Vec<_> = remaining[half..].iter().map(|p| p.snapshot()).collect();

    (0..games_count)
        .map(|game_index| {
            let start = game_index * block;
            let team_a = slice_snapshots(&ordered, start, players_per_team);
            let team_b = slice_snapshots(&ordered, start + players_per_team, players_per_team);
            Game::new(
                format,
                team_a,
                team_b,
                substitutes_a.clone(),
                substitutes_b.clone(),
            )
        })
        .collect()
}

fn slice_snapshots(ordered: &[&Player], start: usize, len: usize) -> Vec<PlayerSnapshot> {
    ordered
        .iter()
        .skip(start)
        .take(len)
        .map(|p| p.snapshot())
        .collect()
}

/// Order the pool for slicing into teams.
pub fn order_pool<'a, R: Rng + ?Sized>(
    pool: &'a [Player],
    fair: bool,
    rng: &mut R,
) -> Vec<&'a Player> {
    if fair {
        fair_order(pool, rng)
    } else {
        let mut ordered: Vec<&Player> = pool.iter().collect();
        ordered.shuffle(rng);
        ordered
    }
}

/// Bucket by combined rating, shuffle inside each bucket, then take one player from
/// each bucket in descending rating order, round after round, until all are placed.
fn fair_order<'a, R: Rng + ?Sized>(pool: &'a [Player], rng: &mut R) -> Vec<&'a Player> {
    let mut buckets: BTreeMap<u32, Vec<&Player>> = BTreeMap::new();
    for p in pool {
        buckets.entry(p.combined_rating()).or_default().push(p);
    }

    let mut groups: Vec<Vec<&Player>> = buckets.into_values().rev().collect();
    for group in &mut groups {
        group.shuffle(rng);
    }
    log::debug!(
        "Fair roll: {} players in {} rating groups",
        pool.len(),
        groups.len()
    );

    let longest = groups.iter().map(Vec::len).max().unwrap_or(0);
    let mut ordered = Vec::with_capacity(pool.len());
    for i in 0..longest {
        for group in &groups {
            if let Some(p) = group.get(i) {
                ordered.push(*p);
            }
        }
    }
    ordered
}
