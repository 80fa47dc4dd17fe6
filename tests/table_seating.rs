use holdem_engine::deck::GameMode;
use holdem_engine::round::Action;
use holdem_engine::table::{Player, Table, TableConfig, TableError};
use std::time::Duration;

fn table_with(names: &[(&str, u64)]) -> Table {
    let mut table = Table::new(TableConfig::default());
    for &(name, credit) in names {
        table.add_player(Player::new(name, credit)).unwrap();
    }
    table
}

#[test]
fn seats_fill_up_to_the_configured_max() {
    let config = TableConfig { max_seats: 3, ..TableConfig::default() };
    let mut table = Table::new(config);
    for i in 0..3 {
        table.add_player(Player::new(format!("p{i}"), 100)).unwrap();
    }
    assert_eq!(
        table.add_player(Player::new("overflow", 100)),
        Err(TableError::TableFull { max_seats: 3 })
    );
    assert_eq!(table.seats().len(), 3);
}

#[test]
fn dealer_rotation_cycles_the_seat_order() {
    let mut table = table_with(&[("a", 100), ("b", 100), ("c", 100)]);
    table.rotate_dealer().unwrap();
    table.rotate_dealer().unwrap();
    let names: Vec<&str> = table.seats().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["c", "a", "b"]);
    // Three rotations bring the original order back.
    table.rotate_dealer().unwrap();
    let names: Vec<&str> = table.seats().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn start_round_evicts_below_the_big_blind_only() {
    let mut table = table_with(&[("rich", 500), ("exact", 10), ("broke", 9)]);
    let evicted = table.start_round().unwrap();
    assert_eq!(evicted, vec![Player::new("broke", 9)]);
    assert_eq!(table.seats().len(), 2, "a player covering exactly the blind stays");
    assert!(table.round().is_some());
}

#[test]
fn too_few_players_refuses_to_start() {
    let mut table = table_with(&[("solo", 500)]);
    assert_eq!(table.start_round(), Err(TableError::NotEnoughPlayers { have: 1 }));

    let mut table = table_with(&[("a", 500), ("b", 2)]);
    assert_eq!(table.start_round(), Err(TableError::NotEnoughPlayers { have: 1 }));
    assert_eq!(table.seats().len(), 1, "the eviction stands");
}

#[test]
fn one_live_round_at_a_time() {
    let mut table = table_with(&[("a", 500), ("b", 500)]);
    table.start_round().unwrap();
    assert_eq!(table.start_round(), Err(TableError::RoundInProgress));
    assert_eq!(table.rotate_dealer(), Err(TableError::RoundInProgress));
    assert_eq!(table.remove_player(0), Err(TableError::RoundInProgress));
}

#[test]
fn settle_waits_for_distribution_then_copies_credits() {
    let mut table = table_with(&[("a", 500), ("b", 500)]);
    table.start_round().unwrap();
    assert_eq!(table.settle_round(), Err(TableError::RoundInProgress));

    let round = table.round_mut().unwrap();
    round.preflop_seeded(21).unwrap();
    round.act(0, Action::Call { raise: 0 }).unwrap();
    round.act(1, Action::Fold).unwrap();
    round.distribute_pot().unwrap();

    table.settle_round().unwrap();
    assert!(table.round().is_none());
    let credits: Vec<u64> = table.seats().iter().map(|p| p.credit).collect();
    assert_eq!(credits, vec![510, 490]);
    assert_eq!(table.settle_round(), Err(TableError::NoRound));
}

#[test]
fn full_lifecycle_over_two_rounds() {
    let mut table = table_with(&[("a", 100), ("b", 100), ("c", 15)]);
    table.start_round().unwrap();
    {
        let round = table.round_mut().unwrap();
        round.preflop_seeded(4).unwrap();
        round.act(2, Action::Fold).unwrap();
        round.act(0, Action::Fold).unwrap();
        round.distribute_pot().unwrap();
    }
    table.settle_round().unwrap();
    table.rotate_dealer().unwrap();
    let names: Vec<&str> = table.seats().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["b", "c", "a"]);

    // Chip totals survive the settle.
    let total: u64 = table.seats().iter().map(|p| p.credit).sum();
    assert_eq!(total, 215);

    // The next round starts cleanly over the rotated seats.
    let evicted = table.start_round().unwrap();
    assert!(evicted.is_empty());
}

#[test]
fn turn_timeout_comes_from_the_config() {
    let config =
        TableConfig { turn_timeout: Some(Duration::from_secs(30)), ..TableConfig::default() };
    let table = Table::new(config);
    assert_eq!(table.turn_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(Table::new(TableConfig::default()).turn_timeout(), None);
}

#[test]
fn remove_player_checks_bounds() {
    let mut table = table_with(&[("a", 100)]);
    assert_eq!(
        table.remove_player(1),
        Err(TableError::SeatOutOfRange { seat: 1, seats: 1 })
    );
    let removed = table.remove_player(0).unwrap();
    assert_eq!(removed.name, "a");
    assert!(table.seats().is_empty());
}
