use holdem_engine::deck::GameMode;
use holdem_engine::round::{Action, ActionError, Round, SeatStatus, Street};

fn round_of(credits: &[u64], big_blind: u64) -> Round {
    let seats = credits
        .iter()
        .enumerate()
        .map(|(i, &credit)| (format!("p{i}"), credit))
        .collect();
    let mut round = Round::new(seats, big_blind, GameMode::Standard).unwrap();
    round.preflop_seeded(1234).unwrap();
    round
}

fn settle_street(round: &mut Round) {
    while !round.street_settled() {
        let seat = round.current();
        let action = if round.to_call(seat) == 0 { Action::Check } else { Action::Call { raise: 0 } };
        round.act(seat, action).unwrap();
    }
}

#[test]
fn turn_order_wraps_around_the_table() {
    let mut round = round_of(&[500, 500, 500, 500], 10);
    assert_eq!(round.current(), 2, "first seat after the blinds opens");
    round.act(2, Action::Call { raise: 0 }).unwrap();
    assert_eq!(round.current(), 3);
    round.act(3, Action::Call { raise: 0 }).unwrap();
    assert_eq!(round.current(), 0, "rotation wraps back to the small blind");
    round.act(0, Action::Call { raise: 0 }).unwrap();
    assert_eq!(round.current(), 1);
}

#[test]
fn big_blind_may_check_its_option() {
    let mut round = round_of(&[500, 500], 10);
    round.act(0, Action::Call { raise: 0 }).unwrap();
    round.act(1, Action::Check).unwrap();
    assert!(round.street_settled());
    assert_eq!(round.pot(), 20);
}

#[test]
fn short_stack_facing_a_big_bet_must_go_all_in() {
    // Seat 2 sits on 15 chips behind a 20 big blind.
    let mut round = round_of(&[500, 500, 15], 20);

    let err = round.act(2, Action::Call { raise: 0 }).unwrap_err();
    assert_eq!(err, ActionError::MustAllIn { bet: 20, credit: 15 });
    assert_eq!(round.pot(), 30, "the rejected call staked nothing");

    let debited = round.act(2, Action::AllIn).unwrap();
    assert_eq!(debited, 15);
    assert_eq!(round.seat(2).unwrap().status(), SeatStatus::AllIn);
    // 15 sits under the 20 maximum, so betting is not reopened.
    assert_eq!(round.seat(0).unwrap().status(), SeatStatus::ToAct);
}

#[test]
fn raise_consuming_the_stack_is_rejected() {
    let mut round = round_of(&[500, 500, 40], 10);
    let err = round.act(2, Action::Call { raise: 30 }).unwrap_err();
    assert_eq!(err, ActionError::RaiseTooLarge { raise: 30, bet: 10, credit: 40 });
    // One chip under the stack is fine.
    round.act(2, Action::Call { raise: 29 }).unwrap();
    assert_eq!(round.seat(2).unwrap().stake(), 39);
}

#[test]
fn a_raise_reopens_the_betting_for_matched_seats() {
    let mut round = round_of(&[500, 500, 500], 10);
    round.act(2, Action::Call { raise: 0 }).unwrap();
    round.act(0, Action::Call { raise: 0 }).unwrap();
    round.act(1, Action::Call { raise: 15 }).unwrap();
    assert!(!round.street_settled());

    // Everyone owes 15 more; calling all around settles the street.
    assert_eq!(round.to_call(2), 15);
    round.act(2, Action::Call { raise: 0 }).unwrap();
    round.act(0, Action::Call { raise: 0 }).unwrap();
    assert!(round.street_settled());
    assert_eq!(round.pot(), 75);
}

#[test]
fn an_all_in_below_the_bet_does_not_reopen() {
    let mut round = round_of(&[500, 500, 500, 8], 10);
    round.act(2, Action::Call { raise: 0 }).unwrap();
    round.act(3, Action::AllIn).unwrap();
    round.act(0, Action::Call { raise: 0 }).unwrap();
    round.act(1, Action::Check).unwrap();
    assert!(round.street_settled(), "an under-call all-in is no raise");
}

#[test]
fn an_all_in_above_the_bet_reopens_like_a_raise() {
    let mut round = round_of(&[500, 500, 60], 10);
    round.act(2, Action::AllIn).unwrap();
    assert_eq!(round.to_call(0), 55);
    assert_eq!(round.seat(0).unwrap().status(), SeatStatus::ToAct);
    round.act(0, Action::Call { raise: 0 }).unwrap();
    round.act(1, Action::Call { raise: 0 }).unwrap();
    assert!(round.street_settled());
    assert_eq!(round.pot(), 180);
}

#[test]
fn streets_gate_on_settlement_and_order() {
    let mut round = round_of(&[500, 500], 10);
    assert_eq!(round.flop(), Err(ActionError::StreetUnfinished));
    assert_eq!(
        round.river(),
        Err(ActionError::InvalidTransition { from: Street::Preflop, to: Street::River })
    );

    settle_street(&mut round);
    round.flop().unwrap();
    assert_eq!(round.street(), Street::Flop);
    assert_eq!(
        round.flop(),
        Err(ActionError::InvalidTransition { from: Street::Flop, to: Street::Flop })
    );

    settle_street(&mut round);
    round.turn().unwrap();
    settle_street(&mut round);
    round.river().unwrap();
    assert_eq!(round.board().len(), 5);
}

#[test]
fn acting_before_the_deal_fails() {
    let seats = vec![("a".to_string(), 500), ("b".to_string(), 500)];
    let mut round = Round::new(seats, 10, GameMode::Standard).unwrap();
    assert_eq!(round.act(0, Action::Check), Err(ActionError::NotStarted));
    assert_eq!(round.flop(), Err(ActionError::NotStarted));
}

#[test]
fn folded_seats_stay_out_for_the_whole_round() {
    let mut round = round_of(&[500, 500, 500], 10);
    round.act(2, Action::Fold).unwrap();
    assert_eq!(round.seat(2).unwrap().folded_at(), Some(Street::Preflop));

    settle_street(&mut round);
    round.flop().unwrap();
    assert_eq!(round.seat(2).unwrap().status(), SeatStatus::Folded);
    assert_eq!(round.act(2, Action::Check), Err(ActionError::AlreadyFolded { seat: 2 }));
}

#[test]
fn fold_to_one_ends_the_round_immediately() {
    let mut round = round_of(&[500, 500, 500], 10);
    round.act(2, Action::Fold).unwrap();
    round.act(0, Action::Fold).unwrap();
    assert!(round.is_over());
    assert_eq!(round.act(1, Action::Check), Err(ActionError::RoundOver));
    assert_eq!(round.flop(), Err(ActionError::StreetUnfinished));
}

#[test]
fn auto_act_is_check_or_fold() {
    let mut round = round_of(&[500, 500, 500], 10);
    // Facing the big blind: fold.
    assert_eq!(round.auto_act(2), Ok(Action::Fold));
    round.act(0, Action::Call { raise: 0 }).unwrap();
    // Nothing to call: check.
    assert_eq!(round.auto_act(1), Ok(Action::Check));
    assert!(round.street_settled());
}

#[test]
fn action_strings_map_to_typed_actions() {
    assert_eq!("fold".parse::<Action>(), Ok(Action::Fold));
    assert_eq!("  CHECK ".parse::<Action>(), Ok(Action::Check));
    assert_eq!("call".parse::<Action>(), Ok(Action::Call { raise: 0 }));
    assert_eq!("call 40".parse::<Action>(), Ok(Action::Call { raise: 40 }));
    assert_eq!("allin".parse::<Action>(), Ok(Action::AllIn));
    assert_eq!("all in".parse::<Action>(), Ok(Action::AllIn));
    assert!("bet 40".parse::<Action>().is_err());
}

#[test]
fn rejected_actions_leave_the_round_untouched() {
    let mut round = round_of(&[500, 500, 500], 10);
    let before_pot = round.pot();
    let before_current = round.current();

    let _ = round.act(0, Action::Call { raise: 0 }).unwrap_err();
    let _ = round.act(2, Action::Check).unwrap_err();
    let _ = round.act(2, Action::Call { raise: 1_000_000 }).unwrap_err();

    assert_eq!(round.pot(), before_pot);
    assert_eq!(round.current(), before_current);
    assert!(round.seats().iter().all(|s| s.status() != SeatStatus::Matched));
}
