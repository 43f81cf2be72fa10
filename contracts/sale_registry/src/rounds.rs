use crate::errors::Error;
use crate::types::Round;
use soroban_sdk::{Env, Vec};

/// Turn ascending start times into rounds numbered 1..=N. Every round
/// starts inside `[sale_start, sale_end)` and after `now`.
pub fn build_schedule(
    env: &Env,
    start_times: &Vec<u64>,
    now: u64,
    sale_start: u64,
    sale_end: u64,
) -> Result<Vec<Round>, Error> {
    if start_times.is_empty() {
        return Err(Error::EmptySchedule);
    }

    let mut rounds = Vec::new(env);
    let mut previous: Option<u64> = None;
    for (index, start_time) in start_times.iter().enumerate() {
        if start_time <= now {
            return Err(Error::RoundInPast);
        }
        if start_time < sale_start {
            return Err(Error::RoundBeforeSaleStart);
        }
        if start_time >= sale_end {
            return Err(Error::RoundAfterSaleEnd);
        }
        if previous.is_some_and(|p| start_time <= p) {
            return Err(Error::UnsortedSchedule);
        }
        previous = Some(start_time);

        let tier_id = u32::try_from(index + 1).map_err(|_| Error::Overflow)?;
        rounds.push_back(Round {
            tier_id,
            start_time,
        });
    }
    Ok(rounds)
}

/// Round open at `now`, or 0 outside the sale window.
pub fn current_round(rounds: &Vec<Round>, sale_end: u64, now: u64) -> u32 {
    if now >= sale_end {
        return 0;
    }

    let mut active = 0;
    for round in rounds.iter() {
        if round.start_time > now {
            break;
        }
        active = round.tier_id;
    }
    active
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::vec;

    const CREATED_AT: u64 = 1_000;
    const SALE_START: u64 = CREATED_AT + 10;
    const SALE_END: u64 = CREATED_AT + 130;

    fn schedule(env: &Env) -> Vec<Round> {
        let starts = vec![
            env,
            CREATED_AT + 50,
            CREATED_AT + 70,
            CREATED_AT + 90,
            CREATED_AT + 100,
            CREATED_AT + 110,
        ];
        build_schedule(env, &starts, CREATED_AT, SALE_START, SALE_END).unwrap()
    }

    #[test]
    fn test_rounds_numbered_in_order() {
        let env = Env::default();
        let rounds = schedule(&env);

        assert_eq!(rounds.len(), 5);
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.tier_id, i as u32 + 1);
        }
        assert_eq!(rounds.get(0).unwrap().start_time, CREATED_AT + 50);
    }

    #[test]
    fn test_current_round_table() {
        let env = Env::default();
        let rounds = schedule(&env);
        let at = |delta: u64| current_round(&rounds, SALE_END, CREATED_AT + delta);

        assert_eq!(at(0), 0);
        assert_eq!(at(49), 0);
        assert_eq!(at(50), 1);
        assert_eq!(at(69), 1);
        assert_eq!(at(70), 2);
        assert_eq!(at(90), 3);
        assert_eq!(at(100), 4);
        assert_eq!(at(110), 5);
        assert_eq!(at(129), 5);
        assert_eq!(at(130), 0);
        assert_eq!(at(10_000), 0);
    }

    #[test]
    fn test_current_round_is_monotonic_inside_window() {
        let env = Env::default();
        let rounds = schedule(&env);

        let mut last = 0;
        for t in CREATED_AT..SALE_END {
            let round = current_round(&rounds, SALE_END, t);
            assert!(round >= last);
            last = round;
        }
    }

    #[test]
    fn test_empty_schedule_never_opens() {
        let env = Env::default();
        let rounds: Vec<Round> = Vec::new(&env);
        assert_eq!(current_round(&rounds, SALE_END, CREATED_AT + 60), 0);
    }

    #[test]
    fn test_schedule_validation() {
        let env = Env::default();
        let build =
            |starts: Vec<u64>| build_schedule(&env, &starts, CREATED_AT, SALE_START, SALE_END);

        assert_eq!(build(Vec::new(&env)), Err(Error::EmptySchedule));
        assert_eq!(
            build(vec![&env, CREATED_AT + 50, CREATED_AT + 45]),
            Err(Error::UnsortedSchedule)
        );
        assert_eq!(
            build(vec![&env, CREATED_AT + 50, CREATED_AT + 50]),
            Err(Error::UnsortedSchedule)
        );
        assert_eq!(build(vec![&env, CREATED_AT]), Err(Error::RoundInPast));
        assert_eq!(build(vec![&env, CREATED_AT - 20]), Err(Error::RoundInPast));
        assert_eq!(
            build(vec![&env, CREATED_AT + 5, CREATED_AT + 50]),
            Err(Error::RoundBeforeSaleStart)
        );
        assert!(build(vec![&env, SALE_START]).is_ok());
        assert_eq!(
            build(vec![&env, CREATED_AT + 120, SALE_END]),
            Err(Error::RoundAfterSaleEnd)
        );
    }
}
