#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use launchpad_tests::constants::*;
use launchpad_tests::LaunchFixture;
use sale_registry::Error;

fn cases() -> ProptestConfig {
    ProptestConfig::with_cases(24)
}

proptest! {
    #![proptest_config(cases())]

    /// Sold tokens always equal the sum of the purchase records and never
    /// pass the hard cap. Purchases that would cross it leave no trace.
    #[test]
    fn prop_sold_tokens_match_records(amounts in prop::collection::vec(1i128..=400, 1..8)) {
        let f = LaunchFixture::new(false).ready();
        f.at(ROUND_DELTAS[0]);

        let mut expected = 0i128;
        let mut buyers = std::vec::Vec::new();
        for amount in amounts {
            let investor = f.investor(1);
            let result = f.registry.try_participate(&investor, &f.sale_id, &1, &amount);
            if expected + amount > HARD_CAP {
                prop_assert_eq!(result, Err(Ok(Error::HardCapExceeded)));
                prop_assert!(!f.registry.is_participated(&f.sale_id, &investor));
            } else {
                prop_assert_eq!(result, Ok(Ok(amount)));
                expected += amount;
                buyers.push(investor);
            }
        }

        let sale = f.registry.sale(&f.sale_id);
        let recorded: i128 = buyers
            .iter()
            .map(|who| f.registry.participation(&f.sale_id, who).unwrap().amount_bought)
            .sum();
        prop_assert_eq!(sale.total_tokens_sold, expected);
        prop_assert_eq!(sale.total_tokens_sold, recorded);
        prop_assert!(sale.total_tokens_sold <= HARD_CAP);
        prop_assert_eq!(sale.participants as usize, buyers.len());
        prop_assert_eq!(f.registry.escrowed(&f.base.address), expected);
    }

    /// The earnings split sends the truncated fee to the fee recipient and
    /// every remaining unit to the owner.
    #[test]
    fn prop_fee_split_is_exact(raised in 1i128..=INVESTOR_BALANCE, fee_bps in 0u32..=10_000) {
        let f = LaunchFixture::with_fee(false, fee_bps);
        let mut params = f.params();
        params.hard_cap = INVESTOR_BALANCE;
        params.soft_cap = 1;
        let f = f.ready_with(params);
        let investor = f.investor(1);

        f.at(ROUND_DELTAS[0]);
        f.buy(&investor, raised);
        prop_assert!(f.finish());
        f.registry.withdraw_earnings(&f.owner, &f.sale_id);

        let fee = raised * i128::from(fee_bps) / 10_000;
        prop_assert_eq!(f.base.balance(&f.fee_to), fee);
        prop_assert_eq!(f.base.balance(&f.owner), raised - fee);
        prop_assert_eq!(f.base.balance(&f.fee_to) + f.base.balance(&f.owner), raised);
        prop_assert_eq!(f.base.balance(&f.registry.address), 0);
    }

    /// The outcome follows the soft cap, is fixed at finish, and each party
    /// settles exactly once on exactly one branch. Custody drains to zero.
    #[test]
    fn prop_settlement_is_final_and_exclusive(amounts in prop::collection::vec(1i128..=60, 1..5)) {
        let f = LaunchFixture::new(false).ready();
        f.at(ROUND_DELTAS[0]);

        let mut sold = 0i128;
        let mut buyers = std::vec::Vec::new();
        for amount in amounts {
            let investor = f.investor(1);
            f.buy(&investor, amount);
            sold += amount;
            buyers.push((investor, amount));
        }

        let successful = f.finish();
        prop_assert_eq!(successful, sold >= SOFT_CAP);
        f.at(SALE_END_DELTA + 5_000);
        prop_assert_eq!(f.registry.is_successful(&f.sale_id), successful);
        prop_assert_eq!(
            f.registry.try_finish_sale(&f.admin, &f.sale_id),
            Err(Ok(Error::AlreadyFinished))
        );

        if successful {
            for (investor, amount) in &buyers {
                prop_assert_eq!(
                    f.registry.try_refund_if_cancelled(investor, &f.sale_id),
                    Err(Ok(Error::SaleNotCancelled))
                );
                f.registry.withdraw(investor, &f.sale_id);
                prop_assert_eq!(f.sale_token.balance(investor), *amount);
                prop_assert_eq!(
                    f.registry.try_withdraw(investor, &f.sale_id),
                    Err(Ok(Error::AlreadyWithdrawn))
                );
            }
            prop_assert_eq!(
                f.registry.try_reclaim_deposit_if_cancelled(&f.owner, &f.sale_id),
                Err(Ok(Error::SaleNotCancelled))
            );
            f.registry.withdraw_earnings_and_leftover(&f.owner, &f.sale_id);
            prop_assert_eq!(
                f.registry.try_withdraw_earnings_and_leftover(&f.owner, &f.sale_id),
                Err(Ok(Error::AlreadyWithdrawn))
            );
        } else {
            for (investor, amount) in &buyers {
                prop_assert_eq!(
                    f.registry.try_withdraw(investor, &f.sale_id),
                    Err(Ok(Error::SaleNotSuccessful))
                );
                let before = f.base.balance(investor);
                f.registry.refund_if_cancelled(investor, &f.sale_id);
                prop_assert_eq!(f.base.balance(investor), before + amount);
                prop_assert_eq!(
                    f.registry.try_refund_if_cancelled(investor, &f.sale_id),
                    Err(Ok(Error::AlreadyWithdrawn))
                );
            }
            prop_assert_eq!(
                f.registry.try_withdraw_earnings(&f.owner, &f.sale_id),
                Err(Ok(Error::SaleNotSuccessful))
            );
            prop_assert_eq!(
                f.registry.try_withdraw_leftover(&f.owner, &f.sale_id),
                Err(Ok(Error::SaleNotSuccessful))
            );
            f.registry.reclaim_deposit_if_cancelled(&f.owner, &f.sale_id);
        }

        prop_assert_eq!(f.base.balance(&f.registry.address), 0);
        prop_assert_eq!(f.sale_token.balance(&f.registry.address), 0);
        prop_assert_eq!(f.registry.escrowed(&f.base.address), 0);
        prop_assert_eq!(f.registry.escrowed(&f.sale_token.address), 0);
    }
}
