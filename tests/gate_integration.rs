use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use launchpad_tests::constants::*;
use launchpad_tests::{assert_contract_error, create_token, LaunchFixture};
use sale_registry::{Error, SaleRegistry, SaleRegistryClient};

#[test]
fn test_admin_added_to_gate_gains_registry_rights() {
    let f = LaunchFixture::new(false).ready();
    let operator = Address::generate(&f.env);

    assert_contract_error!(
        f.registry
            .try_deploy_sale(&operator, &f.base.address, &false),
        Error::NotAdmin
    );

    f.gate.add_admin(&f.admin, &operator);
    let second = f
        .registry
        .deploy_sale(&operator, &f.base.address, &false);
    assert_eq!(f.registry.sale_count(), 2);
    assert_eq!(f.registry.sale_at(&1), second);

    f.at(SALE_END_DELTA);
    assert!(!f.registry.finish_sale(&operator, &f.sale_id));
}

#[test]
fn test_admin_removed_from_gate_loses_rights() {
    let f = LaunchFixture::new(false).ready();
    let operator = Address::generate(&f.env);
    f.gate.add_admin(&f.admin, &operator);
    f.gate.remove_admin(&operator, &f.admin);

    assert!(!f.gate.is_admin(&f.admin));
    assert_contract_error!(
        f.registry.try_set_fee_bps(&f.admin, &10),
        Error::NotAdmin
    );

    f.at(SALE_END_DELTA);
    assert_contract_error!(
        f.registry.try_finish_sale(&f.admin, &f.sale_id),
        Error::NotAdmin
    );
    f.registry.finish_sale(&operator, &f.sale_id);
}

#[test]
fn test_owner_is_not_an_admin() {
    let f = LaunchFixture::new(false).ready();
    let investor = f.investor(1);
    f.at(SALE_END_DELTA);

    assert_contract_error!(
        f.registry.try_finish_sale(&f.owner, &f.sale_id),
        Error::NotAdmin
    );
    assert_contract_error!(
        f.registry.try_grant_tiers(
            &f.owner,
            &f.sale_id,
            &soroban_sdk::vec![&f.env, investor],
            &soroban_sdk::vec![&f.env, 2u32],
        ),
        Error::NotAdmin
    );
}

#[test]
fn test_only_admins_sweep_stray_tokens() {
    let f = LaunchFixture::new(false).ready();
    let issuer = Address::generate(&f.env);
    let (stray, stray_admin) = create_token(&f.env, &issuer);
    let treasury = Address::generate(&f.env);

    stray_admin.mint(&f.registry.address, &70);
    assert_contract_error!(
        f.registry
            .try_remove_stuck_tokens(&f.owner, &f.sale_id, &stray.address, &f.owner),
        Error::NotAdmin
    );
    let stranger = Address::generate(&f.env);
    assert_contract_error!(
        f.registry
            .try_remove_stuck_tokens(&stranger, &f.sale_id, &stray.address, &stranger),
        Error::NotAdmin
    );

    f.registry
        .remove_stuck_tokens(&f.admin, &f.sale_id, &stray.address, &treasury);
    assert_eq!(stray.balance(&treasury), 70);
}

#[test]
fn test_registry_initialization_needs_a_gate_admin() {
    let f = LaunchFixture::new(false);
    let outsider = Address::generate(&f.env);
    let fresh = SaleRegistryClient::new(&f.env, &f.env.register_contract(None, SaleRegistry));

    assert_contract_error!(
        fresh.try_initialize(&outsider, &f.gate.address, &outsider, &10_000),
        Error::NotAdmin
    );
    fresh.initialize(&f.admin, &f.gate.address, &f.fee_to, &FEE_BPS);
    assert_eq!(fresh.config().fee_bps, FEE_BPS);
}

#[test]
fn test_sale_token_cannot_be_swept() {
    let f = LaunchFixture::new(false).ready();
    f.sale_token_admin.mint(&f.registry.address, &HARD_CAP);

    assert_contract_error!(
        f.registry.try_remove_stuck_tokens(
            &f.admin,
            &f.sale_id,
            &f.sale_token.address,
            &f.admin
        ),
        Error::CannotSweepSaleToken
    );
}
