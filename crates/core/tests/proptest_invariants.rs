//! Property-based tests for bookkeeping invariants.
//!
//! Random sequences of buys, sells and price rounds are replayed against a
//! user; after every step the balance, holdings and trade log must agree.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stock_sim_core::models::market::Market;
use stock_sim_core::models::price::round_to_cents;
use stock_sim_core::models::settings::Settings;
use stock_sim_core::models::transaction::TradeSide;
use stock_sim_core::models::user::User;
use stock_sim_core::storage::manager::StorageManager;

const SYMBOLS: [&str; 3] = ["AAPL", "GOOGL", "TSLA"];

#[derive(Debug, Clone)]
enum Op {
    Buy(usize, u32),
    Sell(usize, u32),
    Round,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SYMBOLS.len(), 1u32..=20).prop_map(|(s, q)| Op::Buy(s, q)),
        (0..SYMBOLS.len(), 1u32..=20).prop_map(|(s, q)| Op::Sell(s, q)),
        Just(Op::Round),
    ]
}

/// Net shares per symbol according to the trade log alone.
fn shares_from_log(user: &User, symbol: &str) -> i64 {
    user.portfolio()
        .transactions_for(symbol)
        .iter()
        .map(|t| match t.side() {
            TradeSide::Buy => i64::from(t.quantity()),
            TradeSide::Sell => -i64::from(t.quantity()),
        })
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Holdings and balance never go negative, failed trades change
    /// nothing, and holdings always match the log.
    #[test]
    fn bookkeeping_invariants(
        seed in any::<u64>(),
        balance in 0u32..=50_000,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut market = Market::from_settings(&Settings::default()).unwrap();
        let mut user = User::new("Prop", f64::from(balance));

        for op in ops {
            let before = user.clone();
            let result = match op {
                Op::Buy(s, q) => user.buy(market.require_stock(SYMBOLS[s]).unwrap(), q),
                Op::Sell(s, q) => user.sell(market.require_stock(SYMBOLS[s]).unwrap(), q),
                Op::Round => {
                    market.simulate_price_changes(&mut rng);
                    Ok(())
                }
            };

            if result.is_err() {
                prop_assert_eq!(&user, &before);
            }

            prop_assert!(user.balance() >= 0.0, "balance went negative: {}", user.balance());
            for symbol in SYMBOLS {
                let held = i64::from(user.portfolio().holding(symbol));
                prop_assert_eq!(held, shares_from_log(&user, symbol));
                prop_assert!(held >= 0);
            }
        }
    }

    /// A successful buy moves exactly price × quantity out of cash.
    #[test]
    fn buy_debits_exact_cost(
        price_cents in 1u32..=500_000,
        qty in 1u32..=100,
    ) {
        let price = f64::from(price_cents) / 100.0;
        let stock = stock_sim_core::models::stock::Stock::new("X", "X", price);
        let cost = round_to_cents(price * f64::from(qty));
        let mut user = User::new("Prop", cost + 100.0);
        let start = user.balance();

        user.buy(&stock, qty).unwrap();
        prop_assert!((user.balance() - round_to_cents(start - cost)).abs() < 1e-9);
        prop_assert_eq!(user.portfolio().holding("X"), qty);
        prop_assert_eq!(user.portfolio().transaction_count(), 1);
    }

    /// Save then load reproduces the user exactly.
    #[test]
    fn storage_round_trip(
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let market = Market::from_settings(&Settings::default()).unwrap();
        let mut user = User::new("Prop", 100_000.0);
        for op in ops {
            let _ = match op {
                Op::Buy(s, q) => user.buy(market.require_stock(SYMBOLS[s]).unwrap(), q),
                Op::Sell(s, q) => user.sell(market.require_stock(SYMBOLS[s]).unwrap(), q),
                Op::Round => Ok(()),
            };
        }

        let bytes = StorageManager::save_to_bytes(&user).unwrap();
        let loaded = StorageManager::load_from_bytes(&bytes).unwrap();
        prop_assert_eq!(loaded, user);
    }
}
