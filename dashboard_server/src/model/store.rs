//! In-memory quote store and the random-walk step that moves it.
//!
//! The store owns the company/account directory, one quote series per
//! (account, ticker) pair, and the RNG driving the walk. Tickers shared by several
//! accounts are tracked independently, so the same symbol may show different prices
//! in two accounts at once.
//!
//! Invariants kept by every mutation:
//! - `price >= MIN_PRICE`.
//! - `change` is the rounded difference to the price before the last update, zero after seeding.
//! - every quote touched by one tick carries the same `updated_at`, never earlier than the
//!   previous tick's.
//! - quote order within an account follows the account's ticker list and never changes.
use crate::model::clock::Clock;
use crate::model::directory::Directory;
use chrono::{DateTime, Utc};
use dashboard_common::model::{Account, Company, Quote};
use dashboard_common::net::REFRESH_PERIOD;
use dashboard_common::{DashboardError, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Lowest price a quote may reach.
pub const MIN_PRICE: f64 = 0.01;

/// Largest accepted base price; keeps `2 * base` in whole cents well inside `i64`.
pub const MAX_BASE_PRICE: f64 = 1e12;

/// Largest single-tick move as a fraction of price, split evenly up and down.
const STEP_RANGE: f64 = 0.02;

/// Store shared between the simulator thread and request handlers.
pub type SharedStore = Arc<RwLock<Store>>;

/// Simulation parameters, validated before a store is built.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Seed prices are drawn from `[base_price, 2 * base_price)`.
    pub base_price: f64,
    /// Period between ticks.
    pub tick_interval: Duration,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_price: 100.0,
            tick_interval: REFRESH_PERIOD,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Reject a base price outside `(0, MAX_BASE_PRICE]` or a zero tick interval.
    pub fn validate(&self) -> Result<()> {
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(DashboardError::Config(format!(
                "base price must be a positive number, got {}",
                self.base_price
            )));
        }
        if self.base_price > MAX_BASE_PRICE {
            return Err(DashboardError::Config(format!(
                "base price must not exceed {}, got {}",
                MAX_BASE_PRICE, self.base_price
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(DashboardError::Config(String::from("tick interval must be non-zero")));
        }
        Ok(())
    }
}

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One random-walk step.
///
/// `shock` is a draw from `[-0.5, 0.5)`; the move is `shock * price * STEP_RANGE`, i.e.
/// at most 1% of the current price. Returns the new price and the change.
pub fn step_price(price: f64, shock: f64) -> (f64, f64) {
    let delta = shock * price * STEP_RANGE;
    let next = round2(price + delta).max(MIN_PRICE);
    (next, round2(next - price))
}

/// Authoritative simulation state.
pub struct Store {
    directory: Directory,
    /// Account ids in directory order, so seeded runs draw in a stable order.
    account_order: Vec<String>,
    quotes: HashMap<String, Vec<Quote>>,
    base_price: f64,
    rng: StdRng,
    clock: Arc<dyn Clock>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Store {
    /// Build a store from a directory and seed every quote.
    pub fn new(directory: Directory, config: &SimulatorConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        directory.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let account_order = directory.all_accounts().map(|a| a.id.clone()).collect();

        let mut store = Self {
            directory,
            account_order,
            quotes: HashMap::new(),
            base_price: config.base_price,
            rng,
            clock,
            last_stamp: None,
        };
        store.initialize();
        Ok(store)
    }

    /// Wrap the store for sharing with the simulator and request handlers.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Seed one quote per subscribed ticker, replacing any existing quotes.
    ///
    /// Prices are whole cents drawn uniformly from `[base, 2 * base)`, `change` is zero
    /// and every quote is stamped with the current time. The tick timestamp floor resets.
    pub fn initialize(&mut self) {
        let now = self.clock.now();
        let low = ((self.base_price * 100.0).ceil() as i64).max(1);
        let high = ((self.base_price * 200.0).ceil() as i64).max(low.saturating_add(1));

        let mut quotes = HashMap::with_capacity(self.account_order.len());
        for account in self.directory.all_accounts() {
            let series = account
                .tickers
                .iter()
                .map(|ticker| Quote {
                    ticker: ticker.clone(),
                    price: self.rng.random_range(low..high) as f64 / 100.0,
                    change: 0.0,
                    updated_at: now,
                })
                .collect();
            quotes.insert(account.id.clone(), series);
        }

        self.quotes = quotes;
        self.last_stamp = Some(now);
        info!(
            "Store initialized: {} companies, {} accounts, {} quotes",
            self.directory.companies.len(),
            self.account_order.len(),
            self.quote_count()
        );
    }

    /// Move every quote one random-walk step.
    pub fn tick(&mut self) {
        let now = match self.last_stamp {
            Some(last) => self.clock.now().max(last),
            None => self.clock.now(),
        };

        for account_id in &self.account_order {
            let Some(series) = self.quotes.get_mut(account_id) else {
                continue;
            };
            for quote in series.iter_mut() {
                let shock: f64 = self.rng.random_range(-0.5..0.5);
                let (price, change) = step_price(quote.price, shock);
                quote.price = price;
                quote.change = change;
                quote.updated_at = now;
            }
        }
        self.last_stamp = Some(now);
    }

    /// All companies in seed order.
    pub fn companies(&self) -> &[Company] {
        &self.directory.companies
    }

    /// Accounts of `company_id` in seed order; empty when unknown.
    pub fn accounts(&self, company_id: &str) -> &[Account] {
        self.directory.accounts_of(company_id)
    }

    /// Quotes of `account_id` in subscription order; empty when unknown.
    pub fn quotes(&self, account_id: &str) -> &[Quote] {
        self.quotes
            .get(account_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn quote_count(&self) -> usize {
        self.quotes.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::ManualClock;
    use chrono::TimeDelta;

    fn seeded_store(seed: u64) -> (Store, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = SimulatorConfig {
            seed: Some(seed),
            ..SimulatorConfig::default()
        };
        let store = Store::new(Directory::default(), &config, clock.clone()).unwrap();
        (store, clock)
    }

    fn all_quotes(store: &Store) -> Vec<Quote> {
        store
            .account_order
            .iter()
            .flat_map(|id| store.quotes(id).to_vec())
            .collect()
    }

    #[test]
    fn seed_prices_fall_in_base_range_with_zero_change() {
        let (store, clock) = seeded_store(7);
        let quotes = all_quotes(&store);
        assert_eq!(quotes.len(), 15);
        for quote in quotes {
            assert!((100.0..200.0).contains(&quote.price), "{}", quote.price);
            assert_eq!(quote.price, round2(quote.price));
            assert_eq!(quote.change, 0.0);
            assert_eq!(quote.updated_at, clock.now());
        }
    }

    #[test]
    fn one_tick_moves_each_price_within_two_percent() {
        let (mut store, clock) = seeded_store(11);
        let before = all_quotes(&store);
        clock.advance(TimeDelta::seconds(1));
        store.tick();
        let after = all_quotes(&store);

        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.ticker, new.ticker);
            assert!(new.price >= MIN_PRICE);
            assert!((new.price - old.price).abs() <= old.price * 0.02);
            assert_eq!(new.change, round2(new.price - old.price));
            assert_eq!(new.updated_at, clock.now());
        }
    }

    #[test]
    fn many_ticks_keep_floor_order_and_change_invariants() {
        let (mut store, clock) = seeded_store(3);
        let tickers: Vec<String> = store.quotes("a2").iter().map(|q| q.ticker.clone()).collect();

        for _ in 0..500 {
            let before = all_quotes(&store);
            clock.advance(TimeDelta::seconds(1));
            store.tick();
            for (old, new) in before.iter().zip(all_quotes(&store)) {
                assert!(new.price >= MIN_PRICE);
                assert_eq!(new.change, round2(new.price - old.price));
                assert!(new.updated_at >= old.updated_at);
            }
        }

        let after: Vec<String> = store.quotes("a2").iter().map(|q| q.ticker.clone()).collect();
        assert_eq!(after, tickers);
        assert_eq!(after, store.accounts("c1")[1].tickers);
    }

    #[test]
    fn step_price_clamps_at_the_floor() {
        let (price, change) = step_price(MIN_PRICE, -0.5);
        assert_eq!(price, MIN_PRICE);
        assert_eq!(change, 0.0);

        let (price, change) = step_price(0.02, -0.5);
        assert!(price >= MIN_PRICE);
        assert_eq!(change, round2(price - 0.02));
    }

    #[test]
    fn step_price_is_bounded_by_one_percent() {
        let (up, _) = step_price(150.0, 0.4999);
        let (down, _) = step_price(150.0, -0.5);
        assert!(up <= 151.5 && up > 150.0);
        assert_eq!(down, 148.5);
    }

    #[test]
    fn tick_stamp_never_goes_backwards() {
        let (mut store, clock) = seeded_store(5);
        let seeded_at = store.quotes("a1")[0].updated_at;
        clock.advance(TimeDelta::seconds(-30));
        store.tick();
        assert_eq!(store.quotes("a1")[0].updated_at, seeded_at);
    }

    #[test]
    fn shared_tickers_walk_independently() {
        let (mut store, _clock) = seeded_store(42);
        for _ in 0..20 {
            store.tick();
        }
        let in_growth = store.quotes("a1").iter().find(|q| q.ticker == "MSFT").unwrap().price;
        let in_income = store.quotes("a2").iter().find(|q| q.ticker == "MSFT").unwrap().price;
        assert_ne!(in_growth, in_income);
    }

    #[test]
    fn same_seed_reproduces_the_same_walk() {
        let (mut first, _) = seeded_store(99);
        let (mut second, _) = seeded_store(99);
        first.tick();
        second.tick();
        assert_eq!(all_quotes(&first), all_quotes(&second));
    }

    #[test]
    fn reinitialize_resets_change_and_replaces_prices() {
        let (mut store, clock) = seeded_store(8);
        for _ in 0..3 {
            clock.advance(TimeDelta::seconds(1));
            store.tick();
        }
        clock.advance(TimeDelta::seconds(1));
        store.initialize();
        for quote in all_quotes(&store) {
            assert_eq!(quote.change, 0.0);
            assert_eq!(quote.updated_at, clock.now());
            assert!((100.0..200.0).contains(&quote.price));
        }
    }

    #[test]
    fn unknown_ids_yield_empty_slices() {
        let (store, _) = seeded_store(1);
        assert!(store.accounts("nope").is_empty());
        assert!(store.quotes("nope").is_empty());
    }

    #[test]
    fn rejects_non_positive_base_price() {
        for base_price in [0.0, -5.0, f64::NAN] {
            let config = SimulatorConfig {
                base_price,
                ..SimulatorConfig::default()
            };
            let result = Store::new(Directory::default(), &config, Arc::new(ManualClock::new()));
            assert!(matches!(result, Err(DashboardError::Config(_))));
        }
    }

    #[test]
    fn rejects_huge_base_price() {
        for base_price in [1e18, f64::MAX, MAX_BASE_PRICE * 2.0] {
            let config = SimulatorConfig {
                base_price,
                ..SimulatorConfig::default()
            };
            assert!(matches!(config.validate(), Err(DashboardError::Config(_))));
            let result = Store::new(Directory::default(), &config, Arc::new(ManualClock::new()));
            assert!(matches!(result, Err(DashboardError::Config(_))));
        }
    }

    #[test]
    fn largest_accepted_base_price_seeds_in_range() {
        let config = SimulatorConfig {
            base_price: MAX_BASE_PRICE,
            seed: Some(4),
            ..SimulatorConfig::default()
        };
        let store = Store::new(Directory::default(), &config, Arc::new(ManualClock::new())).unwrap();
        for quote in store.quotes("a1") {
            assert!(quote.price >= MAX_BASE_PRICE && quote.price < 2.0 * MAX_BASE_PRICE);
        }
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = SimulatorConfig {
            tick_interval: Duration::ZERO,
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
