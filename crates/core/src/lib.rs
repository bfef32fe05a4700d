pub mod errors;
pub mod models;
pub mod storage;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::Path;

use errors::CoreError;
use models::{
    market::Market, settings::Settings, stock::Stock, transaction::Transaction, user::User,
};
use storage::manager::{LoadOutcome, StorageManager};

/// How the current user came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    /// Created from settings defaults
    Fresh,
    /// Read back from a state file
    Restored,
}

/// Main entry point for the stock-sim-core library.
/// Holds the market, the user and the random source that drives prices.
#[must_use]
pub struct StockSimulator {
    settings: Settings,
    market: Market,
    user: User,
    rng: StdRng,
    round: u64,
    start: SessionStart,
    /// Tracks whether any trade has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for StockSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockSimulator")
            .field("user", &self.user.name())
            .field("balance", &self.user.balance())
            .field("stocks", &self.market.len())
            .field("round", &self.round)
            .field("start", &self.start)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl StockSimulator {
    /// Start a fresh session with an entropy-seeded price walk.
    pub fn create_new(settings: Settings) -> Result<Self, CoreError> {
        let user = Self::default_user(&settings);
        Self::build(settings, user, StdRng::from_entropy(), SessionStart::Fresh)
    }

    /// Start a fresh session whose price walk is reproducible from `seed`.
    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self, CoreError> {
        let user = Self::default_user(&settings);
        Self::build(settings, user, StdRng::seed_from_u64(seed), SessionStart::Fresh)
    }

    /// Resume with an existing user against a freshly built market.
    pub fn with_user(settings: Settings, user: User, seed: Option<u64>) -> Result<Self, CoreError> {
        Self::build(settings, user, Self::rng_from(seed), SessionStart::Restored)
    }

    /// Restore the user from `settings.state_path`, or start fresh.
    ///
    /// A missing file and a damaged file both fall back to the default user;
    /// the damaged case is logged as a warning.
    pub fn load_or_default(settings: Settings, seed: Option<u64>) -> Result<Self, CoreError> {
        let (user, start) = match StorageManager::load_user_state(&settings.state_path) {
            LoadOutcome::Restored(user) => (user, SessionStart::Restored),
            LoadOutcome::Missing => (Self::default_user(&settings), SessionStart::Fresh),
            LoadOutcome::Corrupt(e) => {
                warn!("starting with a fresh user, saved state ignored: {e}");
                (Self::default_user(&settings), SessionStart::Fresh)
            }
        };
        Self::build(settings, user, Self::rng_from(seed), start)
    }

    fn build(
        settings: Settings,
        user: User,
        rng: StdRng,
        start: SessionStart,
    ) -> Result<Self, CoreError> {
        let market = Market::from_settings(&settings)?;
        Ok(Self {
            settings,
            market,
            user,
            rng,
            round: 0,
            start,
            dirty: false,
        })
    }

    fn default_user(settings: &Settings) -> User {
        User::new(settings.user_name.clone(), settings.starting_balance)
    }

    fn rng_from(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    // ── Rounds ──────────────────────────────────────────────────────

    /// Advance every market price once. Returns the new round number.
    pub fn next_round(&mut self) -> u64 {
        self.market.simulate_price_changes(&mut self.rng);
        self.round += 1;
        debug!("round {} complete", self.round);
        self.round
    }

    /// Number of rounds run in this session.
    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy `quantity` shares of `symbol` at its current price.
    /// The symbol is matched case-insensitively against the market.
    /// Returns the recorded transaction.
    pub fn buy(&mut self, symbol: &str, quantity: u32) -> Result<&Transaction, CoreError> {
        let stock = self.market.require_stock(&symbol.trim().to_uppercase())?;
        self.user.buy(stock, quantity)?;
        self.dirty = true;
        Ok(self.last_transaction())
    }

    /// Sell `quantity` shares of `symbol` at its current price.
    /// Returns the recorded transaction.
    pub fn sell(&mut self, symbol: &str, quantity: u32) -> Result<&Transaction, CoreError> {
        let stock = self.market.require_stock(&symbol.trim().to_uppercase())?;
        self.user.sell(stock, quantity)?;
        self.dirty = true;
        Ok(self.last_transaction())
    }

    // Only called right after a successful trade, so the log is non-empty.
    fn last_transaction(&self) -> &Transaction {
        let log = self.user.portfolio().transactions();
        &log[log.len() - 1]
    }

    // ── Holdings & Value ────────────────────────────────────────────

    /// Market value of all holdings at current prices.
    pub fn portfolio_value(&self) -> Result<f64, CoreError> {
        self.user.portfolio().calculate_value(&self.market)
    }

    /// Cash plus portfolio value.
    pub fn net_worth(&self) -> Result<f64, CoreError> {
        self.user.net_worth(&self.market)
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.user.balance()
    }

    #[must_use]
    pub fn holdings(&self) -> &BTreeMap<String, u32> {
        self.user.portfolio().holdings()
    }

    /// The full trade log, oldest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.user.portfolio().transactions()
    }

    /// Current price of `symbol`, if listed.
    #[must_use]
    pub fn quote(&self, symbol: &str) -> Option<&Stock> {
        self.market.get_stock(&symbol.trim().to_uppercase())
    }

    #[must_use]
    pub fn market(&self) -> &Market {
        &self.market
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn session_start(&self) -> SessionStart {
        self.start
    }

    // ── Persistence & Dirty State ───────────────────────────────────

    /// Replace the user with a fresh default one. Marks the session dirty.
    pub fn reset_user(&mut self) {
        self.user = Self::default_user(&self.settings);
        self.start = SessionStart::Fresh;
        self.dirty = true;
    }

    /// Save the user to the configured state path.
    pub fn save(&mut self) -> Result<(), CoreError> {
        let path = self.settings.state_path.clone();
        self.save_to_file(path)
    }

    /// Save the user to `path`, overwriting it.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.user, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if a trade or reset happened since the session started
    /// or was last saved.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }
}
