//! Store & Pricing Config

use std::{path::PathBuf, time::Duration};

use checkout::pricing::UnknownItemPolicy;
use clap::Args;

/// How to price items missing from the catalog.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum UnknownItems {
    /// Price them at zero and log a warning.
    Ignore,

    /// Fail the update.
    Reject,
}

impl From<UnknownItems> for UnknownItemPolicy {
    fn from(value: UnknownItems) -> Self {
        match value {
            UnknownItems::Ignore => Self::Ignore,
            UnknownItems::Reject => Self::Reject,
        }
    }
}

/// Where baskets live and what they are priced against.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory holding `catalog/` and `promotions/` fixture sets, relative
    /// to the workspace root by default
    #[arg(
        long,
        global = true,
        env = "CHECKOUT_FIXTURES_DIR",
        default_value = "crates/core/fixtures"
    )]
    pub fixtures_dir: PathBuf,

    /// Fixture set to price against
    #[arg(long, global = true, env = "CHECKOUT_FIXTURE_SET", default_value = "kata")]
    pub fixture_set: String,

    /// YAML file baskets are persisted to
    #[arg(
        long,
        global = true,
        env = "CHECKOUT_STATE_FILE",
        default_value = "./checkout-state.yml"
    )]
    pub state_file: PathBuf,

    /// Policy for basket items missing from the catalog
    #[arg(
        long,
        global = true,
        env = "CHECKOUT_UNKNOWN_ITEMS",
        value_enum,
        default_value_t = UnknownItems::Ignore
    )]
    pub unknown_items: UnknownItems,

    /// Cancel the operation after this many milliseconds
    #[arg(long, global = true, env = "CHECKOUT_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl StoreConfig {
    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        store: StoreConfig,
    }

    #[test]
    fn default_fixtures_dir_holds_the_default_set() -> TestResult {
        let harness = Harness::try_parse_from(["checkout"])?;
        let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let fixtures = workspace.join(&harness.store.fixtures_dir);
        let set = &harness.store.fixture_set;

        assert!(fixtures.join("catalog").join(format!("{set}.yml")).is_file());
        assert!(fixtures.join("promotions").join(format!("{set}.yml")).is_file());

        Ok(())
    }
}
