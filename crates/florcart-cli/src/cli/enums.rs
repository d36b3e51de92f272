use crate::scenarios::Scenario;
use clap::ValueEnum;

/// Which scenarios `florcart run` executes
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum ScenarioSelection {
    /// Add two products from the love category and check the cart
    #[value(name = "love")]
    Love,

    /// Add a birthday product, check the header counter, then empty the cart
    #[value(name = "birthday")]
    Birthday,

    /// Every scenario, in order
    #[default]
    #[value(name = "all")]
    All,
}

impl ScenarioSelection {
    /// The scenarios to run, in execution order.
    pub fn scenarios(self) -> Vec<Scenario> {
        match self {
            Self::Love => vec![Scenario::Love],
            Self::Birthday => vec![Scenario::Birthday],
            Self::All => vec![Scenario::Love, Scenario::Birthday],
        }
    }
}
