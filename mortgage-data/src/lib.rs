pub mod loader;
pub mod writer;

pub use loader::{LoanScenario, ScenarioLoader, ScenarioLoaderError, ScenarioRecord};
pub use writer::{BreakdownWriter, BreakdownRow};
