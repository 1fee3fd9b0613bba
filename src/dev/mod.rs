/// Development utilities module
///
/// In-memory stand-in for the stats API, used by `--mock` and by tests.
pub mod mock_client;

pub use mock_client::{MockClient, MOCK_PASSWORD};
