//! Helpers for testing code that depends on the engine. Enabled with the `test_utils` feature.
mod notifiers;
mod prepare_env;

pub use notifiers::{FailingNotifier, RecordingNotifier, SlowNotifier};
pub use prepare_env::prepare_test_env;
