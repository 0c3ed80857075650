use failsafe::{backoff, failure_policy, Config, StateMachine};
use std::time::Duration;

const FAILURES_BEFORE_OPEN: u32 = 5;
const MIN_OPEN_PERIOD: Duration = Duration::from_secs(10);
const MAX_OPEN_PERIOD: Duration = Duration::from_secs(60);

/// Breaker shared by every prediction made through one `HttpClassifier`.
pub type ClassifierCircuitBreaker =
    StateMachine<failure_policy::ConsecutiveFailures<backoff::Exponential>, ()>;

/// Breaker that opens after five consecutive classifier failures.
///
/// While open, predictions fail with `ClassifierError::CircuitOpen` without
/// touching the network. The open period doubles from 10s up to 60s while
/// the endpoint keeps failing its trial calls.
pub fn create_classifier_circuit_breaker() -> ClassifierCircuitBreaker {
    let open_periods = backoff::exponential(MIN_OPEN_PERIOD, MAX_OPEN_PERIOD);

    Config::new()
        .failure_policy(failure_policy::consecutive_failures(
            FAILURES_BEFORE_OPEN,
            open_periods,
        ))
        .build()
}
