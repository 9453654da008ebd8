//! Override conditions for validators

use std::fmt;
use std::sync::Arc;

use super::source::ValueSource;

type Predicate = Arc<dyn Fn(&dyn ValueSource) -> bool + Send + Sync>;

/// Decides whether a validator is active for the current values.
///
/// While a condition evaluates to `false`, the validator and all of its
/// descendants report every field as valid. The predicate receives the same
/// value source the evaluation reads from, so a condition can depend on other
/// fields.
///
/// ```rust,ignore
/// // Shipping address is only checked when the box is ticked
/// let ships = Condition::new(|values| values.value(&"ship_elsewhere".into()) == Value::from(true));
/// shipping.set_condition(Some(ships));
/// ```
#[derive(Clone)]
pub struct Condition {
    predicate: Predicate,
}

impl Condition {
    /// Creates a condition reading field values.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn ValueSource) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Creates a condition that ignores field values.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(move |_| predicate())
    }

    /// A condition that is always `value`.
    #[must_use]
    pub fn constant(value: bool) -> Self {
        Self::from_fn(move || value)
    }

    /// Evaluates the condition.
    #[must_use]
    pub fn holds(&self, values: &dyn ValueSource) -> bool {
        (self.predicate)(values)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("predicate", &"<function>")
            .finish()
    }
}
