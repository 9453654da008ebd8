//! Change notification across several root validators

use std::cmp::Reverse;
use std::fmt;

use indexmap::IndexMap;

use super::source::ValueSource;
use super::validator::Validator;
use crate::foundation::ValidatorError;

/// Identifies a validator registered in a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorHandle(u64);

impl fmt::Display for ValidatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validator#{}", self.0)
    }
}

/// Holds the root validators of one form session and refreshes them when
/// field values change.
///
/// Enabled validators are refreshed in descending [`Validator::priority`];
/// equal priorities keep registration order.
///
/// ```rust,ignore
/// let mut session = Session::new();
/// let profile = session.register(profile_validator);
/// session.get_mut(profile).unwrap().enable(&form)?;
///
/// form.set("name", "Ada");
/// session.notify_changed(&form)?;
/// ```
#[derive(Debug, Default)]
pub struct Session {
    validators: IndexMap<ValidatorHandle, Validator>,
    next_id: u64,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a root validator.
    pub fn register(&mut self, validator: Validator) -> ValidatorHandle {
        let handle = ValidatorHandle(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            %handle,
            scope = %validator.scope(),
            priority = validator.priority(),
            "registered validator"
        );
        self.validators.insert(handle, validator);
        handle
    }

    /// Borrows a registered validator.
    #[must_use]
    pub fn get(&self, handle: ValidatorHandle) -> Option<&Validator> {
        self.validators.get(&handle)
    }

    /// Mutably borrows a registered validator.
    pub fn get_mut(&mut self, handle: ValidatorHandle) -> Option<&mut Validator> {
        self.validators.get_mut(&handle)
    }

    /// Unregisters a validator, disabling it first so its fields are cleared.
    pub fn remove(&mut self, handle: ValidatorHandle) -> Option<Validator> {
        let mut validator = self.validators.shift_remove(&handle)?;
        validator.disable();
        tracing::debug!(%handle, "removed validator");
        Some(validator)
    }

    /// Number of registered validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Handles in refresh order.
    #[must_use]
    pub fn refresh_order(&self) -> Vec<ValidatorHandle> {
        let mut handles: Vec<(ValidatorHandle, i32)> = self
            .validators
            .iter()
            .map(|(handle, v)| (*handle, v.priority()))
            .collect();
        handles.sort_by_key(|(_, priority)| Reverse(*priority));
        handles.into_iter().map(|(handle, _)| handle).collect()
    }

    /// Refreshes every enabled validator against `values`.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ValidatorError`] raised by a validator.
    pub fn notify_changed(&mut self, values: &dyn ValueSource) -> Result<(), ValidatorError> {
        for handle in self.refresh_order() {
            if let Some(validator) = self.validators.get_mut(&handle)
                && validator.is_enabled()
            {
                validator.notify_changed(values)?;
            }
        }
        Ok(())
    }
}
