//! Capability slot: name to granted flag.

use super::ExpectationStore;

impl ExpectationStore {
    /// Grant every listed capability to the current user
    pub fn grant_capabilities<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.capabilities.insert(name.into(), true);
        }
    }

    /// Explicitly deny a capability
    pub fn deny_capability(&mut self, name: &str) {
        self.capabilities.insert(name.to_string(), false);
    }

    /// Whether the current user holds *all* listed capabilities.
    ///
    /// Stops at the first missing one. Unknown capabilities are not granted.
    pub fn current_user_can<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .all(|name| self.capabilities.get(name.as_ref()).copied().unwrap_or(false))
    }
}
