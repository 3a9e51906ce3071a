use crate::access_policy::AccessPolicy;
use indexmap::IndexSet;

/// Origin rules: an [`AccessPolicy`] over literal origins plus an independent set of
/// raw regex patterns.
///
/// Patterns stay uncompiled until [`crate::PolicyBuilder::build`], which is the only
/// place an invalid pattern is reported. `regexes == None` means no regex rule was
/// configured; once any pattern has been added the regex set, not the unrestricted
/// literal set, decides which unlisted origins are accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    origins: AccessPolicy<String>,
    regexes: Option<IndexSet<String>>,
}

impl OriginPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed(&self) -> Option<&IndexSet<String>> {
        self.origins.allowed()
    }

    pub fn allowed_regexes(&self) -> Option<&IndexSet<String>> {
        self.regexes.as_ref()
    }

    pub fn policy(&self) -> &AccessPolicy<String> {
        &self.origins
    }

    /// True when neither literal origins nor regex patterns restrict anything.
    pub fn is_unrestricted(&self) -> bool {
        self.origins.is_unrestricted() && self.regexes.is_none()
    }

    /// Clears both the literal set and the regex set.
    pub fn allow_any(&mut self) -> &mut Self {
        self.origins.allow_any();
        self.regexes = None;
        self
    }

    pub fn deny_any(&mut self) -> &mut Self {
        self.origins.deny_any();
        self
    }

    pub fn allow(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origins.allow(origin);
        self
    }

    pub fn allow_all<I>(&mut self, origins: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.origins.allow_all(origins);
        self
    }

    pub fn allow_present<I, T>(&mut self, origins: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        self.origins.allow_present(origins);
        self
    }

    pub fn deny(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origins.deny(origin);
        self
    }

    pub fn deny_all<I>(&mut self, origins: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.origins.deny_all(origins);
        self
    }

    pub fn deny_present<I, T>(&mut self, origins: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<String>,
    {
        self.origins.deny_present(origins);
        self
    }

    pub fn add_regex(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.regexes
            .get_or_insert_with(IndexSet::new)
            .insert(pattern.into());
        self
    }

    pub fn remove_regex(&mut self, pattern: &str) -> &mut Self {
        if let Some(regexes) = self.regexes.as_mut() {
            regexes.shift_remove(pattern);
        }
        self
    }

    pub fn reset(&mut self) {
        self.origins.reset();
        self.regexes = None;
    }

    /// Moves the literal and regex state out, leaving the policy reset.
    pub(crate) fn take(&mut self) -> (AccessPolicy<String>, Option<IndexSet<String>>) {
        (self.origins.take(), self.regexes.take())
    }
}

#[cfg(test)]
#[path = "origin_policy_test.rs"]
mod origin_policy_test;
