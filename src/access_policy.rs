use indexmap::IndexSet;
use std::borrow::Borrow;
use std::hash::Hash;

/// Tri-state permission set over a value domain (origins, methods or header names).
///
/// `Unrestricted` matches any value. `Explicit` matches only the values in its set,
/// and an empty set matches nothing.
///
/// Edits follow a materialising rule: every `allow*` and `deny*` call first turns an
/// `Unrestricted` policy into an empty `Explicit` one. Allowing a value therefore
/// narrows "anything" to "just that value", and denying a value from `Unrestricted`
/// yields "nothing", not "anything except that value".
#[derive(Clone, Debug)]
pub enum AccessPolicy<V> {
    Unrestricted,
    Explicit(IndexSet<V>),
}

impl<V> Default for AccessPolicy<V> {
    fn default() -> Self {
        Self::Unrestricted
    }
}

impl<V: Hash + Eq> PartialEq for AccessPolicy<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unrestricted, Self::Unrestricted) => true,
            (Self::Explicit(left), Self::Explicit(right)) => left == right,
            _ => false,
        }
    }
}

impl<V: Hash + Eq> Eq for AccessPolicy<V> {}

impl<V: Hash + Eq> AccessPolicy<V> {
    pub fn new() -> Self {
        Self::Unrestricted
    }

    /// Builds an explicit policy from the given values.
    pub fn explicit<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        Self::Explicit(values.into_iter().map(Into::into).collect())
    }

    /// The explicit set, or `None` when the policy is unrestricted.
    pub fn allowed(&self) -> Option<&IndexSet<V>> {
        match self {
            Self::Unrestricted => None,
            Self::Explicit(values) => Some(values),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    pub fn allows<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            Self::Unrestricted => true,
            Self::Explicit(values) => values.contains(value),
        }
    }

    pub fn allow_any(&mut self) -> &mut Self {
        *self = Self::Unrestricted;
        self
    }

    pub fn deny_any(&mut self) -> &mut Self {
        match self {
            Self::Explicit(values) => values.clear(),
            Self::Unrestricted => *self = Self::Explicit(IndexSet::new()),
        }
        self
    }

    pub fn allow(&mut self, value: impl Into<V>) -> &mut Self {
        self.explicit_mut().insert(value.into());
        self
    }

    /// Adds every value. An empty iterator still materialises an unrestricted policy.
    pub fn allow_all<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        self.explicit_mut()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Like [`Self::allow_all`], but absent entries are skipped.
    pub fn allow_present<I, T>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<V>,
    {
        self.allow_all(values.into_iter().flatten())
    }

    pub fn deny(&mut self, value: impl Into<V>) -> &mut Self {
        match self {
            Self::Explicit(values) => {
                values.shift_remove(&value.into());
            }
            Self::Unrestricted => *self = Self::Explicit(IndexSet::new()),
        }
        self
    }

    pub fn deny_all<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        match self {
            Self::Explicit(allowed) => {
                for value in values {
                    allowed.shift_remove(&value.into());
                }
            }
            Self::Unrestricted => *self = Self::Explicit(IndexSet::new()),
        }
        self
    }

    /// Like [`Self::deny_all`], but absent entries are skipped.
    pub fn deny_present<I, T>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<V>,
    {
        self.deny_all(values.into_iter().flatten())
    }

    /// Returns the policy to `Unrestricted`.
    pub fn reset(&mut self) {
        *self = Self::Unrestricted;
    }

    /// Moves the current state out, leaving the policy reset.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn explicit_mut(&mut self) -> &mut IndexSet<V> {
        match self {
            Self::Explicit(values) => values,
            Self::Unrestricted => {
                *self = Self::Explicit(IndexSet::new());
                self.explicit_mut()
            }
        }
    }
}

#[cfg(test)]
#[path = "access_policy_test.rs"]
mod access_policy_test;
