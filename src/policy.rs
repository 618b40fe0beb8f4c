//! Which origin headers reach the downstream client.

use std::collections::HashSet;

/// Verdict of [`HeaderPolicy::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admit {
    /// Hand the header to the downstream-facing layer.
    Forward,
    /// Keep the header internal to the exchange.
    Drop,
}

/// Headers hidden from the downstream client unless explicitly passed.
const DEFAULT_HIDE: &[&str] = &[
    "date",
    "server",
    "x-pad",
    "x-accel-expires",
    "x-accel-redirect",
    "x-accel-limit-rate",
    "x-accel-buffering",
    "x-accel-charset",
];

/// Process-wide header visibility policy.
///
/// Built once from configuration, then shared read-only across all exchanges:
/// nothing here mutates, so no locking is needed.
///
/// The pass set wins over the hide set; a name present in both is forwarded.
#[derive(Debug, Clone)]
pub struct HeaderPolicy {
    hide: HashSet<Box<str>>,
    pass: HashSet<Box<str>>,
}

impl HeaderPolicy {
    /// Policy from configured hide and pass names, normalized to lowercase.
    pub fn new<H, P>(hide: H, pass: P) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let lower = |name: &str| name.to_ascii_lowercase().into_boxed_str();
        Self {
            hide: hide.into_iter().map(|name| lower(name.as_ref())).collect(),
            pass: pass.into_iter().map(|name| lower(name.as_ref())).collect(),
        }
    }

    /// Should a header with this lowercase name be forwarded downstream?
    ///
    /// Pure function of its inputs; safe to call concurrently from any number
    /// of exchanges.
    pub fn admit(&self, lowercase_name: &str) -> Admit {
        if self.pass.contains(lowercase_name) {
            Admit::Forward
        } else if self.hide.contains(lowercase_name) {
            Admit::Drop
        } else {
            Admit::Forward
        }
    }
}

impl Default for HeaderPolicy {
    /// The stock hide list, no pass overrides.
    fn default() -> Self {
        Self::new(DEFAULT_HIDE, std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::{Admit, HeaderPolicy};

    #[test]
    fn pass_wins_over_hide() {
        let policy = HeaderPolicy::new(["x-internal"], ["x-internal"]);
        assert_eq!(policy.admit("x-internal"), Admit::Forward);

        let policy = HeaderPolicy::new(["x-internal"], std::iter::empty::<&str>());
        assert_eq!(policy.admit("x-internal"), Admit::Drop);
        assert_eq!(policy.admit("x-other"), Admit::Forward);
    }

    #[test]
    fn configured_names_are_normalized() {
        let policy = HeaderPolicy::new(["X-Accel-Redirect"], ["X-Pad"]);
        assert_eq!(policy.admit("x-accel-redirect"), Admit::Drop);
        assert_eq!(policy.admit("x-pad"), Admit::Forward);
    }

    #[test]
    fn stock_hide_list() {
        let policy = HeaderPolicy::default();
        for name in ["date", "server", "x-accel-redirect", "x-accel-buffering"] {
            assert_eq!(policy.admit(name), Admit::Drop, "{name}");
        }
        assert_eq!(policy.admit("content-type"), Admit::Forward);
        assert_eq!(policy.admit("set-cookie"), Admit::Forward);
    }
}
