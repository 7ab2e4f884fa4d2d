//! Host-side layout negotiation.
//!
//! The widget only produces an unconstrained preferred size. The host resolves
//! that request against whatever constraint the parent imposes on each axis.

/// Constraint the parent places on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The parent dictates the exact size.
    Exactly(i32),
    /// The child may be as large as it wants up to the bound.
    AtMost(i32),
    /// No constraint.
    Unspecified,
}

/// Outcome of resolving a requested size against a [`MeasureSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub size: i32,
    /// Set when an `AtMost` bound cut the request short.
    pub too_small: bool,
}

pub fn resolve_size(requested: i32, spec: MeasureSpec) -> Resolved {
    match spec {
        MeasureSpec::Exactly(size) => Resolved {
            size,
            too_small: false,
        },
        MeasureSpec::AtMost(bound) => Resolved {
            size: requested.min(bound),
            too_small: requested > bound,
        },
        MeasureSpec::Unspecified => Resolved {
            size: requested,
            too_small: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_ignores_request() {
        assert_eq!(
            resolve_size(500, MeasureSpec::Exactly(200)),
            Resolved {
                size: 200,
                too_small: false
            }
        );
    }

    #[test]
    fn at_most_caps_and_flags() {
        let resolved = resolve_size(500, MeasureSpec::AtMost(300));
        assert_eq!(resolved.size, 300);
        assert!(resolved.too_small);

        let resolved = resolve_size(250, MeasureSpec::AtMost(300));
        assert_eq!(resolved.size, 250);
        assert!(!resolved.too_small);
    }

    #[test]
    fn unspecified_passes_through() {
        assert_eq!(resolve_size(123, MeasureSpec::Unspecified).size, 123);
    }
}
