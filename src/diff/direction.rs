use serde::Serialize;

/// Which side of an operation a subtree belongs to.
///
/// The same structural change can be harmless on one side and breaking on
/// the other: a new enum value is fine in a request but surprises clients
/// reading a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Request,
    Response,
    /// Top-level components, not yet attached to either side
    #[default]
    Unspecified,
}

impl Direction {
    /// Pick the verdict for this side. `Unspecified` keeps a change if it
    /// would break on either side.
    #[must_use]
    pub const fn keeps(self, request: bool, response: bool) -> bool {
        match self {
            Self::Request => request,
            Self::Response => response,
            Self::Unspecified => request || response,
        }
    }

    /// True when a narrowing of accepted values breaks clients here.
    #[must_use]
    pub const fn keeps_tightening(self) -> bool {
        self.keeps(true, false)
    }

    /// True when a widening of produced values breaks clients here.
    #[must_use]
    pub const fn keeps_loosening(self) -> bool {
        self.keeps(false, true)
    }

    /// Verdict for a change that either narrows (`true`) or widens the
    /// set of values.
    #[must_use]
    pub const fn keeps_change(self, narrows: bool) -> bool {
        if narrows {
            self.keeps_tightening()
        } else {
            self.keeps_loosening()
        }
    }
}
