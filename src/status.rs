use serde::{Deserialize, Serialize};

/// The result of ticking a node.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Status {
    Success,
    Failure,
    /// The node should keep running in the next tick
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Swaps `Success` and `Failure`. `Running` is left alone, since a node that
    /// has not resolved yet has nothing to negate.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

impl From<bool> for Status {
    fn from(b: bool) -> Self {
        if b {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invert_leaves_running_alone() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn from_bool() {
        assert!(Status::from(true).is_success());
        assert!(Status::from(false).is_failure());
        assert!(!Status::from(false).is_running());
    }
}
