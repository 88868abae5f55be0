//! Publish state of courses and their content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Draft,
    Published,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }

    pub fn is_published(self) -> bool {
        self == Self::Published
    }
}

impl From<bool> for Visibility {
    fn from(is_published: bool) -> Self {
        if is_published {
            Self::Published
        } else {
            Self::Draft
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let draft = Visibility::from(false);
        assert_eq!(draft, Visibility::Draft);
        assert!(draft.toggled().is_published());
        assert_eq!(draft.toggled().toggled(), Visibility::Draft);
    }
}
