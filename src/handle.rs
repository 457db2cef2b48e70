use serde::{Deserialize, Serialize};

/// Strand of a node reference inside an edge or a subgraph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Orientation {
    Forward,
    Backward,
}

impl Orientation {
    /// Parses the `+`/`-` marker; anything else is rejected.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Orientation::Forward),
            '-' => Some(Orientation::Backward),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Backward => '-',
        }
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        self == Orientation::Backward
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Forward
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Physical end of a segment sequence, in forward coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The side that a strand sees as `self`; a reverse strand swaps
    /// the two ends.
    #[inline]
    pub fn oriented(self, orient: Orientation) -> Self {
        if orient.is_reverse() {
            self.opposite()
        } else {
            self
        }
    }
}

/// A node id together with an orientation, i.e. one strand of a
/// segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    pub id: String,
    pub orient: Orientation,
}

impl Handle {
    #[inline]
    pub fn new<S: Into<String>>(id: S, orient: Orientation) -> Handle {
        Handle {
            id: id.into(),
            orient,
        }
    }

    #[inline]
    pub fn forward<S: Into<String>>(id: S) -> Handle {
        Handle::new(id, Orientation::Forward)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.orient.is_reverse()
    }

    #[inline]
    pub fn flip(&self) -> Self {
        Handle {
            id: self.id.clone(),
            orient: self.orient.flip(),
        }
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.id, self.orient)
    }
}
