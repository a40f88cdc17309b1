use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Hearts = 0,
    Diamonds = 1,
    Clubs = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Hearts),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Clubs),
            3 => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Accepts full names ("Hearts") as well as single letters ("H"), any case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "hearts" | "heart" | "h" => Some(Suit::Hearts),
            "diamonds" | "diamond" | "d" => Some(Suit::Diamonds),
            "clubs" | "club" | "c" => Some(Suit::Clubs),
            "spades" | "spade" | "s" => Some(Suit::Spades),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// First slot of this suit in the 0..52 card index space.
    pub const fn offset(self) -> usize {
        self.index() * 13
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
            Suit::Spades => "\u{2660}",
        };
        f.write_str(symbol)
    }
}

// Written as full names, read from any label `from_label` accepts.
impl Serialize for Suit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Suit::from_label(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown suit label '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn offsets_follow_suit_order() {
        assert_eq!(Suit::Hearts.offset(), 0);
        assert_eq!(Suit::Diamonds.offset(), 13);
        assert_eq!(Suit::Clubs.offset(), 26);
        assert_eq!(Suit::Spades.offset(), 39);
    }

    #[test]
    fn labels_parse_long_and_short_forms() {
        assert_eq!(Suit::from_label("Hearts"), Some(Suit::Hearts));
        assert_eq!(Suit::from_label(" d "), Some(Suit::Diamonds));
        assert_eq!(Suit::from_label("spade"), Some(Suit::Spades));
        assert_eq!(Suit::from_label("stars"), None);
    }

    #[test]
    fn json_accepts_short_labels_and_writes_names() {
        let parsed: Suit = serde_json::from_str(r#""H""#).expect("parse");
        assert_eq!(parsed, Suit::Hearts);
        let parsed: Suit = serde_json::from_str(r#""clubs""#).expect("parse");
        assert_eq!(parsed, Suit::Clubs);
        assert_eq!(serde_json::to_string(&Suit::Spades).expect("serialize"), r#""Spades""#);
        let err = serde_json::from_str::<Suit>(r#""X""#).expect_err("bad label");
        assert!(err.to_string().contains("unknown suit label 'X'"));
    }

    #[test]
    fn index_roundtrip() {
        for (i, suit) in Suit::ALL.iter().enumerate() {
            assert_eq!(Suit::from_index(i), Some(*suit));
            assert_eq!(suit.index(), i);
        }
        assert_eq!(Suit::from_index(4), None);
    }
}
