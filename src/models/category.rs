/// Categories offered at input time. Stored records keep the category as free
/// text, so anything outside this list still loads and aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Food,
    Travel,
    Shopping,
    Other,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup of a preset category.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "travel" => Some(Self::Travel),
            "shopping" => Some(Self::Shopping),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Category] {
        &[Self::Food, Self::Travel, Self::Shopping, Self::Other]
    }

    /// Canonical spelling for a preset, or the trimmed input unchanged.
    pub(crate) fn normalize(s: &str) -> String {
        Self::parse(s)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| s.trim().to_string())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
