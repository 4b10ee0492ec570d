/// Fetch-lifecycle code reported by the content source for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryStatus {
    Initializing,
    Available,
    AvailableLoading,
    NotProvided,
    CategoryExplicitlyDisabled,
    AllDisabled,
    LoadingError,
    NotProvidedByServer,
}

impl CategoryStatus {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available | Self::AvailableLoading)
    }

    pub fn is_init_or_available(self) -> bool {
        self == Self::Initializing || self.is_available()
    }

    /// Whether a fetch (initial or incremental) is in flight.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Initializing | Self::AvailableLoading)
    }
}

/// What the status placeholder of a section shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCard {
    Loading,
    ErrorWithRetry,
    NoContent,
    Hidden,
}

impl StatusCard {
    /// Derives the placeholder for a section holding `has_entries` entries under `status`.
    pub fn for_status(status: CategoryStatus, has_entries: bool) -> Self {
        if has_entries {
            return Self::Hidden;
        }
        match status {
            CategoryStatus::Initializing | CategoryStatus::AvailableLoading => Self::Loading,
            CategoryStatus::LoadingError => Self::ErrorWithRetry,
            CategoryStatus::Available
            | CategoryStatus::NotProvided
            | CategoryStatus::CategoryExplicitlyDisabled
            | CategoryStatus::AllDisabled
            | CategoryStatus::NotProvidedByServer => Self::NoContent,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }
}
