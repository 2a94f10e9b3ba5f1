use std::str::FromStr;

/// A resource family with its own store slice, endpoint and action prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    CourtCases,
    Clients,
    Judges,
    Courts,
    Filings,
    HearingCalendars,
    TaskCalendars,
    CaseCollections,
    CashCollections,
    CaseTypes,
    FilingTypes,
    HearingTypes,
    TaskTypes,
    CollectionMethods,
    ComponentStatuses,
}

impl Domain {
    pub const ALL: [Domain; 15] = [
        Domain::CourtCases,
        Domain::Clients,
        Domain::Judges,
        Domain::Courts,
        Domain::Filings,
        Domain::HearingCalendars,
        Domain::TaskCalendars,
        Domain::CaseCollections,
        Domain::CashCollections,
        Domain::CaseTypes,
        Domain::FilingTypes,
        Domain::HearingTypes,
        Domain::TaskTypes,
        Domain::CollectionMethods,
        Domain::ComponentStatuses,
    ];

    /// Endpoint key, response field and lowercase plural name.
    pub fn key(self) -> &'static str {
        match self {
            Domain::CourtCases => "court_cases",
            Domain::Clients => "clients",
            Domain::Judges => "judges",
            Domain::Courts => "courts",
            Domain::Filings => "filings",
            Domain::HearingCalendars => "hearing_calendars",
            Domain::TaskCalendars => "task_calendars",
            Domain::CaseCollections => "case_collections",
            Domain::CashCollections => "cash_collections",
            Domain::CaseTypes => "case_types",
            Domain::FilingTypes => "filing_types",
            Domain::HearingTypes => "hearing_types",
            Domain::TaskTypes => "task_types",
            Domain::CollectionMethods => "collection_methods",
            Domain::ComponentStatuses => "component_statuses",
        }
    }

    /// Action-type prefix for list reads and completion, e.g. `COURT_CASES`.
    pub fn plural(self) -> String {
        self.key().to_uppercase()
    }

    /// Action-type prefix for single-record mutations, e.g. `COURT_CASE`.
    pub fn singular(self) -> &'static str {
        match self {
            Domain::CourtCases => "COURT_CASE",
            Domain::Clients => "CLIENT",
            Domain::Judges => "JUDGE",
            Domain::Courts => "COURT",
            Domain::Filings => "FILING",
            Domain::HearingCalendars => "HEARING_CALENDAR",
            Domain::TaskCalendars => "TASK_CALENDAR",
            Domain::CaseCollections => "CASE_COLLECTION",
            Domain::CashCollections => "CASH_COLLECTION",
            Domain::CaseTypes => "CASE_TYPE",
            Domain::FilingTypes => "FILING_TYPE",
            Domain::HearingTypes => "HEARING_TYPE",
            Domain::TaskTypes => "TASK_TYPE",
            Domain::CollectionMethods => "COLLECTION_METHOD",
            Domain::ComponentStatuses => "COMPONENT_STATUS",
        }
    }

    /// Human name used in success banners.
    pub fn display_name(self) -> &'static str {
        match self {
            Domain::CourtCases => "Court Case",
            Domain::Clients => "Client",
            Domain::Judges => "Judge",
            Domain::Courts => "Court",
            Domain::Filings => "Filing",
            Domain::HearingCalendars => "Hearing Calendar",
            Domain::TaskCalendars => "Task Calendar",
            Domain::CaseCollections => "Case Collection",
            Domain::CashCollections => "Cash Collection",
            Domain::CaseTypes => "Case Type",
            Domain::FilingTypes => "Filing Type",
            Domain::HearingTypes => "Hearing Type",
            Domain::TaskTypes => "Task Type",
            Domain::CollectionMethods => "Collection Method",
            Domain::ComponentStatuses => "Component Status",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Domain {
    type Err = String;

    /// Accepts the key with `_` or `-` separators, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Domain::ALL
            .into_iter()
            .find(|d| d.key() == normalized)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}
