use super::action::{Action, ActionKind};
use super::alert::{AlertReducer, AlertState};
use super::domain::Domain;
use super::reducer::{Reducer, Slice};
use super::resource::{ResourceReducer, ResourceSlice};
use super::spinner::{SpinnerReducer, SpinnerState};
use crate::models::{
    CaseCollection, CashCollection, Client, Court, CourtCase, Entity, Filing, HearingCalendar,
    Judge, RefType, TaskCalendar,
};

/// The whole state tree. `Default` is the initial state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub spinner: SpinnerState,
    pub alert: AlertState,
    pub court_cases: ResourceSlice<CourtCase>,
    pub clients: ResourceSlice<Client>,
    pub judges: ResourceSlice<Judge>,
    pub courts: ResourceSlice<Court>,
    pub filings: ResourceSlice<Filing>,
    pub hearing_calendars: ResourceSlice<HearingCalendar>,
    pub task_calendars: ResourceSlice<TaskCalendar>,
    pub case_collections: ResourceSlice<CaseCollection>,
    pub cash_collections: ResourceSlice<CashCollection>,
    pub case_types: ResourceSlice<RefType>,
    pub filing_types: ResourceSlice<RefType>,
    pub hearing_types: ResourceSlice<RefType>,
    pub task_types: ResourceSlice<RefType>,
    pub collection_methods: ResourceSlice<RefType>,
    pub component_statuses: ResourceSlice<RefType>,
}

impl Slice for AppState {}

impl AppState {
    /// Typed access to the slice `E` is stored in for `domain`.
    pub fn slice<E: Entity>(&self, domain: Domain) -> Option<&ResourceSlice<E>> {
        E::slice(self, domain)
    }
}

fn reduce_slice<E: Entity>(
    domain: Domain,
    state: ResourceSlice<E>,
    action: &Action,
) -> ResourceSlice<E> {
    ResourceReducer::new(domain).reduce(state, action)
}

/// Runs every slice reducer; `UserLogout` short-circuits to the initial state.
pub struct RootReducer;

impl Reducer for RootReducer {
    type State = AppState;

    fn reduce(&self, state: Self::State, action: &Action) -> Self::State {
        if action.kind == ActionKind::UserLogout {
            return AppState::default();
        }

        AppState {
            spinner: SpinnerReducer.reduce(state.spinner, action),
            alert: AlertReducer.reduce(state.alert, action),
            court_cases: reduce_slice(Domain::CourtCases, state.court_cases, action),
            clients: reduce_slice(Domain::Clients, state.clients, action),
            judges: reduce_slice(Domain::Judges, state.judges, action),
            courts: reduce_slice(Domain::Courts, state.courts, action),
            filings: reduce_slice(Domain::Filings, state.filings, action),
            hearing_calendars: reduce_slice(
                Domain::HearingCalendars,
                state.hearing_calendars,
                action,
            ),
            task_calendars: reduce_slice(Domain::TaskCalendars, state.task_calendars, action),
            case_collections: reduce_slice(
                Domain::CaseCollections,
                state.case_collections,
                action,
            ),
            cash_collections: reduce_slice(
                Domain::CashCollections,
                state.cash_collections,
                action,
            ),
            case_types: reduce_slice(Domain::CaseTypes, state.case_types, action),
            filing_types: reduce_slice(Domain::FilingTypes, state.filing_types, action),
            hearing_types: reduce_slice(Domain::HearingTypes, state.hearing_types, action),
            task_types: reduce_slice(Domain::TaskTypes, state.task_types, action),
            collection_methods: reduce_slice(
                Domain::CollectionMethods,
                state.collection_methods,
                action,
            ),
            component_statuses: reduce_slice(
                Domain::ComponentStatuses,
                state.component_statuses,
                action,
            ),
        }
    }
}
