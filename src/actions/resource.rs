//! Typed handles pairing a domain with the record type it stores.

use std::marker::PhantomData;

use crate::models::{
    CaseCollection, CashCollection, Client, Court, CourtCase, Entity, Filing, HearingCalendar,
    Judge, RefType, TaskCalendar,
};
use crate::store::Domain;

pub struct Resource<E> {
    domain: Domain,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Resource<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Resource<E> {}

impl<E> std::fmt::Debug for Resource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({})", self.domain)
    }
}

impl<E: Entity> Resource<E> {
    pub const fn new(domain: Domain) -> Self {
        Self {
            domain,
            _entity: PhantomData,
        }
    }

    pub fn domain(self) -> Domain {
        self.domain
    }
}

pub const COURT_CASES: Resource<CourtCase> = Resource::new(Domain::CourtCases);
pub const CLIENTS: Resource<Client> = Resource::new(Domain::Clients);
pub const JUDGES: Resource<Judge> = Resource::new(Domain::Judges);
pub const COURTS: Resource<Court> = Resource::new(Domain::Courts);
pub const FILINGS: Resource<Filing> = Resource::new(Domain::Filings);
pub const HEARING_CALENDARS: Resource<HearingCalendar> = Resource::new(Domain::HearingCalendars);
pub const TASK_CALENDARS: Resource<TaskCalendar> = Resource::new(Domain::TaskCalendars);
pub const CASE_COLLECTIONS: Resource<CaseCollection> = Resource::new(Domain::CaseCollections);
pub const CASH_COLLECTIONS: Resource<CashCollection> = Resource::new(Domain::CashCollections);
pub const CASE_TYPES: Resource<RefType> = Resource::new(Domain::CaseTypes);
pub const FILING_TYPES: Resource<RefType> = Resource::new(Domain::FilingTypes);
pub const HEARING_TYPES: Resource<RefType> = Resource::new(Domain::HearingTypes);
pub const TASK_TYPES: Resource<RefType> = Resource::new(Domain::TaskTypes);
pub const COLLECTION_METHODS: Resource<RefType> = Resource::new(Domain::CollectionMethods);
pub const COMPONENT_STATUSES: Resource<RefType> = Resource::new(Domain::ComponentStatuses);
