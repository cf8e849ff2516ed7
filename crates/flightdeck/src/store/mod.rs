//! Flight storage for flightdeck.
//!
//! [`FlightStore`] is the ordered, in-memory collection and the five
//! operations on it. Request handlers never see it directly: they go through
//! the [`FlightRepository`] trait, which [`MemoryRepository`] implements by
//! putting a single lock around a `FlightStore`.

pub mod memory;

use tracing::debug;

use crate::error::{Error, Result};
use crate::flight::{Flight, FlightId};

pub use memory::MemoryRepository;

/// An insertion-ordered collection of flight records.
///
/// Nothing about the records is enforced: ids may repeat or be missing.
/// Lookups by id always resolve to the first match in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlightStore {
    flights: Vec<Flight>,
}

impl FlightStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unchanged and return the stored copy.
    pub fn create(&mut self, flight: Flight) -> &Flight {
        debug!(id = ?flight.id(), "Creating flight");
        self.flights.push(flight);
        &self.flights[self.flights.len() - 1]
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Flight] {
        &self.flights
    }

    /// The first record whose `id` equals `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record matches.
    pub fn get(&self, id: FlightId) -> Result<&Flight> {
        self.position(id).map(|index| &self.flights[index])
    }

    /// Merge `patch` into the first record matching `id`.
    ///
    /// The patch may overwrite `id` itself, after which the record is no
    /// longer reachable by its old id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record matches. The store is left
    /// untouched in that case.
    pub fn update(&mut self, id: FlightId, patch: Flight) -> Result<&Flight> {
        let index = self.position(id)?;
        debug!(%id, fields = patch.len(), "Updating flight");
        let flight = &mut self.flights[index];
        flight.merge(patch);
        Ok(&*flight)
    }

    /// Remove the first record matching `id`.
    ///
    /// The removed record comes back wrapped in a one-element `Vec`, which is
    /// the shape the HTTP layer returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record matches.
    pub fn delete(&mut self, id: FlightId) -> Result<Vec<Flight>> {
        let index = self.position(id)?;
        debug!(%id, index, "Deleting flight");
        Ok(vec![self.flights.remove(index)])
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    fn position(&self, id: FlightId) -> Result<usize> {
        self.flights
            .iter()
            .position(|flight| flight.has_id(id))
            .ok_or_else(|| {
                debug!(%id, "No flight matches id");
                Error::not_found(id)
            })
    }
}

/// Access to a flight collection, as used by the HTTP handlers.
///
/// Every method returns owned records so implementations are free to keep
/// the data anywhere. Semantics match the [`FlightStore`] method of the same
/// name.
#[async_trait::async_trait]
pub trait FlightRepository: Send + Sync + std::fmt::Debug {
    /// Append a record and return it.
    async fn create(&self, flight: Flight) -> Result<Flight>;

    /// Return every record in insertion order.
    async fn list(&self) -> Result<Vec<Flight>>;

    /// Return the first record matching `id`.
    async fn get(&self, id: FlightId) -> Result<Flight>;

    /// Merge `patch` into the first record matching `id` and return it.
    async fn update(&self, id: FlightId, patch: Flight) -> Result<Flight>;

    /// Remove the first record matching `id` and return it in a `Vec`.
    async fn delete(&self, id: FlightId) -> Result<Vec<Flight>>;
}
