//! # Mock Collaborators
//!
//! Utilities for testing the booking core without spawning the real actors.
//!
//! Use [`create_mock_catalog`] or [`create_mock_reservations`] to get a client and the
//! receiving end of its channel, then answer requests with helpers like
//! [`expect_get_item`] or [`expect_insert`]. [`MockCatalog`] offers the same for the
//! catalog with a fluent expectation API.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

use super::{Response, StoreError};
use crate::catalog_actor::CatalogRequest;
use crate::clients::{CatalogClient, ReservationClient};
use crate::model::{Item, ItemId, Reservation, ReservationCreate};
use crate::reservation_actor::ReservationStoreRequest;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected catalog request and the canned answer to it.
enum Expectation {
    GetItem {
        id: ItemId,
        response: Result<Option<Item>, StoreError>,
    },
    SetAvailable {
        id: ItemId,
        response: Result<Item, StoreError>,
    },
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

fn lock(queue: &Queue) -> MutexGuard<'_, VecDeque<Expectation>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A catalog that answers from a queue of expectations, in order.
///
/// # Example
/// ```ignore
/// let mock = MockCatalog::new();
/// mock.expect_get_item(ItemId(1)).return_ok(Some(item));
///
/// let catalog = mock.client();
/// // Use catalog in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockCatalog {
    client: CatalogClient,
    expectations: Queue,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockCatalog {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CatalogRequest>(100);
        let expectations: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        CatalogRequest::Get { id, respond_to },
                        Some(Expectation::GetItem { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get_item called for an unexpected item");
                        let _ = respond_to.send(response);
                    }
                    (
                        CatalogRequest::SetAvailable { id, respond_to, .. },
                        Some(Expectation::SetAvailable { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "set_available called for an unexpected item");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected catalog request: {request:?}");
                    }
                }
            }
        });

        Self {
            client: CatalogClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CatalogClient {
        self.client.clone()
    }

    /// Expects a `get_item` lookup of `id`.
    pub fn expect_get_item(&self, id: ItemId) -> GetItemExpectationBuilder {
        GetItemExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `set_available` call on `id`.
    pub fn expect_set_available(&self, id: ItemId) -> SetAvailableExpectationBuilder {
        SetAvailableExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get_item` expectations.
pub struct GetItemExpectationBuilder {
    id: ItemId,
    expectations: Queue,
}

impl GetItemExpectationBuilder {
    pub fn return_ok(self, item: Option<Item>) {
        lock(&self.expectations).push_back(Expectation::GetItem {
            id: self.id,
            response: Ok(item),
        });
    }

    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back(Expectation::GetItem {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `set_available` expectations.
pub struct SetAvailableExpectationBuilder {
    id: ItemId,
    expectations: Queue,
}

impl SetAvailableExpectationBuilder {
    pub fn return_ok(self, item: Item) {
        lock(&self.expectations).push_back(Expectation::SetAvailable {
            id: self.id,
            response: Ok(item),
        });
    }

    pub fn return_err(self, error: StoreError) {
        lock(&self.expectations).push_back(Expectation::SetAvailable {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a catalog client whose requests land on the returned receiver.
///
/// The test plays the actor: it pulls each request off the receiver, asserts on it,
/// and answers through the carried response channel. That makes failures and slow
/// answers as easy to simulate as the happy path.
pub fn create_mock_catalog(
    buffer_size: usize,
) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Creates a reservation client whose requests land on the returned receiver.
pub fn create_mock_reservations(
    buffer_size: usize,
) -> (ReservationClient, mpsc::Receiver<ReservationStoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ReservationClient::new(sender), receiver)
}

/// Helper to verify that the next message is a catalog lookup.
pub async fn expect_get_item(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ItemId, Response<Option<Item>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an active-set read.
pub async fn expect_list_active(
    receiver: &mut mpsc::Receiver<ReservationStoreRequest>,
) -> Option<(ItemId, Response<Vec<Reservation>>)> {
    match receiver.recv().await {
        Some(ReservationStoreRequest::ListActiveForItem {
            item_id,
            respond_to,
        }) => Some((item_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an insert. Yields the record and
/// whether the insert was exclusive.
pub async fn expect_insert(
    receiver: &mut mpsc::Receiver<ReservationStoreRequest>,
) -> Option<(ReservationCreate, bool, Response<Reservation>)> {
    match receiver.recv().await {
        Some(ReservationStoreRequest::Insert {
            record,
            exclusive,
            respond_to,
        }) => Some((record, exclusive, respond_to)),
        _ => None,
    }
}
