//! In-memory mock client for testing code that talks to actors.
//!
//! `MockClient<T>` satisfies the same API as a live [`ResourceClient`] but is
//! backed by a queue of expectations instead of a running actor. Use it to
//! test client wrappers and actors-with-dependencies deterministically:
//! downstream failures (a closed actor, a persistence error) are injected
//! with `return_err`, which is hard to provoke against real actors.
//!
//! Two styles are available:
//!
//! - the fluent expectation API (`expect_get(..).return_ok(..)`, then
//!   `verify()` at the end of the test);
//! - the raw channel helpers ([`create_mock_client`] plus `expect_*`
//!   functions) when a test wants to inspect the request payload before
//!   answering.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// One expected request and its canned response.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

/// Mock client with ordered expectation tracking.
///
/// Expectations are consumed in FIFO order; a request arriving with no
/// matching expectation panics the mock task, which surfaces in the test as
/// a closed-channel error.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectation lock poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { respond_to, .. },
                        Some(Expectation::Get { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("mock received a request with no matching expectation");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client handle for the code under test.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .expect("mock expectation lock poisoned")
            .push_back(expectation);
    }

    /// Expects a `get` and answers with `value`.
    pub fn expect_get(&mut self) -> ResponseBuilder<'_, T, Option<T>> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Get { response },
        }
    }

    /// Expects a `create` and answers with an id.
    pub fn expect_create(&mut self) -> ResponseBuilder<'_, T, T::Id> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Create { response },
        }
    }

    /// Expects an `update` and answers with the updated entity.
    pub fn expect_update(&mut self) -> ResponseBuilder<'_, T, T> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Update { response },
        }
    }

    /// Expects a `delete`.
    pub fn expect_delete(&mut self) -> ResponseBuilder<'_, T, ()> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Delete { response },
        }
    }

    /// Expects a `list` and answers with a snapshot.
    pub fn expect_list(&mut self) -> ResponseBuilder<'_, T, Vec<T>> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::List { response },
        }
    }

    /// Expects an `action` and answers with its result.
    pub fn expect_action(&mut self) -> ResponseBuilder<'_, T, T::ActionResult> {
        ResponseBuilder {
            mock: self,
            wrap: |response| Expectation::Action { response },
        }
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .expect("mock expectation lock poisoned");
        if !exps.is_empty() {
            panic!("not all expectations were met: {} remaining", exps.len());
        }
    }
}

/// Finishes an expectation with either a success or an injected failure.
pub struct ResponseBuilder<'a, T: ActorEntity, R> {
    mock: &'a MockClient<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<'a, T: ActorEntity, R> ResponseBuilder<'a, T, R> {
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

// ---------------------------------------------------------------------------
// Raw channel helpers
// ---------------------------------------------------------------------------

/// Creates a client plus the receiver its requests arrive on.
///
/// Useful when the test wants to assert on the request payload itself before
/// responding, instead of queueing canned answers up front.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Receives the next request and asserts it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Receives the next request and asserts it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Receives the next request and asserts it is a `List`.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Filter,
    tokio::sync::oneshot::Sender<Result<Vec<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Receives the next request and asserts it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
