use std::fmt::Display;
use std::future::{ready, Future};

use serde::de::DeserializeOwned;

/// Application logic applied to each decoded message payload.
pub trait PayloadHandler<P> {
    type Error: Display;

    fn handle(&self, payload: P) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Adapts an async closure into a [`PayloadHandler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F> {
    HandlerFn { f }
}

/// Adapts a synchronous closure into a [`PayloadHandler`].
pub fn sync_handler_fn<F>(f: F) -> SyncHandlerFn<F> {
    SyncHandlerFn { f }
}

#[derive(Debug, Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

impl<P, F, Fut, E> PayloadHandler<P> for HandlerFn<F>
where
    F: Fn(P) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display,
{
    type Error = E;

    fn handle(&self, payload: P) -> impl Future<Output = Result<(), E>> + Send {
        (self.f)(payload)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SyncHandlerFn<F> {
    f: F,
}

impl<P, F, E> PayloadHandler<P> for SyncHandlerFn<F>
where
    F: Fn(P) -> Result<(), E>,
    E: Display + Send,
{
    type Error = E;

    fn handle(&self, payload: P) -> impl Future<Output = Result<(), E>> + Send {
        ready((self.f)(payload))
    }
}

pub fn decode_payload<P: DeserializeOwned>(body: &str) -> Result<P, serde_json::Error> {
    serde_json::from_str(body)
}
