//! GraphQL subscriptions for real-time catalog updates
//!
//! Subscriptions deliver push updates over WebSocket. Each stream is fed by
//! the event bus; dropping the stream (connection close) deregisters the
//! listener.

use std::sync::Arc;

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::services::{CatalogEvent, EventBus};

use super::helpers::book_record_to_graphql;
use super::types::Book;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Subscribe to books added to the catalog.
    ///
    /// Each delivered book runs its selection set independently, so the
    /// author reference is re-resolved per event.
    async fn book_added<'ctx>(&self, ctx: &Context<'ctx>) -> impl Stream<Item = Book> + 'ctx {
        let events = ctx.data_unchecked::<Arc<EventBus>>();
        let receiver = events.subscribe();

        BroadcastStream::new(receiver).filter_map(|result| {
            result.ok().map(|event| match event {
                CatalogEvent::BookAdded { book } => book_record_to_graphql(book),
            })
        })
    }
}
