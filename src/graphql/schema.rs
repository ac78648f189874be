//! GraphQL schema definition with queries, mutations, and subscriptions
//!
//! Query and mutation roots are assembled from per-domain modules with
//! `MergedObject`. The database, auth service and event bus are injected as
//! schema data so resolvers receive them through the context.

use std::sync::Arc;

use async_graphql::{MergedObject, Schema};

use crate::db::Database;
use crate::services::{AuthService, EventBus};

use super::mutations::{AuthMutations, AuthorMutations, BookMutations};
use super::queries::{AuthorQueries, BookQueries, UserQueries};
use super::subscriptions::SubscriptionRoot;

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQueries, BookQueries, AuthorQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, BookMutations, AuthorMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth: AuthService, events: Arc<EventBus>) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(db)
    .data(auth)
    .data(events)
    .finish()
}
