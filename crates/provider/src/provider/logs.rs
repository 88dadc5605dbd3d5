//! Logs — read-only provider exposing the log table to other processes.
//!
//! Every query is routed through the [`RouteTable`] onto one of the two
//! [`LogStore`] reads. Writes and type lookups are refused outright; the
//! provider only lets outside observers read the log history.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::notify::ChangeNotifier;
use crate::provider::error::{Operation, ProviderError};
use crate::route::{RouteCode, RouteTable};
use crate::store::{LogCursor, LogStore};
use crate::uri::ContentUri;

/// Column → value pairs of a write request.
pub type ContentValues = BTreeMap<String, serde_json::Value>;

/// Optional query refinements. Accepted and logged, never applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub projection: Option<Vec<String>>,
    pub selection: Option<String>,
    pub selection_args: Option<Vec<String>>,
    pub sort_order: Option<String>,
}

pub struct LogsProvider {
    routes: Arc<RouteTable>,
    store: Option<Arc<dyn LogStore>>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl LogsProvider {
    pub fn new(
        routes: Arc<RouteTable>,
        store: Arc<dyn LogStore>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            routes,
            store: Some(store),
            notifier,
        }
    }

    /// A provider that was created before its store was available. Every
    /// query fails with [`ProviderError::ContextUnavailable`].
    pub fn without_store(routes: Arc<RouteTable>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            routes,
            store: None,
            notifier,
        }
    }

    /// Nothing to set up; the provider is always ready.
    pub fn on_create(&self) -> bool {
        debug!(routes = self.routes.len(), "logs provider created");
        true
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Query the log table.
    ///
    /// `{authority}/logs` selects every row, `{authority}/logs/<id>` selects
    /// the row with that id. The returned cursor is tagged with `uri`, and
    /// `uri` is registered with the notifier so observers learn about later
    /// changes. `Ok(None)` means the store had no data source to read from.
    pub fn query(&self, uri: &ContentUri, args: &QueryArgs) -> Result<Option<LogCursor>, ProviderError> {
        let store = self.store.as_ref().ok_or(ProviderError::ContextUnavailable)?;

        let code = self.routes.match_uri(uri).ok_or_else(|| ProviderError::UnrecognizedRoute {
            uri: uri.to_string(),
        })?;

        debug!(
            %uri,
            route = code.as_str(),
            projection = ?args.projection,
            selection = ?args.selection,
            sort_order = ?args.sort_order,
            "dispatching log query"
        );

        let cursor = match code {
            RouteCode::Logs => store.select_all_logs()?,
            RouteCode::LogId => {
                let id = uri.parse_id().ok_or_else(|| ProviderError::UnrecognizedRoute {
                    uri: uri.to_string(),
                })?;
                store.select_log_by_id(id)?
            }
        };

        Ok(cursor.map(|mut cursor| {
            cursor.set_notification_uri(uri.clone());
            self.notifier.register(uri);
            cursor
        }))
    }

    pub fn get_type(&self, uri: &ContentUri) -> Result<String, ProviderError> {
        Err(Self::reject(Operation::GetType, uri))
    }

    pub fn insert(&self, uri: &ContentUri, _values: &ContentValues) -> Result<ContentUri, ProviderError> {
        Err(Self::reject(Operation::Insert, uri))
    }

    pub fn delete(
        &self,
        uri: &ContentUri,
        _selection: Option<&str>,
        _selection_args: &[String],
    ) -> Result<usize, ProviderError> {
        Err(Self::reject(Operation::Delete, uri))
    }

    pub fn update(
        &self,
        uri: &ContentUri,
        _values: &ContentValues,
        _selection: Option<&str>,
        _selection_args: &[String],
    ) -> Result<usize, ProviderError> {
        Err(Self::reject(Operation::Update, uri))
    }

    fn reject(operation: Operation, uri: &ContentUri) -> ProviderError {
        warn!(%uri, operation = operation.as_str(), "rejected write on read-only provider");
        ProviderError::OperationNotSupported { operation }
    }
}
