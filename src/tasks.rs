//! Background work for the UI thread
//!
//! Every operation spawns one Tokio task and posts exactly one [`AppEvent`]
//! back on the channel. The UI loop drains the channel each tick; workers
//! never touch `AppState` directly.

use crate::error::{DoctorError, Result};
use crate::request;
use crate::store::DefinitionStore;
use crate::types::{ApiDefinition, ApiResponse, FormMode, FormSubmission};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

/// Results delivered back to the UI thread
#[derive(Debug)]
pub enum AppEvent {
    DefinitionsListed(Result<Vec<String>>),
    DefinitionLoaded {
        name: String,
        result: Result<ApiDefinition>,
    },
    DefinitionSaved {
        name: String,
        mode: FormMode,
        result: Result<()>,
    },
    ResponseReceived {
        request_id: u64,
        name: String,
        result: Result<ApiResponse>,
    },
    ResponseSaved(Result<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct TaskRunner {
    store: Arc<DefinitionStore>,
    client: reqwest::Client,
    tx: UnboundedSender<AppEvent>,
}

impl TaskRunner {
    pub fn new(store: DefinitionStore) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            store: Arc::new(store),
            client: reqwest::Client::new(),
            tx,
        };
        (runner, rx)
    }

    pub fn store(&self) -> &DefinitionStore {
        &self.store
    }

    pub fn refresh_list(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = store.list();
            match &result {
                Ok(names) => tracing::debug!("listed {} definitions", names.len()),
                Err(e) => tracing::warn!("listing definitions failed: {e}"),
            }
            let _ = tx.send(AppEvent::DefinitionsListed(result));
        });
    }

    pub fn load(&self, name: String) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = store.load(&name);
            if let Err(e) = &result {
                tracing::warn!("loading {name} failed: {e}");
            }
            let _ = tx.send(AppEvent::DefinitionLoaded { name, result });
        });
    }

    pub fn save(&self, mode: FormMode, submission: FormSubmission) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let FormSubmission {
                name,
                help,
                req,
                url,
            } = submission;
            let result = store.save(&name, &help, &req, &url);
            if let Err(e) = &result {
                tracing::warn!("saving {name:?} failed: {e}");
            }
            let _ = tx.send(AppEvent::DefinitionSaved { name, mode, result });
        });
    }

    /// Re-read `name` from the store and dispatch it with `params`.
    ///
    /// The returned handle lets the caller abort a request it no longer wants.
    pub fn send(&self, request_id: u64, name: String, params: String) -> AbortHandle {
        let store = Arc::clone(&self.store);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = dispatch(store, client, name.clone(), params).await;
            if let Err(e) = &result {
                tracing::warn!("request #{request_id} failed: {e}");
            }
            let _ = tx.send(AppEvent::ResponseReceived {
                request_id,
                name,
                result,
            });
        });
        handle.abort_handle()
    }

    pub fn save_response(&self, path: PathBuf, text: String) {
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = std::fs::write(&path, text)
                .map(|_| path)
                .map_err(DoctorError::from);
            match &result {
                Ok(path) => tracing::info!("saved response to {}", path.display()),
                Err(e) => tracing::warn!("saving response failed: {e}"),
            }
            let _ = tx.send(AppEvent::ResponseSaved(result));
        });
    }
}

async fn dispatch(
    store: Arc<DefinitionStore>,
    client: reqwest::Client,
    name: String,
    params: String,
) -> Result<ApiResponse> {
    let definition = tokio::task::spawn_blocking(move || store.load(&name))
        .await
        .map_err(|e| DoctorError::Io(std::io::Error::other(e)))??;
    request::send(&client, &definition, &params).await
}
