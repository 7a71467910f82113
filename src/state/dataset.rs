//! Process-lifetime dataset cache.
//!
//! The dataset is fetched and parsed at most once per process: the first
//! `get` installs a shared in-flight future, overlapping callers await the
//! same one, and the parsed structure is served from memory afterwards.
//! The raw JSON text is additionally mirrored into sessionStorage so a
//! same-session reload skips the network round trip.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use gloo_storage::Storage as _;

use crate::error::ViewerError;
use crate::model::Dataset;
use crate::util::asset_url;

/// sessionStorage key holding the raw dataset JSON.
pub const SESSION_CACHE_KEY: &str = "pokeatlas_data";

/// Source of the raw dataset text. Abstracted so the cache logic stays
/// testable off the browser.
pub trait DataFetcher {
    fn fetch(&self) -> LocalBoxFuture<'static, Result<String, ViewerError>>;
}

type LoadFuture = Shared<LocalBoxFuture<'static, Result<Rc<Dataset>, ViewerError>>>;

enum CacheState {
    Empty,
    Loading(LoadFuture),
    Ready(Rc<Dataset>),
}

pub struct DatasetStore {
    fetcher: Rc<dyn DataFetcher>,
    state: RefCell<CacheState>,
}

impl DatasetStore {
    pub fn new(fetcher: Rc<dyn DataFetcher>) -> Self {
        Self {
            fetcher,
            state: RefCell::new(CacheState::Empty),
        }
    }

    /// Return the cached dataset, joining an in-flight load when one
    /// exists. Fetch and parse failures propagate to every waiter and
    /// leave the cache empty; a waiter resuming after a newer load has
    /// been installed leaves that load untouched.
    pub async fn get(&self) -> Result<Rc<Dataset>, ViewerError> {
        let load = {
            let mut state = self.state.borrow_mut();
            match &*state {
                CacheState::Ready(data) => return Ok(data.clone()),
                CacheState::Loading(load) => load.clone(),
                CacheState::Empty => {
                    let fetcher = self.fetcher.clone();
                    let load = async move {
                        let raw = fetcher.fetch().await?;
                        let parsed: Dataset = serde_json::from_str(&raw)
                            .map_err(|e| ViewerError::Parse(e.to_string()))?;
                        Ok(Rc::new(parsed))
                    }
                    .boxed_local()
                    .shared();
                    *state = CacheState::Loading(load.clone());
                    load
                }
            }
        };

        let result = load.clone().await;
        let mut state = self.state.borrow_mut();
        // Only the future this call awaited may settle the state; anything
        // else means another waiter (or a retry) got there first.
        if let CacheState::Loading(current) = &*state {
            if current.ptr_eq(&load) {
                *state = match &result {
                    Ok(data) => CacheState::Ready(data.clone()),
                    Err(_) => CacheState::Empty,
                };
            }
        }
        result
    }
}

/// Cloneable handle for passing the store through component props;
/// equality is handle identity, which keeps re-renders cheap.
#[derive(Clone)]
pub struct StoreHandle(pub Rc<DatasetStore>);

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Production fetcher: one GET of `out/data.json`, with the raw text
/// cached in sessionStorage for the rest of the browsing session.
pub struct HttpFetcher;

impl DataFetcher for HttpFetcher {
    fn fetch(&self) -> LocalBoxFuture<'static, Result<String, ViewerError>> {
        async move {
            let storage = gloo_storage::SessionStorage::raw();
            if let Ok(Some(cached)) = storage.get_item(SESSION_CACHE_KEY) {
                return Ok(cached);
            }

            let url = asset_url("data.json");
            let response = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(|e| ViewerError::Network(format!("GET {url}: {e}")))?;
            if !response.ok() {
                return Err(ViewerError::Network(format!(
                    "GET {url}: status {}",
                    response.status()
                )));
            }
            let raw = response
                .text()
                .await
                .map_err(|e| ViewerError::Network(format!("GET {url}: {e}")))?;

            // A full session cache (quota) is not worth failing the load.
            let _ = storage.set_item(SESSION_CACHE_KEY, &raw);
            Ok(raw)
        }
        .boxed_local()
    }
}
