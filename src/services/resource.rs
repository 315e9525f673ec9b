use crate::error::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fetch state owned by one view: the last loaded value, the last error
/// message and a cancellation token tied to the owner's lifetime.
///
/// Dropping the resource cancels anything still running under its token.
#[derive(Debug)]
pub struct Resource<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
    token: CancellationToken,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
            token: CancellationToken::new(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Dismiss the current error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Handle that cancels this resource's in-flight calls from elsewhere
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    async fn run<U, F>(&mut self, call: F) -> Option<Result<U>>
    where
        F: Future<Output = Result<U>>,
    {
        let token = self.token.clone();
        self.loading = true;
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = call => Some(result),
        };
        self.loading = false;
        outcome
    }

    /// Run a fetch. Failures are recorded as a message and clear the data;
    /// nothing propagates. A cancelled call leaves the state untouched.
    pub async fn load<F>(&mut self, call: F) -> Option<&T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.run(call).await {
            None => debug!("Load cancelled, state left unchanged"),
            Some(Ok(value)) => {
                self.data = Some(value);
                self.error = None;
            }
            Some(Err(e)) => {
                warn!("Load failed: {}", e);
                self.data = None;
                self.error = Some(e.to_string());
            }
        }
        self.data.as_ref()
    }

    /// Run a create/update action. The error message is recorded and the
    /// error is also returned so the caller can react to it.
    pub async fn mutate<U, F>(&mut self, call: F) -> Result<U>
    where
        F: Future<Output = Result<U>>,
    {
        match self.run(call).await {
            None => Err(Error::Cancelled),
            Some(Ok(value)) => {
                self.error = None;
                Ok(value)
            }
            Some(Err(e)) => {
                warn!("Action failed: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
