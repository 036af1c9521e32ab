use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::adjust::{self, AdjustOptions, AdjustReport};
use crate::client::{ClientBuilder, KiCadClient};
use crate::error::KiCadError;
use crate::host::{BoardHandle, BoardHost, BoardTarget};
use crate::model::common::VersionInfo;

/// Synchronous facade over [`KiCadClient`] driven by a private current-thread runtime.
#[derive(Clone, Debug)]
pub struct KiCadClientBlocking {
    inner: KiCadClient,
    runtime: Arc<Runtime>,
}

#[derive(Clone, Debug, Default)]
pub struct KiCadClientBlockingBuilder {
    inner: ClientBuilder,
}

impl KiCadClientBlockingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn socket_path(mut self, socket_path: impl Into<String>) -> Self {
        self.inner = self.inner.socket_path(socket_path);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.token(token);
        self
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.inner = self.inner.client_name(client_name);
        self
    }

    pub fn connect(self) -> Result<KiCadClientBlocking, KiCadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|err| KiCadError::Runtime(err.to_string()))?;
        let inner = runtime.block_on(self.inner.connect())?;
        Ok(KiCadClientBlocking {
            inner,
            runtime: Arc::new(runtime),
        })
    }
}

impl KiCadClientBlocking {
    pub fn builder() -> KiCadClientBlockingBuilder {
        KiCadClientBlockingBuilder::new()
    }

    pub fn connect() -> Result<Self, KiCadError> {
        KiCadClientBlockingBuilder::new().connect()
    }

    pub fn ping(&self) -> Result<(), KiCadError> {
        self.runtime.block_on(self.inner.ping())
    }

    pub fn get_version(&self) -> Result<VersionInfo, KiCadError> {
        self.runtime.block_on(self.inner.get_version())
    }

    pub fn open_board(&self, target: &BoardTarget) -> Result<BoardHandle, KiCadError> {
        self.runtime.block_on(self.inner.open_board(target))
    }

    pub fn adjust_reference_labels(
        &self,
        board: &BoardHandle,
        options: AdjustOptions,
        out: &mut impl Write,
    ) -> Result<AdjustReport, KiCadError> {
        self.runtime.block_on(adjust::adjust_reference_labels(
            &self.inner,
            board,
            options,
            out,
        ))
    }
}
