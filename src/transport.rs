use std::thread;
use std::time::Duration;

use nng::options::{Options, RecvTimeout, SendTimeout};
use nng::{Error as NngError, Protocol, Socket};
use tokio::sync::{mpsc, oneshot};

use crate::error::KiCadError;

const TRANSPORT_QUEUE_CAPACITY: usize = 64;

/// Owns the REQ socket on a worker thread; async callers queue requests to it.
#[derive(Debug)]
pub(crate) struct Transport {
    request_tx: mpsc::Sender<TransportRequest>,
}

#[derive(Debug)]
struct TransportRequest {
    request_bytes: Vec<u8>,
    response_tx: oneshot::Sender<Result<Vec<u8>, KiCadError>>,
}

impl Transport {
    pub(crate) fn connect(socket_uri: &str, timeout: Duration) -> Result<Self, KiCadError> {
        let socket = configured_socket(socket_uri, timeout)?;
        let (request_tx, mut request_rx) =
            mpsc::channel::<TransportRequest>(TRANSPORT_QUEUE_CAPACITY);

        thread::Builder::new()
            .name(format!("kicad-refsize-ipc-{}", std::process::id()))
            .spawn(move || {
                while let Some(request) = request_rx.blocking_recv() {
                    let response = exchange(&socket, &request.request_bytes, timeout);
                    let _ = request.response_tx.send(response);
                }
                tracing::trace!("transport worker exiting; all clients dropped");
            })
            .map_err(|err| connection_error(socket_uri, err))?;

        tracing::debug!(socket_uri, ?timeout, "connected to KiCad IPC socket");
        Ok(Self { request_tx })
    }

    pub(crate) async fn roundtrip(&self, request_bytes: Vec<u8>) -> Result<Vec<u8>, KiCadError> {
        let (response_tx, response_rx) = oneshot::channel();

        self.request_tx
            .send(TransportRequest {
                request_bytes,
                response_tx,
            })
            .await
            .map_err(|_| KiCadError::TransportClosed)?;

        response_rx.await.map_err(|_| KiCadError::TransportClosed)?
    }
}

fn connection_error(socket_uri: &str, err: impl std::fmt::Display) -> KiCadError {
    KiCadError::Connection {
        socket_uri: socket_uri.to_string(),
        reason: err.to_string(),
    }
}

fn configured_socket(socket_uri: &str, timeout: Duration) -> Result<Socket, KiCadError> {
    let socket = Socket::new(Protocol::Req0).map_err(|err| connection_error(socket_uri, err))?;

    socket
        .set_opt::<SendTimeout>(Some(timeout))
        .map_err(|err| connection_error(socket_uri, err))?;
    socket
        .set_opt::<RecvTimeout>(Some(timeout))
        .map_err(|err| connection_error(socket_uri, err))?;
    socket
        .dial(socket_uri)
        .map_err(|err| connection_error(socket_uri, err))?;

    Ok(socket)
}

fn exchange(
    socket: &Socket,
    request_bytes: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, KiCadError> {
    tracing::trace!(bytes = request_bytes.len(), "sending IPC request");

    socket.send(request_bytes).map_err(|(_, err)| {
        map_nng_error(err, timeout, |reason| KiCadError::TransportSend { reason })
    })?;

    let response = socket.recv().map_err(|err| {
        map_nng_error(err, timeout, |reason| KiCadError::TransportReceive { reason })
    })?;

    tracing::trace!(bytes = response.as_slice().len(), "received IPC response");
    Ok(response.as_slice().to_vec())
}

fn map_nng_error(
    error: NngError,
    timeout: Duration,
    otherwise: impl FnOnce(String) -> KiCadError,
) -> KiCadError {
    if error == NngError::TimedOut {
        return KiCadError::Timeout { timeout };
    }

    otherwise(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nng::Error as NngError;

    use super::map_nng_error;
    use crate::error::KiCadError;

    #[test]
    fn timeouts_map_to_timeout_error() {
        let timeout = Duration::from_millis(250);
        let err = map_nng_error(NngError::TimedOut, timeout, |reason| {
            KiCadError::TransportSend { reason }
        });
        assert!(matches!(err, KiCadError::Timeout { timeout: t } if t == timeout));
    }

    #[test]
    fn other_errors_use_fallback_variant() {
        let err = map_nng_error(
            NngError::ConnectionRefused,
            Duration::from_secs(1),
            |reason| KiCadError::TransportReceive { reason },
        );
        assert!(matches!(err, KiCadError::TransportReceive { .. }));
    }
}
