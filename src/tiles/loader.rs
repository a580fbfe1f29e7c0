use crate::core::geo::TileCoord;
use crate::tiles::source::TileSource;
use crate::Result;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::sync::mpsc::Sender;
use std::thread;

/// Shared blocking HTTP client with a custom User-Agent so that public tile
/// hosts don't reject the request. Building the client once avoids the cost
/// of TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("cartographe/0.1")
        .build()
        .expect("failed to build reqwest blocking client")
});

/// Fetches tiles on detached background threads and sends the outcome back
/// over an `mpsc` channel.
///
/// There is no retry: a failure is reported over the channel like a success
/// so the layer can drop its in-flight bookkeeping, and the tile stays blank,
/// which is the rendering fallback for missing tiles anyway.
pub struct TileLoader {
    tx: Sender<(TileCoord, Result<Vec<u8>>)>,
}

impl TileLoader {
    /// Create a new tile loader given a sender to report finished downloads.
    pub fn new(tx: Sender<(TileCoord, Result<Vec<u8>>)>) -> Self {
        Self { tx }
    }

    /// Start downloading the specified tile. The download occurs on a
    /// detached thread so that it does not block the caller; the sender
    /// receives the outcome either way. Dropping the receiving side discards
    /// any still-pending downloads.
    pub fn start_download(&self, source: &dyn TileSource, coord: TileCoord) {
        let url = source.url(coord);
        let tx = self.tx.clone();

        thread::spawn(move || {
            log::debug!("fetch tile {:?} from {}", coord, url);
            let result: Result<Vec<u8>> = (|| {
                let resp = HTTP_CLIENT.get(&url).send()?;
                if !resp.status().is_success() {
                    return Err(format!("HTTP {}", resp.status()).into());
                }
                Ok(resp.bytes()?.to_vec())
            })();

            match &result {
                Ok(data) => log::debug!("downloaded tile {:?} ({} bytes)", coord, data.len()),
                Err(e) => log::warn!("tile {:?} fetch failed, leaving blank: {}", coord, e),
            }
            let _ = tx.send((coord, result));
        });
    }

    /// Reports an outcome without touching the network
    #[cfg(test)]
    pub(crate) fn report(&self, coord: TileCoord, result: Result<Vec<u8>>) {
        let _ = self.tx.send((coord, result));
    }
}
