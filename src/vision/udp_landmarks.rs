use super::replay::parse_hands_message;
use super::LandmarkDetector;
use crate::clock::now_ms;
use crate::error::LandmarkError;
use crate::types::{Frame, HandObservation};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;

/// Hands from the most recent datagram and when it arrived
#[derive(Debug, Clone, Default)]
pub struct HandsSnapshot {
    pub hands: Vec<HandObservation>,
    pub received_ms: u64,
}

pub fn landmark_udp_addr_from_env() -> Option<SocketAddr> {
    let raw = std::env::var("GESTURE_LANDMARK_UDP_ADDR").ok()?;
    raw.parse::<SocketAddr>().ok()
}

/// Bind `bind_addr` and keep `storage` updated with the latest valid message.
/// Malformed datagrams are logged and skipped.
pub async fn spawn_udp_landmark_task(
    bind_addr: SocketAddr,
    storage: Arc<Mutex<Option<HandsSnapshot>>>,
) -> Result<()> {
    let sock = UdpSocket::bind(bind_addr).await?;
    log::info!("UDP landmark listener bound on {bind_addr}");

    tokio::spawn(async move {
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            let (len, src) = match sock.recv_from(&mut buf).await {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("UDP landmark recv error: {e}");
                    continue;
                }
            };

            let Ok(text) = std::str::from_utf8(&buf[..len]) else {
                log::warn!("Non UTF-8 landmark datagram from {src}");
                continue;
            };
            match parse_hands_message(text) {
                Ok(hands) => {
                    if let Ok(mut slot) = storage.lock() {
                        *slot = Some(HandsSnapshot {
                            hands,
                            received_ms: now_ms(),
                        });
                    }
                }
                Err(e) => log::warn!("Bad landmark datagram from {src}: {e}"),
            }
        }
    });

    Ok(())
}

/// Serves whatever the UDP feed last delivered, if it is recent enough
pub struct UdpLandmarkDetector {
    latest: Arc<Mutex<Option<HandsSnapshot>>>,
    max_age_ms: u64,
}

impl UdpLandmarkDetector {
    pub fn new(latest: Arc<Mutex<Option<HandsSnapshot>>>, max_age_ms: u64) -> Self {
        Self { latest, max_age_ms }
    }

    /// Start the listener on the current tokio runtime
    pub async fn bind(addr: SocketAddr, max_age_ms: u64) -> Result<Self> {
        let latest = Arc::new(Mutex::new(None));
        spawn_udp_landmark_task(addr, Arc::clone(&latest)).await?;
        Ok(Self::new(latest, max_age_ms))
    }
}

impl LandmarkDetector for UdpLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandObservation>, LandmarkError> {
        let snapshot = self.latest.lock().ok().and_then(|slot| slot.clone());
        Ok(match snapshot {
            Some(s) if frame.timestamp.saturating_sub(s.received_ms) <= self.max_age_ms => s.hands,
            _ => Vec::new(),
        })
    }
}
