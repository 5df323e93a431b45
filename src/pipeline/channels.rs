//! Bounded queues with per-queue put disciplines
//!
//! | discipline | put                       | used by                    |
//! |------------|---------------------------|----------------------------|
//! | lossy      | `try_send`, drop if full  | frames, commands           |
//! | blocking   | `send`, wait for room     | landmarks, display results |
//! | latest     | drain stale, then put     | status text                |

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

/// Queue item: a payload or the shutdown sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum Message<T> {
    Payload(T),
    Shutdown,
}

/// Bounded queue; a zero capacity is raised to 1
pub fn queue<T>(capacity: usize) -> (Sender<Message<T>>, Receiver<Message<T>>) {
    bounded(capacity.max(1))
}

/// Put without waiting. Returns false when the value was dropped.
pub fn send_lossy<T>(tx: &Sender<Message<T>>, value: T) -> bool {
    match tx.try_send(Message::Payload(value)) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
    }
}

/// Put and wait for room. Returns false when the receiver is gone.
pub fn send_blocking<T>(tx: &Sender<Message<T>>, value: T) -> bool {
    tx.send(Message::Payload(value)).is_ok()
}

/// Ask the consumer to stop. Waits for room; a vanished consumer is fine.
pub fn send_shutdown<T>(tx: &Sender<Message<T>>) {
    let _ = tx.send(Message::Shutdown);
}

/// Next payload, blocking. `None` on the sentinel or a disconnected queue.
pub fn recv_payload<T>(rx: &Receiver<Message<T>>) -> Option<T> {
    match rx.recv() {
        Ok(Message::Payload(value)) => Some(value),
        Ok(Message::Shutdown) | Err(_) => None,
    }
}

/// Non-blocking get used by the render loop
#[derive(Debug, PartialEq)]
pub enum Poll<T> {
    Ready(T),
    Empty,
    Closed,
}

pub fn poll_payload<T>(rx: &Receiver<Message<T>>) -> Poll<T> {
    match rx.try_recv() {
        Ok(Message::Payload(value)) => Poll::Ready(value),
        Ok(Message::Shutdown) | Err(TryRecvError::Disconnected) => Poll::Closed,
        Err(TryRecvError::Empty) => Poll::Empty,
    }
}

/// Single-producer sender that keeps only the newest value queued
pub struct LatestSender<T> {
    tx: Sender<Message<T>>,
    drain: Receiver<Message<T>>,
}

impl<T> LatestSender<T> {
    pub fn new(tx: Sender<Message<T>>, drain: Receiver<Message<T>>) -> Self {
        Self { tx, drain }
    }

    /// Discard anything unread, then queue `value`
    pub fn send(&self, value: T) -> bool {
        let mut stale = 0usize;
        while let Ok(msg) = self.drain.try_recv() {
            if let Message::Shutdown = msg {
                // Never swallow a sentinel someone else queued.
                let _ = self.tx.try_send(Message::Shutdown);
                return false;
            }
            stale += 1;
        }
        if stale > 0 {
            log::trace!("Discarded {stale} stale status message(s)");
        }
        send_lossy(&self.tx, value)
    }

    pub fn shutdown(&self) {
        send_shutdown(&self.tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn lossy_drops_newest_when_full() {
        let (tx, rx) = queue(1);
        assert!(send_lossy(&tx, 1));
        assert!(!send_lossy(&tx, 2));
        assert_eq!(recv_payload(&rx), Some(1));
        assert_eq!(poll_payload(&rx), Poll::Empty);
    }

    #[test]
    fn command_queue_keeps_order_and_drops_overflow() {
        let (tx, rx) = queue(5);
        let sent: Vec<bool> = (0..7).map(|i| send_lossy(&tx, i)).collect();
        assert_eq!(sent, [true, true, true, true, true, false, false]);
        drop(tx);
        let got: Vec<i32> = std::iter::from_fn(|| recv_payload(&rx)).collect();
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn latest_wins() {
        let (tx, rx) = queue(5);
        let latest = LatestSender::new(tx, rx.clone());
        for text in ["a", "b", "c"] {
            assert!(latest.send(text));
        }
        assert_eq!(poll_payload(&rx), Poll::Ready("c"));
        assert_eq!(poll_payload(&rx), Poll::Empty);
    }

    #[test]
    fn blocking_send_waits_for_consumer() {
        let (tx, rx) = queue(1);
        assert!(send_blocking(&tx, 1));

        let producer = thread::spawn(move || {
            let ok = send_blocking(&tx, 2);
            send_shutdown(&tx);
            ok
        });
        thread::sleep(Duration::from_millis(20));
        assert_eq!(recv_payload(&rx), Some(1));
        assert_eq!(recv_payload(&rx), Some(2));
        assert_eq!(recv_payload(&rx), None);
        assert!(producer.join().expect("producer"));
    }

    #[test]
    fn disconnect_is_shutdown() {
        let (tx, rx) = queue::<u8>(1);
        drop(rx);
        assert!(!send_blocking(&tx, 1));

        let (tx, rx) = queue::<u8>(1);
        drop(tx);
        assert_eq!(recv_payload(&rx), None);
        assert_eq!(poll_payload(&rx), Poll::Closed);
    }
}
