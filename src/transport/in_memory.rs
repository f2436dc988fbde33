use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::codec::Frame;
use crate::transport::Transport;

type Queue = Arc<Mutex<VecDeque<Frame>>>;

/// In-process loopback; `pair()` returns the two connected ends.
///
/// The channel counts as closed once either end calls `close` or is dropped.
pub struct InMemoryTransport {
    recv_queue: Queue,
    send_queue: Queue,
    closed: Arc<AtomicBool>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        let closed = Arc::new(AtomicBool::new(false));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
                closed: closed.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
                closed,
            },
        )
    }

    fn peer_gone(&self) -> bool {
        self.closed.load(Ordering::SeqCst) || Arc::strong_count(&self.recv_queue) == 1
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, frame: Frame) -> anyhow::Result<()> {
        if self.peer_gone() {
            return Err(anyhow::anyhow!("Channel closed"));
        }
        self.send_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
            .push_back(frame);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Frame> {
        loop {
            let next = self
                .recv_queue
                .lock()
                .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
                .pop_front();
            if let Some(frame) = next {
                return Ok(frame);
            }
            if self.peer_gone() {
                return Err(anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for InMemoryTransport {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
