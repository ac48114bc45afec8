use crate::game::error::{GameError, GameResult};
use chess_engine::select_move;
use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::protocol::{AiRequest, AiResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// One queued request. `generation` is compared against the worker's
/// current generation before and after the computation.
struct AiJob {
    generation: u64,
    request: AiRequest,
    reply: oneshot::Sender<GameResult<AiResponse>>,
}

/// Handle to the background AI thread
///
/// Dropping the handle closes the queue and joins the thread.
pub struct AiWorker {
    jobs: Option<Sender<AiJob>>,
    generation: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl AiWorker {
    /// Spawn a worker seeded from the thread-local generator
    pub fn spawn() -> std::io::Result<Self> {
        Self::spawn_with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Spawn a worker with a fixed random source (deterministic easy moves)
    pub fn spawn_with_rng(rng: StdRng) -> std::io::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let generation = Arc::new(AtomicU64::new(0));
        let worker_generation = Arc::clone(&generation);

        let thread = thread::Builder::new()
            .name("ai-worker".to_string())
            .spawn(move || run_worker(rx, worker_generation, rng))?;

        info!("[AI] Worker thread started");
        Ok(Self {
            jobs: Some(tx),
            generation,
            thread: Some(thread),
        })
    }

    /// Queue a request and wait for the answer.
    ///
    /// Resolves to [`GameError::Cancelled`] when [`AiWorker::cancel_pending`]
    /// runs before the worker replies.
    pub async fn request(&self, request: AiRequest) -> GameResult<AiResponse> {
        let jobs = self.jobs.as_ref().ok_or_else(|| GameError::WorkerStopped {
            message: "queue closed".to_string(),
        })?;

        let (reply, answer) = oneshot::channel();
        let job = AiJob {
            generation: self.generation.load(Ordering::Acquire),
            request,
            reply,
        };
        jobs.send(job).map_err(|_| GameError::WorkerStopped {
            message: "worker thread exited".to_string(),
        })?;

        match answer.await {
            Ok(result) => result,
            // Worker dropped the reply: the job was cancelled
            Err(_) => Err(GameError::Cancelled),
        }
    }

    /// Invalidate every queued and running request
    pub fn cancel_pending(&self) {
        let previous = self.generation.fetch_add(1, Ordering::AcqRel);
        debug!("[AI] Cancelled requests of generation {}", previous);
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.cancel_pending();
        // Closing the sender ends the worker loop
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("[AI] Worker thread panicked");
            }
        }
    }
}

fn run_worker(jobs: Receiver<AiJob>, generation: Arc<AtomicU64>, mut rng: StdRng) {
    for job in jobs.iter() {
        if job.generation != generation.load(Ordering::Acquire) {
            debug!("[AI] Skipping cancelled request");
            continue;
        }

        let AiRequest {
            board,
            difficulty,
            current_color,
        } = job.request;
        let started = Instant::now();
        let result = select_move(&board, difficulty, current_color, &mut rng)
            .map(|chosen| AiResponse { chosen })
            .map_err(GameError::from);

        if job.generation != generation.load(Ordering::Acquire) {
            debug!("[AI] Discarding result of cancelled request");
            continue;
        }

        match &result {
            Ok(AiResponse { chosen: Some(mv) }) => info!(
                "[AI] {} ({}) chose {} in {:?}",
                current_color,
                difficulty,
                mv,
                started.elapsed()
            ),
            Ok(AiResponse { chosen: None }) => {
                info!("[AI] {} has no legal move", current_color)
            }
            Err(e) => warn!("[AI] Selection failed: {}", e),
        }

        // Requester may have stopped waiting
        let _ = job.reply.send(result);
    }
    debug!("[AI] Worker queue closed");
}
