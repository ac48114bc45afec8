//! Chess AI opponent
//!
//! Move selection scans every (origin, destination) pair of the position,
//! which is the only CPU-bound work in the client. It runs on a dedicated
//! thread behind a request/response boundary:
//!
//! 1. The caller snapshots the board into an [`AiRequest`](shared::protocol::AiRequest)
//! 2. The request is queued on the worker's channel
//! 3. The worker answers through a oneshot channel the caller awaits
//!
//! The live board is never shared with the worker.

pub mod worker;

pub use worker::AiWorker;
