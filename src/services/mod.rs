pub mod gemini;
pub mod model;
pub mod persona;
pub mod responder;
pub mod worker_pool;
